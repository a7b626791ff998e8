// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::collection::Collection;
use crate::error::Fallible;

/// Validate the record file without changing it.
pub fn check_collection(directory: Option<String>) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let deck = coll.store.load()?;
    log::debug!("{} cards in {:?}", deck.len(), coll.store.path());
    println!("ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_non_existent_directory() {
        assert!(check_collection(Some("./derpherp".to_string())).is_err());
    }

    #[test]
    fn test_directory_without_records() -> Fallible<()> {
        let dir = tempdir()?;
        check_collection(Some(dir.path().display().to_string()))?;
        Ok(())
    }

    #[test]
    fn test_corrupt_records() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join("flashcards.json"), "[1]")?;
        assert!(check_collection(Some(dir.path().display().to_string())).is_err());
        // Checking never moves the file.
        assert!(dir.path().join("flashcards.json").exists());
        Ok(())
    }
}
