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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;

/// The name of the optional config file in a deck directory.
pub const CONFIG_FILE: &str = "memforge.toml";

const DEFAULT_DECK_FILE: &str = "flashcards.json";

#[derive(Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The record file, relative to the deck directory.
    #[serde(default = "default_deck_file")]
    pub deck_file: String,
}

fn default_deck_file() -> String {
    DEFAULT_DECK_FILE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            deck_file: default_deck_file(),
        }
    }
}

impl Config {
    /// Read the config file in `directory`, or the defaults if there is
    /// none.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        log::debug!("Reading config from {path:?}");
        let content = read_to_string(path)?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Fallible<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_defaults_without_file() -> Fallible<()> {
        let dir = tempdir()?;
        assert_eq!(Config::load(dir.path())?, Config::default());
        assert_eq!(Config::default().deck_file, "flashcards.json");
        Ok(())
    }

    #[test]
    fn test_deck_file() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join(CONFIG_FILE), "deck_file = \"spanish.json\"\n")?;
        assert_eq!(Config::load(dir.path())?.deck_file, "spanish.json");
        Ok(())
    }

    #[test]
    fn test_empty_file() -> Fallible<()> {
        assert_eq!(Config::parse("")?, Config::default());
        Ok(())
    }

    #[test]
    fn test_unknown_key() {
        assert!(Config::parse("colour = \"blue\"").is_err());
    }
}
