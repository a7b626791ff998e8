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

/// Print the last review date and interval of every reviewed card, for
/// plotting.
pub fn print_trend(directory: Option<String>) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let deck = coll.store.load()?;
    let json = serde_json::to_string_pretty(&deck.trend())?;
    println!("{json}");
    Ok(())
}
