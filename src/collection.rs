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

use std::env::current_dir;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::ErrorKind;
use crate::error::Fallible;
use crate::error::fail;
use crate::store::CardStore;
use crate::store::seed_deck;
use crate::types::deck::Deck;
use crate::types::timestamp::Timestamp;

/// A deck directory: its config and the store for its record file.
pub struct Collection {
    pub directory: PathBuf,
    pub store: CardStore,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };
        let config = Config::load(&directory)?;
        let store = CardStore::new(directory.join(config.deck_file));
        Ok(Self { directory, store })
    }

    /// Load the deck, falling back to the seed deck when there is no record
    /// file or when it is corrupt. A corrupt file is moved aside first. The
    /// notice describes the fallback and is meant to be shown to the user.
    pub fn load_or_reseed(&self) -> Fallible<Loaded> {
        if !self.store.exists() {
            let notice = format!(
                "no record file at {:?}, starting from the default deck.",
                self.store.path()
            );
            log::debug!("{notice}");
            return Ok(Loaded {
                deck: seed_deck(Timestamp::now()),
                notice: Some(notice),
            });
        }
        match self.store.load() {
            Ok(deck) => Ok(Loaded { deck, notice: None }),
            Err(e) if e.kind() == ErrorKind::CorruptData => {
                let moved_to = self.store.quarantine()?;
                let notice = format!(
                    "{}; moved to {moved_to:?}, starting from the default deck.",
                    e.message()
                );
                log::debug!("{notice}");
                Ok(Loaded {
                    deck: seed_deck(Timestamp::now()),
                    notice: Some(notice),
                })
            }
            Err(e) => Err(e),
        }
    }
}

/// A loaded deck, and a warning if it is not the one on disk.
pub struct Loaded {
    pub deck: Deck,
    pub notice: Option<String>,
}
