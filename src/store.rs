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

use std::fs::File;
use std::fs::rename;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::ErrorKind as IoErrorKind;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use serde::Deserialize;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::card::Card;
use crate::types::card::MIN_EASE;
use crate::types::card::ReviewEntry;
use crate::types::date::Date;
use crate::types::deck::Deck;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

/// The deck used when no record file exists yet.
static DEFAULT_SEED: [(&str, &str); 2] = [
    ("What is Python's GIL?", "The Global Interpreter Lock"),
    (
        "What does @staticmethod do?",
        "Declares a static method, which takes no instance argument",
    ),
];

/// Owns the JSON record file a deck is persisted to.
pub struct CardStore {
    path: PathBuf,
}

/// The persisted form of a card.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CardRecord {
    front: String,
    back: String,
    interval: u32,
    ease_factor: f64,
    next_review: Timestamp,
    review_count: usize,
    history: Vec<(Date, Quality)>,
}

impl CardStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the deck from disk. If there is no record file, returns the
    /// default seed deck. A record file that fails validation is an error,
    /// never replaced behind the caller's back.
    pub fn load(&self) -> Fallible<Deck> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                log::warn!("No record file at {:?}, using the default deck.", self.path);
                return Ok(seed_deck(Timestamp::now()));
            }
            Err(e) => return Err(e.into()),
        };
        log::debug!("Loading deck from {:?}...", self.path);
        let start = Instant::now();
        let records: Vec<CardRecord> = serde_json::from_reader(BufReader::new(file))?;
        let cards = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                record_to_card(record).map_err(|e| {
                    ErrorReport::corrupt(format!("card {index} in {:?}: {}", self.path, e.message()))
                })
            })
            .collect::<Fallible<Vec<Card>>>()?;
        let duration = start.elapsed().as_millis();
        log::debug!("Loaded {} cards in {duration}ms.", cards.len());
        Ok(Deck::new(cards))
    }

    /// Write every card to disk. The new contents go to a temporary file in
    /// the same directory, which then replaces the record file, so a crash
    /// mid-write leaves the old file intact.
    pub fn save(&self, deck: &Deck) -> Fallible<()> {
        let records: Vec<CardRecord> = deck.cards().iter().map(card_to_record).collect();
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(directory)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, &records)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;
        log::debug!("Saved {} cards to {:?}.", records.len(), self.path);
        Ok(())
    }

    /// Move the record file aside so a fresh deck can be saved without
    /// destroying the old data. Earlier quarantined files are kept: the
    /// first free name of `<name>.corrupt`, `<name>.corrupt.1`, ... is used.
    /// Returns where the file went.
    pub fn quarantine(&self) -> Fallible<PathBuf> {
        let target = (0..)
            .map(|n| {
                let mut name = self.path.as_os_str().to_owned();
                name.push(".corrupt");
                if n > 0 {
                    name.push(format!(".{n}"));
                }
                PathBuf::from(name)
            })
            .find(|candidate| !candidate.exists())
            .ok_or_else(|| ErrorReport::new("no free name to quarantine the record file"))?;
        rename(&self.path, &target)?;
        Ok(target)
    }
}

/// The default seed deck, every card due at `now`.
pub fn seed_deck(now: Timestamp) -> Deck {
    let cards = DEFAULT_SEED
        .iter()
        .map(|(front, back)| Card::new(*front, *back, now))
        .collect();
    Deck::new(cards)
}

fn record_to_card(record: CardRecord) -> Fallible<Card> {
    if record.interval < 1 {
        return Err(ErrorReport::corrupt(format!(
            "interval must be at least 1, got {}",
            record.interval
        )));
    }
    if !record.ease_factor.is_finite() || record.ease_factor < MIN_EASE {
        return Err(ErrorReport::corrupt(format!(
            "ease factor must be at least {MIN_EASE}, got {}",
            record.ease_factor
        )));
    }
    if record.review_count != record.history.len() {
        return Err(ErrorReport::corrupt(format!(
            "review count is {} but history has {} entries",
            record.review_count,
            record.history.len()
        )));
    }
    Ok(Card {
        front: record.front,
        back: record.back,
        interval: record.interval,
        ease_factor: record.ease_factor,
        next_review: record.next_review,
        history: record
            .history
            .into_iter()
            .map(|(date, quality)| ReviewEntry { date, quality })
            .collect(),
    })
}

fn card_to_record(card: &Card) -> CardRecord {
    CardRecord {
        front: card.front.clone(),
        back: card.back.clone(),
        interval: card.interval,
        ease_factor: card.ease_factor,
        next_review: card.next_review,
        review_count: card.review_count(),
        history: card
            .history
            .iter()
            .map(|entry| (entry.date, entry.quality))
            .collect(),
    }
}
