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

use crate::types::date::Date;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

/// The ease factor of a freshly seeded card.
pub const INITIAL_EASE: f64 = 2.5;

/// The interval, in days, of a freshly seeded card.
pub const INITIAL_INTERVAL: u32 = 1;

/// The lowest ease factor a card can have.
pub const MIN_EASE: f64 = 1.3;

/// One entry in a card's review history.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ReviewEntry {
    pub date: Date,
    pub quality: Quality,
}

/// A fact to memorize, and its scheduling state.
#[derive(Clone, PartialEq, Debug)]
pub struct Card {
    pub(crate) front: String,
    pub(crate) back: String,
    /// Days until the next review. Always at least one.
    pub(crate) interval: u32,
    /// Always at least `MIN_EASE`.
    pub(crate) ease_factor: f64,
    pub(crate) next_review: Timestamp,
    /// Append-only, oldest first. Its length is the review count.
    pub(crate) history: Vec<ReviewEntry>,
}

/// The part of a card the reviewer gets to see.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CardFace<'a> {
    pub front: &'a str,
    pub back: &'a str,
}

impl Card {
    /// A card that has never been reviewed, due at `created_at`.
    pub fn new(front: impl Into<String>, back: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            interval: INITIAL_INTERVAL,
            ease_factor: INITIAL_EASE,
            next_review: created_at,
            history: Vec::new(),
        }
    }

    pub fn face(&self) -> CardFace<'_> {
        CardFace {
            front: &self.front,
            back: &self.back,
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn ease_factor(&self) -> f64 {
        self.ease_factor
    }

    pub fn next_review(&self) -> Timestamp {
        self.next_review
    }

    pub fn review_count(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &[ReviewEntry] {
        &self.history
    }

    pub fn last_reviewed_on(&self) -> Option<Date> {
        self.history.last().map(|entry| entry.date)
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review <= now
    }
}
