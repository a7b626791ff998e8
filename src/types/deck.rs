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

use serde::Serialize;

use crate::types::card::Card;
use crate::types::date::Date;
use crate::types::timestamp::Timestamp;

/// A stable handle to a card: its position in the deck.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CardId(usize);

impl CardId {
    #[cfg(test)]
    pub fn index(self) -> usize {
        self.0
    }
}

/// An ordered collection of cards. Cards are never removed, so a `CardId`
/// stays valid for the lifetime of the deck.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Deck {
    cards: Vec<Card>,
}

/// A point on the interval trend chart.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub last_review_date: Date,
    pub interval: u32,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CardId, &Card)> {
        self.cards
            .iter()
            .enumerate()
            .map(|(index, card)| (CardId(index), card))
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The cards due at `now`, in deck order.
    pub fn due(&self, now: Timestamp) -> impl Iterator<Item = CardId> {
        self.iter()
            .filter(move |(_, card)| card.is_due(now))
            .map(|(id, _)| id)
    }

    /// The first card due at `now`. Overdue cards get no priority over
    /// cards that just became due.
    pub fn first_due(&self, now: Timestamp) -> Option<CardId> {
        self.due(now).next()
    }

    /// The earliest time any card becomes due.
    pub fn next_review(&self) -> Option<Timestamp> {
        self.cards.iter().map(|card| card.next_review()).min()
    }

    /// The last review date and current interval of every card that has
    /// been reviewed at least once.
    pub fn trend(&self) -> Vec<TrendPoint> {
        self.cards
            .iter()
            .filter_map(|card| {
                card.last_reviewed_on().map(|last_review_date| TrendPoint {
                    last_review_date,
                    interval: card.interval(),
                })
            })
            .collect()
    }

    /// How many reviews were recorded on `date`.
    pub fn reviews_on(&self, date: Date) -> usize {
        self.cards
            .iter()
            .flat_map(|card| card.history().iter())
            .filter(|entry| entry.date == date)
            .count()
    }
}
