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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::types::deck::Deck;
use crate::types::timestamp::Timestamp;

pub fn print_deck_stats(directory: Option<String>) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let deck = coll.store.load()?;
    let stats = deck_stats(&deck, Timestamp::now());
    let stats_json = serde_json::to_string_pretty(&stats)?;
    println!("{stats_json}");
    Ok(())
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    card_count: usize,
    due_count: usize,
    reviewed_card_count: usize,
    today_review_count: usize,
}

fn deck_stats(deck: &Deck, now: Timestamp) -> Stats {
    Stats {
        card_count: deck.len(),
        due_count: deck.due(now).count(),
        reviewed_card_count: deck
            .cards()
            .iter()
            .filter(|card| card.review_count() > 0)
            .count(),
        today_review_count: deck.reviews_on(now.local_date()),
    }
}
