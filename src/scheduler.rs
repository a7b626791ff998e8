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

//! SM-2 style scheduling: every rating moves the ease factor, and the next
//! interval is the current one scaled by the new ease and a per-rating
//! multiplier.

use crate::types::card::Card;
use crate::types::card::ReviewEntry;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

/// The minimum review interval in days.
const MIN_INTERVAL: u32 = 1;

/// The maximum review interval in days.
const MAX_INTERVAL: u32 = 36_500;

/// `MIN_EASE` in hundredths.
const MIN_EASE_HUNDREDTHS: u64 = 130;

/// The state a card would have after a review.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Parameters {
    pub ease_factor: f64,
    pub interval: u32,
}

/// Compute a card's next ease factor and interval without touching it.
///
/// The arithmetic is done in fixed point, ease in hundredths and the
/// multiplier in tenths, so that a product ending in exactly .5 rounds up.
pub fn preview(card: &Card, quality: Quality) -> Parameters {
    let adjustment = quality.adjustment();
    let ease = to_hundredths(card.ease_factor())
        .saturating_add(adjustment.ease_delta)
        .max(MIN_EASE_HUNDREDTHS);
    let scaled = u64::from(card.interval())
        .saturating_mul(ease)
        .saturating_mul(adjustment.interval_multiplier);
    // Hundredths times tenths: divide by 1000, ties up.
    let interval = scaled.saturating_add(500) / 1000;
    let interval = interval.clamp(u64::from(MIN_INTERVAL), u64::from(MAX_INTERVAL)) as u32;
    Parameters {
        ease_factor: ease as f64 / 100.0,
        interval,
    }
}

/// Apply a review to a card: reschedule it relative to `now` and record the
/// rating in its history.
pub fn update(card: &mut Card, quality: Quality, now: Timestamp) {
    let Parameters {
        ease_factor,
        interval,
    } = preview(card, quality);
    log::debug!(
        "{:?} {} E={:.2}->{:.2} I={}d->{}d",
        card.front,
        quality,
        card.ease_factor,
        ease_factor,
        card.interval,
        interval
    );
    card.ease_factor = ease_factor;
    card.interval = interval;
    card.next_review = now.plus_days(interval);
    card.history.push(ReviewEntry {
        date: now.local_date(),
        quality,
    });
}

/// An ease factor in hundredths. Stored values that carry more digits are
/// rounded to two decimals.
fn to_hundredths(ease_factor: f64) -> u64 {
    if ease_factor.is_nan() || ease_factor <= 0.0 {
        0
    } else {
        // Saturates for values beyond u64.
        (ease_factor * 100.0).round() as u64
    }
}
