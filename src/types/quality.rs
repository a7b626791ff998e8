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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorKind;
use crate::error::ErrorReport;

/// The reviewer's self-assessed recall strength.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Quality {
    Forgot,
    Hard,
    Normal,
    Easy,
}

/// How a rating moves a card's scheduling state. Both values are fixed
/// point so that the scheduler can round exactly.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Adjustment {
    /// Added to the ease factor before flooring, in hundredths.
    pub ease_delta: u64,
    /// Applied to the interval on top of the new ease factor, in tenths.
    pub interval_multiplier: u64,
}

/// Indexed by `Quality::ordinal`.
const ADJUSTMENTS: [Adjustment; 4] = [
    Adjustment {
        ease_delta: 0,
        interval_multiplier: 8,
    },
    Adjustment {
        ease_delta: 40,
        interval_multiplier: 9,
    },
    Adjustment {
        ease_delta: 60,
        interval_multiplier: 11,
    },
    Adjustment {
        ease_delta: 100,
        interval_multiplier: 13,
    },
];

impl Quality {
    pub const ALL: [Quality; 4] = [Quality::Forgot, Quality::Hard, Quality::Normal, Quality::Easy];

    pub fn ordinal(self) -> u8 {
        match self {
            Quality::Forgot => 0,
            Quality::Hard => 1,
            Quality::Normal => 2,
            Quality::Easy => 3,
        }
    }

    pub fn adjustment(self) -> Adjustment {
        ADJUSTMENTS[self.ordinal() as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Forgot => "forgot",
            Quality::Hard => "hard",
            Quality::Normal => "normal",
            Quality::Easy => "easy",
        }
    }
}

impl TryFrom<u8> for Quality {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Quality::Forgot),
            1 => Ok(Quality::Hard),
            2 => Ok(Quality::Normal),
            3 => Ok(Quality::Easy),
            _ => Err(ErrorReport::with_kind(
                ErrorKind::InvalidRating,
                format!("invalid rating {value}, expected 0 to 3"),
            )),
        }
    }
}

impl From<Quality> for u8 {
    fn from(value: Quality) -> Self {
        value.ordinal()
    }
}

impl Display for Quality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
