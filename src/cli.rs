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

use clap::Parser;

use crate::cmd::check::check_collection;
use crate::cmd::drill::drill;
use crate::cmd::stats::print_deck_stats;
use crate::cmd::trend::print_trend;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Review the cards that are due.
    Drill {
        /// Path to the deck directory. Defaults to the current directory.
        directory: Option<String>,
    },
    /// Check that the record file is well-formed.
    Check {
        /// Path to the deck directory. Defaults to the current directory.
        directory: Option<String>,
    },
    /// Print deck statistics as JSON.
    Stats {
        /// Path to the deck directory. Defaults to the current directory.
        directory: Option<String>,
    },
    /// Print each reviewed card's last review date and interval as JSON.
    Trend {
        /// Path to the deck directory. Defaults to the current directory.
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill { directory } => drill(directory),
        Command::Check { directory } => check_collection(directory),
        Command::Stats { directory } => print_deck_stats(directory),
        Command::Trend { directory } => print_trend(directory),
    }
}
