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

use std::io::BufRead;
use std::io::Write;
use std::io::stderr;
use std::io::stdin;
use std::io::stdout;

use crate::collection::Collection;
use crate::error::ErrorKind;
use crate::error::Fallible;
use crate::scheduler::preview;
use crate::session::SessionController;
use crate::session::SessionState;
use crate::types::quality::Quality;

const INVALID_INPUT: &str = "Invalid input. Please enter a number between 0 and 3.";

pub fn drill(directory: Option<String>) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    log::debug!("Drilling in {:?}.", coll.directory);
    let loaded = coll.load_or_reseed()?;
    warn(loaded.notice.as_deref(), &mut stderr().lock())?;
    let mut session = SessionController::new(coll.store, loaded.deck);
    let mut input = stdin().lock();
    let mut output = stdout().lock();
    run(&mut session, &mut input, &mut output)
}

/// Print a one-line warning, if there is one.
fn warn<W: Write>(notice: Option<&str>, output: &mut W) -> Fallible<()> {
    if let Some(notice) = notice {
        writeln!(output, "warning: {notice}")?;
    }
    Ok(())
}

/// The review loop: show the front, wait for Enter, show the back, read a
/// rating. Stops when nothing is due, on `q`, or at end of input.
fn run<R: BufRead, W: Write>(
    session: &mut SessionController,
    input: &mut R,
    output: &mut W,
) -> Fallible<()> {
    session.start_session()?;
    if session.state() == SessionState::Complete {
        if session.deck().is_empty() {
            writeln!(output, "The deck is empty.")?;
        } else if let Some(next) = session.deck().next_review() {
            writeln!(output, "No cards due. Next review at {next}.")?;
        }
        return Ok(());
    }
    while let Some(face) = session.current_card() {
        let front = face.front.to_string();
        let back = face.back.to_string();
        writeln!(output)?;
        writeln!(output, "[{} due]", session.due_count())?;
        writeln!(output, "Q: {front}")?;
        writeln!(output, "[press enter to reveal]")?;
        if read_line(input)?.is_none() {
            return Ok(());
        }
        writeln!(output, "A: {back}")?;
        loop {
            writeln!(output, "{}", prompt(session))?;
            let Some(line) = read_line(input)? else {
                return Ok(());
            };
            let line = line.trim();
            if line == "q" {
                writeln!(output, "Stopped after {} reviews.", session.reviewed())?;
                return Ok(());
            }
            let Ok(ordinal) = line.parse::<u8>() else {
                writeln!(output, "{INVALID_INPUT}")?;
                continue;
            };
            match session.rate_ordinal(ordinal) {
                Ok(()) => break,
                Err(e) if e.kind() == ErrorKind::InvalidRating => {
                    writeln!(output, "{INVALID_INPUT}")?;
                }
                Err(e) => return Err(e),
            }
        }
    }
    writeln!(
        output,
        "All due cards reviewed ({} reviews).",
        session.reviewed()
    )?;
    Ok(())
}

/// The rating menu, with the interval each rating would give.
fn prompt(session: &SessionController) -> String {
    let card = match session.state() {
        SessionState::Presenting(id) => session.deck().get(id),
        _ => None,
    };
    let options: Vec<String> = Quality::ALL
        .into_iter()
        .map(|quality| match card {
            Some(card) => format!(
                "{} = {} ({}d)",
                quality.ordinal(),
                quality,
                preview(card, quality).interval
            ),
            None => format!("{} = {}", quality.ordinal(), quality),
        })
        .collect();
    format!("Rating: {} (q to quit)", options.join(", "))
}

fn read_line<R: BufRead>(input: &mut R) -> Fallible<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use chrono::TimeZone;
    use chrono::Utc;
    use tempfile::tempdir;

    use super::*;
    use crate::store::CardStore;
    use crate::types::card::Card;
    use crate::types::deck::Deck;
    use crate::types::timestamp::Timestamp;

    fn now() -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap())
    }

    fn drive(cards: Vec<Card>, keys: &str) -> Fallible<(SessionController, String)> {
        let dir = tempdir()?;
        let store = CardStore::new(dir.path().join("flashcards.json"));
        let mut session = SessionController::with_clock(store, Deck::new(cards), now);
        let mut input = Cursor::new(keys.as_bytes().to_vec());
        let mut output: Vec<u8> = Vec::new();
        run(&mut session, &mut input, &mut output)?;
        let output = String::from_utf8(output).map_err(|e| {
            crate::error::ErrorReport::new(format!("output is not UTF-8: {e}"))
        })?;
        Ok((session, output))
    }

    #[test]
    fn test_nothing_due() -> Fallible<()> {
        let cards = vec![
            Card::new("Q", "A", now().plus_days(3)),
            Card::new("Q", "A", now().plus_days(1)),
        ];
        let (_, output) = drive(cards, "")?;
        let next = now().plus_days(1).to_local_string();
        assert_eq!(output, format!("No cards due. Next review at {next}.\n"));
        Ok(())
    }

    #[test]
    fn test_empty_deck() -> Fallible<()> {
        let (_, output) = drive(vec![], "")?;
        assert_eq!(output, "The deck is empty.\n");
        Ok(())
    }

    #[test]
    fn test_warning() -> Fallible<()> {
        let mut output: Vec<u8> = Vec::new();
        warn(Some("no record file, starting from the default deck."), &mut output)?;
        warn(None, &mut output)?;
        assert_eq!(
            output,
            b"warning: no record file, starting from the default deck.\n".to_vec()
        );
        Ok(())
    }

    #[test]
    fn test_full_pass() -> Fallible<()> {
        let cards = vec![Card::new("one", "uno", now()), Card::new("two", "dos", now())];
        let (session, output) = drive(cards, "\n3\n\n0\n")?;
        assert!(output.contains("Q: one"));
        assert!(output.contains("A: dos"));
        assert!(output.contains("3 = easy (5d)"));
        assert!(output.contains("All due cards reviewed (2 reviews)."));
        assert_eq!(session.state(), SessionState::Complete);
        let ratings: Vec<Quality> = session
            .deck()
            .cards()
            .iter()
            .map(|card| card.history()[0].quality)
            .collect();
        assert_eq!(ratings, vec![Quality::Easy, Quality::Forgot]);
        Ok(())
    }

    #[test]
    fn test_invalid_rating_is_asked_again() -> Fallible<()> {
        let cards = vec![Card::new("one", "uno", now())];
        let (session, output) = drive(cards, "\n7\nmaybe\n2\n")?;
        let complaints = output.matches("Invalid input.").count();
        assert_eq!(complaints, 2);
        assert_eq!(session.reviewed(), 1);
        Ok(())
    }

    #[test]
    fn test_quit() -> Fallible<()> {
        let cards = vec![Card::new("one", "uno", now())];
        let (session, output) = drive(cards, "\nq\n")?;
        assert!(output.contains("Stopped after 0 reviews."));
        assert_eq!(session.reviewed(), 0);
        Ok(())
    }

    #[test]
    fn test_end_of_input() -> Fallible<()> {
        let cards = vec![Card::new("one", "uno", now())];
        let (session, _) = drive(cards, "")?;
        assert!(matches!(session.state(), SessionState::Presenting(_)));
        Ok(())
    }
}
