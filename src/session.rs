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

use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::scheduler;
use crate::store::CardStore;
use crate::types::card::CardFace;
use crate::types::deck::CardId;
use crate::types::deck::Deck;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionState {
    /// No session has been started.
    Idle,
    /// A card is waiting for a rating.
    Presenting(CardId),
    /// No cards are due.
    Complete,
}

/// Drives a review pass over a deck: presents due cards one at a time,
/// reschedules them as they are rated, and saves after every rating.
pub struct SessionController {
    store: CardStore,
    deck: Deck,
    state: SessionState,
    clock: Box<dyn Fn() -> Timestamp>,
    reviewed: usize,
}

impl SessionController {
    pub fn new(store: CardStore, deck: Deck) -> Self {
        Self::with_clock(store, deck, Timestamp::now)
    }

    pub fn with_clock(
        store: CardStore,
        deck: Deck,
        clock: impl Fn() -> Timestamp + 'static,
    ) -> Self {
        Self {
            store,
            deck,
            state: SessionState::Idle,
            clock: Box::new(clock),
            reviewed: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The number of ratings accepted so far.
    pub fn reviewed(&self) -> usize {
        self.reviewed
    }

    /// The number of cards currently due, including the one presented.
    pub fn due_count(&self) -> usize {
        self.deck.due((self.clock)()).count()
    }

    /// Begin a review pass. Valid when no card is being presented.
    pub fn start_session(&mut self) -> Fallible<()> {
        if let SessionState::Presenting(_) = self.state {
            return Err(invalid_state("a session is already in progress"));
        }
        let now = (self.clock)();
        self.state = self.scan(now);
        log::debug!("Session started: {:?}", self.state);
        Ok(())
    }

    /// Rate the presented card, save the deck, and move on to the next due
    /// card. If saving fails the card is restored and stays presented.
    pub fn rate(&mut self, quality: Quality) -> Fallible<()> {
        let id = match self.state {
            SessionState::Presenting(id) => id,
            _ => return Err(invalid_state("no card is being presented")),
        };
        let now = (self.clock)();
        let card = self
            .deck
            .get_mut(id)
            .ok_or_else(|| invalid_state("the presented card is not in the deck"))?;
        let before = card.clone();
        scheduler::update(card, quality, now);
        if let Err(e) = self.store.save(&self.deck) {
            if let Some(card) = self.deck.get_mut(id) {
                *card = before;
            }
            log::warn!("Failed to save deck, rating discarded.");
            return Err(e);
        }
        self.reviewed += 1;
        self.state = self.scan(now);
        Ok(())
    }

    /// Rate with a raw ordinal, as sent by a button or a key press.
    pub fn rate_ordinal(&mut self, ordinal: u8) -> Fallible<()> {
        let quality = Quality::try_from(ordinal)?;
        self.rate(quality)
    }

    /// The front and back of the presented card.
    pub fn current_card(&self) -> Option<CardFace<'_>> {
        match self.state {
            SessionState::Presenting(id) => self.deck.get(id).map(|card| card.face()),
            _ => None,
        }
    }

    fn scan(&self, now: Timestamp) -> SessionState {
        match self.deck.first_due(now) {
            Some(id) => SessionState::Presenting(id),
            None => SessionState::Complete,
        }
    }
}

fn invalid_state(message: &str) -> ErrorReport {
    ErrorReport::with_kind(ErrorKind::InvalidSessionState, message)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use tempfile::TempDir;
    use tempfile::tempdir;

    use super::*;
    use crate::types::card::Card;

    fn now() -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap())
    }

    fn controller(dir: &TempDir, cards: Vec<Card>) -> SessionController {
        let store = CardStore::new(dir.path().join("flashcards.json"));
        SessionController::with_clock(store, Deck::new(cards), now)
    }

    #[test]
    fn test_nothing_due_completes() -> Fallible<()> {
        let dir = tempdir()?;
        let mut session = controller(&dir, vec![Card::new("a", "1", now().plus_days(3))]);
        assert_eq!(session.state(), SessionState::Idle);
        session.start_session()?;
        assert_eq!(session.state(), SessionState::Complete);
        assert!(session.current_card().is_none());
        Ok(())
    }

    #[test]
    fn test_empty_deck_completes() -> Fallible<()> {
        let dir = tempdir()?;
        let mut session = controller(&dir, vec![]);
        session.start_session()?;
        assert_eq!(session.state(), SessionState::Complete);
        Ok(())
    }

    #[test]
    fn test_rated_card_is_not_presented_again() -> Fallible<()> {
        let dir = tempdir()?;
        let mut session = controller(
            &dir,
            vec![Card::new("A", "a", now()), Card::new("B", "b", now())],
        );
        session.start_session()?;
        assert_eq!(session.current_card().map(|face| face.front), Some("A"));
        session.rate(Quality::Normal)?;
        assert_eq!(session.current_card().map(|face| face.front), Some("B"));
        session.rate(Quality::Forgot)?;
        assert_eq!(session.state(), SessionState::Complete);
        assert!(session.current_card().is_none());
        assert_eq!(session.reviewed(), 2);
        Ok(())
    }

    #[test]
    fn test_only_due_cards_are_presented() -> Fallible<()> {
        let dir = tempdir()?;
        let mut session = controller(
            &dir,
            vec![
                Card::new("later", "x", now().plus_days(1)),
                Card::new("due", "y", now()),
            ],
        );
        assert_eq!(session.due_count(), 1);
        session.start_session()?;
        assert_eq!(session.current_card().map(|face| face.front), Some("due"));
        session.rate(Quality::Easy)?;
        assert_eq!(session.state(), SessionState::Complete);
        Ok(())
    }

    #[test]
    fn test_rate_saves_deck() -> Fallible<()> {
        let dir = tempdir()?;
        let mut session = controller(&dir, vec![Card::new("A", "a", now())]);
        session.start_session()?;
        session.rate(Quality::Easy)?;
        let saved = CardStore::new(dir.path().join("flashcards.json")).load()?;
        let card = &saved.cards()[0];
        assert_eq!(card.interval(), 5);
        assert_eq!(card.ease_factor(), 3.5);
        assert_eq!(card.review_count(), 1);
        Ok(())
    }

    #[test]
    fn test_rate_outside_presenting_is_rejected() -> Fallible<()> {
        let dir = tempdir()?;
        let mut session = controller(&dir, vec![Card::new("A", "a", now().plus_days(2))]);
        let err = session.rate(Quality::Easy).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSessionState);
        assert_eq!(session.state(), SessionState::Idle);

        session.start_session()?;
        let err = session.rate(Quality::Easy).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSessionState);
        assert_eq!(session.state(), SessionState::Complete);
        assert_eq!(session.deck().cards()[0].review_count(), 0);
        Ok(())
    }

    #[test]
    fn test_start_while_presenting_is_rejected() -> Fallible<()> {
        let dir = tempdir()?;
        let mut session = controller(&dir, vec![Card::new("A", "a", now())]);
        session.start_session()?;
        let err = session.start_session().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSessionState);
        assert!(matches!(session.state(), SessionState::Presenting(_)));
        Ok(())
    }

    #[test]
    fn test_invalid_rating_changes_nothing() -> Fallible<()> {
        let dir = tempdir()?;
        let mut session = controller(&dir, vec![Card::new("A", "a", now())]);
        session.start_session()?;
        let state = session.state();
        let before = session.deck().clone();
        let err = session.rate_ordinal(4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRating);
        assert_eq!(session.state(), state);
        assert_eq!(session.deck(), &before);
        assert_eq!(session.reviewed(), 0);
        Ok(())
    }

    #[test]
    fn test_rate_ordinal() -> Fallible<()> {
        let dir = tempdir()?;
        let mut session = controller(&dir, vec![Card::new("A", "a", now())]);
        session.start_session()?;
        session.rate_ordinal(3)?;
        assert_eq!(session.deck().cards()[0].history()[0].quality, Quality::Easy);
        Ok(())
    }

    #[test]
    fn test_failed_save_keeps_card_presented() -> Fallible<()> {
        let dir = tempdir()?;
        let store = CardStore::new(dir.path().join("missing").join("flashcards.json"));
        let deck = Deck::new(vec![Card::new("A", "a", now())]);
        let mut session = SessionController::with_clock(store, deck.clone(), now);
        session.start_session()?;
        let state = session.state();
        let err = session.rate(Quality::Easy).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(session.state(), state);
        assert_eq!(session.deck(), &deck);
        assert_eq!(session.current_card().map(|face| face.front), Some("A"));
        Ok(())
    }

    #[test]
    fn test_restart_after_complete() -> Fallible<()> {
        let dir = tempdir()?;
        let mut session = controller(&dir, vec![Card::new("A", "a", now().plus_days(1))]);
        session.start_session()?;
        assert_eq!(session.state(), SessionState::Complete);
        session.start_session()?;
        assert_eq!(session.state(), SessionState::Complete);
        Ok(())
    }
}
