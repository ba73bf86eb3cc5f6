//! Study session: the single owner of the learning tracker for one run of
//! the application.
//!
//! Front ends build one `StudySession` at startup and pass it by reference
//! to whatever needs it. Reloading the card list re-uses the same tracker.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use crate::clock::{Clock, SystemClock};
use crate::flashcards::{Card, Difficulty, Favorites, LearningTracker};
use crate::storage::KeyValueStore;

pub struct StudySession {
    tracker: LearningTracker,
    favorites: Favorites,
    cards: Vec<Card>,
    current: Option<usize>,
}

impl StudySession {
    pub fn new(store: Arc<dyn KeyValueStore>, cards: Vec<Card>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock), cards)
    }

    pub fn with_clock(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, cards: Vec<Card>) -> Self {
        let tracker = LearningTracker::with_clock(Arc::clone(&store), clock, &cards);
        let favorites = Favorites::load(store);
        Self {
            tracker,
            favorites,
            cards,
            current: None,
        }
    }

    /// Replace the card list, keeping accumulated progress
    pub fn reload(&mut self, cards: Vec<Card>) {
        self.tracker.register_card_set(&cards);
        self.cards = cards;
        self.current = match self.current {
            Some(index) if index < self.cards.len() => Some(index),
            _ => None,
        };
    }

    /// Show a random card first. Returns `None` for an empty deck.
    pub fn start(&mut self) -> Option<usize> {
        if self.cards.is_empty() {
            self.current = None;
            return None;
        }
        let index = rand::thread_rng().gen_range(0..self.cards.len());
        self.current = Some(index);
        self.current
    }

    /// Show the card at `index` (out of range is ignored)
    pub fn show(&mut self, index: usize) -> Option<&Card> {
        if index < self.cards.len() {
            self.current = Some(index);
        }
        self.current_card()
    }

    /// Record the reveal of the current card
    pub fn reveal(&mut self, elapsed: Duration) -> Option<Difficulty> {
        let card = self.cards.get(self.current?)?;
        self.tracker.record_view(card, elapsed);
        Some(self.tracker.classify_difficulty(card))
    }

    /// Move to the next card chosen by the tracker
    pub fn advance(&mut self) -> Option<usize> {
        if self.cards.is_empty() {
            return None;
        }
        let next = match self.current {
            Some(current) => self.tracker.select_next(&self.cards, current),
            // Nothing on screen: every card is a candidate
            None => self.tracker.select_next(&self.cards, usize::MAX),
        };
        self.current = Some(next);
        self.current
    }

    /// Flip the favorite state of the current card; returns the new state
    pub fn toggle_favorite(&mut self) -> Option<bool> {
        let card = self.cards.get(self.current?)?;
        Some(self.favorites.toggle(card))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.cards.get(self.current?)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn tracker(&self) -> &LearningTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut LearningTracker {
        &mut self.tracker
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut Favorites {
        &mut self.favorites
    }
}
