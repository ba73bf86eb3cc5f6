//! latinsay: bilingual saying flashcards with adaptive card selection
//!
//! The [`flashcards::LearningTracker`] records how long each card takes to
//! reveal and picks the next card to show. A [`session::StudySession`] owns
//! one tracker per run together with the favorites list and the current
//! deck. State is persisted through any [`storage::KeyValueStore`].

pub mod clock;
pub mod config;
pub mod feed;
pub mod flashcards;
pub mod session;
pub mod storage;

pub use flashcards::{Card, CardId, CardProgress, Difficulty, LearningStats, LearningTracker};
pub use session::StudySession;
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
