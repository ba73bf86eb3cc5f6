//! Flashcard learning for latinsay
//!
//! This module provides:
//! - Card and progress models
//! - Adaptive next-card scoring
//! - The learning tracker (progress, statistics, persistence)
//! - Favorites

pub mod algorithm;
pub mod favorites;
pub mod models;
pub mod tracker;

pub use favorites::{Favorites, FAVORITES_KEY};
pub use models::*;
pub use tracker::{LearningTracker, LEARNING_DATA_KEY};
