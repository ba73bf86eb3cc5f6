pub mod cards;
pub mod favorites;
pub mod next;
pub mod reset;
pub mod stats;
pub mod study;
