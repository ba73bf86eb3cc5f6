//! Adaptive card selection
//!
//! Every candidate gets a priority score in `[0, 1]`:
//! - never viewed: a fixed 0.7
//! - viewed: `min(avg / 10s, 1) * 0.7 + min(days_since_seen / 7, 1) * 0.3`
//!
//! Slow cards and cards not seen for a while come back first. The highest
//! score wins; ties go to the earliest candidate.

use crate::clock::MS_PER_DAY;

use super::models::{CardProgress, Difficulty};

/// Number of latencies kept per card
pub const FLIP_WINDOW: usize = 5;

/// Ceiling applied to every recorded latency
pub const MAX_FLIP_TIME_MS: u64 = 30_000;

/// Score for a card that was never revealed
pub const NEW_CARD_SCORE: f64 = 0.7;

const TIME_WEIGHT: f64 = 0.7;
const RECENCY_WEIGHT: f64 = 0.3;
/// Average flip time that saturates the time component
const TIME_SATURATION_MS: f64 = 10_000.0;
/// Days unseen that saturate the recency component
const RECENCY_SATURATION_DAYS: f64 = 7.0;

const EASY_BELOW_MS: f64 = 2_000.0;
const MEDIUM_BELOW_MS: f64 = 5_000.0;

/// Priority of a candidate card at `now_ms`
pub fn priority_score(progress: Option<&CardProgress>, now_ms: i64) -> f64 {
    let progress = match progress {
        Some(p) if p.is_viewed() => p,
        _ => return NEW_CARD_SCORE,
    };

    let time_score = (progress.average_flip_time / TIME_SATURATION_MS).min(1.0) * TIME_WEIGHT;

    // Clock skew can put last_seen in the future; treat that as just seen
    let elapsed_ms = now_ms.saturating_sub(progress.last_seen);
    let days_since_last_seen = (elapsed_ms as f64 / MS_PER_DAY as f64).max(0.0);
    let recency_score = (days_since_last_seen / RECENCY_SATURATION_DAYS).min(1.0) * RECENCY_WEIGHT;

    time_score + recency_score
}

/// Index with the strictly highest score, earliest on ties
pub fn pick_highest<I>(scores: I) -> Option<usize>
where
    I: IntoIterator<Item = (usize, f64)>,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, score) in scores {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}

/// Fallback when no candidate could be scored
pub fn fallback_index(exclude_index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    exclude_index.saturating_add(1) % len
}

/// Clamp a raw latency to the recorded range
pub fn clamp_flip_time(elapsed_ms: u128) -> u64 {
    elapsed_ms.min(MAX_FLIP_TIME_MS as u128) as u64
}

/// Arithmetic mean, 0 for an empty window
pub fn average(times: &[u64]) -> f64 {
    if times.is_empty() {
        return 0.0;
    }
    times.iter().map(|&t| t as f64).sum::<f64>() / times.len() as f64
}

/// Difficulty bucket for a card
pub fn classify(progress: Option<&CardProgress>) -> Difficulty {
    match progress {
        Some(p) if p.is_viewed() => {
            if p.average_flip_time < EASY_BELOW_MS {
                Difficulty::Easy
            } else if p.average_flip_time < MEDIUM_BELOW_MS {
                Difficulty::Medium
            } else {
                Difficulty::Hard
            }
        }
        _ => Difficulty::New,
    }
}
