//! Learning tracker: per-card progress, aggregate statistics and next-card
//! selection
//!
//! State is loaded once from the key-value store when the tracker is built
//! and written back after every mutation. Persistence problems are logged
//! and never reach the caller; the in-memory state stays authoritative.

use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;

use crate::clock::{Clock, SystemClock};
use crate::storage::KeyValueStore;

use super::algorithm::{
    self, average, clamp_flip_time, fallback_index, pick_highest, priority_score, FLIP_WINDOW,
};
use super::models::*;

/// Key holding the serialized learning data document
pub const LEARNING_DATA_KEY: &str = "latinsay_learning_data";

/// Number of entries in `most_difficult_cards`
const MOST_DIFFICULT_LIMIT: usize = 5;

pub struct LearningTracker {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    progress: IndexMap<CardId, CardProgress>,
    stats: LearningStats,
}

impl LearningTracker {
    /// Load persisted progress and register `cards`
    pub fn new(store: Arc<dyn KeyValueStore>, cards: &[Card]) -> Self {
        Self::with_clock(store, Arc::new(SystemClock), cards)
    }

    pub fn with_clock(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, cards: &[Card]) -> Self {
        let now = clock.now_ms();
        let mut tracker = Self {
            store,
            clock,
            progress: IndexMap::new(),
            stats: LearningStats::empty(0, now),
        };
        tracker.load();
        tracker.register_card_set(cards);
        tracker
    }

    // ==================== Mutations ====================

    /// Register the full list of available cards.
    ///
    /// Untracked cards get a zeroed entry. Entries for cards no longer in
    /// the list are kept.
    pub fn register_card_set(&mut self, cards: &[Card]) {
        self.stats.total_cards = cards.len();

        for card in cards {
            let id = card.id();
            if !self.progress.contains_key(&id) {
                self.progress.insert(id.clone(), CardProgress::new(id));
            }
        }

        self.update_statistics();
        self.save();
    }

    /// Record that `card` was revealed `elapsed` after it became visible
    pub fn record_view(&mut self, card: &Card, elapsed: Duration) {
        let now = self.clock.now_ms();
        let id = card.id();
        let flip_time = clamp_flip_time(elapsed.as_millis());

        let progress = self
            .progress
            .entry(id.clone())
            .or_insert_with(|| CardProgress::new(id));

        progress.recent_flip_times.push(flip_time);
        fit_window(progress);
        progress.view_count += 1;
        progress.last_seen = now;

        log::debug!(
            "Recorded {}ms for {} (avg {:.0}ms over {} views)",
            flip_time,
            progress.id,
            progress.average_flip_time,
            progress.view_count
        );

        self.update_statistics();
        self.save();
    }

    /// Clear all per-card progress. The total card count is kept.
    pub fn reset_progress(&mut self) {
        self.progress.clear();
        self.stats = LearningStats::empty(self.stats.total_cards, self.clock.now_ms());
        log::info!("Learning progress reset");
        self.save();
    }

    // ==================== Queries ====================

    /// Index into `cards` of the card to show after `exclude_index`.
    ///
    /// Never returns `exclude_index` when there are at least two cards.
    pub fn select_next(&self, cards: &[Card], exclude_index: usize) -> usize {
        if cards.len() <= 1 {
            return 0;
        }

        let now = self.clock.now_ms();
        let scores = cards
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != exclude_index)
            .map(|(index, card)| (index, priority_score(self.progress.get(&card.id()), now)));

        pick_highest(scores).unwrap_or_else(|| fallback_index(exclude_index, cards.len()))
    }

    /// Snapshot of the aggregate statistics
    pub fn statistics(&self) -> LearningStats {
        self.stats.clone()
    }

    pub fn summary(&self) -> StatisticsSummary {
        self.stats.summary()
    }

    pub fn classify_difficulty(&self, card: &Card) -> Difficulty {
        algorithm::classify(self.progress.get(&card.id()))
    }

    pub fn progress(&self, card: &Card) -> Option<&CardProgress> {
        self.progress.get(&card.id())
    }

    /// All tracked entries in first-seen order
    pub fn progress_entries(&self) -> impl Iterator<Item = &CardProgress> {
        self.progress.values()
    }

    // ==================== Statistics ====================

    fn update_statistics(&mut self) {
        self.recompute_aggregates();
        self.stats.last_study_session = self.clock.now_ms();
    }

    fn recompute_aggregates(&mut self) {
        let mut viewed_cards = 0;
        let mut total_time = 0.0;
        let mut total_views = 0u64;

        for progress in self.progress.values() {
            if progress.is_viewed() {
                viewed_cards += 1;
            }
            total_time += progress.average_flip_time * progress.view_count as f64;
            total_views += progress.view_count as u64;
        }

        let mut by_difficulty: Vec<&CardProgress> =
            self.progress.values().filter(|p| p.is_viewed()).collect();
        // Stable sort: equal averages keep first-seen order
        by_difficulty.sort_by(|a, b| b.average_flip_time.total_cmp(&a.average_flip_time));

        self.stats.viewed_cards = viewed_cards;
        self.stats.average_time_per_card = if total_views > 0 {
            total_time / total_views as f64
        } else {
            0.0
        };
        self.stats.most_difficult_cards = by_difficulty
            .into_iter()
            .take(MOST_DIFFICULT_LIMIT)
            .map(|p| DifficultCard {
                id: p.id.clone(),
                avg_time: p.average_flip_time,
            })
            .collect();
    }

    // ==================== Persistence ====================

    fn load(&mut self) {
        let content = match self.store.get(LEARNING_DATA_KEY) {
            Ok(Some(content)) => content,
            Ok(None) => return,
            Err(e) => {
                log::error!("Failed to load learning data: {}", e);
                return;
            }
        };

        let value: serde_json::Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Discarding unparseable learning data: {}", e);
                return;
            }
        };

        let version = value.get("version").and_then(|v| v.as_u64());
        if version != Some(LEARNING_DATA_VERSION as u64) {
            log::warn!(
                "Discarding learning data with unsupported version {:?}",
                value.get("version")
            );
            return;
        }

        match serde_json::from_value::<PersistedLearningData>(value) {
            Ok(data) => {
                let mut repaired = 0;
                self.progress = data
                    .progress_data
                    .into_iter()
                    .map(|mut p| {
                        if fit_window(&mut p) {
                            repaired += 1;
                        }
                        (p.id.clone(), p)
                    })
                    .collect();
                self.stats = data.stats;
                if repaired > 0 {
                    log::warn!("Repaired flip-time windows for {} cards", repaired);
                    self.recompute_aggregates();
                }
                log::info!("Loaded progress for {} cards", self.progress.len());
            }
            Err(e) => {
                log::warn!("Discarding malformed learning data: {}", e);
            }
        }
    }

    fn save(&self) {
        let data = PersistedLearningData {
            version: LEARNING_DATA_VERSION,
            progress_data: self.progress.values().cloned().collect(),
            stats: self.stats.clone(),
        };

        let json = match serde_json::to_string(&data) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize learning data: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(LEARNING_DATA_KEY, &json) {
            log::error!("Failed to save learning data: {}", e);
        }
    }
}

/// Keep only the last `FLIP_WINDOW` flip times and re-derive the average.
/// Returns whether anything changed.
fn fit_window(progress: &mut CardProgress) -> bool {
    let before = (progress.recent_flip_times.len(), progress.average_flip_time);
    if progress.recent_flip_times.len() > FLIP_WINDOW {
        let overflow = progress.recent_flip_times.len() - FLIP_WINDOW;
        progress.recent_flip_times.drain(..overflow);
    }
    progress.average_flip_time = average(&progress.recent_flip_times);
    before != (progress.recent_flip_times.len(), progress.average_flip_time)
}
