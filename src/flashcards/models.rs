//! Data models for the flashcard system

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A saying pair: source-language text and its translation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub source: String,
    pub translation: String,
}

impl Card {
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translation: translation.into(),
        }
    }

    pub fn id(&self) -> CardId {
        CardId::from(self)
    }
}

/// Identity of a card for progress tracking.
///
/// The pair of raw fields, compared by value. Serialized as a two-element
/// array: `["ad astra", "spre stele"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub String, pub String);

impl From<&Card> for CardId {
    fn from(card: &Card) -> Self {
        Self(card.source.clone(), card.translation.clone())
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.0, self.1)
    }
}

/// Performance history for one card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardProgress {
    pub id: CardId,
    /// Most recent flip latencies in ms, oldest first
    #[serde(default)]
    pub recent_flip_times: Vec<u64>,
    /// Mean of `recent_flip_times`
    #[serde(default)]
    pub average_flip_time: f64,
    /// Total reveals, never windowed
    #[serde(default)]
    pub view_count: u32,
    /// Epoch ms of the latest reveal, 0 if never seen
    #[serde(default)]
    pub last_seen: i64,
}

impl CardProgress {
    pub fn new(id: CardId) -> Self {
        Self {
            id,
            recent_flip_times: Vec::new(),
            average_flip_time: 0.0,
            view_count: 0,
            last_seen: 0,
        }
    }

    pub fn is_viewed(&self) -> bool {
        self.view_count > 0
    }
}

/// Entry in the most-difficult list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultCard {
    pub id: CardId,
    pub avg_time: f64,
}

/// Aggregate statistics, recomputed after every mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStats {
    pub total_cards: usize,
    pub viewed_cards: usize,
    pub average_time_per_card: f64,
    #[serde(default)]
    pub most_difficult_cards: Vec<DifficultCard>,
    /// Epoch ms of the latest recomputation
    pub last_study_session: i64,
}

impl LearningStats {
    pub fn empty(total_cards: usize, now_ms: i64) -> Self {
        Self {
            total_cards,
            viewed_cards: 0,
            average_time_per_card: 0.0,
            most_difficult_cards: Vec::new(),
            last_study_session: now_ms,
        }
    }

    /// Display-oriented view of these statistics
    pub fn summary(&self) -> StatisticsSummary {
        let last_studied = Utc
            .timestamp_millis_opt(self.last_study_session)
            .single()
            .unwrap_or_default();

        StatisticsSummary {
            total_cards: self.total_cards,
            viewed_cards: self.viewed_cards,
            average_time_seconds: self.average_time_per_card / 1000.0,
            most_difficult_cards: self
                .most_difficult_cards
                .iter()
                .map(|card| DifficultCardSummary {
                    source: card.id.0.clone(),
                    translation: card.id.1.clone(),
                    avg_time_seconds: card.avg_time / 1000.0,
                })
                .collect(),
            study_streak: STUDY_STREAK_PLACEHOLDER,
            last_studied,
        }
    }
}

/// Streak tracking has no defined contract yet; always reported as this.
pub const STUDY_STREAK_PLACEHOLDER: u32 = 0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultCardSummary {
    pub source: String,
    pub translation: String,
    pub avg_time_seconds: f64,
}

/// Statistics as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    pub total_cards: usize,
    pub viewed_cards: usize,
    pub average_time_seconds: f64,
    pub most_difficult_cards: Vec<DifficultCardSummary>,
    /// Placeholder, see [`STUDY_STREAK_PLACEHOLDER`]
    pub study_streak: u32,
    pub last_studied: DateTime<Utc>,
}

/// Difficulty bucket derived from average flip time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    /// Never revealed
    New,
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current on-disk format of the learning data document
pub const LEARNING_DATA_VERSION: u32 = 1;

/// The persisted learning data document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedLearningData {
    pub version: u32,
    pub progress_data: Vec<CardProgress>,
    pub stats: LearningStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_serializes_as_pair() {
        let card = Card::new("carpe diem", "prinde ziua");
        let json = serde_json::to_string(&card.id()).unwrap();
        assert_eq!(json, r#"["carpe diem","prinde ziua"]"#);
    }

    #[test]
    fn test_card_id_has_no_separator_collision() {
        let a = Card::new("a_b", "c");
        let b = Card::new("a", "b_c");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_progress_uses_camel_case() {
        let progress = CardProgress::new(CardId("a".into(), "b".into()));
        let value = serde_json::to_value(&progress).unwrap();
        assert!(value.get("recentFlipTimes").is_some());
        assert!(value.get("averageFlipTime").is_some());
        assert!(value.get("viewCount").is_some());
        assert!(value.get("lastSeen").is_some());
    }

    #[test]
    fn test_summary_converts_to_seconds() {
        let stats = LearningStats {
            total_cards: 10,
            viewed_cards: 2,
            average_time_per_card: 4500.0,
            most_difficult_cards: vec![DifficultCard {
                id: CardId("ad astra".into(), "spre stele".into()),
                avg_time: 9000.0,
            }],
            last_study_session: 1_700_000_000_000,
        };

        let summary = stats.summary();
        assert_eq!(summary.total_cards, 10);
        assert_eq!(summary.viewed_cards, 2);
        assert_eq!(summary.average_time_seconds, 4.5);
        assert_eq!(summary.most_difficult_cards[0].source, "ad astra");
        assert_eq!(summary.most_difficult_cards[0].translation, "spre stele");
        assert_eq!(summary.most_difficult_cards[0].avg_time_seconds, 9.0);
        assert_eq!(summary.study_streak, STUDY_STREAK_PLACEHOLDER);
        assert_eq!(summary.last_studied.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_difficulty_display() {
        assert_eq!(Difficulty::New.to_string(), "new");
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }
}
