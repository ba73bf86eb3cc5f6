//! Favorited cards, persisted as a JSON array under their own key

use std::sync::Arc;

use crate::storage::KeyValueStore;

use super::models::Card;

/// Key holding the favorites array
pub const FAVORITES_KEY: &str = "latinsay_favorites";

pub struct Favorites {
    store: Arc<dyn KeyValueStore>,
    cards: Vec<Card>,
}

impl Favorites {
    /// Load favorites from `store`. Unreadable data yields an empty list.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let cards = match store.get(FAVORITES_KEY) {
            Ok(Some(content)) => match serde_json::from_str::<Vec<Card>>(&content) {
                Ok(cards) => cards,
                Err(e) => {
                    log::warn!("Discarding malformed favorites: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::error!("Failed to load favorites: {}", e);
                Vec::new()
            }
        };

        Self { store, cards }
    }

    pub fn list(&self) -> &[Card] {
        &self.cards
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    /// Returns false if the card was already a favorite
    pub fn add(&mut self, card: &Card) -> bool {
        if self.contains(card) {
            return false;
        }
        self.cards.push(card.clone());
        self.save();
        true
    }

    /// Returns false if the card was not a favorite
    pub fn remove(&mut self, card: &Card) -> bool {
        let len_before = self.cards.len();
        self.cards.retain(|c| c != card);
        if self.cards.len() == len_before {
            return false;
        }
        self.save();
        true
    }

    /// Flip the favorite state; returns the new state
    pub fn toggle(&mut self, card: &Card) -> bool {
        if self.remove(card) {
            false
        } else {
            self.add(card)
        }
    }

    fn save(&self) {
        let json = match serde_json::to_string(&self.cards) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize favorites: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(FAVORITES_KEY, &json) {
            log::error!("Failed to save favorites: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn create_test_favorites() -> (Favorites, Arc<MemoryStorage>) {
        let store = Arc::new(MemoryStorage::new());
        let favorites = Favorites::load(store.clone());
        (favorites, store)
    }

    #[test]
    fn test_add_and_remove() {
        let (mut favorites, _store) = create_test_favorites();
        let card = Card::new("carpe diem", "prinde ziua");

        assert!(favorites.add(&card));
        assert!(!favorites.add(&card));
        assert!(favorites.contains(&card));
        assert_eq!(favorites.list().len(), 1);

        assert!(favorites.remove(&card));
        assert!(!favorites.remove(&card));
        assert!(favorites.list().is_empty());
    }

    #[test]
    fn test_toggle() {
        let (mut favorites, _store) = create_test_favorites();
        let card = Card::new("ad astra", "spre stele");

        assert!(favorites.toggle(&card));
        assert!(favorites.contains(&card));
        assert!(!favorites.toggle(&card));
        assert!(!favorites.contains(&card));
    }

    #[test]
    fn test_persisted_as_array_of_pairs() {
        let (mut favorites, store) = create_test_favorites();
        favorites.add(&Card::new("ad astra", "spre stele"));
        favorites.add(&Card::new("carpe diem", "prinde ziua"));

        let raw = store.get(FAVORITES_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["source"], "ad astra");
        assert_eq!(value[1]["translation"], "prinde ziua");

        let reloaded = Favorites::load(store);
        assert_eq!(reloaded.list(), favorites.list());
    }

    #[test]
    fn test_malformed_favorites_start_empty() {
        let store = Arc::new(MemoryStorage::new());
        store.set(FAVORITES_KEY, "{\"not\":\"an array\"}").unwrap();

        let favorites = Favorites::load(store);
        assert!(favorites.list().is_empty());
    }
}
