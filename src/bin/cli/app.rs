use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use latinsay_lib::config::Config;
use latinsay_lib::feed;
use latinsay_lib::flashcards::Card;
use latinsay_lib::session::StudySession;
use latinsay_lib::storage::FileStorage;

/// Overrides given on the command line
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub feed: Option<PathBuf>,
}

/// Shared application state for CLI commands
pub struct App {
    pub session: StudySession,
}

impl App {
    /// Resolve configuration, open storage and load the saying feed
    pub fn new(overrides: Overrides) -> Result<Self> {
        let mut config = Config::load(overrides.config.as_deref())
            .context("Failed to load configuration")?;
        if let Some(dir) = overrides.data_dir {
            config.storage.data_dir = Some(dir);
        }
        if let Some(path) = overrides.feed {
            config.feed.path = path;
        }

        let data_dir = config.data_dir().context("Failed to get data directory")?;
        let storage = FileStorage::new(data_dir);
        storage.init().context("Failed to initialize storage")?;

        let cards = Self::load_cards(&config)?;
        let session = StudySession::new(Arc::new(storage), cards);

        Ok(Self { session })
    }

    fn load_cards(config: &Config) -> Result<Vec<Card>> {
        let delimiter = config.delimiter()?;
        match feed::load_sayings(&config.feed.path, delimiter) {
            Ok(cards) => Ok(cards),
            Err(feed::FeedError::Empty(path)) => {
                bail!("No sayings found in {}. Check the file and try again.", path.display())
            }
            Err(e) => Err(e).context("Failed to load sayings"),
        }
    }

    /// Resolve a 1-based card number from the command line
    pub fn card_at(&self, number: usize) -> Result<(usize, &Card)> {
        let cards = self.session.cards();
        if number == 0 || number > cards.len() {
            bail!("Card number must be between 1 and {}", cards.len());
        }
        Ok((number - 1, &cards[number - 1]))
    }
}
