//! Saying feed: the delimited text file the cards come from

mod import;

use std::path::PathBuf;

use thiserror::Error;

pub use import::{load_sayings, parse_sayings, DEFAULT_DELIMITER};

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No sayings found in {0}")]
    Empty(PathBuf),
}

pub type Result<T> = std::result::Result<T, FeedError>;
