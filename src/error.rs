use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
pub enum BkIndexError {
    /// Inserting a word that is already stored. The tree is left unmodified.
    #[error("word already exists: {0}")]
    DuplicateWord(String),

    /// Looking up or removing a word that is not stored. The tree is left
    /// unmodified.
    #[error("word not found: {0}")]
    WordNotFound(String),
}

pub type Result<T> = std::result::Result<T, BkIndexError>;
