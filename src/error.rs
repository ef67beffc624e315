//! Error types for level loading and world construction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or loading a world.
#[derive(Debug, Error)]
pub enum RayngeError {
    /// The sprite index was asked for a tree with no levels.
    #[error("KdTree max depth must be at least 1")]
    ZeroDepth,

    /// Sprite indices are 8 bit wide.
    #[error("Too many sprites for the index: {0} (max 255)")]
    TooManySprites(usize),

    /// A wall was placed outside the grid.
    #[error("Cell ({x}, {z}) is outside the grid")]
    CellOutOfRange {
        /// Column of the rejected cell.
        x: usize,
        /// Row of the rejected cell.
        z: usize,
    },

    /// Deactivation of an enemy that was never loaded.
    #[error("Attempting to deactivate sprite {0}, which is not there")]
    UnknownSprite(u8),

    /// Nothing to read.
    #[error("Level data is empty")]
    EmptyLevel,

    /// A `key value` pair did not start with the expected key.
    #[error("Token {expected} not found, got [{found}]")]
    MissingToken {
        /// The key the loader was waiting for.
        expected: &'static str,
        /// What was actually there.
        found: String,
    },

    /// The value after a key did not parse or was out of range.
    #[error("Invalid value [{value}] for {token}")]
    InvalidNumber {
        /// The key the value belongs to.
        token: &'static str,
        /// The raw text.
        value: String,
    },

    /// A grid character outside `#.EXP`.
    #[error("Invalid char [{cell}] at {x}, {z}")]
    InvalidCell {
        /// The offending character.
        cell: char,
        /// Column in the grid.
        x: usize,
        /// Row in the grid.
        z: usize,
    },

    /// A grid row longer than the declared width.
    #[error("Row {z} is longer than the grid width")]
    RowTooLong {
        /// Row in the grid.
        z: usize,
    },

    /// Fewer grid rows than declared.
    #[error("Expected {expected} grid rows, found {found}")]
    MissingRows {
        /// Declared row count.
        expected: usize,
        /// Rows actually read.
        found: usize,
    },

    /// More than one `P` in the grid.
    #[error("More than one player in the map")]
    MultiplePlayers,

    /// No `P` in the grid.
    #[error("No player on the map")]
    NoPlayer,

    /// The window or its screen texture could not be set up.
    #[error("Graphics setup failed: {0}")]
    Graphics(String),

    /// IO error while reading a level file.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for world construction.
pub type Result<T> = std::result::Result<T, RayngeError>;
