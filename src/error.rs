/// Error types.
///
/// Only startup can fail: reading the config and the tile map, and putting
/// the terminal into game mode.  Misses and bounds are game state, not errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from parsing the text tile-map format.  Lines are 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TileMapError {
    /// The `tile W H` header is malformed.
    #[error("line {line}: expected `tile <width> <height>` with non-zero sizes")]
    Header { line: usize },

    /// A row of tiles appeared before any `[layer]` heading.
    #[error("line {line}: tile row outside of a [layer] section")]
    RowOutsideLayer { line: usize },

    /// A glyph with no tile mapping.
    #[error("line {line}: unknown tile glyph {glyph:?}")]
    UnknownGlyph { line: usize, glyph: char },

    /// The map declares no layers at all.
    #[error("tile map has no layers")]
    Empty,
}

/// Fatal startup errors.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot read tile map {path}: {source}")]
    TileMap {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid tile map: {0}")]
    TileMapParse(#[from] TileMapError),
}
