use thiserror::Error;

/// Convenient result alias for the wavefront crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the grid, the engine and the surrounding tooling.
#[derive(Debug, Error)]
pub enum Error {
    /// A coordinate fell outside `[0, rows) x [0, cols)`.
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds { row: i32, col: i32, rows: i32, cols: i32 },

    /// A flip targeted the start, the end, or an already reached cell.
    #[error("cell ({row}, {col}) cannot be flipped: {reason}")]
    InvalidFlip {
        row: i32,
        col: i32,
        reason: &'static str,
    },

    /// The requested preset name is not in the catalog.
    #[error("unknown pattern: {name}")]
    UnknownPattern { name: String },

    /// The run is over; connectivity stays fixed until the next pattern load.
    #[error("the run has ended; load a pattern to start a new one")]
    GameEnded,

    /// Grids need at least one row and one column, and at most
    /// [`MAX_CELLS`](crate::grid::MAX_CELLS) cells.
    #[error("grid dimensions must be positive and within the cell limit, got {rows}x{cols}")]
    InvalidDimensions { rows: i32, cols: i32 },

    /// A replacement grid does not match the engine's fixed dimensions.
    #[error("expected a {expected_rows}x{expected_cols} grid, got {rows}x{cols}")]
    DimensionMismatch {
        expected_rows: i32,
        expected_cols: i32,
        rows: i32,
        cols: i32,
    },

    /// Layout text could not be turned into a grid.
    #[error("invalid layout at line {line}: {message}")]
    InvalidLayout { line: usize, message: String },

    #[error(transparent)]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
