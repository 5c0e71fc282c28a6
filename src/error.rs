//! Errors for cut plan requests.

use thiserror::Error;

/// A request that breaks the planner's preconditions. Pieces that simply do
/// not fit on the sheet are not errors; they are reported as overflow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("sheet dimensions must be positive, got {width}x{height}")]
    InvalidSheet { width: f64, height: f64 },

    #[error("piece {} dimensions must be positive, got {width}x{height}", .index + 1)]
    InvalidPiece {
        index: usize,
        width: f64,
        height: f64,
    },

    #[error("piece {} quantity must be at least 1", .index + 1)]
    ZeroQuantity { index: usize },

    #[error("too many pieces requested: {total}, at most {max} per sheet")]
    TooManyPieces { total: u64, max: u64 },
}
