//! Error types for pearl-core.

use thiserror::Error;

use crate::book::BookSide;
use crate::market::Symbol;

/// Core error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// One side of the book has no resting levels, so touch and VWAP are undefined.
    #[error("Missing {side} side in order book for {symbol}")]
    MissingBookSide { symbol: Symbol, side: BookSide },

    /// Resting quantities on one side sum to zero.
    #[error("Zero resting depth on {side} side for {symbol}")]
    ZeroDepth { symbol: Symbol, side: BookSide },

    /// Notional on one side is too large for decimal arithmetic.
    #[error("Depth overflow on {side} side for {symbol}")]
    DepthOverflow { symbol: Symbol, side: BookSide },

    #[error("No order depth for {0}")]
    UnknownSymbol(Symbol),
}

impl CoreError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingBookSide { .. } => "missing_book_side",
            Self::ZeroDepth { .. } => "zero_depth",
            Self::DepthOverflow { .. } => "depth_overflow",
            Self::UnknownSymbol(_) => "unknown_symbol",
        }
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
