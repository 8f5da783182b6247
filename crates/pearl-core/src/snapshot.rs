//! Per-tick market statistics for one instrument.
//!
//! A `MarketSnapshot` is rebuilt from the order depth and the trader's
//! position on every tick and dropped once that tick's orders are out.
//! Both book sides must be populated; an empty side is reported as a typed
//! error rather than defaulted, since quoting off a one-sided book is unsafe.

use rust_decimal::Decimal;

use crate::{BookSide, CoreError, OrderDepth, Price, Qty, Result, Symbol, TradingState};

/// Decimal places used for effective spread and mid-VWAP.
///
/// Rounding is half-to-even on the exact decimal value. A float-based
/// `round()` can land on the other side of a tie: asks `{10004: 97,
/// 10005: 3}` against a single bid at 9996 give a mid-VWAP of exactly
/// 10000.015, which rounds to 10000.02 here but to 10000.01 in binary
/// floating point.
pub const VWAP_DECIMALS: u32 = 2;

/// Derived, immutable market view for one instrument at one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketSnapshot {
    pub symbol: Symbol,
    /// Exchange timestamp of the tick.
    pub timestamp: i64,
    /// Signed net position.
    pub position: i64,
    pub best_bid: Price,
    pub best_ask: Price,
    /// Resting quantity at the best bid, as reported.
    pub bid_touch_qty: Qty,
    /// Resting quantity at the best ask, as reported (negative on the exchange feed).
    pub ask_touch_qty: Qty,
    /// `best_ask - best_bid`. Negative on a crossed book.
    pub spread: i64,
    /// `(best_ask + best_bid) / 2`.
    pub mid_price: Decimal,
    pub bid_vwap: Decimal,
    pub ask_vwap: Decimal,
    /// `ask_vwap - bid_vwap`, rounded to two places.
    pub effective_spread: Decimal,
    /// `(ask_vwap + bid_vwap) / 2`, rounded to two places.
    pub mid_vwap: Decimal,
}

impl MarketSnapshot {
    /// Build a snapshot from a raw order depth.
    pub fn from_depth(
        symbol: Symbol,
        depth: &OrderDepth,
        position: i64,
        timestamp: i64,
    ) -> Result<Self> {
        let best_bid = touch(&symbol, depth, BookSide::Bid)?;
        let best_ask = touch(&symbol, depth, BookSide::Ask)?;
        let bid_vwap = vwap(&symbol, depth, BookSide::Bid)?;
        let ask_vwap = vwap(&symbol, depth, BookSide::Ask)?;

        let bid_touch_qty = depth.touch_quantity(BookSide::Bid).unwrap_or_default();
        let ask_touch_qty = depth.touch_quantity(BookSide::Ask).unwrap_or_default();

        let spread = best_ask - best_bid;
        let mid_price = (best_ask.as_decimal() + best_bid.as_decimal()) / Decimal::TWO;
        let effective_spread = (ask_vwap - bid_vwap).round_dp(VWAP_DECIMALS);
        let mid_vwap = ((ask_vwap + bid_vwap) / Decimal::TWO).round_dp(VWAP_DECIMALS);

        Ok(Self {
            symbol,
            timestamp,
            position,
            best_bid,
            best_ask,
            bid_touch_qty,
            ask_touch_qty,
            spread,
            mid_price,
            bid_vwap,
            ask_vwap,
            effective_spread,
            mid_vwap,
        })
    }

    /// Build a snapshot for `symbol` from the full tick state.
    ///
    /// A symbol absent from `position` is treated as flat.
    pub fn from_state(state: &TradingState, symbol: &Symbol) -> Result<Self> {
        let depth = state
            .order_depths
            .get(symbol)
            .ok_or_else(|| CoreError::UnknownSymbol(symbol.clone()))?;
        Self::from_depth(
            symbol.clone(),
            depth,
            state.position_of(symbol),
            state.timestamp,
        )
    }
}

fn touch(symbol: &Symbol, depth: &OrderDepth, side: BookSide) -> Result<Price> {
    depth.touch(side).ok_or_else(|| CoreError::MissingBookSide {
        symbol: symbol.clone(),
        side,
    })
}

fn vwap(symbol: &Symbol, depth: &OrderDepth, side: BookSide) -> Result<Decimal> {
    depth.vwap(side).ok_or_else(|| {
        let symbol = symbol.clone();
        match depth.volume(side) {
            Some(volume) if volume.is_zero() => CoreError::ZeroDepth { symbol, side },
            _ => CoreError::DepthOverflow { symbol, side },
        }
    })
}
