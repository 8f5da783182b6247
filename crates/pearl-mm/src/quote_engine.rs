//! Quote calculation engine.
//!
//! Turns a `MarketSnapshot`, the moving average and the strategy constants
//! into the orders for one symbol on one tick:
//! - Reservation price: book mid-VWAP pulled toward the SMA
//! - Quoted spread: effective (VWAP) spread narrowed by trend conviction
//! - Sizes: room to the limit, reduced by inventory skew, biased by the SMA signal
//! - Stop-loss: near the limit, cross the spread at the touch instead of quoting
//! - Validity: a quote that would trade through the book is dropped
//!
//! Every step is a standalone function so it can be checked in isolation;
//! `compute_orders` composes them.

use pearl_core::{MarketSnapshot, Order, Price, Qty};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::StrategyParams;
use crate::inventory::{to_units, PositionBand};

/// Bid and ask prices of a two-sided quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotePrices {
    pub bid: Price,
    pub ask: Price,
}

impl QuotePrices {
    /// True if either side would execute immediately against the resting book.
    pub fn crosses(&self, best_bid: Price, best_ask: Price) -> bool {
        self.bid > best_ask || self.ask < best_bid
    }
}

/// Outcome of one tick for one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteDecision {
    /// Position is near the limit: a single liquidating order at the touch.
    StopLoss(Order),
    /// Normal inventory-skewed quote. Either leg may carry size zero.
    TwoSided { bid: Order, ask: Order },
    /// The computed quote would cross the book; nothing is sent.
    Rejected { bid_price: Price, ask_price: Price },
}

impl QuoteDecision {
    pub fn into_orders(self) -> Vec<Order> {
        match self {
            Self::StopLoss(order) => vec![order],
            Self::TwoSided { bid, ask } => vec![bid, ask],
            Self::Rejected { .. } => Vec::new(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StopLoss(_) => "stop_loss",
            Self::TwoSided { .. } => "two_sided",
            Self::Rejected { .. } => "rejected",
        }
    }
}

/// `mid - sma`, or `None` while warming up or without an average.
fn sma_deviation(
    snapshot: &MarketSnapshot,
    sma: Option<Decimal>,
    params: &StrategyParams,
) -> Option<Decimal> {
    if snapshot.timestamp < params.warmup_timestamp {
        return None;
    }
    sma.map(|avg| snapshot.mid_price - avg)
}

/// Fair-value estimate at the centre of the quote.
///
/// `mid_vwap - sma_shift_scale * (mid - sma)` after warm-up, plain
/// `mid_vwap` before it.
pub fn reservation_price(
    snapshot: &MarketSnapshot,
    sma: Option<Decimal>,
    params: &StrategyParams,
) -> Decimal {
    let shift = sma_deviation(snapshot, sma, params)
        .map_or(Decimal::ZERO, |dev| -params.sma_shift_scale * dev);
    snapshot.mid_vwap + shift
}

/// `effective_spread * (1 - trend_coefficient)`.
pub fn quoted_spread(effective_spread: Decimal, trend_coefficient: Decimal) -> Decimal {
    effective_spread * (Decimal::ONE - trend_coefficient)
}

/// Integer bid/ask around `reservation`.
///
/// The bid stays strictly below the reservation price. If the ask cannot sit
/// strictly above it, it is placed one level over the bid.
pub fn quote_prices(reservation: Decimal, spread: Decimal) -> QuotePrices {
    let half = spread / Decimal::TWO;

    let mut bid = to_units((reservation - half).ceil());
    if Decimal::from(bid) >= reservation {
        bid -= 1;
    }

    let mut ask = to_units((reservation + half).floor());
    if Decimal::from(ask) <= reservation {
        ask = bid + 1;
    }

    QuotePrices {
        bid: Price::new(bid),
        ask: Price::new(ask),
    }
}

/// Size bias from the SMA signal, `round(-sma_quantity_shift_scale * (mid - sma))`.
///
/// Rounds half to even. Zero during warm-up.
pub fn quantity_shift(
    snapshot: &MarketSnapshot,
    sma: Option<Decimal>,
    params: &StrategyParams,
) -> i64 {
    sma_deviation(snapshot, sma, params)
        .map_or(0, |dev| to_units((-params.sma_quantity_shift_scale * dev).round()))
}

/// Bid and ask sizes for a two-sided quote.
///
/// Starts from the room left to the limit, removes the inventory skew, adds
/// `shift` to both sides and clamps the bid to `[0, bid_room]` and the ask to
/// `[ask_room, 0]`.
pub fn inventory_skewed_sizes(band: PositionBand, shift: i64, skew_scale: Decimal) -> (Qty, Qty) {
    let (bid, ask) = band.skewed_sizes(skew_scale);
    (
        Qty::new(band.clamp_bid(bid + shift)),
        Qty::new(band.clamp_ask(ask + shift)),
    )
}

/// Liquidating order once `|position|` reaches the stop-loss threshold.
///
/// Long inventory sells at the best ask for the resting ask size; short
/// inventory buys at the best bid for the resting bid size.
pub fn stop_loss_order(snapshot: &MarketSnapshot, params: &StrategyParams) -> Option<Order> {
    let band = PositionBand::new(snapshot.position, params.position_limit);
    if !band.stop_loss_breached(params.stop_loss_threshold_fraction) {
        return None;
    }
    let order = if snapshot.position > 0 {
        Order::sell(
            snapshot.symbol.clone(),
            snapshot.best_ask,
            snapshot.ask_touch_qty.abs(),
        )
    } else {
        Order::buy(
            snapshot.symbol.clone(),
            snapshot.best_bid,
            snapshot.bid_touch_qty.abs(),
        )
    };
    Some(order)
}

/// Decide this tick's orders for one symbol.
pub fn compute_orders(
    snapshot: &MarketSnapshot,
    sma: Option<Decimal>,
    params: &StrategyParams,
) -> QuoteDecision {
    let reservation = reservation_price(snapshot, sma, params);
    let spread = quoted_spread(snapshot.effective_spread, params.trend_coefficient);
    let prices = quote_prices(reservation, spread);

    if let Some(order) = stop_loss_order(snapshot, params) {
        warn!(
            symbol = %snapshot.symbol,
            position = snapshot.position,
            limit = params.position_limit,
            price = %order.price,
            quantity = %order.quantity,
            "Stop-loss: liquidating at touch"
        );
        return QuoteDecision::StopLoss(order);
    }

    let band = PositionBand::new(snapshot.position, params.position_limit);
    let shift = quantity_shift(snapshot, sma, params);
    let (bid_qty, ask_qty) = inventory_skewed_sizes(band, shift, params.inventory_skew_scale);

    if prices.crosses(snapshot.best_bid, snapshot.best_ask) {
        debug!(
            symbol = %snapshot.symbol,
            bid = %prices.bid,
            ask = %prices.ask,
            best_bid = %snapshot.best_bid,
            best_ask = %snapshot.best_ask,
            reservation = %reservation,
            "Quote rejected: would cross the book"
        );
        return QuoteDecision::Rejected {
            bid_price: prices.bid,
            ask_price: prices.ask,
        };
    }

    debug!(
        symbol = %snapshot.symbol,
        reservation = %reservation,
        spread = %spread,
        bid = %prices.bid,
        ask = %prices.ask,
        bid_qty = %bid_qty,
        ask_qty = %ask_qty,
        shift,
        "Quote computed"
    );

    QuoteDecision::TwoSided {
        bid: Order::new(snapshot.symbol.clone(), prices.bid, bid_qty),
        ask: Order::new(snapshot.symbol.clone(), prices.ask, ask_qty),
    }
}
