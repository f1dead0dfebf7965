use serde::{Deserialize, Serialize};

use crate::Market;

/// Outcome marker carried by every successful record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Success,
}

/// Normalized real-time quote.
///
/// `volume` is always in shares and `amount` in base currency units,
/// whatever unit the provider reported for the market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub code: String,
    pub name: String,
    pub market: Market,
    pub current_price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub prev_close: f64,
    pub volume: u64,
    pub amount: f64,
    pub time: String,
    pub status: QuoteStatus,
}
