//! # Domain Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Ticker`] | Validated user-supplied ticker |
//! | [`Market`] | Exchange grouping (sh, sz, hk, us) |
//! | [`QuoteRecord`] | Normalized quote produced by the parser |

mod market;
mod quote;
mod ticker;

pub use market::Market;
pub use quote::{QuoteRecord, QuoteStatus};
pub use ticker::{clean_code, Ticker, MARKET_PREFIXES};
