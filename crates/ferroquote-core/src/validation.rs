//! Input validation run before any network or parsing work.

use crate::{Market, Ticker, ValidationError};

/// Validate a raw ticker and optional market identifier.
///
/// Pure: returns the typed values or the first problem found, ticker first.
/// Inputs are not trimmed or case-folded here; that is the caller's job.
pub fn validate(
    ticker: &str,
    market_hint: Option<&str>,
) -> Result<(Ticker, Option<Market>), ValidationError> {
    let ticker = Ticker::parse(ticker)?;
    let market = market_hint.map(str::parse::<Market>).transpose()?;
    Ok((ticker, market))
}
