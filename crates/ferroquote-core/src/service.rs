//! End-to-end quote query: validate, resolve, fetch, parse.

use crate::market_resolver::resolve;
use crate::validation::validate;
use crate::{QueryError, QuoteFetcher, QuoteRecord};

/// Runs one query through every stage; the first failing stage wins.
#[derive(Clone, Default)]
pub struct QuoteService {
    fetcher: QuoteFetcher,
}

impl QuoteService {
    pub fn new(fetcher: QuoteFetcher) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &QuoteFetcher {
        &self.fetcher
    }

    /// Query a quote for a raw ticker and optional raw market identifier.
    ///
    /// Validation and market resolution happen before any network call.
    pub async fn query(
        &self,
        ticker: &str,
        market_hint: Option<&str>,
    ) -> Result<QuoteRecord, QueryError> {
        let (ticker, hint) = validate(ticker, market_hint)?;

        let market = resolve(ticker.as_str(), hint).ok_or_else(|| QueryError::MarketUnresolved {
            ticker: ticker.to_string(),
        })?;

        self.fetcher.fetch_quote(ticker.as_str(), market).await
    }
}
