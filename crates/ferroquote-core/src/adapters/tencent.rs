//! Adapter for the qt.gtimg.cn real-time quote endpoint.
//!
//! The endpoint takes the provider symbol as the query string and answers
//! with a single GBK encoded line such as `v_hk00700="100~腾讯控股~...";`.
//! Unknown symbols come back as `v_xx="";`.

use std::sync::Arc;

use encoding_rs::GBK;

use crate::http_client::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::parser::parse_quote;
use crate::symbol::build_provider_symbol;
use crate::{clean_code, Market, QueryError, QuoteClientConfig, QuoteRecord};

/// Empty assignment the provider returns for symbols it does not know.
pub const EMPTY_QUOTE_MARKER: &str = "=\"\"";

/// Fetches one quote line per call, retrying rate-limited attempts as the
/// configured [`crate::RetryPolicy`] allows.
#[derive(Clone)]
pub struct QuoteFetcher {
    http_client: Arc<dyn HttpClient>,
    config: QuoteClientConfig,
}

impl Default for QuoteFetcher {
    fn default() -> Self {
        Self::new(QuoteClientConfig::default())
    }
}

impl QuoteFetcher {
    pub fn new(config: QuoteClientConfig) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: QuoteClientConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &QuoteClientConfig {
        &self.config
    }

    /// Request URL for `ticker` on `market`.
    pub fn quote_url(&self, ticker: &str, market: Market) -> String {
        let symbol = build_provider_symbol(ticker, market);
        format!("{}{}", self.config.endpoint, urlencoding::encode(&symbol))
    }

    /// Fetch and decode the raw quote line.
    pub async fn fetch(&self, ticker: &str, market: Market) -> Result<String, QueryError> {
        let url = self.quote_url(ticker, market);
        tracing::debug!(%url, %market, "requesting quote");

        let response = self.execute_with_retry(&url).await?;
        let raw = decode_gbk(&response.body);

        if raw.trim().is_empty() || raw.contains(EMPTY_QUOTE_MARKER) {
            return Err(QueryError::not_found(clean_code(ticker)));
        }

        Ok(raw)
    }

    /// Fetch the quote line and parse it into a record.
    pub async fn fetch_quote(&self, ticker: &str, market: Market) -> Result<QuoteRecord, QueryError> {
        let raw = self.fetch(ticker, market).await?;
        parse_quote(&raw, ticker, market)
    }

    async fn execute_with_retry(&self, url: &str) -> Result<HttpResponse, QueryError> {
        let retry = &self.config.retry;
        let mut attempt = 0;

        loop {
            let request = HttpRequest::get(url).with_timeout(self.config.timeout);
            let response = self
                .http_client
                .execute(request)
                .await
                .map_err(|error| {
                    tracing::warn!(kind = error.kind().as_str(), attempt, "quote request failed");
                    QueryError::network(error.to_string())
                })?;

            if response.is_success() {
                return Ok(response);
            }

            if retry.should_retry(response.status, attempt) {
                let delay = retry.delay_for_attempt(attempt);
                tracing::warn!(status = response.status, attempt, ?delay, "quote request throttled, retrying");
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                attempt += 1;
                continue;
            }

            return Err(QueryError::http(response.status, response.reason()));
        }
    }
}

/// Decode a GBK body, replacing malformed sequences instead of failing.
pub fn decode_gbk(bytes: &[u8]) -> String {
    let (text, had_errors) = GBK.decode_without_bom_handling(bytes);
    if had_errors {
        tracing::warn!(len = bytes.len(), "quote body contained malformed GBK sequences");
    }
    text.into_owned()
}
