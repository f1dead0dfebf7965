//! # Ferroquote Core
//!
//! Real-time quote lookup for Shanghai, Shenzhen, Hong Kong and US stocks
//! against the free `qt.gtimg.cn` endpoint.
//!
//! ## Pipeline
//!
//! ```text
//! ticker, [market]
//!      │
//!      ▼
//! ┌──────────────┐   ┌────────────────┐   ┌───────────────┐
//! │  validation  │──▶│ market_resolver │──▶│    symbol     │
//! └──────────────┘   └────────────────┘   └───────┬───────┘
//!                                                 │
//!                                                 ▼
//!                    ┌────────────────┐   ┌───────────────┐
//!                    │     parser     │◀──│ QuoteFetcher  │
//!                    └───────┬────────┘   │ (retry, GBK)  │
//!                            │            └───────────────┘
//!                            ▼
//!                       QuoteRecord
//! ```
//!
//! Every stage short-circuits with a [`QueryError`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ferroquote_core::QuoteService;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), ferroquote_core::QueryError> {
//!     let quote = QuoteService::default().query("600519", None).await?;
//!     println!("{} {}", quote.name, quote.current_price);
//!     Ok(())
//! }
//! ```
//!
//! ## Units
//!
//! The provider reports A-share volume in lots and turnover in ten
//! thousands. [`QuoteRecord`] always carries shares and base currency
//! units.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod market_resolver;
pub mod parser;
pub mod retry;
pub mod service;
pub mod symbol;
pub mod validation;

pub use adapters::{decode_gbk, QuoteFetcher};
pub use config::QuoteClientConfig;
pub use domain::{clean_code, Market, QuoteRecord, QuoteStatus, Ticker};
pub use error::{QueryError, QueryErrorKind, ValidationError};
pub use http_client::{
    HttpClient, HttpError, HttpErrorKind, HttpRequest, HttpResponse, ReqwestHttpClient,
};
pub use market_resolver::resolve;
pub use parser::{parse_quote, FieldOffsets, QUOTE_FIELDS};
pub use retry::{Backoff, RetryPolicy};
pub use service::QuoteService;
pub use symbol::build_provider_symbol;
pub use validation::validate;
