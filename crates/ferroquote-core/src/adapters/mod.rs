//! Quote provider adapters.

pub mod tencent;

pub use tencent::{decode_gbk, QuoteFetcher, EMPTY_QUOTE_MARKER};
