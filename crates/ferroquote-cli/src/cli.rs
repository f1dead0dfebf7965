//! CLI argument definitions for ferroquote.
//!
//! # Examples
//!
//! ```bash
//! # Market detected from the ticker
//! ferroquote 600519
//! ferroquote AAPL
//!
//! # Explicit market
//! ferroquote 00700 hk
//!
//! # Plain key/value output
//! ferroquote SZ000001 --format text
//! ```

use clap::{Parser, ValueEnum};

/// Real-time quotes for A-shares, Hong Kong and US stocks.
#[derive(Debug, Parser)]
#[command(
    name = "ferroquote",
    version,
    about = "Real-time stock quotes for Shanghai, Shenzhen, Hong Kong and US markets",
    long_about = "Looks up a real-time quote from qt.gtimg.cn and prints it as a single \
structured record on stdout.\n\
\n\
The market is detected from the ticker when omitted:\n\
  • 6 digits starting with 6 -> sh, with 0 or 3 -> sz\n\
  • 1-5 digits -> hk\n\
  • 1-5 letters -> us\n\
  • SH/SZ/HK prefixes select the market directly"
)]
pub struct Cli {
    /// Stock ticker, e.g. 600519, SH600519, 00700 or AAPL.
    pub ticker: String,

    /// Market override: sh, sz, hk or us.
    pub market: Option<String>,

    /// Output format for the record.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Request timeout in milliseconds, at least 1 (default 10000).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    /// Log pipeline details to stderr.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    pub fn ticker(&self) -> &str {
        self.ticker.trim()
    }

    /// Market argument trimmed and lowercased.
    pub fn market_hint(&self) -> Option<String> {
        self.market
            .as_deref()
            .map(|market| market.trim().to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON object.
    Json,
    /// One `key: value` line per field.
    Text,
}
