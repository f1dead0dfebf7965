use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Input errors raised before any network or parsing work.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid ticker '{value}': only ASCII letters and digits are allowed, 1-{max} characters")]
    InvalidTicker { value: String, max: usize },

    #[error("invalid market '{value}', expected one of: {allowed}")]
    InvalidMarket { value: String, allowed: String },
}

/// Error classification surfaced at the CLI boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorKind {
    InputValidation,
    MarketUnresolved,
    NotFound,
    NetworkFailure,
    HttpFailure,
    ParseFailure,
}

impl QueryErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidation => "input_validation",
            Self::MarketUnresolved => "market_unresolved",
            Self::NotFound => "not_found",
            Self::NetworkFailure => "network_failure",
            Self::HttpFailure => "http_failure",
            Self::ParseFailure => "parse_failure",
        }
    }
}

impl Display for QueryErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single quote query. Produced instead of a quote record.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    #[error(transparent)]
    InputValidation(#[from] ValidationError),

    #[error(
        "无法识别该股票代码 '{ticker}'，请确认后重试。支持 A 股（6 位数字）、港股（5 位数字）、美股（英文字母）。\
         Unable to recognize ticker '{ticker}': use 6 digits for A-shares, up to 5 digits for Hong Kong, or letters for US stocks."
    )]
    MarketUnresolved { ticker: String },

    #[error("stock {code} not found, please check the ticker")]
    NotFound { code: String },

    #[error("network request failed: {message}")]
    NetworkFailure { message: String },

    #[error("HTTP request failed: {status} {reason}")]
    HttpFailure { status: u16, reason: String },

    #[error("failed to parse quote: {message}")]
    ParseFailure { message: String },
}

impl QueryError {
    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkFailure {
            message: message.into(),
        }
    }

    pub fn http(status: u16, reason: impl Into<String>) -> Self {
        Self::HttpFailure {
            status,
            reason: reason.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseFailure {
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> QueryErrorKind {
        match self {
            Self::InputValidation(_) => QueryErrorKind::InputValidation,
            Self::MarketUnresolved { .. } => QueryErrorKind::MarketUnresolved,
            Self::NotFound { .. } => QueryErrorKind::NotFound,
            Self::NetworkFailure { .. } => QueryErrorKind::NetworkFailure,
            Self::HttpFailure { .. } => QueryErrorKind::HttpFailure,
            Self::ParseFailure { .. } => QueryErrorKind::ParseFailure,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self.kind() {
            QueryErrorKind::InputValidation => "query.input_validation",
            QueryErrorKind::MarketUnresolved => "query.market_unresolved",
            QueryErrorKind::NotFound => "query.not_found",
            QueryErrorKind::NetworkFailure => "query.network_failure",
            QueryErrorKind::HttpFailure => "query.http_failure",
            QueryErrorKind::ParseFailure => "query.parse_failure",
        }
    }
}
