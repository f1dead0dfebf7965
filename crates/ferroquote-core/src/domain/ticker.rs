use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_TICKER_LEN: usize = 10;

/// Exchange prefixes a user may put in front of a code, e.g. `SH600519`.
pub const MARKET_PREFIXES: [&str; 3] = ["SH", "SZ", "HK"];

/// Validated user-supplied ticker: 1-10 ASCII letters or digits.
///
/// The original casing is kept; normalization happens in [`clean_code`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Checks the input exactly as given; surrounding whitespace is invalid.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let valid = !input.is_empty()
            && input.len() <= MAX_TICKER_LEN
            && input.chars().all(|ch| ch.is_ascii_alphanumeric());

        if !valid {
            return Err(ValidationError::InvalidTicker {
                value: input.to_owned(),
                max: MAX_TICKER_LEN,
            });
        }

        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Uppercased ticker with any market prefix removed.
    pub fn cleaned(&self) -> String {
        clean_code(&self.0)
    }
}

impl Display for Ticker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Ticker {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Ticker {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}

/// Trim, uppercase and strip one leading `SH`/`SZ`/`HK` prefix.
pub fn clean_code(code: &str) -> String {
    let upper = code.trim().to_ascii_uppercase();
    for prefix in MARKET_PREFIXES {
        if let Some(rest) = upper.strip_prefix(prefix) {
            return rest.to_owned();
        }
    }
    upper
}
