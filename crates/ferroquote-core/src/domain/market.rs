use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Exchange grouping a ticker trades on.
///
/// Decides both the provider symbol shape and whether volume/amount need
/// unit conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    /// Shanghai Stock Exchange.
    Sh,
    /// Shenzhen Stock Exchange.
    Sz,
    /// Hong Kong Stock Exchange.
    Hk,
    /// US exchanges.
    Us,
}

impl Market {
    pub const ALL: [Self; 4] = [Self::Sh, Self::Sz, Self::Hk, Self::Us];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sh => "sh",
            Self::Sz => "sz",
            Self::Hk => "hk",
            Self::Us => "us",
        }
    }

    /// Mainland markets report volume in lots and amount in ten-thousands.
    pub const fn is_a_share(self) -> bool {
        matches!(self, Self::Sh | Self::Sz)
    }

    /// Comma separated, alphabetically sorted list of accepted identifiers.
    pub fn allowed_identifiers() -> String {
        let mut names = Self::ALL.map(Self::as_str);
        names.sort_unstable();
        names.join(", ")
    }
}

impl Display for Market {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Market {
    type Err = ValidationError;

    /// Identifiers are matched exactly: lowercase, no surrounding whitespace.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "sh" => Ok(Self::Sh),
            "sz" => Ok(Self::Sz),
            "hk" => Ok(Self::Hk),
            "us" => Ok(Self::Us),
            _ => Err(ValidationError::InvalidMarket {
                value: value.to_owned(),
                allowed: Self::allowed_identifiers(),
            }),
        }
    }
}
