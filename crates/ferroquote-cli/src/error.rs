use ferroquote_core::{QueryError, QueryErrorKind};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("usage: ferroquote <ticker> [market]")]
    Usage,

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Usage => 2,
            Self::Query(error) => match error.kind() {
                QueryErrorKind::InputValidation | QueryErrorKind::MarketUnresolved => 2,
                QueryErrorKind::NotFound => 3,
                QueryErrorKind::NetworkFailure | QueryErrorKind::HttpFailure => 4,
                QueryErrorKind::ParseFailure => 5,
            },
            Self::Serialization(_) => 10,
            Self::Io(_) => 10,
        }
    }
}
