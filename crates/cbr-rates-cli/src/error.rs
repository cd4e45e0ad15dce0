use cbr_rates_core::{ConfigError, RateError, RateErrorKind};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Rate(#[from] RateError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Rate(error) => match error.kind() {
                RateErrorKind::UnknownCode => 2,
                RateErrorKind::SourceUnavailable => 3,
                RateErrorKind::MalformedDocument => 4,
                RateErrorKind::RefreshInProgress => 5,
            },
            Self::Config(_) => 2,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        assert_eq!(
            CliError::from(RateError::UnknownCode(String::from("XYZ"))).exit_code(),
            2
        );
        assert_eq!(CliError::from(RateError::unavailable("down")).exit_code(), 3);
        assert_eq!(CliError::from(RateError::malformed("bad")).exit_code(), 4);
        assert_eq!(CliError::from(RateError::RefreshInProgress).exit_code(), 5);
        assert_eq!(CliError::from(ConfigError::ZeroTimeout).exit_code(), 2);
    }
}
