use thiserror::Error;

/// Coarse classification of [`RateError`] used by callers deciding on retry or exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateErrorKind {
    SourceUnavailable,
    MalformedDocument,
    UnknownCode,
    RefreshInProgress,
}

/// Errors surfaced by the rate source and the catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RateError {
    #[error("rate feed unavailable: {message}")]
    SourceUnavailable { message: String, retryable: bool },

    #[error("malformed rate document: {0}")]
    MalformedDocument(String),

    #[error("unknown currency code '{0}'")]
    UnknownCode(String),

    #[error("a refresh is already in progress")]
    RefreshInProgress,
}

impl RateError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            message: message.into(),
            retryable: true,
        }
    }

    pub fn unavailable_permanent(message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            message: message.into(),
            retryable: false,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDocument(message.into())
    }

    pub const fn kind(&self) -> RateErrorKind {
        match self {
            Self::SourceUnavailable { .. } => RateErrorKind::SourceUnavailable,
            Self::MalformedDocument(_) => RateErrorKind::MalformedDocument,
            Self::UnknownCode(_) => RateErrorKind::UnknownCode,
            Self::RefreshInProgress => RateErrorKind::RefreshInProgress,
        }
    }

    pub const fn retryable(&self) -> bool {
        match self {
            Self::SourceUnavailable { retryable, .. } => *retryable,
            _ => false,
        }
    }

    /// Stable dotted identifier, suitable for machine-readable output.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::SourceUnavailable { .. } => "rates.source_unavailable",
            Self::MalformedDocument(_) => "rates.malformed_document",
            Self::UnknownCode(_) => "rates.unknown_code",
            Self::RefreshInProgress => "rates.refresh_in_progress",
        }
    }
}

/// Field-level validation failures raised while building domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field '{field}' cannot be empty")]
    EmptyField { field: &'static str },
    #[error("rate value '{value}' is not a number")]
    InvalidRate { value: String },
    #[error("rate value '{value}' must be finite and non-negative")]
    RateOutOfRange { value: String },
    #[error("currency code '{code}' appears more than once")]
    DuplicateCode { code: String },
    #[error("feed date '{value}' is not in dd.mm.yyyy form")]
    InvalidDate { value: String },
}

/// Feed configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("feed url cannot be empty")]
    EmptyUrl,
    #[error("feed url must start with http:// or https://: '{value}'")]
    UnsupportedScheme { value: String },
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
    #[error("environment variable {name} has invalid value '{value}'")]
    InvalidEnv { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_failures_are_retryable() {
        assert!(RateError::unavailable("connection refused").retryable());
        assert!(!RateError::unavailable_permanent("status 404").retryable());
        assert!(!RateError::malformed("missing Value").retryable());
        assert!(!RateError::UnknownCode(String::from("XYZ")).retryable());
    }

    #[test]
    fn unknown_code_message_names_the_code() {
        let error = RateError::UnknownCode(String::from("XYZ"));
        assert_eq!(error.kind(), RateErrorKind::UnknownCode);
        assert_eq!(error.code(), "rates.unknown_code");
        assert!(error.to_string().contains("XYZ"));
    }
}
