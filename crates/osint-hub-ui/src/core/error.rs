//! Error types for the UI core.
//!
//! None of these reach end users: the storage and preload helpers convert them
//! into [`osint_hub_telemetry::Fault`] records. They stay typed so store and
//! import implementations can report precise causes.

use thiserror::Error;

/// Failure raised by a [`crate::core::storage::KeyValueStore`] backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing store is missing or disabled (private mode, no window).
    #[error("storage backend unavailable")]
    Unavailable,
    /// Writing the entry would exceed the store's capacity.
    #[error("storage quota exceeded writing {key}")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Bytes the write required.
        required: usize,
        /// Known capacity in bytes, when the backend reports one.
        capacity: Option<usize>,
    },
    /// Any other backend failure.
    #[error("storage backend error: {detail}")]
    Backend {
        /// Backend-provided detail.
        detail: String,
    },
}

/// Convenience alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised by a deferred component import.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The module could not be fetched.
    #[error("failed to fetch module {module}: {detail}")]
    Fetch {
        /// Module or chunk identifier.
        module: String,
        /// Transport detail.
        detail: String,
    },
    /// The module endpoint answered with a non-success status.
    #[error("module {module} responded with status {status}")]
    Status {
        /// Module or chunk identifier.
        module: String,
        /// HTTP status code.
        status: u16,
    },
    /// The module is not available in this build.
    #[error("module {module} unavailable")]
    Unavailable {
        /// Module or chunk identifier.
        module: String,
    },
}

/// Outcome of a deferred component import.
pub type ImportResult = Result<(), ImportError>;

/// Theme token generation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// Accent name outside the supported palette set.
    #[error("unknown accent color")]
    UnknownAccent {
        /// Name provided by the caller.
        value: String,
    },
}

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Payload was not valid JSON for the configuration schema.
    #[error("invalid configuration payload")]
    Parse {
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// Field contained an invalid value.
    #[error("invalid configuration field")]
    InvalidField {
        /// Section containing the field.
        section: &'static str,
        /// Field that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn store_error_messages_carry_context() {
        let err = StoreError::QuotaExceeded {
            key: "osint-hub-favorites".to_string(),
            required: 12,
            capacity: Some(8),
        };
        assert_eq!(
            err.to_string(),
            "storage quota exceeded writing osint-hub-favorites"
        );
        assert_eq!(
            StoreError::Backend {
                detail: "SecurityError".to_string()
            }
            .to_string(),
            "storage backend error: SecurityError"
        );
    }

    #[test]
    fn import_error_messages_name_module() {
        let err = ImportError::Status {
            module: "ExportTools".to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "module ExportTools responded with status 404");
    }

    #[test]
    fn config_parse_error_exposes_source() {
        let source = serde_json::from_str::<serde_json::Value>("{")
            .err()
            .expect("invalid json");
        let err = ConfigError::Parse { source };
        assert_eq!(err.to_string(), "invalid configuration payload");
        assert!(err.source().is_some());
    }
}
