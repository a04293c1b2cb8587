//! Failures raised while building or exporting fault metrics.

use prometheus::Error as PrometheusError;
use thiserror::Error;

/// Result alias for metric operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Metric setup and export failures.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The counter family could not be constructed.
    #[error("failed to build collector {name}")]
    MetricsCollector {
        /// Metric family name.
        name: &'static str,
        /// Prometheus cause.
        #[source]
        source: PrometheusError,
    },
    /// The registry refused the collector (usually a duplicate name).
    #[error("failed to register collector {name}")]
    MetricsRegister {
        /// Metric family name.
        name: &'static str,
        /// Prometheus cause.
        #[source]
        source: PrometheusError,
    },
    /// Text exposition encoding failed.
    #[error("failed to encode metrics")]
    MetricsEncode {
        /// Prometheus cause.
        #[source]
        source: PrometheusError,
    },
    /// The encoder produced bytes that are not UTF-8.
    #[error("metrics exposition was not valid utf-8")]
    MetricsUtf8 {
        /// Conversion cause.
        #[source]
        source: std::string::FromUtf8Error,
    },
}
