//! Prometheus counters for swallowed faults.
//!
//! # Design
//! - Encapsulates collector registration to keep the public API small.
//! - Doubles as a [`FaultObserver`] so it can be handed straight to the
//!   storage and preload helpers.

use std::sync::Arc;

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use crate::error::{Result, TelemetryError};
use crate::observer::{Fault, FaultObserver};

const FAULTS_TOTAL: &str = "osint_hub_faults_total";

/// Prometheus-backed fault counters.
#[derive(Clone)]
pub struct FaultMetrics {
    inner: Arc<FaultMetricsInner>,
}

struct FaultMetricsInner {
    registry: Registry,
    faults_total: IntCounterVec,
}

impl FaultMetrics {
    /// Construct a registry with the fault counter registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the collector cannot be built or registered.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let faults_total = IntCounterVec::new(
            Opts::new(FAULTS_TOTAL, "Faults swallowed by UI helpers"),
            &["kind", "operation"],
        )
        .map_err(|source| TelemetryError::MetricsCollector {
            name: FAULTS_TOTAL,
            source,
        })?;
        registry
            .register(Box::new(faults_total.clone()))
            .map_err(|source| TelemetryError::MetricsRegister {
                name: FAULTS_TOTAL,
                source,
            })?;

        Ok(Self {
            inner: Arc::new(FaultMetricsInner {
                registry,
                faults_total,
            }),
        })
    }

    /// Increment the counter for the fault's kind and operation.
    pub fn record(&self, fault: &Fault) {
        self.inner
            .faults_total
            .with_label_values(&[fault.kind(), fault.operation()])
            .inc();
    }

    /// Current count for a kind/operation pair.
    #[must_use]
    pub fn fault_count(&self, kind: &str, operation: &str) -> u64 {
        self.inner
            .faults_total
            .get_metric_with_label_values(&[kind, operation])
            .map_or(0, |counter| counter.get())
    }

    /// Render all metrics using the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the output is not UTF-8.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|source| TelemetryError::MetricsEncode { source })?;
        String::from_utf8(buffer).map_err(|source| TelemetryError::MetricsUtf8 { source })
    }
}

impl FaultObserver for FaultMetrics {
    fn observe(&self, fault: &Fault) {
        self.record(fault);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::StoreOperation;

    #[test]
    fn counts_faults_by_kind_and_operation() -> Result<()> {
        let metrics = FaultMetrics::new()?;
        let fault = Fault::Store {
            operation: StoreOperation::Get,
            key: "osint-hub-favorites".to_string(),
            detail: "expected value".to_string(),
        };
        metrics.observe(&fault);
        metrics.observe(&fault);
        metrics.observe(&Fault::Import {
            module: "SearchHistory".to_string(),
            detail: "offline".to_string(),
        });

        assert_eq!(metrics.fault_count("store", "get"), 2);
        assert_eq!(metrics.fault_count("import", "import"), 1);
        assert_eq!(metrics.fault_count("store", "set"), 0);
        Ok(())
    }

    #[test]
    fn render_exposes_fault_counter() -> Result<()> {
        let metrics = FaultMetrics::new()?;
        metrics.record(&Fault::EnvironmentAbsent {
            operation: "preload_component",
        });
        let rendered = metrics.render()?;
        assert!(rendered.contains(FAULTS_TOTAL));
        assert!(rendered.contains("environment_absent"));
        Ok(())
    }
}
