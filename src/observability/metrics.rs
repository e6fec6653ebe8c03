//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): every call by mode and response status
//! - `gateway_upstream_duration_seconds` (histogram): time spent per forward,
//!   recorded only when an upstream call was attempted
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Labels stay low-cardinality (no URLs, no routing keys)

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

const REQUESTS_TOTAL: &str = "gateway_requests_total";
const UPSTREAM_DURATION: &str = "gateway_upstream_duration_seconds";

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

/// Record a call rejected before any upstream call was made.
pub fn record_rejected(mode: &'static str, status: u16) {
    ::metrics::counter!(REQUESTS_TOTAL, "mode" => mode, "status" => status.to_string())
        .increment(1);
}

/// Record a call that went through the forwarder.
pub fn record_forward(mode: &'static str, status: u16, start: Instant) {
    ::metrics::counter!(REQUESTS_TOTAL, "mode" => mode, "status" => status.to_string())
        .increment(1);
    ::metrics::histogram!(UPSTREAM_DURATION, "mode" => mode)
        .record(start.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::metrics::{
        Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
    };
    use std::sync::Mutex;

    /// Remembers the name of every metric touched.
    #[derive(Default)]
    struct NameRecorder {
        names: Mutex<Vec<String>>,
    }

    impl NameRecorder {
        fn names(&self) -> Vec<String> {
            self.names.lock().unwrap().clone()
        }

        fn push(&self, key: &Key) {
            self.names.lock().unwrap().push(key.name().to_string());
        }
    }

    impl Recorder for NameRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            self.push(key);
            Counter::noop()
        }

        fn register_gauge(&self, key: &Key, _: &Metadata<'_>) -> Gauge {
            self.push(key);
            Gauge::noop()
        }

        fn register_histogram(&self, key: &Key, _: &Metadata<'_>) -> Histogram {
            self.push(key);
            Histogram::noop()
        }
    }

    #[test]
    fn test_rejected_call_skips_duration() {
        let recorder = NameRecorder::default();
        ::metrics::with_local_recorder(&recorder, || record_rejected("by_key", 404));
        assert_eq!(recorder.names(), vec![REQUESTS_TOTAL.to_string()]);
    }

    #[test]
    fn test_forward_records_duration() {
        let recorder = NameRecorder::default();
        ::metrics::with_local_recorder(&recorder, || {
            record_forward("by_target", 200, Instant::now())
        });
        assert_eq!(
            recorder.names(),
            vec![REQUESTS_TOTAL.to_string(), UPSTREAM_DURATION.to_string()]
        );
    }
}
