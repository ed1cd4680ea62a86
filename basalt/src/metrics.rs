use std::sync::Once;

use metrics::{Unit, describe_histogram, histogram};

use crate::ports::TtlMetrics;

const METRIC_EXTRA_TTL_SECONDS: &str = "basalt_extra_ttl_seconds";

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Register metric descriptions with the installed recorder. Safe to call
/// more than once.
pub fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_histogram!(
            METRIC_EXTRA_TTL_SECONDS,
            Unit::Seconds,
            "Remaining TTL observed on each successfully retrieved record."
        );
    });
}

/// Production TTL sink forwarding observations to the `metrics` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct Telemetry;

impl TtlMetrics for Telemetry {
    fn record_extra_ttl_seconds(&self, seconds: f64) {
        histogram!(METRIC_EXTRA_TTL_SECONDS).record(seconds);
    }
}

#[cfg(test)]
mod tests {
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};

    use super::*;

    #[test]
    fn observation_reaches_the_recorder() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            Telemetry.record_extra_ttl_seconds(42.0);
        });

        let snapshot = snapshotter.snapshot().into_vec();
        assert_eq!(snapshot.len(), 1);
        let (key, _, _, value) = &snapshot[0];
        assert_eq!(key.key().name(), METRIC_EXTRA_TTL_SECONDS);
        match value {
            DebugValue::Histogram(values) => {
                assert_eq!(values.len(), 1);
                assert_eq!(values[0].into_inner(), 42.0);
            }
            other => panic!("expected a histogram, got {other:?}"),
        }
    }
}
