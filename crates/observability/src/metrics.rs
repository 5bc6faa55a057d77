//! Pipeline metric recording
//!
//! Counters and gauges for the collect/upload cycle, recorded through the
//! `metrics` facade.

use contracts::UploadOutcome;
use metrics::{counter, gauge, histogram};

/// Record one completed collection cycle
pub fn record_batch_collected(device_id: &str, collected: usize, attempted: usize) {
    counter!(
        "enviro_uplink_samples_total",
        "device_id" => device_id.to_string()
    )
    .increment(collected as u64);

    gauge!(
        "enviro_uplink_last_batch_size",
        "device_id" => device_id.to_string()
    )
    .set(collected as f64);

    let skipped = attempted.saturating_sub(collected);
    if skipped > 0 {
        counter!(
            "enviro_uplink_read_faults_total",
            "device_id" => device_id.to_string(),
            "class" => "transient"
        )
        .increment(skipped as u64);
    }
}

/// Record the structural fault that ended the pipeline
pub fn record_fatal_fault(device_id: &str) {
    counter!(
        "enviro_uplink_read_faults_total",
        "device_id" => device_id.to_string(),
        "class" => "fatal"
    )
    .increment(1);
}

/// Record the wall-clock cost of one batch delivery (both attempts)
pub fn record_upload_duration(device_id: &str, duration_ms: f64) {
    histogram!(
        "enviro_uplink_upload_duration_ms",
        "device_id" => device_id.to_string()
    )
    .record(duration_ms);
}

/// Record the outcome of one batch delivery
pub fn record_upload_outcome(device_id: &str, outcome: &UploadOutcome) {
    let counter = match outcome {
        UploadOutcome::Delivered { .. } => counter!(
            "enviro_uplink_batches_delivered_total",
            "device_id" => device_id.to_string()
        ),
        UploadOutcome::Dropped { .. } => counter!(
            "enviro_uplink_batches_dropped_total",
            "device_id" => device_id.to_string()
        ),
    };
    counter.increment(1);

    let attempts = outcome.attempts();
    if attempts > 1 {
        counter!(
            "enviro_uplink_upload_retries_total",
            "device_id" => device_id.to_string()
        )
        .increment(u64::from(attempts - 1));
    }
}
