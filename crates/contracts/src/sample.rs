//! Sample and batch types - collector output

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Partition key applied when the station config does not override it
pub const DEFAULT_PARTITION_KEY: &str = "sensor#default";

/// A reading enriched with partition key and capture timestamp
///
/// Built only from a successfully completed reading; failed reads never
/// produce a `Sample`. The timestamp is epoch milliseconds, taken when the
/// sample is constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample<R> {
    /// Partition key tagging the logical sensor source
    pub pk: String,

    /// Capture timestamp (milliseconds since epoch)
    pub timestamp: i64,

    /// Channel fields, flattened alongside pk/timestamp on the wire
    #[serde(flatten)]
    pub reading: R,
}

impl<R> Sample<R> {
    /// Enrich a completed reading, stamping it with the current wall clock
    pub fn new(partition_key: impl Into<String>, reading: R) -> Self {
        Self {
            pk: partition_key.into(),
            timestamp: Utc::now().timestamp_millis(),
            reading,
        }
    }
}

/// Ordered group of samples produced by one collection cycle
///
/// May be shorter than the configured batch size when reads failed, and
/// empty when every read failed. Never persisted or merged across cycles.
pub type Batch<R> = Vec<Sample<R>>;

/// Wire envelope wrapping one batch for transmission
#[derive(Debug, Serialize)]
pub struct UploadEnvelope<'a, R> {
    pub data: &'a [Sample<R>],
}
