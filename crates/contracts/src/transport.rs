//! BatchTransport trait - uploader output interface
//!
//! Abstracts the signed PUT so the retry policy can be exercised without a
//! network.

use bytes::Bytes;

use crate::TelemetryError;

/// Response observed from one PUT attempt
///
/// Any reply counts as success regardless of status code; the uploader only
/// logs what came back.
#[derive(Debug, Clone)]
pub struct TransportReply {
    /// HTTP status code
    pub status: u16,

    /// Response body, consumed for logging only
    pub body: String,
}

/// Batch transmission trait
///
/// One PUT of a serialized envelope to the ingestion endpoint.
#[trait_variant::make(BatchTransport: Send)]
pub trait LocalBatchTransport {
    /// Transmit one serialized envelope
    ///
    /// # Errors
    /// Returns a transmission error when the request could not be completed
    /// (connect failure, timeout). Receiving any response is success.
    async fn put(&self, body: Bytes) -> Result<TransportReply, TelemetryError>;
}

/// Outcome of one batch delivery attempt pair
///
/// Explicit value instead of an error path: the driver loop continues on
/// either variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The PUT returned a response
    Delivered { attempts: u32 },

    /// Both attempts failed, the batch is abandoned
    Dropped { attempts: u32, reason: String },
}

impl UploadOutcome {
    /// Whether the batch reached the endpoint
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }

    /// Number of PUT attempts performed
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Delivered { attempts } | Self::Dropped { attempts, .. } => *attempts,
        }
    }
}
