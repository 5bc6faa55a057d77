//! Uploader - at-most-two-attempts batch delivery

use bytes::Bytes;
use contracts::{Batch, BatchTransport, TelemetryError, UploadEnvelope, UploadOutcome};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

/// Attempts per batch: the initial PUT plus one immediate retry.
const MAX_UPLOAD_ATTEMPTS: u32 = 2;

/// Delivers batches through a transport
///
/// Never raises to its caller; both outcomes are ordinary values and the
/// driver loop continues either way. A batch that fails both attempts is
/// abandoned.
pub struct Uploader<T> {
    transport: T,
}

impl<T: BatchTransport> Uploader<T> {
    /// Create an uploader over a transport
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Deliver one batch
    ///
    /// The envelope is serialized once and the identical body is re-sent on
    /// retry. An empty batch is still uploaded.
    #[instrument(name = "upload_batch", skip(self, batch), fields(samples = batch.len()))]
    pub async fn upload<R: Serialize>(&self, batch: &Batch<R>) -> UploadOutcome {
        let envelope = UploadEnvelope { data: batch };
        let body = match serde_json::to_vec(&envelope) {
            Ok(body) => Bytes::from(body),
            Err(e) => {
                // nothing left to retry with
                error!(error = %e, "envelope serialization failed, batch dropped");
                return UploadOutcome::Dropped {
                    attempts: 0,
                    reason: format!("serialize: {e}"),
                };
            }
        };

        let mut last_error = String::new();
        for attempt in 1..=MAX_UPLOAD_ATTEMPTS {
            match self.transport.put(body.clone()).await {
                Ok(reply) => {
                    debug!(status = reply.status, body = %reply.body, "endpoint response");
                    info!(attempt, samples = batch.len(), "batch delivered");
                    return UploadOutcome::Delivered { attempts: attempt };
                }
                Err(e) => {
                    warn!(attempt, error = %e, "upload attempt failed");
                    last_error = e.to_string();
                }
            }
        }

        error!(
            attempts = MAX_UPLOAD_ATTEMPTS,
            error = %last_error,
            "batch dropped after final attempt"
        );
        UploadOutcome::Dropped {
            attempts: MAX_UPLOAD_ATTEMPTS,
            reason: last_error,
        }
    }
}
