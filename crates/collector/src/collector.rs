//! SampleCollector - one collection cycle over a device reader

use std::time::Duration;

use contracts::{Batch, DeviceReader, ReadError, Sample};
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

/// Collects batches of samples from a device reader
///
/// Generic over the reading shape; both pipelines share this control flow.
#[derive(Debug, Clone)]
pub struct SampleCollector {
    partition_key: String,
    batch_size: usize,
    read_interval: Duration,
}

impl SampleCollector {
    /// Create a collector
    ///
    /// `batch_size` is the number of read attempts per cycle,
    /// `read_interval` the unconditional delay after every attempt.
    pub fn new(
        partition_key: impl Into<String>,
        batch_size: usize,
        read_interval: Duration,
    ) -> Self {
        Self {
            partition_key: partition_key.into(),
            batch_size,
            read_interval,
        }
    }

    /// Samples per batch this collector attempts
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Run one collection cycle
    ///
    /// Performs exactly `batch_size` read attempts. Transient faults skip
    /// their slot; the batch holds one sample per successful read, in
    /// acquisition order, and may be empty.
    ///
    /// # Errors
    /// A fatal device fault aborts the cycle immediately.
    #[instrument(name = "collect_batch", skip(self, reader), fields(device_id = %reader.device_id()))]
    pub async fn collect<D>(&self, reader: &mut D) -> Result<Batch<D::Reading>, ReadError>
    where
        D: DeviceReader + ?Sized,
    {
        let mut batch = Vec::with_capacity(self.batch_size);

        for attempt in 1..=self.batch_size {
            match reader.read_one() {
                Ok(reading) => {
                    batch.push(Sample::new(self.partition_key.as_str(), reading));
                    debug!(attempt, collected = batch.len(), "sample captured");
                }
                Err(fault @ ReadError::Fatal { .. }) => return Err(fault),
                Err(fault) => {
                    warn!(attempt, error = %fault, "read failed, skipping sample");
                }
            }

            sleep(self.read_interval).await;
        }

        debug!(
            collected = batch.len(),
            attempted = self.batch_size,
            "collection cycle complete"
        );

        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readers::{MockOutcome, MockReader};

    fn collector(batch_size: usize) -> SampleCollector {
        SampleCollector::new("sensor#default", batch_size, Duration::ZERO)
    }

    #[tokio::test]
    async fn collects_full_batch() {
        let mut reader = MockReader::climate("bme280");
        let batch = collector(5).collect(&mut reader).await.unwrap();

        assert_eq!(batch.len(), 5);
        assert_eq!(reader.reads(), 5);
        assert!(batch.iter().all(|s| s.pk == "sensor#default"));
    }

    #[tokio::test]
    async fn transient_fault_skips_one_slot() {
        let mut reader = MockReader::particulate("pms5003").with_script([
            MockOutcome::Ok,
            MockOutcome::Transient,
            MockOutcome::Ok,
        ]);

        let batch = collector(3).collect(&mut reader).await.unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(reader.reads(), 3);
    }

    #[tokio::test]
    async fn all_failures_yield_empty_batch() {
        let mut reader = MockReader::climate("bme280")
            .with_script([MockOutcome::Transient; 4]);

        let batch = collector(4).collect(&mut reader).await.unwrap();

        assert!(batch.is_empty());
        assert_eq!(reader.reads(), 4);
    }

    #[tokio::test]
    async fn fatal_fault_aborts_cycle() {
        let mut reader = MockReader::climate("bme280").with_script([
            MockOutcome::Ok,
            MockOutcome::Fatal,
            MockOutcome::Ok,
        ]);

        let result = collector(3).collect(&mut reader).await;

        assert!(result.unwrap_err().is_fatal());
        // the cycle stopped at the fatal attempt
        assert_eq!(reader.reads(), 2);
    }

    #[tokio::test]
    async fn timestamps_are_non_decreasing() {
        let mut reader = MockReader::climate("bme280");
        let batch = collector(6).collect(&mut reader).await.unwrap();

        for pair in batch.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[tokio::test]
    async fn custom_partition_key_is_stamped() {
        let mut reader = MockReader::climate("bme280");
        let batch = SampleCollector::new("greenhouse#1", 2, Duration::ZERO)
            .collect(&mut reader)
            .await
            .unwrap();

        assert!(batch.iter().all(|s| s.pk == "greenhouse#1"));
    }
}
