//! Mock device reader
//!
//! Generates synthetic readings for development and tests. Outcomes can be
//! scripted per read to exercise the collector's skip and terminate paths.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use contracts::{ClimateReading, DeviceReader, ParticulateReading, ReadError};
use rand::Rng;
use tracing::debug;

/// Scripted result for one read attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockOutcome {
    /// Produce a synthetic reading
    Ok,
    /// Fail transiently, the device stays usable
    Transient,
    /// Fail fatally, the pipeline must stop
    Fatal,
}

/// Mock device reader
///
/// Reads succeed with generated values unless a script says otherwise. An
/// exhausted script falls back to `MockOutcome::Ok`.
pub struct MockReader<R> {
    device_id: String,
    script: VecDeque<MockOutcome>,
    fail_every: Option<u64>,
    generate: fn(&mut rand::rngs::ThreadRng) -> R,
    reads: u64,
    close_count: Arc<AtomicU32>,
}

impl MockReader<ParticulateReading> {
    /// Mock particulate device
    pub fn particulate(device_id: impl Into<String>) -> Self {
        Self::new(device_id, particulate_value)
    }
}

impl MockReader<ClimateReading> {
    /// Mock climate device
    pub fn climate(device_id: impl Into<String>) -> Self {
        Self::new(device_id, climate_value)
    }
}

impl<R> MockReader<R> {
    fn new(device_id: impl Into<String>, generate: fn(&mut rand::rngs::ThreadRng) -> R) -> Self {
        Self {
            device_id: device_id.into(),
            script: VecDeque::new(),
            fail_every: None,
            generate,
            reads: 0,
            close_count: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Script the outcome of the next read attempts
    pub fn with_script(mut self, outcomes: impl IntoIterator<Item = MockOutcome>) -> Self {
        self.script = outcomes.into_iter().collect();
        self
    }

    /// Fail every nth read transiently (n >= 1)
    pub fn with_fail_every(mut self, n: u64) -> Self {
        self.fail_every = Some(n.max(1));
        self
    }

    /// Shared close counter, kept by tests before the reader moves into the
    /// pipeline
    pub fn close_handle(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.close_count)
    }

    /// Total read attempts so far
    pub fn reads(&self) -> u64 {
        self.reads
    }
}

impl<R> DeviceReader for MockReader<R> {
    type Reading = R;

    fn device_id(&self) -> &str {
        &self.device_id
    }

    fn read_one(&mut self) -> Result<R, ReadError> {
        self.reads += 1;

        let outcome = self.script.pop_front().unwrap_or(MockOutcome::Ok);
        let outcome = match (outcome, self.fail_every) {
            (MockOutcome::Ok, Some(n)) if self.reads.is_multiple_of(n) => MockOutcome::Transient,
            (outcome, _) => outcome,
        };

        match outcome {
            MockOutcome::Ok => {
                let mut rng = rand::rng();
                Ok((self.generate)(&mut rng))
            }
            MockOutcome::Transient => Err(ReadError::transient(
                &self.device_id,
                "injected transient fault",
            )),
            MockOutcome::Fatal => Err(ReadError::fatal(&self.device_id, "injected device fault")),
        }
    }

    fn close(&mut self) {
        self.close_count.fetch_add(1, Ordering::SeqCst);
        debug!(device_id = %self.device_id, "mock reader closed");
    }
}

fn particulate_value(rng: &mut rand::rngs::ThreadRng) -> ParticulateReading {
    ParticulateReading {
        pm1_0_1: rng.random_range(0..=3),
        pm2_5_1: rng.random_range(0..=3),
        pm10_1: rng.random_range(0..=3),
        pm1_0_2: rng.random_range(0..=3),
        pm2_5_2: rng.random_range(0..=3),
        pm10_2: rng.random_range(0..=3),
        count_03: rng.random_range(100..=500),
        count_05: rng.random_range(100..=500),
        count_10: rng.random_range(10..=50),
        count_25: rng.random_range(0..=3),
        count_50: rng.random_range(0..=3),
        count_100: rng.random_range(0..=3),
    }
}

fn climate_value(rng: &mut rand::rngs::ThreadRng) -> ClimateReading {
    ClimateReading {
        temperature: rng.random_range(25.0..40.0),
        humidity: rng.random_range(35.0..45.0),
        pressure: rng.random_range(700.0..1000.0),
    }
}
