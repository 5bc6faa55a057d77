//! DeviceReader trait - sensor data source abstraction
//!
//! Defines a unified interface for sensor devices, decoupling the collector
//! from concrete device implementations. Supports unified handling of mock,
//! replay and hardware readers.

use crate::ReadError;

/// Sensor device trait
///
/// One blocking "read one sample" operation plus resource release. The
/// pipeline is strictly sequential, so a blocking read holds the sole
/// thread of control by design.
///
/// # Example
///
/// ```ignore
/// let mut reader = readers::mock::MockReader::climate("bme280");
/// let reading = reader.read_one()?;
/// reader.close();
/// ```
pub trait DeviceReader {
    /// Reading shape this device produces
    type Reading;

    /// Device ID (used for logging/metrics)
    fn device_id(&self) -> &str;

    /// Acquire one reading, blocking until the device responds
    ///
    /// # Errors
    /// `ReadError::Transient` for a recoverable single-read failure,
    /// `ReadError::Fatal` when the device can no longer produce samples.
    fn read_one(&mut self) -> Result<Self::Reading, ReadError>;

    /// Release the underlying communication resource (bus/port handle)
    ///
    /// Repeated calls must be idempotent.
    fn close(&mut self);
}
