//! Hardware readers (feature `hardware`)
//!
//! Device protocols live in the driver crates; this module only adapts them
//! to the `DeviceReader` seam.

use bme280::i2c::BME280;
use contracts::{ClimateReading, DeviceReader, ReadError, TelemetryError};
use linux_embedded_hal::{Delay, I2cdev};
use tracing::{debug, info};

/// BME280 climate sensor on a Linux i2c bus
pub struct Bme280Reader {
    device_id: String,
    driver: Option<BME280<I2cdev>>,
    delay: Delay,
}

impl Bme280Reader {
    /// Open and initialize the sensor
    ///
    /// `bus` is the i2c device path (e.g. `/dev/i2c-1`), `address` the
    /// sensor address (0x76 primary, 0x77 secondary).
    ///
    /// # Errors
    /// Bus open or sensor init failure.
    pub fn open(
        device_id: impl Into<String>,
        bus: &str,
        address: u8,
    ) -> Result<Self, TelemetryError> {
        let device_id = device_id.into();

        let i2c = I2cdev::new(bus)
            .map_err(|e| TelemetryError::device_init(&device_id, format!("open {bus}: {e}")))?;

        let mut driver = if address == 0x77 {
            BME280::new_secondary(i2c)
        } else {
            BME280::new_primary(i2c)
        };

        let mut delay = Delay;
        driver
            .init(&mut delay)
            .map_err(|e| TelemetryError::device_init(&device_id, format!("init: {e:?}")))?;

        info!(device_id = %device_id, bus, address, "bme280 initialized");

        Ok(Self {
            device_id,
            driver: Some(driver),
            delay,
        })
    }
}

impl DeviceReader for Bme280Reader {
    type Reading = ClimateReading;

    fn device_id(&self) -> &str {
        &self.device_id
    }

    fn read_one(&mut self) -> Result<ClimateReading, ReadError> {
        let driver = self
            .driver
            .as_mut()
            .ok_or_else(|| ReadError::fatal(&self.device_id, "i2c handle released"))?;

        let measurement = driver
            .measure(&mut self.delay)
            .map_err(|e| ReadError::transient(&self.device_id, format!("measure: {e:?}")))?;

        Ok(ClimateReading {
            temperature: f64::from(measurement.temperature),
            humidity: f64::from(measurement.humidity),
            pressure: f64::from(measurement.pressure),
        })
    }

    fn close(&mut self) {
        if self.driver.take().is_some() {
            debug!(device_id = %self.device_id, "bme280 i2c handle released");
        }
    }
}
