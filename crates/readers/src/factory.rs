//! Reader factory - builds a device reader from a station blueprint

use std::path::Path;

use contracts::{
    ClimateReading, DeviceReader, DeviceSource, ParticulateReading, StationBlueprint,
    TelemetryError,
};
use tracing::info;

use crate::mock::MockReader;
use crate::replay::ReplayReader;

/// Boxed reader for one pipeline
pub type BoxedReader<R> = Box<dyn DeviceReader<Reading = R> + Send>;

/// Build the particulate device reader selected by the blueprint
pub fn particulate_reader(
    blueprint: &StationBlueprint,
) -> Result<BoxedReader<ParticulateReading>, TelemetryError> {
    let device_id = blueprint.station.device_id.clone();

    match blueprint.device.source {
        DeviceSource::Mock => {
            let reader = apply_mock_params(MockReader::particulate(&device_id), blueprint);
            info!(device_id = %device_id, "using mock particulate reader");
            Ok(Box::new(reader))
        }
        DeviceSource::Replay => replay_reader(blueprint, &device_id),
        DeviceSource::Hardware => Err(TelemetryError::device_init(
            &device_id,
            "no in-tree particulate hardware driver; use a replay recording from \
             the acquisition helper, or the mock source",
        )),
    }
}

/// Build the climate device reader selected by the blueprint
pub fn climate_reader(
    blueprint: &StationBlueprint,
) -> Result<BoxedReader<ClimateReading>, TelemetryError> {
    let device_id = blueprint.station.device_id.clone();

    match blueprint.device.source {
        DeviceSource::Mock => {
            let reader = apply_mock_params(MockReader::climate(&device_id), blueprint);
            info!(device_id = %device_id, "using mock climate reader");
            Ok(Box::new(reader))
        }
        DeviceSource::Replay => replay_reader(blueprint, &device_id),
        DeviceSource::Hardware => hardware_climate_reader(blueprint, &device_id),
    }
}

fn apply_mock_params<R>(reader: MockReader<R>, blueprint: &StationBlueprint) -> MockReader<R> {
    match blueprint
        .device
        .params
        .get("fail_every")
        .and_then(|raw| raw.parse::<u64>().ok())
    {
        Some(n) if n >= 1 => reader.with_fail_every(n),
        _ => reader,
    }
}

fn replay_reader<R>(
    blueprint: &StationBlueprint,
    device_id: &str,
) -> Result<BoxedReader<R>, TelemetryError>
where
    R: serde::de::DeserializeOwned + Clone + Send + 'static,
{
    let path = blueprint.device.params.get("path").ok_or_else(|| {
        TelemetryError::config_validation("device.params.path", "replay source requires 'path'")
    })?;

    let loop_playback = blueprint
        .device
        .params
        .get("loop")
        .is_some_and(|raw| raw == "true");

    let reader = ReplayReader::load(device_id, Path::new(path), loop_playback)?;
    info!(device_id = %device_id, path = %path, loop_playback, "using replay reader");
    Ok(Box::new(reader))
}

#[cfg(feature = "hardware")]
fn hardware_climate_reader(
    blueprint: &StationBlueprint,
    device_id: &str,
) -> Result<BoxedReader<ClimateReading>, TelemetryError> {
    let bus = blueprint
        .device
        .params
        .get("bus")
        .map(String::as_str)
        .unwrap_or("/dev/i2c-1");

    let address = match blueprint.device.params.get("address") {
        Some(raw) => parse_i2c_address(raw)
            .ok_or_else(|| {
                TelemetryError::config_validation(
                    "device.params.address",
                    format!("invalid i2c address '{raw}'"),
                )
            })?,
        None => 0x76,
    };

    let reader = crate::hardware::Bme280Reader::open(device_id, bus, address)?;
    Ok(Box::new(reader))
}

#[cfg(not(feature = "hardware"))]
fn hardware_climate_reader(
    _blueprint: &StationBlueprint,
    device_id: &str,
) -> Result<BoxedReader<ClimateReading>, TelemetryError> {
    Err(TelemetryError::device_init(
        device_id,
        "built without the 'hardware' feature",
    ))
}

#[cfg(feature = "hardware")]
fn parse_i2c_address(raw: &str) -> Option<u8> {
    let raw = raw.trim();
    match raw.strip_prefix("0x") {
        Some(hex) => u8::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{
        CollectionConfig, ConfigVersion, DeviceConfig, ReadingKind, StationConfig, UplinkConfig,
    };
    use std::collections::HashMap;

    fn blueprint(source: DeviceSource, params: HashMap<String, String>) -> StationBlueprint {
        StationBlueprint {
            version: ConfigVersion::V1,
            station: StationConfig {
                device_id: "test_device".into(),
                partition_key: "sensor#default".into(),
            },
            device: DeviceConfig {
                kind: ReadingKind::Particulate,
                source,
                params,
            },
            collection: CollectionConfig::default(),
            uplink: UplinkConfig {
                endpoint: "https://api.example.com/prod/airquality".into(),
                service: "execute-api".into(),
                request_timeout_secs: 30,
            },
        }
    }

    #[test]
    fn mock_source_builds_for_both_kinds() {
        let bp = blueprint(DeviceSource::Mock, HashMap::new());
        let mut particulate = particulate_reader(&bp).unwrap();
        assert!(particulate.read_one().is_ok());

        let mut climate = climate_reader(&bp).unwrap();
        assert!(climate.read_one().is_ok());
    }

    #[test]
    fn mock_fail_every_param_applies() {
        let params = HashMap::from([("fail_every".to_string(), "2".to_string())]);
        let bp = blueprint(DeviceSource::Mock, params);

        let mut reader = particulate_reader(&bp).unwrap();
        assert!(reader.read_one().is_ok());
        assert!(reader.read_one().is_err());
    }

    #[test]
    fn replay_source_requires_path() {
        let bp = blueprint(DeviceSource::Replay, HashMap::new());
        let result = particulate_reader(&bp);
        match result {
            Err(e) => assert!(e.to_string().contains("path")),
            Ok(_) => panic!("expected error"),
        }
    }

    #[cfg(not(feature = "hardware"))]
    #[test]
    fn hardware_source_needs_feature() {
        let bp = blueprint(DeviceSource::Hardware, HashMap::new());
        let result = climate_reader(&bp);
        match result {
            Err(e) => assert!(e.to_string().contains("hardware")),
            Ok(_) => panic!("expected error"),
        }
    }

    #[test]
    fn particulate_hardware_is_unsupported() {
        let bp = blueprint(DeviceSource::Hardware, HashMap::new());
        let result = particulate_reader(&bp);
        assert!(result.is_err());
    }
}
