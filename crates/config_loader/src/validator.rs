//! Configuration validation module
//!
//! Validation rules:
//! - device_id and partition_key non-empty
//! - batch_size >= 1
//! - read_interval_secs finite and >= 0
//! - endpoint is an absolute http(s) URL
//! - replay source carries a `path` param

use contracts::{DeviceSource, StationBlueprint, TelemetryError};
use url::Url;

/// Validate a StationBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &StationBlueprint) -> Result<(), TelemetryError> {
    validate_station(blueprint)?;
    validate_device(blueprint)?;
    validate_collection(blueprint)?;
    validate_uplink(blueprint)?;
    Ok(())
}

/// Validate station identity
fn validate_station(blueprint: &StationBlueprint) -> Result<(), TelemetryError> {
    if blueprint.station.device_id.trim().is_empty() {
        return Err(TelemetryError::config_validation(
            "station.device_id",
            "device_id cannot be empty",
        ));
    }
    if blueprint.station.partition_key.trim().is_empty() {
        return Err(TelemetryError::config_validation(
            "station.partition_key",
            "partition_key cannot be empty",
        ));
    }
    Ok(())
}

/// Validate device source parameters
fn validate_device(blueprint: &StationBlueprint) -> Result<(), TelemetryError> {
    if blueprint.device.source == DeviceSource::Replay
        && !blueprint.device.params.contains_key("path")
    {
        return Err(TelemetryError::config_validation(
            "device.params.path",
            "replay source requires a 'path' parameter",
        ));
    }
    Ok(())
}

/// Validate collection cadence
fn validate_collection(blueprint: &StationBlueprint) -> Result<(), TelemetryError> {
    let collection = &blueprint.collection;

    if collection.batch_size < 1 {
        return Err(TelemetryError::config_validation(
            "collection.batch_size",
            format!("batch_size must be >= 1, got {}", collection.batch_size),
        ));
    }

    if !collection.read_interval_secs.is_finite() || collection.read_interval_secs < 0.0 {
        return Err(TelemetryError::config_validation(
            "collection.read_interval_secs",
            format!(
                "read_interval_secs must be finite and >= 0, got {}",
                collection.read_interval_secs
            ),
        ));
    }

    Ok(())
}

/// Validate uplink destination
fn validate_uplink(blueprint: &StationBlueprint) -> Result<(), TelemetryError> {
    let uplink = &blueprint.uplink;

    let url = Url::parse(&uplink.endpoint).map_err(|e| {
        TelemetryError::config_validation("uplink.endpoint", format!("invalid URL: {e}"))
    })?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(TelemetryError::config_validation(
            "uplink.endpoint",
            format!("endpoint must be http(s), got '{}'", url.scheme()),
        ));
    }

    if uplink.service.trim().is_empty() {
        return Err(TelemetryError::config_validation(
            "uplink.service",
            "service cannot be empty",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{
        CollectionConfig, ConfigVersion, DeviceConfig, ReadingKind, StationConfig, UplinkConfig,
    };
    use std::collections::HashMap;

    fn minimal_blueprint() -> StationBlueprint {
        StationBlueprint {
            version: ConfigVersion::V1,
            station: StationConfig {
                device_id: "pms5003".into(),
                partition_key: "sensor#default".into(),
            },
            device: DeviceConfig {
                kind: ReadingKind::Particulate,
                source: DeviceSource::Mock,
                params: HashMap::new(),
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
    fn test_valid_config() {
        let bp = minimal_blueprint();
        assert!(validate(&bp).is_ok());
    }

    #[test]
    fn test_empty_device_id() {
        let mut bp = minimal_blueprint();
        bp.station.device_id = "  ".into();
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("device_id"), "got: {err}");
    }

    #[test]
    fn test_zero_batch_size() {
        let mut bp = minimal_blueprint();
        bp.collection.batch_size = 0;
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("batch_size must be >= 1"), "got: {err}");
    }

    #[test]
    fn test_negative_read_interval() {
        let mut bp = minimal_blueprint();
        bp.collection.read_interval_secs = -3.0;
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("read_interval_secs"), "got: {err}");
    }

    #[test]
    fn test_invalid_endpoint() {
        let mut bp = minimal_blueprint();
        bp.uplink.endpoint = "not a url".into();
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid URL"), "got: {err}");
    }

    #[test]
    fn test_non_http_endpoint() {
        let mut bp = minimal_blueprint();
        bp.uplink.endpoint = "ftp://api.example.com/upload".into();
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("must be http(s)"), "got: {err}");
    }

    #[test]
    fn test_replay_without_path() {
        let mut bp = minimal_blueprint();
        bp.device.source = DeviceSource::Replay;
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("path"), "got: {err}");
    }
}
