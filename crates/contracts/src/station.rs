//! StationBlueprint - config loader output
//!
//! Describes one pipeline process: station identity, device selection,
//! collection cadence and uplink destination.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ReadingKind, DEFAULT_PARTITION_KEY};

/// Config version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete station configuration blueprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationBlueprint {
    /// Config version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Station identity
    pub station: StationConfig,

    /// Device selection
    pub device: DeviceConfig,

    /// Collection cadence
    #[serde(default)]
    pub collection: CollectionConfig,

    /// Uplink destination
    pub uplink: UplinkConfig,
}

/// Station identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    /// Device identifier used in logs and metric labels
    pub device_id: String,

    /// Partition key stamped on every sample
    #[serde(default = "default_partition_key")]
    pub partition_key: String,
}

fn default_partition_key() -> String {
    DEFAULT_PARTITION_KEY.to_string()
}

/// Device configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Which pipeline this station runs
    pub kind: ReadingKind,

    /// Where readings come from
    #[serde(default)]
    pub source: DeviceSource,

    /// Source-specific parameters (replay `path`, i2c `bus`/`address`, ...)
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// Reading source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceSource {
    /// Synthetic readings, no device required
    #[default]
    Mock,
    /// Recorded readings from a JSONL file
    Replay,
    /// Physical sensor on the local bus
    Hardware,
}

/// Collection cadence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Samples per batch, must be >= 1
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Unconditional delay between read attempts (seconds)
    #[serde(default = "default_read_interval_secs")]
    pub read_interval_secs: f64,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            read_interval_secs: default_read_interval_secs(),
        }
    }
}

impl CollectionConfig {
    /// Inter-read delay as a `Duration`
    pub fn read_interval(&self) -> Duration {
        Duration::from_secs_f64(self.read_interval_secs.max(0.0))
    }
}

fn default_batch_size() -> usize {
    10
}

fn default_read_interval_secs() -> f64 {
    3.0
}

/// Uplink destination configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UplinkConfig {
    /// Ingestion endpoint, absolute http(s) URL
    pub endpoint: String,

    /// SigV4 service name the endpoint is signed for
    #[serde(default = "default_service")]
    pub service: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl UplinkConfig {
    /// Request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_service() -> String {
    "execute-api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}
