//! Reading types - raw sensor acquisitions, pre-enrichment

use serde::{Deserialize, Serialize};

/// Particulate-matter reading
///
/// Twelve channels from the particulate device: PM concentrations from each
/// of the two internal sensing units, plus six particle-count bins. The
/// serde renames match the ingestion endpoint's field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticulateReading {
    /// PM1.0 (µg/m³), first sensing unit
    #[serde(rename = "PM1.0_1")]
    pub pm1_0_1: u32,

    /// PM2.5 (µg/m³), first sensing unit
    #[serde(rename = "PM2.5_1")]
    pub pm2_5_1: u32,

    /// PM10 (µg/m³), first sensing unit
    #[serde(rename = "PM10_1")]
    pub pm10_1: u32,

    /// PM1.0 (µg/m³), second sensing unit
    #[serde(rename = "PM1.0_2")]
    pub pm1_0_2: u32,

    /// PM2.5 (µg/m³), second sensing unit
    #[serde(rename = "PM2.5_2")]
    pub pm2_5_2: u32,

    /// PM10 (µg/m³), second sensing unit
    #[serde(rename = "PM10_2")]
    pub pm10_2: u32,

    /// Particles ≥ 0.3µm per 0.1L of air
    pub count_03: u32,

    /// Particles ≥ 0.5µm per 0.1L of air
    pub count_05: u32,

    /// Particles ≥ 1.0µm per 0.1L of air
    pub count_10: u32,

    /// Particles ≥ 2.5µm per 0.1L of air
    pub count_25: u32,

    /// Particles ≥ 5.0µm per 0.1L of air
    pub count_50: u32,

    /// Particles ≥ 10µm per 0.1L of air
    pub count_100: u32,
}

/// Climate reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateReading {
    /// Temperature (°C)
    pub temperature: f64,

    /// Relative humidity (%)
    pub humidity: f64,

    /// Barometric pressure (hPa)
    pub pressure: f64,
}

/// Reading kind - selects which pipeline a station runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingKind {
    Particulate,
    Climate,
}

impl ReadingKind {
    /// Stable name for logs and metric labels
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Particulate => "particulate",
            Self::Climate => "climate",
        }
    }
}
