//! Pipeline orchestrator - wires the reader, collector and uploader and
//! drives the collect/upload loop.
//!
//! Both pipelines run through the same generic driver; the blueprint's
//! device kind only selects the reading shape.

use std::time::Instant;

use anyhow::{Context, Result};
use collector::SampleCollector;
use contracts::{
    BatchTransport, DeviceReader, ReadingKind, StationBlueprint, UplinkCredentials, UploadOutcome,
};
use readers::BoxedReader;
use serde::Serialize;
use tracing::{error, info};
use uplink::{HttpTransport, Uploader};

use super::RunStats;

/// Pipeline configuration
#[derive(Debug)]
pub struct PipelineConfig {
    /// The station blueprint
    pub blueprint: StationBlueprint,

    /// Signing credentials, loaded once at startup
    pub credentials: UplinkCredentials,

    /// Maximum number of collect/upload cycles (None = unlimited)
    pub max_cycles: Option<u64>,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline to completion
    ///
    /// Returns run statistics on a bounded normal exit, or the fatal fault
    /// that terminated the loop.
    pub async fn run(self) -> Result<RunStats> {
        let start_time = Instant::now();
        let blueprint = &self.config.blueprint;

        // Initialize Metrics (optional)
        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        let collector = SampleCollector::new(
            blueprint.station.partition_key.clone(),
            blueprint.collection.batch_size,
            blueprint.collection.read_interval(),
        );

        let transport = HttpTransport::new(&blueprint.uplink, &self.config.credentials)
            .context("Failed to create uplink transport")?;
        let uploader = Uploader::new(transport);

        info!(
            device_id = %blueprint.station.device_id,
            kind = blueprint.device.kind.as_str(),
            batch_size = blueprint.collection.batch_size,
            read_interval_secs = blueprint.collection.read_interval_secs,
            max_cycles = ?self.config.max_cycles,
            "Pipeline configured"
        );

        let mut stats = match blueprint.device.kind {
            ReadingKind::Particulate => {
                let reader = readers::particulate_reader(blueprint)
                    .context("Failed to build particulate reader")?;
                drive(reader, &collector, &uploader, self.config.max_cycles).await?
            }
            ReadingKind::Climate => {
                let reader = readers::climate_reader(blueprint)
                    .context("Failed to build climate reader")?;
                drive(reader, &collector, &uploader, self.config.max_cycles).await?
            }
        };

        stats.duration = start_time.elapsed();

        info!(
            cycles = stats.cycles,
            duration_secs = stats.duration.as_secs_f64(),
            "Pipeline shutdown complete"
        );

        Ok(stats)
    }
}

/// The driver loop: collect -> upload, repeated until a fatal fault or the
/// cycle limit.
///
/// Upload failures never terminate the loop; a fatal collection fault
/// releases the device resource exactly once and propagates.
async fn drive<R, T>(
    mut reader: BoxedReader<R>,
    collector: &SampleCollector,
    uploader: &Uploader<T>,
    max_cycles: Option<u64>,
) -> Result<RunStats>
where
    R: Serialize,
    T: BatchTransport,
{
    let device_id = reader.device_id().to_string();
    let mut stats = RunStats::default();

    info!(device_id = %device_id, "Driver loop running");

    loop {
        let batch = match collector.collect(&mut *reader).await {
            Ok(batch) => batch,
            Err(fault) => {
                error!(
                    device_id = %device_id,
                    error = %fault,
                    "Fatal device fault, terminating pipeline"
                );
                observability::record_fatal_fault(&device_id);
                reader.close();
                return Err(fault.into());
            }
        };

        stats.cycles += 1;
        stats.samples_collected += batch.len() as u64;
        stats.reads_skipped += (collector.batch_size() - batch.len()) as u64;
        observability::record_batch_collected(&device_id, batch.len(), collector.batch_size());

        // Empty batches upload too; the endpoint sees every cycle.
        let upload_started = Instant::now();
        let outcome = uploader.upload(&batch).await;
        observability::record_upload_duration(
            &device_id,
            upload_started.elapsed().as_secs_f64() * 1000.0,
        );
        observability::record_upload_outcome(&device_id, &outcome);

        match outcome {
            UploadOutcome::Delivered { .. } => stats.batches_delivered += 1,
            UploadOutcome::Dropped { .. } => stats.batches_dropped += 1,
        }

        if let Some(max) = max_cycles {
            if stats.cycles >= max {
                info!(cycles = stats.cycles, "Reached max cycles limit");
                break;
            }
        }
    }

    reader.close();
    Ok(stats)
}
