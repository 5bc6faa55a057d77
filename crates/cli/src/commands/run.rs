//! `run` command implementation.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute the `run` command
pub async fn run_station(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    // Validate config path
    if !args.config.exists() {
        anyhow::bail!("Station file not found: {}", args.config.display());
    }

    // Load and parse configuration
    let mut blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load station file {}", args.config.display()))?;

    // Apply CLI overrides
    if let Some(ref endpoint) = args.endpoint {
        info!(endpoint = %endpoint, "Overriding ingestion endpoint from CLI");
        blueprint.uplink.endpoint = endpoint.clone();
    }
    if let Some(batch_size) = args.batch_size {
        info!(batch_size, "Overriding batch size from CLI");
        blueprint.collection.batch_size = batch_size;
    }
    if let Some(read_interval_secs) = args.read_interval_secs {
        info!(read_interval_secs, "Overriding read interval from CLI");
        blueprint.collection.read_interval_secs = read_interval_secs;
    }

    info!(
        device_id = %blueprint.station.device_id,
        kind = blueprint.device.kind.as_str(),
        source = ?blueprint.device.source,
        batch_size = blueprint.collection.batch_size,
        endpoint = %blueprint.uplink.endpoint,
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_station_summary(&blueprint);
        return Ok(());
    }

    // Credentials live in the environment, never in the station file
    let credentials =
        config_loader::credentials_from_env().context("Failed to load uplink credentials")?;

    // Build pipeline configuration
    let pipeline_config = PipelineConfig {
        blueprint,
        credentials,
        max_cycles: if args.max_cycles == 0 {
            None
        } else {
            Some(args.max_cycles)
        },
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
    };

    // Create and run pipeline
    let pipeline = Pipeline::new(pipeline_config);

    // Setup graceful shutdown handler
    let shutdown_signal = setup_shutdown_signal();

    info!("Starting pipeline...");

    // Run pipeline with shutdown signal
    tokio::select! {
        result = pipeline.run() => {
            match result {
                Ok(stats) => {
                    info!(
                        cycles = stats.cycles,
                        samples = stats.samples_collected,
                        delivered = stats.batches_delivered,
                        dropped = stats.batches_dropped,
                        duration_secs = stats.duration.as_secs_f64(),
                        "Pipeline completed successfully"
                    );

                    // Print detailed statistics
                    stats.print_summary();
                }
                Err(e) => {
                    return Err(e).context("Pipeline execution failed");
                }
            }
        }
        _ = shutdown_signal => {
            warn!("Received shutdown signal, stopping pipeline...");
        }
    }

    info!("enviro-uplink finished");
    Ok(())
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print configuration summary for dry-run mode
fn print_station_summary(blueprint: &contracts::StationBlueprint) {
    println!("\n=== Station Summary ===\n");
    println!("Station:");
    println!("  Device: {}", blueprint.station.device_id);
    println!("  Partition key: {}", blueprint.station.partition_key);

    println!("\nDevice:");
    println!("  Kind: {}", blueprint.device.kind.as_str());
    println!("  Source: {:?}", blueprint.device.source);
    if !blueprint.device.params.is_empty() {
        let mut params: Vec<_> = blueprint.device.params.iter().collect();
        params.sort();
        for (key, value) in params {
            println!("    {key} = {value}");
        }
    }

    println!("\nCollection:");
    println!("  Batch size: {}", blueprint.collection.batch_size);
    println!(
        "  Read interval: {:.1}s",
        blueprint.collection.read_interval_secs
    );

    println!("\nUplink:");
    println!("  Endpoint: {}", blueprint.uplink.endpoint);
    println!("  Service: {}", blueprint.uplink.service);
    println!(
        "  Request timeout: {}s",
        blueprint.uplink.request_timeout_secs
    );

    println!();
}
