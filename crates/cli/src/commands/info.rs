//! `info` command implementation.

use anyhow::{Context, Result};

use crate::cli::InfoArgs;

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load station file {}", args.config.display()))?;

    if args.json {
        println!("{}", config_loader::ConfigLoader::to_json(&blueprint)?);
        return Ok(());
    }

    println!("Station file: {}", args.config.display());
    println!();
    println!("Device:");
    println!("  id: {}", blueprint.station.device_id);
    println!("  kind: {}", blueprint.device.kind.as_str());
    println!("  source: {:?}", blueprint.device.source);
    println!();
    println!("Collection:");
    println!("  batch size: {}", blueprint.collection.batch_size);
    println!(
        "  read interval: {:.1}s",
        blueprint.collection.read_interval_secs
    );
    println!(
        "  cycle floor: {:.1}s",
        blueprint.collection.read_interval_secs * blueprint.collection.batch_size as f64
    );
    println!();
    println!("Uplink:");
    println!("  endpoint: {}", blueprint.uplink.endpoint);
    println!("  service: {}", blueprint.uplink.service);

    Ok(())
}
