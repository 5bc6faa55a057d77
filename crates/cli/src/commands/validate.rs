//! `validate` command implementation.

use anyhow::Result;
use tracing::info;

use crate::cli::ValidateArgs;

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating station file");

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            if args.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "valid": true,
                        "config": args.config.display().to_string(),
                        "device_id": blueprint.station.device_id,
                        "kind": blueprint.device.kind.as_str(),
                    })
                );
            } else {
                println!(
                    "OK: {} ({} / {:?})",
                    args.config.display(),
                    blueprint.device.kind.as_str(),
                    blueprint.device.source
                );
            }
            Ok(())
        }
        Err(e) => {
            if args.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "valid": false,
                        "config": args.config.display().to_string(),
                        "error": e.to_string(),
                    })
                );
            }
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn station_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn args(file: &tempfile::NamedTempFile) -> ValidateArgs {
        ValidateArgs {
            config: file.path().to_path_buf(),
            json: false,
        }
    }

    #[test]
    fn valid_station_file_passes() {
        let file = station_file(
            r#"
[station]
device_id = "pms5003"

[device]
kind = "particulate"

[uplink]
endpoint = "https://api.example.com/prod/airquality"
"#,
        );

        assert!(run_validate(&args(&file)).is_ok());
    }

    #[test]
    fn invalid_station_file_fails() {
        let file = station_file(
            r#"
[station]
device_id = "pms5003"

[device]
kind = "particulate"

[collection]
batch_size = 0

[uplink]
endpoint = "https://api.example.com/prod/airquality"
"#,
        );

        assert!(run_validate(&args(&file)).is_err());
    }
}
