//! Replay reader - recorded readings from a JSONL file
//!
//! One reading per line, in the same JSON shape the wire uses. Useful for
//! running the pipeline against data captured on a real station.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use contracts::{DeviceReader, ReadError, TelemetryError};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Replay device reader
///
/// Exhausting the recording without `loop_playback` is a fatal fault: the
/// source can no longer produce samples, same as a dead device.
#[derive(Debug)]
pub struct ReplayReader<R> {
    device_id: String,
    records: Vec<R>,
    next: usize,
    loop_playback: bool,
    closed: bool,
}

impl<R: DeserializeOwned> ReplayReader<R> {
    /// Load a recording from a JSONL file
    ///
    /// # Errors
    /// - File read failure
    /// - A line that does not parse as the expected reading shape
    pub fn load(
        device_id: impl Into<String>,
        path: &Path,
        loop_playback: bool,
    ) -> Result<Self, TelemetryError> {
        let device_id = device_id.into();
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let record: R = serde_json::from_str(&line).map_err(|e| {
                TelemetryError::device_init(
                    &device_id,
                    format!("bad replay record at line {}: {e}", line_no + 1),
                )
            })?;
            records.push(record);
        }

        info!(
            device_id = %device_id,
            records = records.len(),
            path = %path.display(),
            "loaded replay recording"
        );

        Ok(Self {
            device_id,
            records,
            next: 0,
            loop_playback,
            closed: false,
        })
    }
}

impl<R: Clone> DeviceReader for ReplayReader<R> {
    type Reading = R;

    fn device_id(&self) -> &str {
        &self.device_id
    }

    fn read_one(&mut self) -> Result<R, ReadError> {
        if self.closed {
            return Err(ReadError::fatal(&self.device_id, "reader already closed"));
        }

        if self.next >= self.records.len() {
            if self.loop_playback && !self.records.is_empty() {
                debug!(device_id = %self.device_id, "looping replay");
                self.next = 0;
            } else {
                return Err(ReadError::fatal(&self.device_id, "replay exhausted"));
            }
        }

        let record = self.records[self.next].clone();
        self.next += 1;
        Ok(record)
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            debug!(device_id = %self.device_id, "replay reader closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::ClimateReading;
    use std::io::Write;

    fn recording(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".jsonl").tempfile().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file
    }

    #[test]
    fn replays_records_in_order() {
        let file = recording(&[
            r#"{"temperature": 20.0, "humidity": 40.0, "pressure": 1000.0}"#,
            "",
            r#"{"temperature": 21.0, "humidity": 41.0, "pressure": 1001.0}"#,
        ]);

        let mut reader: ReplayReader<ClimateReading> =
            ReplayReader::load("bme280", file.path(), false).unwrap();

        assert_eq!(reader.read_one().unwrap().temperature, 20.0);
        assert_eq!(reader.read_one().unwrap().temperature, 21.0);

        let err = reader.read_one().unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn loop_playback_wraps_around() {
        let file = recording(&[r#"{"temperature": 20.0, "humidity": 40.0, "pressure": 1000.0}"#]);

        let mut reader: ReplayReader<ClimateReading> =
            ReplayReader::load("bme280", file.path(), true).unwrap();

        for _ in 0..4 {
            assert!(reader.read_one().is_ok());
        }
    }

    #[test]
    fn bad_record_fails_load() {
        let file = recording(&["not json"]);

        let result: Result<ReplayReader<ClimateReading>, _> =
            ReplayReader::load("bme280", file.path(), false);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("line 1"), "got: {err}");
    }

    #[test]
    fn closed_reader_is_fatal() {
        let file = recording(&[r#"{"temperature": 20.0, "humidity": 40.0, "pressure": 1000.0}"#]);

        let mut reader: ReplayReader<ClimateReading> =
            ReplayReader::load("bme280", file.path(), true).unwrap();
        reader.close();

        assert!(reader.read_one().unwrap_err().is_fatal());
    }
}
