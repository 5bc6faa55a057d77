//! # Integration Tests
//!
//! End-to-end tests over the mock readers and a scripted transport, no
//! device or network required.
//!
//! Covers:
//! - the full collect -> upload data flow for both pipelines
//! - wire-shape snapshots of the upload envelope
//! - loop continuation across dropped batches

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
        assert_eq!(contracts::DEFAULT_PARTITION_KEY, "sensor#default");
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use bytes::Bytes;
    use collector::SampleCollector;
    use contracts::{BatchTransport, TelemetryError, TransportReply, UploadOutcome};
    use readers::{MockOutcome, MockReader};
    use uplink::Uploader;

    /// Transport that records every body and fails on scripted attempts
    struct RecordingTransport {
        bodies: Mutex<Vec<Bytes>>,
        failures: Mutex<Vec<bool>>,
    }

    impl RecordingTransport {
        fn reliable() -> Self {
            Self::with_failures(vec![])
        }

        /// `true` entries fail the corresponding PUT attempt
        fn with_failures(failures: Vec<bool>) -> Self {
            Self {
                bodies: Mutex::new(Vec::new()),
                failures: Mutex::new(failures),
            }
        }

        fn attempt_count(&self) -> usize {
            self.bodies.lock().unwrap().len()
        }

        fn body(&self, attempt: usize) -> serde_json::Value {
            let bodies = self.bodies.lock().unwrap();
            serde_json::from_slice(&bodies[attempt]).unwrap()
        }
    }

    impl BatchTransport for RecordingTransport {
        async fn put(&self, body: Bytes) -> Result<TransportReply, TelemetryError> {
            self.bodies.lock().unwrap().push(body);

            let mut failures = self.failures.lock().unwrap();
            let fail = if failures.is_empty() {
                false
            } else {
                failures.remove(0)
            };

            if fail {
                Err(TelemetryError::upload_send("scripted failure"))
            } else {
                Ok(TransportReply {
                    status: 200,
                    body: "{\"accepted\":true}".into(),
                })
            }
        }
    }

    fn collector(batch_size: usize) -> SampleCollector {
        SampleCollector::new("sensor#default", batch_size, Duration::ZERO)
    }

    /// End-to-end: MockReader -> SampleCollector -> Uploader
    ///
    /// Verifies the complete data flow:
    /// 1. the reader produces readings with one transient failure
    /// 2. the collector skips the failed slot
    /// 3. the uploader delivers the envelope with the surviving samples
    #[tokio::test]
    async fn test_e2e_particulate_pipeline() {
        let mut reader = MockReader::particulate("pms5003").with_script([
            MockOutcome::Ok,
            MockOutcome::Transient,
            MockOutcome::Ok,
        ]);

        let batch = collector(3).collect(&mut reader).await.unwrap();
        assert_eq!(batch.len(), 2);

        let uploader = Uploader::new(RecordingTransport::reliable());
        let outcome = uploader.upload(&batch).await;
        assert_eq!(outcome, UploadOutcome::Delivered { attempts: 1 });

        let body = uploader.transport().body(0);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);

        // exact wire shape of one sample
        let sample = data[0].as_object().unwrap();
        assert_eq!(sample["pk"], "sensor#default");
        assert!(sample["timestamp"].is_i64());
        for field in [
            "PM1.0_1", "PM2.5_1", "PM10_1", "PM1.0_2", "PM2.5_2", "PM10_2", "count_03",
            "count_05", "count_10", "count_25", "count_50", "count_100",
        ] {
            assert!(sample.contains_key(field), "missing field {field}");
        }
        // pk + timestamp + 12 channels
        assert_eq!(sample.len(), 14);
    }

    #[tokio::test]
    async fn test_e2e_climate_pipeline() {
        let mut reader = MockReader::climate("bme280");

        let batch = collector(4).collect(&mut reader).await.unwrap();
        let uploader = Uploader::new(RecordingTransport::reliable());
        let outcome = uploader.upload(&batch).await;

        assert!(outcome.is_delivered());
        let body = uploader.transport().body(0);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 4);
        assert!(data[0]["temperature"].is_f64());
        assert!(data[0]["humidity"].is_f64());
        assert!(data[0]["pressure"].is_f64());
    }

    /// A dropped batch does not poison the next cycle: the loop keeps
    /// collecting and the following batch delivers.
    #[tokio::test]
    async fn test_dropped_batch_then_recovery() {
        let mut reader = MockReader::climate("bme280");
        let uploader = Uploader::new(RecordingTransport::with_failures(vec![true, true]));

        let first = collector(2).collect(&mut reader).await.unwrap();
        let outcome = uploader.upload(&first).await;
        assert_eq!(outcome.attempts(), 2);
        assert!(!outcome.is_delivered());

        let second = collector(2).collect(&mut reader).await.unwrap();
        let outcome = uploader.upload(&second).await;
        assert_eq!(outcome, UploadOutcome::Delivered { attempts: 1 });

        // two failed attempts for the first batch, one for the second
        assert_eq!(uploader.transport().attempt_count(), 3);
    }

    #[tokio::test]
    async fn test_all_reads_failed_uploads_empty_envelope() {
        let mut reader =
            MockReader::climate("bme280").with_script([MockOutcome::Transient; 3]);

        let batch = collector(3).collect(&mut reader).await.unwrap();
        assert!(batch.is_empty());

        let uploader = Uploader::new(RecordingTransport::reliable());
        let outcome = uploader.upload(&batch).await;

        assert!(outcome.is_delivered());
        let body = uploader.transport().body(0);
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
    }

    /// Blueprint-driven construction: a TOML station file builds a working
    /// reader through the factory.
    #[tokio::test]
    async fn test_blueprint_to_reader_flow() {
        let toml = r#"
[station]
device_id = "bme280"

[device]
kind = "climate"
source = "mock"

[collection]
batch_size = 2
read_interval_secs = 0.0

[uplink]
endpoint = "https://api.example.com/prod/climate"
"#;

        let blueprint =
            config_loader::ConfigLoader::load_from_str(toml, config_loader::ConfigFormat::Toml)
                .unwrap();

        let mut reader = readers::climate_reader(&blueprint).unwrap();
        let batch = SampleCollector::new(
            blueprint.station.partition_key.clone(),
            blueprint.collection.batch_size,
            blueprint.collection.read_interval(),
        )
        .collect(&mut *reader)
        .await
        .unwrap();

        assert_eq!(batch.len(), 2);
        assert!(batch.iter().all(|s| s.pk == "sensor#default"));
    }

    /// Readings collected later never carry earlier timestamps, across
    /// cycle boundaries too.
    #[tokio::test]
    async fn test_timestamps_monotonic_across_cycles() {
        let mut reader = MockReader::climate("bme280");
        let collector = collector(3);

        let first = collector.collect(&mut reader).await.unwrap();
        let second = collector.collect(&mut reader).await.unwrap();

        let all: Vec<i64> = first.iter().chain(second.iter()).map(|s| s.timestamp).collect();
        assert!(all.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
