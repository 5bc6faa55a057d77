//! HttpTransport - signed PUT over reqwest

use bytes::Bytes;
use contracts::{BatchTransport, TelemetryError, TransportReply, UplinkConfig, UplinkCredentials};
use http::header::{CONTENT_TYPE, HOST};
use tracing::{debug, instrument};
use url::Url;

use crate::signer::RequestSigner;

/// Transport that PUTs envelopes to the ingestion endpoint
///
/// Each call signs and sends one request. Any HTTP response counts as a
/// delivery; only a failure to complete the exchange is an error.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
    host_header: String,
    signer: RequestSigner,
}

impl HttpTransport {
    /// Create a transport for the configured endpoint
    ///
    /// # Errors
    /// Invalid endpoint URL or client construction failure.
    pub fn new(
        config: &UplinkConfig,
        credentials: &UplinkCredentials,
    ) -> Result<Self, TelemetryError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            TelemetryError::config_validation("uplink.endpoint", format!("invalid URL: {e}"))
        })?;

        let host = endpoint
            .host_str()
            .ok_or_else(|| {
                TelemetryError::config_validation("uplink.endpoint", "endpoint has no host")
            })?
            .to_string();
        let host_header = match endpoint.port() {
            Some(port) => format!("{host}:{port}"),
            None => host,
        };

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| TelemetryError::upload_send(format!("client init: {e}")))?;

        let signer = RequestSigner::new(credentials.clone(), config.service.clone());

        debug!(endpoint = %endpoint, service = %config.service, "http transport ready");

        Ok(Self {
            client,
            endpoint,
            host_header,
            signer,
        })
    }

    fn build_request(&self, body: Bytes) -> Result<reqwest::Request, TelemetryError> {
        let mut request = http::Request::builder()
            .method(http::Method::PUT)
            .uri(self.endpoint.as_str())
            .header(CONTENT_TYPE, "application/json")
            .header(HOST, self.host_header.as_str())
            .body(body)
            .map_err(|e| TelemetryError::upload_send(format!("build request: {e}")))?;

        self.signer.sign(&mut request)?;

        reqwest::Request::try_from(request)
            .map_err(|e| TelemetryError::upload_send(format!("convert request: {e}")))
    }
}

impl BatchTransport for HttpTransport {
    #[instrument(name = "uplink_put", skip(self, body), fields(endpoint = %self.endpoint))]
    async fn put(&self, body: Bytes) -> Result<TransportReply, TelemetryError> {
        let request = self.build_request(body)?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| TelemetryError::upload_send(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TelemetryError::upload_send(format!("read response: {e}")))?;

        Ok(TransportReply { status, body })
    }
}
