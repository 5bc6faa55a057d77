//! SigV4 request signing
//!
//! Thin adapter over `aws-sigv4`; the signature algorithm itself is the
//! library's concern.

use std::time::SystemTime;

use aws_credential_types::Credentials;
use aws_sigv4::http_request::{sign, SignableBody, SignableRequest, SigningSettings};
use aws_sigv4::sign::v4;
use bytes::Bytes;
use contracts::{TelemetryError, UplinkCredentials};

/// Signs outgoing PUT requests with the credential/region/service triple
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: UplinkCredentials,
    service: String,
}

impl RequestSigner {
    /// Create a signer for one endpoint's service
    pub fn new(credentials: UplinkCredentials, service: impl Into<String>) -> Self {
        Self {
            credentials,
            service: service.into(),
        }
    }

    /// Sign the request in place, adding the SigV4 headers
    ///
    /// # Errors
    /// Signing parameter or canonicalization failure.
    pub fn sign(&self, request: &mut http::Request<Bytes>) -> Result<(), TelemetryError> {
        let identity = Credentials::new(
            self.credentials.access_key_id.clone(),
            self.credentials.secret_access_key.clone(),
            self.credentials.session_token.clone(),
            None,
            "environment",
        )
        .into();

        let signing_params = v4::SigningParams::builder()
            .identity(&identity)
            .region(&self.credentials.region)
            .name(&self.service)
            .time(SystemTime::now())
            .settings(SigningSettings::default())
            .build()
            .map_err(|e| TelemetryError::upload_sign(e.to_string()))?
            .into();

        let mut headers = Vec::with_capacity(request.headers().len());
        for (name, value) in request.headers() {
            let value = value.to_str().map_err(|e| {
                TelemetryError::upload_sign(format!("non-ascii header '{name}': {e}"))
            })?;
            headers.push((name.as_str(), value));
        }

        let signable = SignableRequest::new(
            request.method().as_str(),
            request.uri().to_string(),
            headers.into_iter(),
            SignableBody::Bytes(request.body().as_ref()),
        )
        .map_err(|e| TelemetryError::upload_sign(e.to_string()))?;

        let (instructions, _signature) = sign(signable, &signing_params)
            .map_err(|e| TelemetryError::upload_sign(e.to_string()))?
            .into_parts();

        instructions.apply_to_request_http1x(request);
        Ok(())
    }
}
