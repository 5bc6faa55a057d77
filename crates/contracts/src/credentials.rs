//! Uplink signing credentials
//!
//! Loaded once at process start (see `config_loader`) and handed to the
//! uploader by reference. Never part of the station file.

/// Signing credentials for the uplink endpoint
#[derive(Clone)]
pub struct UplinkCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
    pub region: String,
}

// Manual impl: the secret must never reach log output.
impl std::fmt::Debug for UplinkCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UplinkCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field(
                "session_token",
                &self.session_token.as_deref().map(|_| "<redacted>"),
            )
            .field("region", &self.region)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secrets() {
        let credentials = UplinkCredentials {
            access_key_id: "AKIAEXAMPLE".into(),
            secret_access_key: "super-secret".into(),
            session_token: Some("session-secret".into()),
            region: "us-west-1".into(),
        };

        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("AKIAEXAMPLE"));
        assert!(rendered.contains("us-west-1"));
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("session-secret"));
    }
}
