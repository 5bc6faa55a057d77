//! Layered error definitions
//!
//! Categorized by source: config / credentials / device / uplink

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum TelemetryError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    /// Credential loading error
    #[error("credential error: {message}")]
    Credentials { message: String },

    // ===== Device Errors =====
    /// Device initialization error
    #[error("device init error for '{device_id}': {message}")]
    DeviceInit { device_id: String, message: String },

    /// Device read fault
    #[error(transparent)]
    Read(#[from] ReadError),

    // ===== Uplink Errors =====
    /// Request signing error
    #[error("upload signing error: {message}")]
    UploadSign { message: String },

    /// Request transmission error
    #[error("upload send error: {message}")]
    UploadSend { message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl TelemetryError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create credential error
    pub fn credentials(message: impl Into<String>) -> Self {
        Self::Credentials {
            message: message.into(),
        }
    }

    /// Create device initialization error
    pub fn device_init(device_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DeviceInit {
            device_id: device_id.into(),
            message: message.into(),
        }
    }

    /// Create signing error
    pub fn upload_sign(message: impl Into<String>) -> Self {
        Self::UploadSign {
            message: message.into(),
        }
    }

    /// Create transmission error
    pub fn upload_send(message: impl Into<String>) -> Self {
        Self::UploadSend {
            message: message.into(),
        }
    }
}

/// Device read fault
///
/// The two classes drive the skip-vs-terminate decision in the collector:
/// a transient fault skips one sample, a fatal fault ends the pipeline.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Single acquisition failure, the device remains usable
    #[error("transient read fault on '{device_id}': {message}")]
    Transient { device_id: String, message: String },

    /// Structural device fault, continued operation cannot produce samples
    #[error("fatal device fault on '{device_id}': {message}")]
    Fatal { device_id: String, message: String },
}

impl ReadError {
    /// Create a transient read fault
    pub fn transient(device_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transient {
            device_id: device_id.into(),
            message: message.into(),
        }
    }

    /// Create a fatal device fault
    pub fn fatal(device_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fatal {
            device_id: device_id.into(),
            message: message.into(),
        }
    }

    /// Whether this fault ends the pipeline
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal { .. })
    }

    /// Device the fault originated from
    pub fn device_id(&self) -> &str {
        match self {
            Self::Transient { device_id, .. } | Self::Fatal { device_id, .. } => device_id,
        }
    }
}
