//! # Uplink
//!
//! Batch delivery to the ingestion endpoint.
//!
//! The `Uploader` owns the at-most-two-attempts policy; the signed HTTP PUT
//! itself sits behind the `BatchTransport` seam so the policy is testable
//! without a network. Delivery is duplicate-tolerant: the retry re-sends the
//! identical body without knowing whether the first attempt reached the
//! server.

mod http_transport;
mod signer;
mod uploader;

pub use http_transport::HttpTransport;
pub use signer::RequestSigner;
pub use uploader::Uploader;
