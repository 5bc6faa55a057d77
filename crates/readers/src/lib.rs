//! # Readers
//!
//! Device reader implementations and the factory that builds them from a
//! station blueprint.
//!
//! Sources:
//! - `mock` - synthetic readings, no device required
//! - `replay` - recorded readings from a JSONL file
//! - `hardware` - physical sensors on the local bus (feature `hardware`)

mod factory;
mod mock;
mod replay;

#[cfg(feature = "hardware")]
mod hardware;

pub use factory::{climate_reader, particulate_reader, BoxedReader};
pub use mock::{MockOutcome, MockReader};
pub use replay::ReplayReader;

#[cfg(feature = "hardware")]
pub use hardware::Bme280Reader;
