//! # Collector
//!
//! Drives a device reader for one collection cycle, producing an ordered
//! batch of samples.
//!
//! Per-read policy: a successful read becomes a sample, a transient fault
//! skips that slot, a fatal fault aborts the cycle. Every attempt is
//! followed by the fixed inter-read delay, which rate-limits the physical
//! sensor.

mod collector;

pub use collector::SampleCollector;
