//! Run statistics.

use std::time::Duration;

/// Statistics from a pipeline run
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Completed collect/upload cycles
    pub cycles: u64,

    /// Total samples captured across all cycles
    pub samples_collected: u64,

    /// Read attempts skipped due to transient faults
    pub reads_skipped: u64,

    /// Batches that reached the endpoint
    pub batches_delivered: u64,

    /// Batches abandoned after both attempts failed
    pub batches_dropped: u64,

    /// Total duration of the pipeline run
    pub duration: Duration,
}

impl RunStats {
    /// Delivered share of all finished batches, as a percentage
    pub fn delivery_rate(&self) -> f64 {
        let total = self.batches_delivered + self.batches_dropped;
        if total > 0 {
            (self.batches_delivered as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Captured share of all read attempts, as a percentage
    pub fn capture_rate(&self) -> f64 {
        let attempts = self.samples_collected + self.reads_skipped;
        if attempts > 0 {
            (self.samples_collected as f64 / attempts as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n=== Run Statistics ===\n");
        println!("Cycles:");
        println!("   completed: {}", self.cycles);
        println!("   duration: {:.2}s", self.duration.as_secs_f64());

        println!("\nSamples:");
        println!("   captured: {}", self.samples_collected);
        println!("   skipped: {}", self.reads_skipped);
        println!("   capture rate: {:.1}%", self.capture_rate());

        println!("\nBatches:");
        println!("   delivered: {}", self.batches_delivered);
        println!("   dropped: {}", self.batches_dropped);
        println!("   delivery rate: {:.1}%", self.delivery_rate());

        println!();
    }
}
