//! Tick timing metrics and structured logging.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Metrics collector for the simulation loop.
pub struct Metrics {
    tick_count: AtomicU64,
    agent_count: AtomicU64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            agent_count: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its duration. Logs a structured line
    /// every 1000 ticks.
    pub fn record_tick(&self, duration: Duration, agents: usize) {
        self.tick_count.fetch_add(1, Ordering::Relaxed);
        self.agent_count.store(agents as u64, Ordering::Relaxed);

        let tick = self.tick_count.load(Ordering::Relaxed);
        if tick % 1000 == 0 {
            tracing::info!(
                tick = tick,
                agents = agents,
                duration_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    /// Average tick rate since the collector was created.
    #[must_use]
    pub fn ticks_per_second(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.tick_count.load(Ordering::Relaxed) as f64 / elapsed
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize the tracing subscriber for logging.
pub fn init_logging() {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::INFO)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tick_counts() {
        let metrics = Metrics::new();
        metrics.record_tick(Duration::from_millis(5), 100);
        metrics.record_tick(Duration::from_millis(5), 100);
        assert_eq!(metrics.tick_count(), 2);
    }

    #[test]
    fn test_elapsed_monotonic() {
        let metrics = Metrics::new();
        assert!(metrics.elapsed() <= metrics.elapsed());
    }
}
