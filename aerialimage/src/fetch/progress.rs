//! Fetch progress reporting.

use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Tracks completed tiles and logs progress at a fixed interval.
#[derive(Debug)]
pub struct FetchProgress {
    total: usize,
    completed: usize,
    report_every: usize,
    started: Instant,
}

impl FetchProgress {
    /// Creates a tracker that logs once every `report_every` tiles.
    pub fn new(total: usize, report_every: usize) -> Self {
        Self {
            total,
            completed: 0,
            report_every: report_every.max(1),
            started: Instant::now(),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Linear estimate of the time left, from the average time per tile so far.
    pub fn remaining(&self) -> Option<Duration> {
        if self.completed == 0 {
            return None;
        }
        let per_tile = self.elapsed().as_secs_f64() / self.completed as f64;
        let left = self.total.saturating_sub(self.completed) as f64;
        Some(Duration::from_secs_f64(per_tile * left))
    }

    /// Records one finished tile.
    pub fn record(&mut self) {
        self.completed += 1;
        if self.completed % self.report_every == 0 && self.completed < self.total {
            debug!(
                completed = self.completed,
                total = self.total,
                remaining_secs = self.remaining().map(|d| d.as_secs()).unwrap_or(0),
                "Fetch progress"
            );
        }
    }

    /// Logs the final tally.
    pub fn finish(&self) {
        info!(
            tiles = self.completed,
            elapsed_ms = self.elapsed().as_millis() as u64,
            "All tiles fetched"
        );
    }
}
