//! Progress reporting for long-running analysis runs.
//!
//! The orchestrator reports percent-plus-stage updates through a
//! [`ProgressSink`], keeping it ignorant of how (or whether) progress is
//! surfaced. Percentages from the orchestrator are monotonic within a run.

use tracing::info;

/// Receives progress updates from an analysis run.
pub trait ProgressSink {
    /// Report progress. `percent` is in `0..=100`; `stage` is a short
    /// human-readable label for the current step.
    fn update(&mut self, percent: u8, stage: &str);
}

/// Discards all updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn update(&mut self, _percent: u8, _stage: &str) {}
}

/// Emits each update as a structured log event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn update(&mut self, percent: u8, stage: &str) {
        info!(percent, stage, "analysis progress");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_sink_accepts_updates() {
        let mut sink = NullProgress;
        sink.update(50, "halfway");
    }
}
