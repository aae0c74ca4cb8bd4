use std::time::Instant;

/// Cross-cutting logger for reconstruction orchestration events.
///
/// Decouples the use case from specific output mechanisms (terminal, log
/// crate, test capture) so each caller can observe pipeline behavior without
/// changing the orchestration code.
pub trait PipelineLogger: Send {
    /// A stage is about to launch.
    fn stage_started(&mut self, stage: &str);

    /// Record how long a named stage took, whether or not it succeeded.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Log a degraded-but-continuing condition.
    fn warn(&mut self, message: &str);

    /// Emit an end-of-pipeline summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn stage_started(&mut self, _stage: &str) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
    fn warn(&mut self, _message: &str) {}
}

/// CLI-oriented logger that forwards events to the `log` crate, keeps
/// per-stage wall time in execution order, and reports a summary at the end.
pub struct StdoutPipelineLogger {
    timings: Vec<(String, f64)>,
    start_time: Instant,
    messages: Vec<String>,
}

impl StdoutPipelineLogger {
    pub fn new() -> Self {
        Self {
            timings: Vec::new(),
            start_time: Instant::now(),
            messages: Vec::new(),
        }
    }

    /// Returns the formatted summary string, or `None` if no stage ran.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = Vec::with_capacity(self.timings.len() + 1);

        lines.push(format!(
            "Reconstruction summary ({} stages, {:.1}s total):",
            self.timings.len(),
            elapsed_ms / 1000.0
        ));

        for (stage, ms) in &self.timings {
            let pct = if elapsed_ms > 0.0 {
                ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!("  {stage:22}: {ms:9.0}ms  ({pct:4.1}%)"));
        }

        Some(lines.join("\n"))
    }

    /// Returns the recorded duration of a stage, if it ran.
    pub fn timing_for(&self, stage: &str) -> Option<f64> {
        self.timings
            .iter()
            .find(|(name, _)| name == stage)
            .map(|(_, ms)| *ms)
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn stage_started(&mut self, stage: &str) {
        log::info!("Running {stage}...");
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        log::debug!("{stage} took {duration_ms:.0}ms");
        self.timings.push((stage.to_string(), duration_ms));
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn warn(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::warn!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
