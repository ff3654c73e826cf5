use std::collections::HashMap;
use std::time::Instant;

/// Observer for the live loop: stage timings, per-frame metrics, status.
///
/// Keeps the loop free of any particular output mechanism; the binaries
/// log through the `log` facade, tests discard everything.
pub trait PipelineLogger {
    /// Called once per processed frame with the running frame count.
    fn progress(&mut self, frames: usize);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. detections in a frame).
    fn metric(&mut self, name: &str, value: f64);

    fn info(&mut self, message: &str);

    /// Emit an end-of-session summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards every event.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _frames: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Running count, sum and maximum of one stage or metric.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SampleStats {
    pub count: usize,
    pub sum: f64,
    pub max: f64,
}

impl SampleStats {
    fn record(&mut self, value: f64) {
        self.max = if self.count == 0 {
            value
        } else {
            self.max.max(value)
        };
        self.count += 1;
        self.sum += value;
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Aggregates timings and metrics for a session and reports them through
/// `log` when the loop ends.
///
/// Only running aggregates are kept, so memory stays flat however long the
/// camera runs. Progress is logged at debug level every `throttle_frames`
/// frames; a live camera has no total, so only the running count is shown.
pub struct SessionPipelineLogger {
    throttle_frames: usize,
    timings: HashMap<String, SampleStats>,
    metrics: HashMap<String, SampleStats>,
    start_time: Instant,
    frames: usize,
}

impl SessionPipelineLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            frames: 0,
        }
    }

    /// Returns the formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Session summary ({} frames, {:.1}s):",
            self.frames,
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let stats = &self.timings[stage];
            lines.push(format!(
                "  {stage:8}: avg {:6.1}ms  max {:6.1}ms",
                stats.mean(),
                stats.max
            ));
        }

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            lines.push(format!("  {name}: avg {:.1}", self.metrics[name].mean()));
        }

        if self.frames > 0 && elapsed_ms > 0.0 {
            let fps = self.frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<SampleStats> {
        self.timings.get(stage).copied()
    }

    pub fn metrics_for(&self, name: &str) -> Option<SampleStats> {
        self.metrics.get(name).copied()
    }
}

impl Default for SessionPipelineLogger {
    fn default() -> Self {
        Self::new(100)
    }
}

impl PipelineLogger for SessionPipelineLogger {
    fn progress(&mut self, frames: usize) {
        self.frames = frames;
        if frames % self.throttle_frames == 0 {
            log::debug!("Processed {frames} frames");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        match self.timings.get_mut(stage) {
            Some(stats) => stats.record(duration_ms),
            None => {
                let mut stats = SampleStats::default();
                stats.record(duration_ms);
                self.timings.insert(stage.to_string(), stats);
            }
        }
    }

    fn metric(&mut self, name: &str, value: f64) {
        match self.metrics.get_mut(name) {
            Some(stats) => stats.record(value),
            None => {
                let mut stats = SampleStats::default();
                stats.record(value);
                self.metrics.insert(name.to_string(), stats);
            }
        }
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n{text}");
        }
    }
}
