//! Pipeline observer — hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Use cases include timing stages, capturing intermediate
//! artifacts for debugging, and emitting structured telemetry. Pass
//! [`NoopObserver`] for zero-overhead execution.

use std::time::{Duration, Instant};

use crate::grammar::{Pcfg, Production};
use crate::tree::Tree;

/// Stage names, in execution order.
pub const STAGE_LOAD: &str = "load";
pub const STAGE_NORMALIZE: &str = "normalize";
pub const STAGE_COLLECT: &str = "collect";
pub const STAGE_INDUCE: &str = "induce";
pub const STAGE_FORMAT: &str = "format";

/// Callbacks fired by [`Pipeline::run`](super::runner::Pipeline::run).
///
/// Every method has a no-op default, so implementations override only what
/// they care about. Artifact hooks fire after the corresponding stage ends.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}
    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    /// The normalized trees, before production extraction.
    fn on_trees(&mut self, _trees: &[Tree]) {}

    /// The accumulated production sequence, multiplicity preserved.
    fn on_productions(&mut self, _productions: &[Production]) {}

    /// The induced grammar.
    fn on_grammar(&mut self, _grammar: &Pcfg) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Wall-clock timer for a single stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Per-stage metrics delivered to [`PipelineObserver::on_stage_end`].
///
/// Count fields are `None` for stages they don't apply to.
#[derive(Debug, Clone, Default)]
pub struct StageReport {
    elapsed: Duration,
    trees: Option<usize>,
    productions: Option<usize>,
    rules: Option<usize>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Trees loaded (load stage).
    pub fn trees(&self) -> Option<usize> {
        self.trees
    }

    /// Productions accumulated (collect stage).
    pub fn productions(&self) -> Option<usize> {
        self.productions
    }

    /// Distinct rules in the grammar (induce stage).
    pub fn rules(&self) -> Option<usize> {
        self.rules
    }
}

/// Builder for [`StageReport`]s carrying stage-specific counts.
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn trees(mut self, count: usize) -> Self {
        self.report.trees = Some(count);
        self
    }

    pub fn productions(mut self, count: usize) -> Self {
        self.report.productions = Some(count);
        self
    }

    pub fn rules(mut self, count: usize) -> Self {
        self.report.rules = Some(count);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Records one `(stage, report)` pair per completed stage, in order.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}
