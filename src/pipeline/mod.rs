//! The staged induction pipeline.
//!
//! Five stages run in a fixed order — load, normalize, collect, induce,
//! format — each behind a trait so library consumers can swap
//! implementations without touching the runner:
//!
//! - [`traits::CorpusSource`] supplies parsed trees,
//! - [`traits::TreeNormalizer`] rewrites each tree in place,
//! - the runner itself concatenates every tree's productions,
//! - [`traits::GrammarInducer`] estimates the grammar,
//! - [`traits::GrammarFormatter`] renders it.
//!
//! [`observer::PipelineObserver`] hooks expose stage timings and
//! intermediate artifacts without coupling to stage logic.

pub mod errors;
pub mod observer;
pub mod runner;
pub mod traits;

pub use errors::PipelineError;
pub use observer::{NoopObserver, PipelineObserver, StageReport, StageTimingObserver};
pub use runner::{GrammarReport, Pipeline, PipelineBuilder, TreebankPipeline};
pub use traits::{
    CorpusSource, GrammarFormatter, GrammarInducer, JsonFormatter, MarkovNormalizer,
    NoopNormalizer, RelativeFrequencyInducer, TextFormatter, TreeNormalizer, TreebankSource,
};
