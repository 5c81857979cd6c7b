//! Pipeline runner — orchestrates stage execution and artifact flow.
//!
//! The [`Pipeline`] struct holds a statically-composed set of pipeline
//! stages. Calling [`Pipeline::run`] executes them in order — load,
//! normalize, collect, induce, format — threading artifacts between stages
//! and notifying an optional [`PipelineObserver`] at each boundary. The
//! first failing stage aborts the run; nothing is caught or retried.
//!
//! # Static dispatch
//!
//! `Pipeline` is generic over all stage types, so the compiler
//! monomorphizes each combination into a unique concrete type. The
//! zero-sized default stages add zero bytes and zero runtime cost.
//!
//! # Factory methods
//!
//! Use [`TreebankPipeline::penn_treebank()`] for the default stack, or
//! [`PipelineBuilder`] to override individual stages.

use crate::grammar::{Nonterminal, Pcfg, Production};
use crate::pipeline::errors::PipelineError;
use crate::pipeline::observer::{
    PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_COLLECT, STAGE_FORMAT,
    STAGE_INDUCE, STAGE_LOAD, STAGE_NORMALIZE,
};
use crate::pipeline::traits::{
    CorpusSource, GrammarFormatter, GrammarInducer, MarkovNormalizer, RelativeFrequencyInducer,
    TextFormatter, TreeNormalizer, TreebankSource,
};
use crate::types::InduceConfig;

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// GrammarReport — the final artifact
// ============================================================================

/// The result of a pipeline run: the induced grammar plus its rendering.
///
/// The pipeline never prints; writing `text` to stdout (or anywhere else)
/// is the caller's decision.
#[derive(Debug, Clone)]
pub struct GrammarReport {
    pub grammar: Pcfg,
    pub text: String,
}

// ============================================================================
// Pipeline — statically-composed stage container
// ============================================================================

/// A pipeline composed of concrete stage implementations.
///
/// All type parameters have trait bounds enforced at the `impl` level, so
/// the struct itself is unconditionally constructible (useful for builders).
///
/// # Type parameters
///
/// | Param | Trait | Default impl |
/// |-------|-------|--------------|
/// | `Src` | [`CorpusSource`] | [`TreebankSource`] |
/// | `Norm` | [`TreeNormalizer`] | [`MarkovNormalizer`] |
/// | `Ind` | [`GrammarInducer`] | [`RelativeFrequencyInducer`] |
/// | `Fmt` | [`GrammarFormatter`] | [`TextFormatter`] |
#[derive(Debug, Clone)]
pub struct Pipeline<Src, Norm, Ind, Fmt> {
    pub source: Src,
    pub normalizer: Norm,
    pub inducer: Ind,
    pub formatter: Fmt,
}

/// Type alias for the default treebank-induction pipeline.
pub type TreebankPipeline =
    Pipeline<TreebankSource, MarkovNormalizer, RelativeFrequencyInducer, TextFormatter>;

impl TreebankPipeline {
    /// Build the standard pipeline over the built-in annotated corpus:
    /// collapse unary chains, binarize with the configured Markov bound,
    /// induce by relative frequency, render as text.
    pub fn penn_treebank() -> Self {
        Pipeline {
            source: TreebankSource::new(),
            normalizer: MarkovNormalizer,
            inducer: RelativeFrequencyInducer,
            formatter: TextFormatter,
        }
    }
}

// ============================================================================
// Pipeline::run — execute stages in order
// ============================================================================

impl<Src, Norm, Ind, Fmt> Pipeline<Src, Norm, Ind, Fmt>
where
    Src: CorpusSource,
    Norm: TreeNormalizer,
    Ind: GrammarInducer,
    Fmt: GrammarFormatter,
{
    /// Execute the pipeline, producing a [`GrammarReport`].
    ///
    /// Stages run in order:
    /// 1. Load the corpus
    /// 2. Normalize every tree in place
    /// 3. Collect productions into one sequence, multiplicity preserved
    /// 4. Induce the grammar
    /// 5. Format the result
    ///
    /// The `observer` receives callbacks at each stage boundary. Pass
    /// [`NoopObserver`](super::observer::NoopObserver) for zero-overhead
    /// execution.
    pub fn run(
        &self,
        cfg: &InduceConfig,
        observer: &mut impl PipelineObserver,
    ) -> Result<GrammarReport, PipelineError> {
        cfg.validate()?;

        // Stage 0: Load
        trace_stage!(STAGE_LOAD);
        observer.on_stage_start(STAGE_LOAD);
        let clock = StageClock::start();
        let mut trees = self.source.load()?;
        let report = StageReportBuilder::new(clock.elapsed())
            .trees(trees.len())
            .build();
        observer.on_stage_end(STAGE_LOAD, &report);

        // Stage 1: Normalize (mutates trees in place)
        trace_stage!(STAGE_NORMALIZE);
        observer.on_stage_start(STAGE_NORMALIZE);
        let clock = StageClock::start();
        for tree in &mut trees {
            self.normalizer.normalize(tree, cfg)?;
        }
        let report = StageReport::new(clock.elapsed());
        observer.on_stage_end(STAGE_NORMALIZE, &report);
        observer.on_trees(&trees);

        // Stage 2: Collect productions
        trace_stage!(STAGE_COLLECT);
        observer.on_stage_start(STAGE_COLLECT);
        let clock = StageClock::start();
        let mut productions: Vec<Production> = Vec::new();
        for tree in &trees {
            productions.extend(tree.productions());
        }
        let report = StageReportBuilder::new(clock.elapsed())
            .productions(productions.len())
            .build();
        observer.on_stage_end(STAGE_COLLECT, &report);
        observer.on_productions(&productions);

        // Stage 3: Induce
        trace_stage!(STAGE_INDUCE);
        observer.on_stage_start(STAGE_INDUCE);
        let clock = StageClock::start();
        let start = Nonterminal::new(cfg.start_symbol.as_str());
        let grammar = self.inducer.induce(start, &productions)?;
        let report = StageReportBuilder::new(clock.elapsed())
            .rules(grammar.len())
            .build();
        observer.on_stage_end(STAGE_INDUCE, &report);
        observer.on_grammar(&grammar);

        // Stage 4: Format
        trace_stage!(STAGE_FORMAT);
        observer.on_stage_start(STAGE_FORMAT);
        let clock = StageClock::start();
        let text = self.formatter.format(&grammar)?;
        let report = StageReport::new(clock.elapsed());
        observer.on_stage_end(STAGE_FORMAT, &report);

        Ok(GrammarReport { grammar, text })
    }
}

// ============================================================================
// PipelineBuilder — fluent construction with custom stages
// ============================================================================

/// Fluent builder for constructing a [`Pipeline`] with custom stages.
///
/// Starts from the default treebank configuration and allows overriding
/// individual stages.
///
/// ```
/// use treebank_pcfg::pipeline::runner::PipelineBuilder;
/// use treebank_pcfg::pipeline::traits::NoopNormalizer;
///
/// let pipeline = PipelineBuilder::new()
///     .normalizer(NoopNormalizer)
///     .build();
/// # let _ = pipeline;
/// ```
pub struct PipelineBuilder<
    Src = TreebankSource,
    Norm = MarkovNormalizer,
    Ind = RelativeFrequencyInducer,
    Fmt = TextFormatter,
> {
    source: Src,
    normalizer: Norm,
    inducer: Ind,
    formatter: Fmt,
}

impl PipelineBuilder {
    /// Start building from the default stages.
    pub fn new() -> Self {
        PipelineBuilder {
            source: TreebankSource::new(),
            normalizer: MarkovNormalizer,
            inducer: RelativeFrequencyInducer,
            formatter: TextFormatter,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<Src, Norm, Ind, Fmt> PipelineBuilder<Src, Norm, Ind, Fmt> {
    /// Override the corpus source stage.
    pub fn source<S: CorpusSource>(self, s: S) -> PipelineBuilder<S, Norm, Ind, Fmt> {
        PipelineBuilder {
            source: s,
            normalizer: self.normalizer,
            inducer: self.inducer,
            formatter: self.formatter,
        }
    }

    /// Override the tree normalizer stage.
    pub fn normalizer<N: TreeNormalizer>(self, n: N) -> PipelineBuilder<Src, N, Ind, Fmt> {
        PipelineBuilder {
            source: self.source,
            normalizer: n,
            inducer: self.inducer,
            formatter: self.formatter,
        }
    }

    /// Override the grammar inducer stage.
    pub fn inducer<I: GrammarInducer>(self, i: I) -> PipelineBuilder<Src, Norm, I, Fmt> {
        PipelineBuilder {
            source: self.source,
            normalizer: self.normalizer,
            inducer: i,
            formatter: self.formatter,
        }
    }

    /// Override the grammar formatter stage.
    pub fn formatter<F: GrammarFormatter>(self, f: F) -> PipelineBuilder<Src, Norm, Ind, F> {
        PipelineBuilder {
            source: self.source,
            normalizer: self.normalizer,
            inducer: self.inducer,
            formatter: f,
        }
    }

    /// Consume the builder and produce a [`Pipeline`].
    pub fn build(self) -> Pipeline<Src, Norm, Ind, Fmt> {
        Pipeline {
            source: self.source,
            normalizer: self.normalizer,
            inducer: self.inducer,
            formatter: self.formatter,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{CorpusError, Treebank};
    use crate::grammar::InduceError;
    use crate::pipeline::observer::{NoopObserver, StageTimingObserver};
    use crate::pipeline::traits::{JsonFormatter, NoopNormalizer};
    use crate::tree::Tree;

    /// Corpus source over inline bracketed text.
    struct StrSource(&'static str);

    impl CorpusSource for StrSource {
        fn load(&self) -> Result<Vec<Tree>, CorpusError> {
            Ok(Treebank::from_bracketed(self.0)?.into_trees())
        }
    }

    const TWO_SENTENCES: &str = "\
        ( (S (NP (DT the) (NN dog)) (VP (VBZ barks))) )\n\
        ( (S (NP (NNS dogs)) (VP (VBP bark) (ADVP (RB loudly)) (PP (IN at) (NP (NNS cats))))) )";

    #[test]
    fn test_default_pipeline_constructs() {
        let _pipeline = TreebankPipeline::penn_treebank();
    }

    #[test]
    fn test_pipeline_builder_default() {
        let _pipeline = PipelineBuilder::new().build();
    }

    #[test]
    fn test_run_on_builtin_corpus() {
        let pipeline = TreebankPipeline::penn_treebank();
        let cfg = InduceConfig::default();

        let report = pipeline.run(&cfg, &mut NoopObserver).unwrap();
        assert_eq!(report.grammar.start().symbol(), "S");
        assert!(report.text.starts_with("Grammar with"));
        // The corpus has ternary nodes, so binarization must have fired.
        assert!(report.text.contains("|<"));
        // And unary chains, so collapsing must have fired.
        assert!(report.text.contains("SBAR+S"));
    }

    #[test]
    fn test_run_with_custom_source() {
        let pipeline = PipelineBuilder::new().source(StrSource(TWO_SENTENCES)).build();
        let cfg = InduceConfig::default();

        let report = pipeline.run(&cfg, &mut NoopObserver).unwrap();
        assert!(report.text.contains("S -> NP VP [1.0]"));
    }

    #[test]
    fn test_production_sequence_length_matches_per_tree_sum() {
        /// Captures the normalized trees and the collected sequence.
        #[derive(Default)]
        struct CountingObserver {
            per_tree_total: usize,
            collected: usize,
        }

        impl PipelineObserver for CountingObserver {
            fn on_trees(&mut self, trees: &[Tree]) {
                self.per_tree_total = trees.iter().map(|t| t.productions().len()).sum();
            }
            fn on_productions(&mut self, productions: &[crate::grammar::Production]) {
                self.collected = productions.len();
            }
        }

        let pipeline = TreebankPipeline::penn_treebank();
        let mut obs = CountingObserver::default();
        pipeline.run(&InduceConfig::default(), &mut obs).unwrap();

        assert!(obs.collected > 0);
        assert_eq!(obs.collected, obs.per_tree_total);
    }

    #[test]
    fn test_empty_corpus_fails_induction() {
        let pipeline = PipelineBuilder::new().source(StrSource("")).build();
        let err = pipeline
            .run(&InduceConfig::default(), &mut NoopObserver)
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Induce(InduceError::EmptyProductions)
        ));
    }

    #[test]
    fn test_missing_start_symbol_fails_induction() {
        let pipeline = PipelineBuilder::new().source(StrSource(TWO_SENTENCES)).build();
        let cfg = InduceConfig::new().with_start_symbol("TOP");
        let err = pipeline.run(&cfg, &mut NoopObserver).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Induce(InduceError::MissingStartSymbol { .. })
        ));
    }

    #[test]
    fn test_invalid_config_fails_before_any_stage() {
        let pipeline = TreebankPipeline::penn_treebank();
        let cfg = InduceConfig::new().with_start_symbol("");

        let mut obs = StageTimingObserver::new();
        let err = pipeline.run(&cfg, &mut obs).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
        assert!(obs.reports().is_empty());
    }

    #[test]
    fn test_malformed_corpus_fails_load_stage() {
        let pipeline = PipelineBuilder::new()
            .source(StrSource("(S (NP (DT the)"))
            .build();
        let err = pipeline
            .run(&InduceConfig::default(), &mut NoopObserver)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Corpus(_)));
    }

    #[test]
    fn test_timing_observer_sees_all_stages_in_order() {
        let pipeline = TreebankPipeline::penn_treebank();
        let mut obs = StageTimingObserver::new();
        pipeline.run(&InduceConfig::default(), &mut obs).unwrap();

        let stages: Vec<&str> = obs.reports().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            stages,
            vec![
                STAGE_LOAD,
                STAGE_NORMALIZE,
                STAGE_COLLECT,
                STAGE_INDUCE,
                STAGE_FORMAT,
            ]
        );
    }

    #[test]
    fn test_observer_receives_stage_counts() {
        let pipeline = TreebankPipeline::penn_treebank();
        let mut obs = StageTimingObserver::new();
        pipeline.run(&InduceConfig::default(), &mut obs).unwrap();

        let (_, load_report) = &obs.reports()[0];
        assert!(load_report.trees().is_some_and(|n| n > 0));
        let (_, collect_report) = &obs.reports()[2];
        assert!(collect_report.productions().is_some_and(|n| n > 0));
        let (_, induce_report) = &obs.reports()[3];
        assert!(induce_report.rules().is_some_and(|n| n > 0));
    }

    #[test]
    fn test_noop_normalizer_keeps_raw_productions() {
        let pipeline = PipelineBuilder::new()
            .source(StrSource(TWO_SENTENCES))
            .normalizer(NoopNormalizer)
            .build();
        let report = pipeline
            .run(&InduceConfig::default(), &mut NoopObserver)
            .unwrap();

        // The ternary VP survives un-binarized.
        assert!(report.text.contains("VP -> VBP ADVP PP [0.5]"));
        assert!(!report.text.contains("|<"));
    }

    #[test]
    fn test_json_formatter_end_to_end() {
        let pipeline = PipelineBuilder::new()
            .source(StrSource(TWO_SENTENCES))
            .formatter(JsonFormatter)
            .build();
        let report = pipeline
            .run(&InduceConfig::default(), &mut NoopObserver)
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&report.text).unwrap();
        assert_eq!(value["start"], "S");
    }

    /// Custom observer that flags which artifact hooks fired.
    #[derive(Default)]
    struct ArtifactObserver {
        saw_trees: bool,
        saw_productions: bool,
        saw_grammar: bool,
    }

    impl PipelineObserver for ArtifactObserver {
        fn on_trees(&mut self, _trees: &[Tree]) {
            self.saw_trees = true;
        }
        fn on_productions(&mut self, _productions: &[crate::grammar::Production]) {
            self.saw_productions = true;
        }
        fn on_grammar(&mut self, _grammar: &Pcfg) {
            self.saw_grammar = true;
        }
    }

    #[test]
    fn test_pipeline_calls_all_artifact_observers() {
        let pipeline = TreebankPipeline::penn_treebank();
        let mut obs = ArtifactObserver::default();
        pipeline.run(&InduceConfig::default(), &mut obs).unwrap();

        assert!(obs.saw_trees, "on_trees not called");
        assert!(obs.saw_productions, "on_productions not called");
        assert!(obs.saw_grammar, "on_grammar not called");
    }
}
