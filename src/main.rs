//! `induce-pcfg` — print the grammar induced from the built-in corpus.
//!
//! No flags, no configuration: the program always loads the fixed corpus,
//! runs the default normalization recipe, and writes the grammar to
//! stdout. Any failure propagates out of `main`, terminating with a
//! non-zero status and a diagnostic message.

use anyhow::Result;
use treebank_pcfg::pipeline::StageTimingObserver;
use treebank_pcfg::{InduceConfig, TreebankPipeline};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cfg = InduceConfig::default();
    let pipeline = TreebankPipeline::penn_treebank();
    let mut observer = StageTimingObserver::new();

    let report = pipeline.run(&cfg, &mut observer)?;

    for (stage, stage_report) in observer.reports() {
        tracing::debug!(
            stage = %stage,
            elapsed_us = stage_report.elapsed().as_micros() as u64,
            "stage complete"
        );
    }

    println!("{}", report.text);
    Ok(())
}
