//! Pipeline-level error type.
//!
//! One variant per failure class; every stage error converts into it via
//! `?`. No stage catches or retries — the first failure aborts the run and
//! surfaces here.

use thiserror::Error;

use crate::corpus::CorpusError;
use crate::grammar::InduceError;
use crate::pipeline::traits::FormatError;
use crate::tree::TransformError;
use crate::types::ConfigError;

/// Any failure raised while running the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("tree normalization failed: {0}")]
    Normalize(#[from] TransformError),

    #[error("grammar induction failed: {0}")]
    Induce(#[from] InduceError),

    #[error("grammar formatting failed: {0}")]
    Format(#[from] FormatError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_stage_errors() {
        let err: PipelineError = InduceError::EmptyProductions.into();
        assert!(matches!(err, PipelineError::Induce(_)));

        let err: PipelineError = CorpusError::UnknownCorpus {
            id: "brown".to_string(),
        }
        .into();
        assert!(matches!(err, PipelineError::Corpus(_)));
    }

    #[test]
    fn test_display_includes_stage_context() {
        let err: PipelineError = InduceError::EmptyProductions.into();
        let text = err.to_string();
        assert!(text.starts_with("grammar induction failed"));
        assert!(text.contains("empty production sequence"));
    }
}
