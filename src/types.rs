//! Core configuration types.
//!
//! [`InduceConfig`] collects every knob the normalization and induction
//! stages read. The defaults reproduce the canonical treebank recipe:
//! collapse unary chains (keeping part-of-speech preterminals), then
//! right-binarize with a horizontal Markov order of 2, then induce a
//! grammar rooted at `S`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which side binarization factors from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    /// Peel children off the left edge; intermediate context lists upcoming
    /// siblings.
    Right,
    /// Peel children off the right edge; intermediate context lists
    /// preceding siblings.
    Left,
}

impl Factor {
    /// Returns the user-facing name used in JSON and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Left => "left",
        }
    }
}

/// Configuration for tree normalization and grammar induction.
///
/// All fields are public; use the `with_*` setters for fluent construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InduceConfig {
    /// Root nonterminal of the induced grammar.
    pub start_symbol: String,

    /// Collapse unary chains through part-of-speech preterminals too.
    pub collapse_pos: bool,

    /// Allow a unary root node to be collapsed into its child.
    pub collapse_root: bool,

    /// Separator inserted between merged labels (`S+VP`).
    pub join_char: char,

    /// Horizontal Markov order: how many sibling labels an intermediate
    /// binarization node encodes. `None` means unbounded context.
    pub horz_markov: Option<usize>,

    /// Vertical Markov order: how many ancestor labels a node is annotated
    /// with. `0` disables parent annotation.
    pub vert_markov: usize,

    /// Binarization direction.
    pub factor: Factor,

    /// Separator introducing synthesized binarization labels (`VP|<NP-PP>`).
    pub child_char: char,

    /// Separator introducing parent annotations (`NP^<VP>`).
    pub parent_char: char,
}

impl Default for InduceConfig {
    fn default() -> Self {
        Self {
            start_symbol: "S".to_string(),
            collapse_pos: false,
            collapse_root: false,
            join_char: '+',
            horz_markov: Some(2),
            vert_markov: 0,
            factor: Factor::Right,
            child_char: '|',
            parent_char: '^',
        }
    }
}

impl InduceConfig {
    /// Create a config with the default treebank recipe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grammar's start symbol.
    pub fn with_start_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.start_symbol = symbol.into();
        self
    }

    /// Set the horizontal Markov order (`None` = unbounded).
    pub fn with_horz_markov(mut self, order: Option<usize>) -> Self {
        self.horz_markov = order;
        self
    }

    /// Set the vertical Markov order (`0` = no parent annotation).
    pub fn with_vert_markov(mut self, order: usize) -> Self {
        self.vert_markov = order;
        self
    }

    /// Set the binarization direction.
    pub fn with_factor(mut self, factor: Factor) -> Self {
        self.factor = factor;
        self
    }

    /// Also collapse unary chains through part-of-speech nodes.
    pub fn with_collapse_pos(mut self, collapse_pos: bool) -> Self {
        self.collapse_pos = collapse_pos;
        self
    }

    /// Allow collapsing a unary root.
    pub fn with_collapse_root(mut self, collapse_root: bool) -> Self {
        self.collapse_root = collapse_root;
        self
    }

    /// Fail-fast validation, run once before the pipeline executes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_symbol.is_empty() {
            return Err(ConfigError::EmptyStartSymbol);
        }
        if self.horz_markov == Some(0) {
            return Err(ConfigError::ZeroMarkovOrder);
        }
        Ok(())
    }
}

/// Rejected configuration, caught before any stage runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("start symbol must not be empty")]
    EmptyStartSymbol,

    #[error("horz_markov must be greater than 0; use None for unbounded context")]
    ZeroMarkovOrder,
}
