//! Labeled syntax trees.
//!
//! A [`Tree`] is either an internal node with a nonterminal label and
//! children, or a leaf holding a terminal word. Trees are owned by the
//! pipeline, mutated in place by the normalization passes in [`transform`],
//! and discarded once their productions are extracted.

use std::fmt;

use crate::grammar::{Nonterminal, Production, Symbol};

pub mod transform;

pub use transform::{chomsky_normal_form, collapse_unary, TransformError};

/// A node in a parsed sentence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tree {
    /// Internal node: nonterminal label over one or more children.
    Node { label: String, children: Vec<Tree> },
    /// Terminal word.
    Leaf(String),
}

impl Tree {
    /// Build an internal node.
    pub fn node(label: impl Into<String>, children: Vec<Tree>) -> Self {
        Self::Node {
            label: label.into(),
            children,
        }
    }

    /// Build a leaf.
    pub fn leaf(word: impl Into<String>) -> Self {
        Self::Leaf(word.into())
    }

    /// Build a preterminal: a node over a single leaf, e.g. `(NN dog)`.
    pub fn preterminal(label: impl Into<String>, word: impl Into<String>) -> Self {
        Self::node(label, vec![Self::leaf(word)])
    }

    /// Returns `true` for leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Returns `true` for nodes whose first child is a leaf — part-of-speech
    /// nodes in a well-formed treebank tree.
    pub fn is_preterminal(&self) -> bool {
        matches!(self, Self::Node { children, .. } if matches!(children.first(), Some(Self::Leaf(_))))
    }

    /// The node label, or `None` for leaves.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Node { label, .. } => Some(label),
            Self::Leaf(_) => None,
        }
    }

    /// The children of this node; empty for leaves.
    pub fn children(&self) -> &[Tree] {
        match self {
            Self::Node { children, .. } => children,
            Self::Leaf(_) => &[],
        }
    }

    /// The terminal words of this tree, left to right.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Leaf(word) => out.push(word),
            Self::Node { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Extract one production per internal node, in preorder.
    ///
    /// The production's left-hand side is the node label; the right-hand
    /// side maps child nodes to nonterminals and child leaves to terminals.
    /// A bare leaf yields no productions.
    pub fn productions(&self) -> Vec<Production> {
        let mut out = Vec::new();
        self.collect_productions(&mut out);
        out
    }

    fn collect_productions(&self, out: &mut Vec<Production>) {
        if let Self::Node { label, children } = self {
            let rhs = children
                .iter()
                .map(|child| match child {
                    Self::Node { label, .. } => Symbol::nt(label.as_str()),
                    Self::Leaf(word) => Symbol::t(word.as_str()),
                })
                .collect();
            out.push(Production::new(Nonterminal::new(label.as_str()), rhs));
            for child in children {
                child.collect_productions(out);
            }
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(word) => f.write_str(word),
            Self::Node { label, children } => {
                write!(f, "({label}")?;
                for child in children {
                    write!(f, " {child}")?;
                }
                write!(f, ")")
            }
        }
    }
}
