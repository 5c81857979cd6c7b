//! In-place tree normalization passes.
//!
//! Two passes prepare a treebank tree for grammar induction:
//!
//! 1. [`collapse_unary`] merges unary nonterminal chains (`A` over `B`
//!    becomes `A+B`), so the induced grammar has no single-nonterminal
//!    cycles. Part-of-speech preterminals and the root are preserved by
//!    default.
//! 2. [`chomsky_normal_form`] binarizes every node with more than two
//!    children, synthesizing intermediate labels like `VP|<NP-PP>` whose
//!    angle-bracket context carries at most `horz_markov` sibling labels.
//!
//! Both passes mutate the tree; the pipeline processes each tree once and
//! discards it after production extraction. Binarization is idempotent for
//! a fixed configuration: an already-binary tree is returned unchanged.

use thiserror::Error;

use crate::types::{Factor, InduceConfig};

use super::Tree;

/// A tree the binarization pass cannot restructure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("cannot binarize node {label}: a terminal word appears among {arity} siblings")]
    LeafAmongSiblings { label: String, arity: usize },
}

/// Collapse unary nonterminal chains in place.
///
/// A node with exactly one child absorbs that child — label `A` becomes
/// `A+B` and `B`'s children move up — when the child is itself an internal
/// node. Preterminals survive unless `collapse_pos` is set, and a unary
/// root survives unless `collapse_root` is set (traversal then starts at
/// its child). A merged node is re-examined, so longer chains collapse
/// into a single node.
pub fn collapse_unary(tree: &mut Tree, cfg: &InduceConfig) {
    if !cfg.collapse_root && tree.children().len() == 1 {
        if let Tree::Node { children, .. } = tree {
            for child in children {
                collapse_node(child, cfg);
            }
        }
    } else {
        collapse_node(tree, cfg);
    }
}

fn collapse_node(node: &mut Tree, cfg: &InduceConfig) {
    if let Tree::Node { label, children } = node {
        loop {
            let collapsible = match children.as_slice() {
                [Tree::Node { children: grand, .. }] => {
                    cfg.collapse_pos || matches!(grand.first(), Some(Tree::Node { .. }))
                }
                _ => false,
            };
            if !collapsible {
                break;
            }
            if let Some(Tree::Node {
                label: child_label,
                children: grand,
            }) = children.pop()
            {
                label.push(cfg.join_char);
                label.push_str(&child_label);
                *children = grand;
            }
        }
        for child in children {
            collapse_node(child, cfg);
        }
    }
}

/// Convert the tree to Chomsky Normal Form in place.
///
/// Every node with more than two children is replaced by a right- (or
/// left-) branching chain of binary nodes. Each synthesized node is labeled
/// `PARENT|<C1-C2>` where the context lists at most `horz_markov` upcoming
/// (right factoring) or preceding (left factoring) sibling labels;
/// `horz_markov = None` keeps the full context. With `vert_markov > 0`,
/// internal nodes other than the root and the preterminals are additionally
/// annotated with up to `vert_markov` ancestor labels (`NP^<VP-S>`).
///
/// Fails if a node with more than two children has a terminal word among
/// them; such a tree cannot be binarized without inventing preterminals.
pub fn chomsky_normal_form(tree: &mut Tree, cfg: &InduceConfig) -> Result<(), TransformError> {
    let ancestors = match tree.label() {
        Some(label) => vec![label.to_string()],
        None => return Ok(()),
    };
    cnf_node(tree, &ancestors, true, cfg)
}

fn cnf_node(
    node: &mut Tree,
    ancestors: &[String],
    is_root: bool,
    cfg: &InduceConfig,
) -> Result<(), TransformError> {
    let Tree::Node { label, children } = node else {
        return Ok(());
    };

    let original = label.clone();

    // Parent annotation. Never the root, never a preterminal.
    let mut parent_suffix = String::new();
    let annotate = cfg.vert_markov != 0
        && !is_root
        && matches!(children.first(), Some(Tree::Node { .. }));
    let child_ancestors: Vec<String> = if annotate {
        parent_suffix = format!("{}<{}>", cfg.parent_char, ancestors.join("-"));
        label.push_str(&parent_suffix);
        std::iter::once(original.clone())
            .chain(
                ancestors
                    .iter()
                    .take(cfg.vert_markov.saturating_sub(1))
                    .cloned(),
            )
            .collect()
    } else {
        ancestors.to_vec()
    };

    // Sibling context in synthesized labels uses the labels as they were
    // before any child annotation.
    let sibling_labels: Vec<String> = children.iter().map(label_text).collect();

    for child in children.iter_mut() {
        cnf_node(child, &child_ancestors, false, cfg)?;
    }

    let n = children.len();
    if n <= 2 {
        return Ok(());
    }
    if children.iter().any(Tree::is_leaf) {
        return Err(TransformError::LeafAmongSiblings {
            label: original,
            arity: n,
        });
    }

    let bound = cfg.horz_markov.unwrap_or(n);
    let synth = |context: &[String]| {
        format!(
            "{original}{}<{}>{parent_suffix}",
            cfg.child_char,
            context.join("-")
        )
    };

    let mut nodes: Vec<Tree> = children.drain(..).collect();
    match cfg.factor {
        Factor::Right => {
            // The i-th synthesized node carries the labels of the next
            // `bound` children starting at position i.
            let right_head =
                |i: usize| synth(&sibling_labels[i..(i + bound).min(n)]);

            let tail = nodes.split_off(n - 2);
            let mut current = Tree::node(right_head(n - 2), tail);
            while nodes.len() > 1 {
                let i = nodes.len() - 1;
                if let Some(child) = nodes.pop() {
                    current = Tree::node(right_head(i), vec![child, current]);
                }
            }
            nodes.push(current);
            *children = nodes;
        }
        Factor::Left => {
            // Mirror image: context lists the `bound` children preceding
            // position n - i.
            let left_head =
                |i: usize| synth(&sibling_labels[(n - i).saturating_sub(bound)..n - i]);

            let mut rest = nodes.split_off(2);
            let top_right = rest.pop();
            let mut current = Tree::node(left_head(n - 2), nodes);
            let mut i = n - 3;
            for child in rest {
                current = Tree::node(left_head(i), vec![current, child]);
                i -= 1;
            }
            let mut new_children = vec![current];
            new_children.extend(top_right);
            *children = new_children;
        }
    }

    Ok(())
}

fn label_text(tree: &Tree) -> String {
    match tree {
        Tree::Node { label, .. } => label.clone(),
        Tree::Leaf(word) => word.clone(),
    }
}
