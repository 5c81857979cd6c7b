//! Bracketed-parse reader.
//!
//! Parses the `(LABEL child ...)` S-expression format used by annotated
//! treebank files. A file holds any number of top-level trees. Penn-style
//! files wrap each sentence in an extra unlabeled bracket pair,
//! `( (S ...) )`; such wrappers are stripped so the sentence root is the
//! real top node.

use crate::tree::Tree;

use super::CorpusError;

/// Parse every top-level tree in `src`.
pub fn parse_trees(src: &str) -> Result<Vec<Tree>, CorpusError> {
    let mut reader = Reader::new(src);
    let mut trees = Vec::new();

    loop {
        reader.skip_ws();
        match reader.peek() {
            None => break,
            Some(b'(') => {
                reader.advance();
                trees.push(strip_wrapper(reader.parse_node()?));
            }
            Some(b')') => {
                return Err(reader.error("unmatched ')'"));
            }
            Some(_) => {
                let atom = reader.atom();
                return Err(reader.error(format!("expected '(', found {atom:?}")));
            }
        }
    }

    Ok(trees)
}

/// `( (S ...) )` → `(S ...)`. Only unlabeled single-child top nodes are
/// stripped; anything else is returned untouched.
fn strip_wrapper(tree: Tree) -> Tree {
    match tree {
        Tree::Node { label, mut children } if label.is_empty() && children.len() == 1 => {
            match children.pop() {
                Some(child) => child,
                None => Tree::Node { label, children },
            }
        }
        other => other,
    }
}

struct Reader<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Reader<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0, line: 1 }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn skip_ws(&mut self) {
        while let Some(byte) = self.peek() {
            match byte {
                b'\n' => {
                    self.line += 1;
                    self.pos += 1;
                }
                b' ' | b'\t' | b'\r' => self.pos += 1,
                _ => break,
            }
        }
    }

    /// Consume a run of atom characters: anything but whitespace and
    /// brackets. Safe to slice on byte positions since the delimiters are
    /// all ASCII.
    fn atom(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if matches!(byte, b'(' | b')' | b' ' | b'\t' | b'\n' | b'\r') {
                break;
            }
            self.pos += 1;
        }
        &self.src[start..self.pos]
    }

    /// Parse a node body; the opening '(' has already been consumed.
    fn parse_node(&mut self) -> Result<Tree, CorpusError> {
        self.skip_ws();
        let label = match self.peek() {
            Some(b'(') | Some(b')') | None => String::new(),
            Some(_) => self.atom().to_string(),
        };

        let mut children = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                None => {
                    return Err(self.error(format!(
                        "unbalanced brackets: node {label:?} is never closed"
                    )));
                }
                Some(b')') => {
                    self.advance();
                    break;
                }
                Some(b'(') => {
                    self.advance();
                    children.push(self.parse_node()?);
                }
                Some(_) => {
                    children.push(Tree::leaf(self.atom()));
                }
            }
        }

        if label.is_empty() && children.is_empty() {
            return Err(self.error("empty bracket pair"));
        }
        Ok(Tree::node(label, children))
    }

    fn error(&self, message: impl Into<String>) -> CorpusError {
        CorpusError::Syntax {
            line: self.line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_single_tree() {
        let trees = parse_trees("(S (NP (DT the) (NN dog)) (VP (VBZ barks)))").unwrap();
        assert_eq!(trees.len(), 1);
        assert_eq!(
            trees[0].to_string(),
            "(S (NP (DT the) (NN dog)) (VP (VBZ barks)))"
        );
    }

    #[test]
    fn test_parses_multiple_trees() {
        let trees = parse_trees("(S (X a))\n(S (Y b))").unwrap();
        assert_eq!(trees.len(), 2);
        assert_eq!(trees[1].to_string(), "(S (Y b))");
    }

    #[test]
    fn test_strips_penn_wrapper() {
        let trees = parse_trees("( (S (NP (PRP it)) (VP (VBZ works))) )").unwrap();
        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].label(), Some("S"));
    }

    #[test]
    fn test_keeps_labeled_unary_top() {
        let trees = parse_trees("(TOP (S (X a)))").unwrap();
        assert_eq!(trees[0].label(), Some("TOP"));
    }

    #[test]
    fn test_whitespace_and_newlines_are_insignificant() {
        let trees = parse_trees("( (S\n    (NP (DT the)\n        (NN cat))\n    (VP (VBZ sits))) )")
            .unwrap();
        assert_eq!(trees[0].leaves(), vec!["the", "cat", "sits"]);
    }

    #[test]
    fn test_unbalanced_open_reports_line() {
        let err = parse_trees("(S (NP (DT the)\n(NN dog)").unwrap_err();
        match err {
            CorpusError::Syntax { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("never closed"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unmatched_close_is_an_error() {
        let err = parse_trees("(S (X a)) )").unwrap_err();
        assert!(matches!(err, CorpusError::Syntax { .. }));
    }

    #[test]
    fn test_bare_atom_at_top_level_is_an_error() {
        let err = parse_trees("hello").unwrap_err();
        match err {
            CorpusError::Syntax { message, .. } => assert!(message.contains("hello")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_bracket_pair_is_an_error() {
        let err = parse_trees("( )").unwrap_err();
        match err {
            CorpusError::Syntax { message, .. } => assert!(message.contains("empty bracket")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_yields_no_trees() {
        assert!(parse_trees("").unwrap().is_empty());
    }
}
