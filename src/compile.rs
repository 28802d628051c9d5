use tracing::{debug, trace};

use crate::lex::{tokenize, Token};
use crate::types::{CompileError, CompiledRule, Connector, FieldRegistry, NodeId, RuleNode, RuleTree};

pub(crate) fn compile(registry: &FieldRegistry, text: &str) -> Result<CompiledRule, CompileError> {
    let built = tokenize(text)
        .map_err(CompileError::from)
        .and_then(|tokens| build(tokens, registry));

    match built {
        Ok(tree) => {
            trace!(
                rule = text,
                atoms = tree.as_ref().map_or(0, RuleTree::atom_count),
                "compiled rule"
            );
            Ok(CompiledRule::new(text, tree))
        }
        Err(err) => {
            debug!(rule = text, error = %err, "rule failed to compile");
            Err(err)
        }
    }
}

/// Where the fold stands between two tokens.
enum Pending {
    Empty,
    /// A complete subtree holding every token seen so far.
    Tree(NodeId),
    /// A connector still waiting for its right operand.
    Open {
        connector: Connector,
        left: Option<NodeId>,
    },
}

/// Build and validate the tree for a token stack.
///
/// Each connector takes everything lexed before it as its left child, and the
/// atom after it becomes its right child, so `A && B && C` yields
/// `((A && B) && C)`. Unwinding the stack from the top and folding it in
/// source order give the same tree. Nodes go straight into the arena, so a
/// node only exists once both of its children do.
pub(crate) fn build(
    tokens: Vec<Token>,
    registry: &FieldRegistry,
) -> Result<Option<RuleTree>, CompileError> {
    let mut tree = RuleTree::new();
    let mut pending = Pending::Empty;

    for token in tokens {
        pending = match (token, pending) {
            (Token::Connector(connector), Pending::Empty) => Pending::Open {
                connector,
                left: None,
            },
            (Token::Connector(connector), Pending::Tree(left)) => Pending::Open {
                connector,
                left: Some(left),
            },
            (Token::Connector(_), Pending::Open { connector, .. })
            | (Token::Atom(_), Pending::Open { connector, left: None }) => {
                return Err(CompileError::MissingOperand { connector });
            }
            (Token::Atom(atom), Pending::Empty) => {
                Pending::Tree(tree.push(parse_atom(&atom, registry)?))
            }
            (Token::Atom(atom), Pending::Tree(id)) => {
                return Err(match tree.at(id) {
                    RuleNode::Compare { field, checker } => CompileError::DanglingChild {
                        atom: format!("{field}={checker}"),
                    },
                    RuleNode::And(..) | RuleNode::Or(..) => CompileError::AdjacentAtoms { atom },
                });
            }
            (Token::Atom(atom), Pending::Open { connector, left: Some(left) }) => {
                let right = tree.push(parse_atom(&atom, registry)?);
                Pending::Tree(tree.push(match connector {
                    Connector::And => RuleNode::And(left, right),
                    Connector::Or => RuleNode::Or(left, right),
                }))
            }
        };
    }

    validate(pending, tree)
}

fn parse_atom(atom: &str, registry: &FieldRegistry) -> Result<RuleNode, CompileError> {
    let mut parts = atom.split('=');
    let (Some(field), Some(pattern), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CompileError::MalformedAtom {
            atom: atom.to_owned(),
        });
    };

    let ty = registry
        .get(field)
        .ok_or_else(|| CompileError::UnknownField {
            field: field.to_owned(),
            atom: atom.to_owned(),
        })?;
    let checker = ty
        .checker(pattern)
        .map_err(|source| CompileError::Pattern {
            field: field.to_owned(),
            source,
        })?;

    Ok(RuleNode::Compare {
        field: field.to_owned(),
        checker,
    })
}

/// Enforce the full-binary-tree shape once the tokens run out: a connector
/// left waiting for its right operand fails.
fn validate(pending: Pending, tree: RuleTree) -> Result<Option<RuleTree>, CompileError> {
    match pending {
        Pending::Empty => Ok(None),
        Pending::Tree(_) => Ok(Some(tree)),
        Pending::Open { connector, .. } => Err(CompileError::MissingOperand { connector }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldType, PatternError};

    fn registry() -> FieldRegistry {
        FieldRegistry::standard()
    }

    fn atom(s: &str) -> Token {
        Token::Atom(s.to_owned())
    }

    fn tree(text: &str) -> Option<RuleTree> {
        build(tokenize(text).unwrap(), &registry()).unwrap()
    }

    #[test]
    fn single_atom_is_leaf() {
        let root = tree("V=(1206,1209]").unwrap();
        assert!(matches!(root.root(), RuleNode::Compare { field, .. } if field == "V"));
    }

    #[test]
    fn and_chain_is_left_deep() {
        let root = tree("V={1} && P={2} && A={3}").unwrap();
        assert_eq!(root.to_string(), "((V={1} AND P={2}) AND A={3})");
        assert_eq!(root.depth(), 3);
    }

    #[test]
    fn or_chain_is_left_deep() {
        let root = tree("V={1} || P={2} || A={3} || L={4}").unwrap();
        assert_eq!(root.to_string(), "(((V={1} OR P={2}) OR A={3}) OR L={4})");
    }

    #[test]
    fn empty_stack_builds_nothing() {
        assert_eq!(build(Vec::new(), &registry()).unwrap(), None);
    }

    #[test]
    fn trailing_connector_is_missing_operand() {
        let err = build(tokenize("V={1} &&").unwrap(), &registry()).unwrap_err();
        assert!(matches!(
            err,
            CompileError::MissingOperand {
                connector: Connector::And
            }
        ));
    }

    #[test]
    fn leading_connector_token_is_missing_operand() {
        let tokens = vec![Token::Connector(Connector::Or), atom("V={1}")];
        let err = build(tokens, &registry()).unwrap_err();
        assert!(matches!(err, CompileError::MissingOperand { .. }));
    }

    #[test]
    fn consecutive_atoms_are_rejected() {
        let err = build(vec![atom("V={1}"), atom("P={1}")], &registry()).unwrap_err();
        assert!(matches!(err, CompileError::DanglingChild { .. }));

        let tokens = vec![
            atom("V={1}"),
            Token::Connector(Connector::And),
            atom("P={1}"),
            atom("A={1}"),
        ];
        let err = build(tokens, &registry()).unwrap_err();
        assert!(matches!(err, CompileError::AdjacentAtoms { ref atom } if atom == "A={1}"));
    }

    #[test]
    fn connector_after_connector_is_missing_operand() {
        let tokens = vec![
            atom("V={1}"),
            Token::Connector(Connector::Or),
            Token::Connector(Connector::Or),
            atom("P={1}"),
        ];
        let err = build(tokens, &registry()).unwrap_err();
        assert!(matches!(
            err,
            CompileError::MissingOperand {
                connector: Connector::Or
            }
        ));
    }

    #[test]
    fn arena_holds_only_the_tree() {
        let root = tree("V={1} || P={2} || A={3}").unwrap();
        assert_eq!(root.atom_count(), 3);
        assert_eq!(root.depth(), 3);
        assert!(matches!(root.root(), RuleNode::Or(..)));
    }

    #[test]
    fn unknown_field() {
        let err = build(vec![atom("Z=(1,2]")], &registry()).unwrap_err();
        assert!(matches!(err, CompileError::UnknownField { ref field, .. } if field == "Z"));
    }

    #[test]
    fn atom_without_equals() {
        let err = build(vec![atom("V(1,2]")], &registry()).unwrap_err();
        assert!(matches!(err, CompileError::MalformedAtom { .. }));
    }

    #[test]
    fn atom_with_two_equals() {
        let err = build(vec![atom("E={a=b}")], &registry()).unwrap_err();
        assert!(matches!(err, CompileError::MalformedAtom { .. }));
    }

    #[test]
    fn pattern_error_names_field() {
        let err = build(vec![atom("V=[1,2,3]")], &registry()).unwrap_err();
        match err {
            CompileError::Pattern { field, source } => {
                assert_eq!(field, "V");
                assert_eq!(source, PatternError::IntervalArity { count: 3 });
            }
            other => panic!("expected Pattern error, got {other:?}"),
        }
    }

    #[test]
    fn field_type_comes_from_registry() {
        let reg = FieldRegistry::new().with_field("ratio", FieldType::Double);
        let root = build(vec![atom("ratio=[0.5,1.5]")], &reg).unwrap().unwrap();
        match root.root() {
            RuleNode::Compare { checker, .. } => assert_eq!(checker.field_type(), FieldType::Double),
            other => panic!("expected Compare, got {other:?}"),
        }
    }

    #[test]
    fn compile_keeps_source_text() {
        let rule = compile(&registry(), "V=(1,2] && P={1}").unwrap();
        assert_eq!(rule.source_text(), "V=(1,2] && P={1}");
        assert_eq!(rule.atom_count(), 2);
    }

    #[test]
    fn compile_surfaces_lex_errors() {
        let err = compile(&registry(), "V=(1,2] && P={1} || A={1}").unwrap_err();
        assert!(matches!(err, CompileError::Lex(_)));
    }
}
