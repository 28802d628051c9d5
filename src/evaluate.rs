use tracing::trace;

use crate::types::{AtomOutcome, Checker, Context, NodeId, RuleNode, RuleTree};

/// Evaluate a compiled tree. An absent tree matches everything.
pub(crate) fn evaluate(tree: Option<&RuleTree>, ctx: &Context) -> bool {
    tree.map_or(true, |t| eval_tree(t, ctx, &mut |_, _| {}))
}

/// Evaluate while reporting every visited atom, in visiting order.
pub(crate) fn evaluate_traced(
    tree: Option<&RuleTree>,
    ctx: &Context,
    observe: &mut impl FnMut(&str, AtomOutcome),
) -> bool {
    tree.map_or(true, |t| eval_tree(t, ctx, observe))
}

/// The half of a logical node still to run once the other half is known.
enum Then {
    /// AND: run the right child if the left matched.
    IfMatched(NodeId),
    /// OR: run the left child if the right did not match.
    IfRejected(NodeId),
}

/// Walks the tree with an explicit stack so that depth never reaches the
/// call stack.
fn eval_tree(tree: &RuleTree, ctx: &Context, observe: &mut impl FnMut(&str, AtomOutcome)) -> bool {
    let mut pending: Vec<Then> = Vec::new();
    let mut next = tree.root_id();

    'descend: loop {
        let result = loop {
            match tree.at(next) {
                RuleNode::Compare { field, checker } => {
                    let outcome = atom_outcome(field, checker, ctx);
                    observe(field, outcome);
                    break outcome.is_match();
                }
                RuleNode::And(left, right) => {
                    pending.push(Then::IfMatched(*right));
                    next = *left;
                }
                // The later atom is tried first.
                RuleNode::Or(left, right) => {
                    pending.push(Then::IfRejected(*left));
                    next = *right;
                }
            }
        };

        while let Some(then) = pending.pop() {
            match then {
                Then::IfMatched(right) if result => {
                    next = right;
                    continue 'descend;
                }
                Then::IfRejected(left) if !result => {
                    next = left;
                    continue 'descend;
                }
                Then::IfMatched(_) | Then::IfRejected(_) => {}
            }
        }
        return result;
    }
}

fn atom_outcome(field: &str, checker: &Checker, ctx: &Context) -> AtomOutcome {
    let Some(value) = ctx.get(field) else {
        return AtomOutcome::Missing;
    };
    match checker.check(value) {
        Some(true) => AtomOutcome::Matched,
        Some(false) => AtomOutcome::Rejected,
        None => {
            trace!(
                field,
                value_type = value.type_name(),
                field_type = %checker.field_type(),
                "context value type is not dispatched to this field"
            );
            AtomOutcome::TypeMismatch
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CompiledRule, Compiler, FieldRegistry};

    fn rule(text: &str) -> CompiledRule {
        Compiler::new(FieldRegistry::standard()).compile(text).unwrap()
    }

    fn visited(rule: &CompiledRule, ctx: &Context) -> Vec<String> {
        let mut fields = Vec::new();
        evaluate_traced(rule.tree(), ctx, &mut |field, _| fields.push(field.to_owned()));
        fields
    }

    #[test]
    fn absent_tree_matches() {
        assert!(evaluate(None, &Context::new()));
    }

    #[test]
    fn leaf_match_and_reject() {
        let r = rule("V=(1206,1209]");
        assert!(r.evaluate(&Context::new().set("V", 1209_i32)));
        assert!(!r.evaluate(&Context::new().set("V", 1206_i32)));
    }

    #[test]
    fn missing_field_is_false() {
        let r = rule("V=(1206,1209]");
        assert!(!r.evaluate(&Context::new().set("P", 1_i32)));
    }

    #[test]
    fn wrong_tag_is_false() {
        let r = rule("V=(1206,1209]");
        assert!(!r.evaluate(&Context::new().set("V", 1207_u32)));
        assert!(!r.evaluate(&Context::new().set("V", 1207_i64)));
        assert!(!r.evaluate(&Context::new().set("V", "1207")));
    }

    #[test]
    fn and_short_circuits_on_left() {
        let r = rule("V={1} && P={1} && A={1}");
        let ctx = Context::new().set("V", 0_i32).set("P", 1_i32).set("A", 1_i32);
        assert_eq!(visited(&r, &ctx), vec!["V"]);
        assert!(!r.evaluate(&ctx));
    }

    #[test]
    fn and_visits_left_to_right() {
        let r = rule("V={1} && P={1} && A={1}");
        let ctx = Context::new().set("V", 1_i32).set("P", 1_i32).set("A", 1_i32);
        assert_eq!(visited(&r, &ctx), vec!["V", "P", "A"]);
        assert!(r.evaluate(&ctx));
    }

    #[test]
    fn or_tries_right_first() {
        let r = rule("V={1} || P={1} || A={1}");
        let ctx = Context::new().set("V", 1_i32).set("P", 1_i32).set("A", 1_i32);
        assert_eq!(visited(&r, &ctx), vec!["A"]);
        assert!(r.evaluate(&ctx));
    }

    #[test]
    fn mixed_nesting_short_circuits_per_node() {
        use crate::{FieldType, NodeId};

        // (V || P) && A, built by hand since rules never nest this way.
        let mut tree = RuleTree::new();
        let leaf = |field: &str| RuleNode::Compare {
            field: field.to_owned(),
            checker: FieldType::Int32.checker("{1}").unwrap(),
        };
        let v = tree.push(leaf("V"));
        let p = tree.push(leaf("P"));
        let or: NodeId = tree.push(RuleNode::Or(v, p));
        let a = tree.push(leaf("A"));
        tree.push(RuleNode::And(or, a));

        let mut seen = Vec::new();
        let ctx = Context::new().set("V", 1_i32).set("A", 1_i32);
        assert!(evaluate_traced(Some(&tree), &ctx, &mut |f, _| seen.push(f.to_owned())));
        assert_eq!(seen, vec!["P", "V", "A"]);

        let ctx = Context::new().set("A", 1_i32);
        assert!(!evaluate(Some(&tree), &ctx));
    }

    #[test]
    fn or_falls_back_leftwards() {
        let r = rule("V={1} || P={1} || A={1}");
        let ctx = Context::new().set("V", 1_i32);
        assert_eq!(visited(&r, &ctx), vec!["A", "P", "V"]);
        assert!(r.evaluate(&ctx));
        assert!(!r.evaluate(&Context::new()));
    }
}
