use std::fmt;
use std::time::Instant;

use super::context::Context;
use super::error::CompileError;
use super::evaluation_report::EvaluationReport;
use super::field_registry::FieldRegistry;
use super::node::{Connector, RuleNode, RuleTree};

/// Compiles rule text against a fixed set of typed fields.
///
/// # Example
///
/// ```
/// use xexpr::{Compiler, Context, FieldRegistry};
///
/// let compiler = Compiler::new(FieldRegistry::standard());
/// let rule = compiler
///     .compile("V=(1206,1209] && P={1} && E={abtest}")
///     .unwrap();
///
/// let ctx = Context::new()
///     .set("V", 1207_i32)
///     .set("P", 1_i32)
///     .set("E", "abtest");
/// assert!(rule.evaluate(&ctx));
/// ```
#[derive(Debug, Clone)]
pub struct Compiler {
    registry: FieldRegistry,
}

impl Compiler {
    #[must_use]
    pub fn new(registry: FieldRegistry) -> Self {
        Self { registry }
    }

    /// Compile rule text into an immutable [`CompiledRule`].
    ///
    /// Use `.ok()` where any failure should simply yield no rule.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if lexing, pattern parsing, field lookup, or
    /// tree validation fails. No partial rule is ever returned.
    pub fn compile(&self, text: &str) -> Result<CompiledRule, CompileError> {
        crate::compile::compile(&self.registry, text)
    }

    #[must_use]
    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }
}

/// A compiled, immutable rule. Thread-safe and designed to live behind `Arc`.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    source: String,
    tree: Option<RuleTree>,
}

impl CompiledRule {
    pub(crate) fn new(source: &str, tree: Option<RuleTree>) -> Self {
        Self {
            source: source.to_owned(),
            tree,
        }
    }

    /// Evaluate this rule against the given context.
    ///
    /// Atoms whose field is missing from the context, or whose value has a
    /// different type than the field, do not match. An empty rule matches
    /// every context.
    #[must_use]
    pub fn evaluate(&self, ctx: &Context) -> bool {
        crate::evaluate::evaluate(self.tree.as_ref(), ctx)
    }

    /// Evaluate with a record of every atom visited.
    pub fn evaluate_detailed(&self, ctx: &Context) -> EvaluationReport {
        let start = Instant::now();
        let mut visited = Vec::new();
        let result = crate::evaluate::evaluate_traced(self.tree.as_ref(), ctx, &mut |field, outcome| {
            visited.push((field.to_owned(), outcome));
        });
        EvaluationReport::new(result, visited, start.elapsed())
    }

    /// The rule text this rule was compiled from.
    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.source
    }

    /// The compiled tree, or `None` for an empty rule.
    #[must_use]
    pub fn tree(&self) -> Option<&RuleTree> {
        self.tree.as_ref()
    }

    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.tree.as_ref().map_or(0, RuleTree::atom_count)
    }

    /// The connector joining this rule's atoms, or `None` for a single atom or
    /// an empty rule.
    #[must_use]
    pub fn connector(&self) -> Option<Connector> {
        match self.tree.as_ref()?.root() {
            RuleNode::And(..) => Some(Connector::And),
            RuleNode::Or(..) => Some(Connector::Or),
            RuleNode::Compare { .. } => None,
        }
    }
}

impl fmt::Display for CompiledRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
