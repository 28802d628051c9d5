//! Compile targeting rules such as `V=(1206,1209] && E={abtest}` into an
//! immutable tree and evaluate them against typed contexts.
//!
//! A rule is a flat chain of `field=pattern` atoms joined by one connector
//! kind, `&&` or `||`. Patterns are intervals (`(lo,hi]`, `[lo,hi)`, ...)
//! or sets (`{a,b,c}`) over the type the [`FieldRegistry`] declares for the
//! field. A [`CompiledRule`] never changes after compilation and can be
//! evaluated from many threads at once.

mod compile;
mod error;
mod evaluate;
mod lex;
mod parse;
mod types;

pub use error::XexprError;
pub use parse::ParseError;
pub use types::{
    AtomOutcome, Checker, CompileError, CompiledRule, Compiler, Connector, Context, Endpoint,
    EvaluationReport, FieldRegistry, FieldType, LexError, Pattern, PatternError, PatternValue,
    NodeId, RuleNode, RuleTree, SchemaError, UnknownFieldType, Value, FLOAT_EPSILON,
};
