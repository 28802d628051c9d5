mod checker;
mod context;
mod error;
mod evaluation_report;
mod field_registry;
mod node;
mod pattern;
mod rule;
mod value;

pub use checker::{Checker, FieldType, UnknownFieldType};
pub use context::Context;
pub use error::{CompileError, LexError, PatternError};
pub use evaluation_report::{AtomOutcome, EvaluationReport};
pub use field_registry::{FieldRegistry, SchemaError};
pub use node::{Connector, NodeId, RuleNode, RuleTree};
pub use pattern::{Endpoint, Pattern, PatternValue, FLOAT_EPSILON};
pub use rule::{CompiledRule, Compiler};
pub use value::Value;
