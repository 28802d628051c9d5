use thiserror::Error;

use super::Connector;

/// Errors produced while splitting rule text into atoms and connectors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("whitespace inside connector at position {position}")]
    SpaceAfterConnector { position: usize },

    #[error("'{found}' at position {position} mixes connectors; a rule uses only one of && and ||")]
    MixedConnectors { found: Connector, position: usize },

    #[error("incomplete connector '{ch}' at position {position}")]
    DanglingConnector { ch: char, position: usize },

    #[error("connector at position {position} has no atom before it")]
    EmptyAtom { position: usize },
}

/// Errors produced while parsing a bracket pattern such as `(1,2]` or `{a,b}`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern must start with '(', '[' or '{{', found '{found}'")]
    MissingOpenBracket { found: char },

    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("value '{value}' has more than one decimal point")]
    ExtraDecimalPoint { value: String },

    #[error("empty value")]
    EmptyValue,

    #[error("value '{value}' is out of range or malformed")]
    InvalidValue { value: String },

    #[error("pattern is not terminated by ')', ']' or '}}'")]
    Unterminated,

    #[error("'{open}' cannot be closed by '{close}'")]
    BracketMismatch { open: char, close: char },

    #[error("interval needs exactly 2 values, found {count}")]
    IntervalArity { count: usize },
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("malformed atom '{atom}'; expected field=pattern")]
    MalformedAtom { atom: String },

    #[error("unknown field '{field}' in atom '{atom}'")]
    UnknownField { field: String, atom: String },

    #[error("invalid pattern for field '{field}': {source}")]
    Pattern {
        field: String,
        #[source]
        source: PatternError,
    },

    #[error("connector '{connector}' is missing an operand")]
    MissingOperand { connector: Connector },

    #[error("atom '{atom}' follows another atom without a connector")]
    AdjacentAtoms { atom: String },

    #[error("atom '{atom}' cannot have operands")]
    DanglingChild { atom: String },
}
