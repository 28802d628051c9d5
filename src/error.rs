use thiserror::Error;

use crate::parse::ParseError;
use crate::{CompileError, SchemaError};

/// Unified error type covering compilation, schema loading, and I/O.
///
/// Returned by convenience methods like
/// [`FieldRegistry::from_schema()`](crate::FieldRegistry::from_schema) and
/// [`FieldRegistry::from_file()`](crate::FieldRegistry::from_file).
#[derive(Debug, Error)]
pub enum XexprError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
