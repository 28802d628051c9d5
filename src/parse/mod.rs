mod error;
mod grammar;

pub use error::ParseError;

use crate::FieldType;

/// Parse schema text into `(field name, type)` entries, in declaration order.
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not valid schema syntax.
pub fn parse_schema(input: &str) -> Result<Vec<(String, FieldType)>, ParseError> {
    use winnow::Parser;
    grammar::schema
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))
}
