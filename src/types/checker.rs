use std::fmt;
use std::str::FromStr;

use super::error::PatternError;
use super::pattern::Pattern;
use super::value::Value;

/// Declared type of a registered field.
///
/// Only these five types are dispatched at evaluation time. Context values of
/// any other tag (`Int64`, `UInt64`, `Bool`, `Char`) never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FieldType {
    Int32,
    UInt32,
    Float,
    Double,
    String,
}

impl FieldType {
    pub const ALL: [FieldType; 5] = [
        FieldType::Int32,
        FieldType::UInt32,
        FieldType::Float,
        FieldType::Double,
        FieldType::String,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            FieldType::Int32 => "int32",
            FieldType::UInt32 => "uint32",
            FieldType::Float => "float",
            FieldType::Double => "double",
            FieldType::String => "string",
        }
    }

    /// Instantiate a fresh checker of this type from pattern text.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the pattern does not parse for this type.
    pub fn checker(self, pattern: &str) -> Result<Checker, PatternError> {
        Ok(match self {
            FieldType::Int32 => Checker::Int32(Pattern::parse(pattern)?),
            FieldType::UInt32 => Checker::UInt32(Pattern::parse(pattern)?),
            FieldType::Float => Checker::Float(Pattern::parse(pattern)?),
            FieldType::Double => Checker::Double(Pattern::parse(pattern)?),
            FieldType::String => Checker::String(Pattern::parse(pattern)?),
        })
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a type name is not one of the registrable field types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field type '{0}'")]
pub struct UnknownFieldType(pub String);

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|ty| ty.name() == s)
            .ok_or_else(|| UnknownFieldType(s.to_owned()))
    }
}

/// A typed pattern bound to one field.
///
/// A checker only answers for context values carrying the same tag as its
/// declared type; any other value does not match.
#[derive(Debug, Clone, PartialEq)]
pub enum Checker {
    Int32(Pattern<i32>),
    UInt32(Pattern<u32>),
    Float(Pattern<f32>),
    Double(Pattern<f64>),
    String(Pattern<String>),
}

impl Checker {
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        match self {
            Checker::Int32(_) => FieldType::Int32,
            Checker::UInt32(_) => FieldType::UInt32,
            Checker::Float(_) => FieldType::Float,
            Checker::Double(_) => FieldType::Double,
            Checker::String(_) => FieldType::String,
        }
    }

    /// Membership test. `None` when the value's tag differs from the checker's type.
    #[must_use]
    pub fn check(&self, value: &Value) -> Option<bool> {
        match (self, value) {
            (Checker::Int32(p), Value::Int32(v)) => Some(p.is_valid(v)),
            (Checker::UInt32(p), Value::UInt32(v)) => Some(p.is_valid(v)),
            (Checker::Float(p), Value::Float(v)) => Some(p.is_valid(v)),
            (Checker::Double(p), Value::Double(v)) => Some(p.is_valid(v)),
            (Checker::String(p), Value::String(v)) => Some(p.is_valid(v)),
            _ => None,
        }
    }

}

impl fmt::Display for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Checker::Int32(p) => write!(f, "{p}"),
            Checker::UInt32(p) => write!(f, "{p}"),
            Checker::Float(p) => write!(f, "{p}"),
            Checker::Double(p) => write!(f, "{p}"),
            Checker::String(p) => write!(f, "{p}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_names_round_trip() {
        for ty in FieldType::ALL {
            assert_eq!(ty.name().parse::<FieldType>(), Ok(ty));
        }
    }

    #[test]
    fn unknown_field_type() {
        assert_eq!(
            "int16".parse::<FieldType>(),
            Err(UnknownFieldType("int16".into()))
        );
    }

    #[test]
    fn factory_builds_matching_variant() {
        let checker = FieldType::Int32.checker("(1206,1209]").unwrap();
        assert_eq!(checker.field_type(), FieldType::Int32);
        let checker = FieldType::String.checker("{abtest}").unwrap();
        assert_eq!(checker.field_type(), FieldType::String);
    }

    #[test]
    fn factory_propagates_pattern_errors() {
        assert!(matches!(
            FieldType::UInt32.checker("[1,2"),
            Err(PatternError::Unterminated)
        ));
    }

    #[test]
    fn same_tag_dispatches() {
        let checker = FieldType::Int32.checker("(1206,1209]").unwrap();
        assert_eq!(checker.check(&Value::Int32(1207)), Some(true));
        assert_eq!(checker.check(&Value::Int32(1206)), Some(false));
    }

    #[test]
    fn mismatched_tag_is_not_coerced() {
        let checker = FieldType::Int32.checker("{1}").unwrap();
        assert_eq!(checker.check(&Value::UInt32(1)), None);
        assert_eq!(checker.check(&Value::Int64(1)), None);
        assert_eq!(checker.check(&Value::Double(1.0)), None);
        assert_eq!(checker.check(&Value::String("1".into())), None);
    }

    #[test]
    fn bool_and_char_never_match() {
        let checker = FieldType::String.checker("{a}").unwrap();
        assert_eq!(checker.check(&Value::Char('a')), None);
        let checker = FieldType::Int32.checker("{1}").unwrap();
        assert_eq!(checker.check(&Value::Bool(true)), None);
    }

    #[test]
    fn sixty_four_bit_values_are_not_dispatched() {
        for ty in FieldType::ALL {
            let pattern = if ty == FieldType::String { "{5}" } else { "[0,9]" };
            let checker = ty.checker(pattern).unwrap();
            assert_eq!(checker.check(&Value::Int64(5)), None, "{ty}");
            assert_eq!(checker.check(&Value::UInt64(5)), None, "{ty}");
        }
    }

    #[test]
    fn sixty_four_bit_types_cannot_be_declared() {
        assert!("int64".parse::<FieldType>().is_err());
        assert!("uint64".parse::<FieldType>().is_err());
    }

    #[test]
    fn float_and_double_are_distinct() {
        let checker = FieldType::Float.checker("[0.5,1.5]").unwrap();
        assert_eq!(checker.check(&Value::Float(1.0)), Some(true));
        assert_eq!(checker.check(&Value::Double(1.0)), None);
    }

    #[test]
    fn display_shows_pattern() {
        let checker = FieldType::Double.checker("[ 0.5 , 1.5 )").unwrap();
        assert_eq!(checker.to_string(), "[0.5,1.5)");
    }
}
