use std::fmt;

use super::error::PatternError;

/// Floating-point set members closer than this compare equal.
pub const FLOAT_EPSILON: f64 = 1e-6;

/// A type that can appear as a candidate value inside a bracket pattern.
///
/// Each implementation supplies the character class its values are written in,
/// the checked conversion from the accumulated text, and the equality used by
/// set membership.
pub trait PatternValue: Sized + PartialOrd + fmt::Display {
    /// Whether `ch` may appear inside a value of this type.
    fn accepts(ch: char) -> bool;

    /// Whether at most one `.` is allowed per value.
    const SINGLE_DECIMAL_POINT: bool = false;

    /// Convert the accumulated text into a value, rejecting out-of-range or
    /// malformed input.
    fn convert(text: &str) -> Option<Self>;

    /// Equality used for set membership.
    fn same_as(&self, other: &Self) -> bool {
        self == other
    }
}

macro_rules! impl_integer {
    ($($ty:ty),*) => {
        $(
            impl PatternValue for $ty {
                fn accepts(ch: char) -> bool {
                    ch.is_ascii_digit()
                }

                fn convert(text: &str) -> Option<Self> {
                    text.parse().ok()
                }
            }
        )*
    };
}

impl_integer!(i32, u32);

impl PatternValue for f32 {
    const SINGLE_DECIMAL_POINT: bool = true;

    fn accepts(ch: char) -> bool {
        ch.is_ascii_digit() || ch == '.'
    }

    fn convert(text: &str) -> Option<Self> {
        text.parse::<f32>().ok().filter(|v| v.is_finite())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn same_as(&self, other: &Self) -> bool {
        (self - other).abs() < FLOAT_EPSILON as f32
    }
}

impl PatternValue for f64 {
    const SINGLE_DECIMAL_POINT: bool = true;

    fn accepts(ch: char) -> bool {
        ch.is_ascii_digit() || ch == '.'
    }

    fn convert(text: &str) -> Option<Self> {
        text.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    fn same_as(&self, other: &Self) -> bool {
        (self - other).abs() < FLOAT_EPSILON
    }
}

impl PatternValue for String {
    fn accepts(ch: char) -> bool {
        !ch.is_control() && !matches!(ch, ',' | '(' | ')' | '[' | ']' | '{' | '}')
    }

    fn convert(text: &str) -> Option<Self> {
        Some(text.to_owned())
    }
}

/// A parsed bracket pattern over values of one type.
///
/// `(`/`[` open an interval with an exclusive/inclusive lower bound and
/// `)`/`]` close it with an exclusive/inclusive upper bound. `{...}` lists an
/// exact-match set.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern<T> {
    Interval { lower: Endpoint<T>, upper: Endpoint<T> },
    Set(Vec<T>),
}

/// One end of an interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Endpoint<T> {
    /// Written `(` or `)`: the value itself is excluded.
    Open(T),
    /// Written `[` or `]`: the value itself is included.
    Closed(T),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Start,
    InValue,
    End,
}

impl<T: PatternValue> Pattern<T> {
    /// Parse a pattern such as `(1206,1209]` or `{abtest,control}`.
    ///
    /// Whitespace is ignored anywhere in the pattern. Characters after the
    /// closing bracket are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the brackets, arity, or any value is malformed.
    pub fn parse(text: &str) -> Result<Self, PatternError> {
        let mut state = ScanState::Start;
        let mut open = '\0';
        let mut close = '\0';
        let mut current = String::new();
        let mut dots = 0_usize;
        let mut values = Vec::new();

        for (pos, ch) in text.char_indices() {
            if ch.is_whitespace() {
                continue;
            }
            match state {
                ScanState::Start => {
                    if !matches!(ch, '(' | '[' | '{') {
                        return Err(PatternError::MissingOpenBracket { found: ch });
                    }
                    open = ch;
                    state = ScanState::InValue;
                }
                ScanState::InValue => {
                    let finished = if T::accepts(ch) {
                        if T::SINGLE_DECIMAL_POINT && ch == '.' {
                            dots += 1;
                            if dots > 1 {
                                return Err(PatternError::ExtraDecimalPoint {
                                    value: current.clone(),
                                });
                            }
                        }
                        current.push(ch);
                        false
                    } else if ch == ',' {
                        true
                    } else if matches!(ch, ')' | ']' | '}') {
                        close = ch;
                        state = ScanState::End;
                        true
                    } else {
                        return Err(PatternError::UnexpectedChar { ch, position: pos });
                    };

                    if finished {
                        values.push(Self::convert_value(&current)?);
                        current.clear();
                        dots = 0;
                    }
                }
                ScanState::End => {}
            }
        }

        if state != ScanState::End {
            return Err(PatternError::Unterminated);
        }
        Self::from_parts(open, close, values)
    }

    fn convert_value(text: &str) -> Result<T, PatternError> {
        if text.is_empty() {
            return Err(PatternError::EmptyValue);
        }
        T::convert(text).ok_or_else(|| PatternError::InvalidValue {
            value: text.to_owned(),
        })
    }

    fn from_parts(open: char, close: char, values: Vec<T>) -> Result<Self, PatternError> {
        match (open, close) {
            ('(' | '[', ')' | ']') => {
                let count = values.len();
                let mut values = values.into_iter();
                match (values.next(), values.next(), values.next()) {
                    (Some(lo), Some(hi), None) => Ok(Pattern::Interval {
                        lower: if open == '(' {
                            Endpoint::Open(lo)
                        } else {
                            Endpoint::Closed(lo)
                        },
                        upper: if close == ')' {
                            Endpoint::Open(hi)
                        } else {
                            Endpoint::Closed(hi)
                        },
                    }),
                    _ => Err(PatternError::IntervalArity { count }),
                }
            }
            ('{', '}') => Ok(Pattern::Set(values)),
            _ => Err(PatternError::BracketMismatch { open, close }),
        }
    }

    /// Whether `value` lies inside the interval or equals a set member.
    #[must_use]
    pub fn is_valid(&self, value: &T) -> bool {
        match self {
            Pattern::Interval { lower, upper } => {
                let above = match lower {
                    Endpoint::Closed(lo) => lo <= value,
                    Endpoint::Open(lo) => lo < value,
                };
                let below = match upper {
                    Endpoint::Closed(hi) => value <= hi,
                    Endpoint::Open(hi) => value < hi,
                };
                above && below
            }
            Pattern::Set(members) => members.iter().any(|m| m.same_as(value)),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Pattern<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Interval { lower, upper } => {
                match lower {
                    Endpoint::Closed(lo) => write!(f, "[{lo},")?,
                    Endpoint::Open(lo) => write!(f, "({lo},")?,
                }
                match upper {
                    Endpoint::Closed(hi) => write!(f, "{hi}]"),
                    Endpoint::Open(hi) => write!(f, "{hi})"),
                }
            }
            Pattern::Set(members) => {
                write!(f, "{{")?;
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{m}")?;
                }
                write!(f, "}}")
            }
        }
    }
}
