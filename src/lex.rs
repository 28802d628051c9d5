//! Splits rule text into atoms and connectors.
//!
//! Whitespace is dropped everywhere except between the two characters of a
//! connector, where it is an error. A rule may use `&&` or `||` but not both.

use crate::types::{Connector, LexError};

/// A lexed unit of rule text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// A `field=pattern` comparison with all whitespace removed.
    Atom(String),
    Connector(Connector),
}

/// Lex `text` into tokens in source order.
///
/// The returned vector is used as a stack: its last element is the last token
/// of the rule.
///
/// # Errors
///
/// Returns [`LexError`] on misplaced, incomplete, or mixed connectors.
pub(crate) fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut atom = String::new();
    // First character of a connector whose second character is still expected.
    let mut pending: Option<(Connector, usize)> = None;
    let mut rule_connector: Option<Connector> = None;

    for (position, ch) in text.char_indices() {
        if let Some((connector, start)) = pending.take() {
            if ch == connector.symbol() {
                match rule_connector {
                    Some(seen) if seen != connector => {
                        return Err(LexError::MixedConnectors {
                            found: connector,
                            position: start,
                        });
                    }
                    _ => rule_connector = Some(connector),
                }
                tokens.push(Token::Connector(connector));
                continue;
            }
            return Err(if ch.is_whitespace() {
                LexError::SpaceAfterConnector { position }
            } else if let Some(other) = Connector::from_symbol(ch) {
                LexError::MixedConnectors {
                    found: other,
                    position,
                }
            } else {
                LexError::DanglingConnector {
                    ch: connector.symbol(),
                    position: start,
                }
            });
        }

        if ch.is_whitespace() {
            continue;
        }

        if let Some(connector) = Connector::from_symbol(ch) {
            if atom.is_empty() {
                return Err(LexError::EmptyAtom { position });
            }
            tokens.push(Token::Atom(std::mem::take(&mut atom)));
            pending = Some((connector, position));
        } else {
            atom.push(ch);
        }
    }

    if let Some((connector, start)) = pending {
        return Err(LexError::DanglingConnector {
            ch: connector.symbol(),
            position: start,
        });
    }
    if !atom.is_empty() {
        tokens.push(Token::Atom(atom));
    }
    Ok(tokens)
}
