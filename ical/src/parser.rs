// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser over the token stream.
//!
//! Every component parser owns a loop of [`TokenCursor::step`] calls and
//! returns its entity once the matching `END` arrives, so the call stack is
//! the stack of open components.

use std::num::NonZeroUsize;
use std::thread;

use crossbeam_channel::bounded;

use crate::config::ParseOptions;
use crate::error::{ParseError, ValueError};
use crate::keyword::{KW_VCALENDAR, KW_X_PREFIX};
use crate::parameter::{Parameters, decode_parameters};
use crate::semantic::{Calendar, XProperties};
use crate::syntax::{Position, Span, Token, TokenKind, Tokenizer};
use crate::value::{DateTimeValue, decode_date_time, decode_date_time_list};

/// Reader over a token sequence with one token of pushback.
///
/// Once the sequence is exhausted every read yields a synthesized
/// [`TokenKind::EndOfInput`] token located at the last token seen.
#[derive(Debug)]
pub struct TokenCursor<I> {
    tokens: I,
    pushed_back: Option<Token>,
    last: (Span, Position),
}

impl<I: Iterator<Item = Token>> TokenCursor<I> {
    /// Create a cursor over `tokens`
    pub fn new(tokens: I) -> Self {
        Self {
            tokens,
            pushed_back: None,
            last: (Span::default(), Position::default()),
        }
    }

    /// Take the next token
    pub fn read(&mut self) -> Token {
        if let Some(token) = self.pushed_back.take() {
            return token;
        }

        match self.tokens.next() {
            Some(token) => {
                tracing::trace!(token = %token.kind, position = %token.position, "read token");
                self.last = (token.span, token.position);
                token
            }
            None => {
                let (span, position) = self.last;
                Token {
                    kind: TokenKind::EndOfInput,
                    span: Span::new(span.end, span.end),
                    position,
                }
            }
        }
    }

    /// Push `token` back so that the next [`read`](Self::read) returns it.
    ///
    /// Only one token may be pending at a time.
    pub fn unread(&mut self, token: Token) {
        debug_assert!(
            self.pushed_back.is_none(),
            "only one token of pushback is supported"
        );
        self.pushed_back = Some(token);
    }

    /// Advance one construct inside the component `component`
    pub(crate) fn step(&mut self, component: &str) -> Result<Step, ParseError> {
        let token = self.read();
        let position = token.position;
        match token.kind {
            TokenKind::PropertyName(name) => self.read_property(name, position).map(Step::Property),
            TokenKind::Begin(name) => Ok(Step::Child { name, position }),
            TokenKind::End(name) if name == component => Ok(Step::Closed),
            TokenKind::End(name) => Err(ParseError::Structural {
                position,
                message: format!("expected END:{component}, found END:{name}"),
            }),
            TokenKind::Error(message) => Err(ParseError::Syntax { position, message }),
            TokenKind::EndOfInput => Err(ParseError::Syntax {
                position,
                message: format!("unexpected end of input, expected END:{component}"),
            }),
            kind @ (TokenKind::ParameterBlock(_) | TokenKind::Value(_)) => Err(ParseError::Syntax {
                position,
                message: format!("unexpected {kind} in {component}"),
            }),
        }
    }

    /// Read the optional parameter block and the value following a
    /// property name
    fn read_property(
        &mut self,
        name: String,
        position: Position,
    ) -> Result<RawProperty, ParseError> {
        let token = self.read();
        let parameters = match token.kind {
            TokenKind::ParameterBlock(block) => {
                decode_parameters(&block).map_err(|source| ParseError::Value {
                    position: token.position,
                    property: name.clone(),
                    source,
                })?
            }
            kind => {
                self.unread(Token { kind, ..token });
                Parameters::default()
            }
        };

        let token = self.read();
        match token.kind {
            TokenKind::Value(value) => Ok(RawProperty {
                name,
                parameters,
                value,
                position,
                value_position: token.position,
            }),
            TokenKind::Error(message) => Err(ParseError::Syntax {
                position: token.position,
                message,
            }),
            kind => Err(ParseError::Syntax {
                position: token.position,
                message: format!("expected value of property {name}, found {kind}"),
            }),
        }
    }
}

/// Outcome of one [`TokenCursor::step`]
#[derive(Debug)]
pub(crate) enum Step {
    Property(RawProperty),
    Child { name: String, position: Position },
    Closed,
}

/// A property whose value has not been decoded yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawProperty {
    pub name: String,
    pub parameters: Parameters,
    pub value: String,
    pub position: Position,
    pub value_position: Position,
}

impl RawProperty {
    /// Decode the value, attributing failures to this property
    pub fn decode<T>(
        &self,
        f: impl FnOnce(&str) -> Result<T, ValueError>,
    ) -> Result<T, ParseError> {
        f(&self.value).map_err(|source| self.value_error(source))
    }

    /// Decode the value as a date-time, honouring the `TZID` parameter
    pub fn date_time(&self) -> Result<DateTimeValue, ParseError> {
        decode_date_time(&self.value, &self.parameters).map_err(|source| self.value_error(source))
    }

    /// Decode the value as a comma separated date-time list
    pub fn date_time_list(&self) -> Result<Vec<DateTimeValue>, ParseError> {
        decode_date_time_list(&self.value, &self.parameters)
            .map_err(|source| self.value_error(source))
    }

    /// Store an `X-` property under its suffix, anything else is unknown to
    /// `component`.
    ///
    /// ## Errors
    /// If the name is not an extension name.
    pub fn store_extension(
        self,
        component: &str,
        x_properties: &mut XProperties,
    ) -> Result<(), ParseError> {
        let is_extension = self
            .name
            .get(..KW_X_PREFIX.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(KW_X_PREFIX));
        match self.name.get(KW_X_PREFIX.len()..) {
            Some(suffix) if is_extension => {
                tracing::debug!(component, name = suffix, "stored extension property");
                x_properties.insert(suffix.to_string(), self.value);
                Ok(())
            }
            _ => Err(ParseError::Syntax {
                position: self.position,
                message: format!("unknown property {} in {component}", self.name),
            }),
        }
    }

    fn value_error(&self, source: ValueError) -> ParseError {
        ParseError::Value {
            position: self.value_position,
            property: self.name.clone(),
            source,
        }
    }
}

/// Error for a `BEGIN` the component `parent` cannot contain
pub(crate) fn unsupported_child(parent: &str, name: &str, position: Position) -> ParseError {
    ParseError::Structural {
        position,
        message: format!("BEGIN:{name} is not supported inside {parent}"),
    }
}

/// Parse a calendar from an arbitrary token sequence.
///
/// The sequence must start with `BEGIN:VCALENDAR`; tokens after the matching
/// `END:VCALENDAR` are never read.
///
/// ## Errors
/// The first syntax, value or structural error found.
pub fn parse_tokens<T>(tokens: T) -> Result<Calendar, ParseError>
where
    T: IntoIterator<Item = Token>,
{
    let mut cursor = TokenCursor::new(tokens.into_iter());
    let token = cursor.read();
    let position = token.position;
    match token.kind {
        TokenKind::Begin(name) if name == KW_VCALENDAR => Calendar::parse(&mut cursor),
        TokenKind::Error(message) => Err(ParseError::Syntax { position, message }),
        kind => Err(ParseError::Syntax {
            position,
            message: format!("expected BEGIN:{KW_VCALENDAR}, found {kind}"),
        }),
    }
}

/// Tokenize and parse `src` as configured by `options`
pub(crate) fn parse_source(src: &str, options: &ParseOptions) -> Result<Calendar, ParseError> {
    match options.token_queue_capacity {
        None => parse_tokens(Tokenizer::new(src)),
        Some(capacity) => parse_tokens_threaded(Tokenizer::new(src), capacity),
    }
}

/// Parse a calendar while a scoped producer thread drains `tokens` into a
/// bounded queue of `capacity` tokens.
///
/// The receiver is dropped as soon as the parser returns, which makes the
/// producer's next send fail and ends the thread, so an early error leaves
/// the rest of the sequence unread.
///
/// ## Errors
/// The first syntax, value or structural error found.
pub fn parse_tokens_threaded<T>(tokens: T, capacity: NonZeroUsize) -> Result<Calendar, ParseError>
where
    T: IntoIterator<Item = Token>,
    T::IntoIter: Send,
{
    let tokens = tokens.into_iter();
    let (sender, receiver) = bounded(capacity.get());
    thread::scope(|scope| {
        scope.spawn(move || {
            for token in tokens {
                if sender.send(token).is_err() {
                    tracing::debug!("parser finished early, stopping tokenizer");
                    break;
                }
            }
        });
        parse_tokens(receiver)
    })
}
