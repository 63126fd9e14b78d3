// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Tokenizer for iCalendar streams.
//!
//! The tokenizer turns the lexemes of each logical content line into
//! structural tokens:
//!
//! ```text
//! contentline = name *(";" param) ":" value CRLF
//!
//! BEGIN:NAME     -> Begin(NAME)
//! END:NAME       -> End(NAME)
//! NAME;P=V:VALUE -> PropertyName(NAME) ParameterBlock(P=V) Value(VALUE)
//! ```
//!
//! It tracks the open components on a context stack: production starts with
//! `BEGIN:VCALENDAR` and stops once the matching `END` closes it. Any lexical
//! violation yields a single [`TokenKind::Error`] token, after which the
//! iterator is exhausted. Values are not interpreted here.

use std::collections::VecDeque;
use std::fmt::{self, Display};
use std::iter::{FusedIterator, Peekable};

use crate::keyword::{
    KW_BEGIN, KW_DAYLIGHT, KW_END, KW_STANDARD, KW_VALARM, KW_VCALENDAR, KW_VEVENT, KW_VTIMEZONE,
};
use crate::syntax::lexer::{Lexeme, Lexemes, SpannedLexeme, lex};
use crate::syntax::position::{LineIndex, Position, Span};

/// A structural token of an iCalendar stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What the token is, with its payload
    pub kind: TokenKind,
    /// Byte range in the source text
    pub span: Span,
    /// Line and column of the token start
    pub position: Position,
}

/// Token kinds produced by the [`Tokenizer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `BEGIN:<NAME>`, carrying the uppercased component name
    Begin(String),
    /// `END:<NAME>`, carrying the uppercased component name
    End(String),
    /// Property name as written in the source
    PropertyName(String),
    /// Raw text between the `;` after a property name and the first unquoted `:`
    ParameterBlock(String),
    /// Raw, still encoded, property value
    Value(String),
    /// Lexical error, always the last token of a stream
    Error(String),
    /// Exhausted token stream.
    ///
    /// Never produced by the [`Tokenizer`], consumers synthesize it when the
    /// sequence ends.
    EndOfInput,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Begin(name) => write!(f, "{KW_BEGIN}:{name}"),
            Self::End(name) => write!(f, "{KW_END}:{name}"),
            Self::PropertyName(name) => write!(f, "property {name}"),
            Self::ParameterBlock(_) => write!(f, "parameter block"),
            Self::Value(_) => write!(f, "property value"),
            Self::Error(message) => write!(f, "error: {message}"),
            Self::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Grammar context of an open component
#[derive(Debug, Clone, PartialEq, Eq)]
enum Context {
    Calendar,
    Event,
    Alarm,
    TimeZone,
    Observance(&'static str),
    /// A component the grammar does not know, rejected by the parser
    Opaque(String),
}

impl Context {
    fn child(&self, name: &str) -> Self {
        match (self, name) {
            (Self::Calendar, KW_VEVENT) => Self::Event,
            (Self::Calendar, KW_VTIMEZONE) => Self::TimeZone,
            (Self::Event, KW_VALARM) => Self::Alarm,
            (Self::TimeZone, KW_STANDARD) => Self::Observance(KW_STANDARD),
            (Self::TimeZone, KW_DAYLIGHT) => Self::Observance(KW_DAYLIGHT),
            _ => Self::Opaque(name.to_owned()),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Calendar => KW_VCALENDAR,
            Self::Event => KW_VEVENT,
            Self::Alarm => KW_VALARM,
            Self::TimeZone => KW_VTIMEZONE,
            Self::Observance(name) => *name,
            Self::Opaque(name) => name.as_str(),
        }
    }
}

#[derive(Debug)]
struct LineError {
    message: String,
    span: Span,
}

impl LineError {
    fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// Pull-based tokenizer over iCalendar source text.
///
/// Tokens are produced lazily, one logical line at a time.
pub struct Tokenizer<'src> {
    src: &'src str,
    lexemes: Peekable<Lexemes<'src>>,
    index: LineIndex,
    contexts: Vec<Context>,
    pending: VecDeque<Token>,
    done: bool,
}

impl fmt::Debug for Tokenizer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("contexts", &self.contexts)
            .field("pending", &self.pending)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl<'src> Tokenizer<'src> {
    /// Create a tokenizer over `src`
    #[must_use]
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            lexemes: lex(src).peekable(),
            index: LineIndex::new(src),
            contexts: Vec::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }

    fn emit(&mut self, kind: TokenKind, span: Span) {
        let position = self.index.position(self.src, span.start);
        self.pending.push_back(Token {
            kind,
            span,
            position,
        });
    }

    fn eof_span(&self) -> Span {
        Span::new(self.src.len(), self.src.len())
    }

    fn scan_line(&mut self) -> Result<(), LineError> {
        while let Some(SpannedLexeme(Lexeme::Newline, _)) = self.lexemes.peek() {
            self.lexemes.next();
        }

        if self.lexemes.peek().is_none() {
            let message = match self.contexts.last() {
                Some(context) => format!("unexpected end of input inside {}", context.name()),
                None => format!("expected {KW_BEGIN}:{KW_VCALENDAR}, found end of input"),
            };
            return Err(LineError::new(message, self.eof_span()));
        }

        let (name, name_span) = self.scan_name()?;
        let (parameters, value_start) = match self.lexemes.next() {
            Some(SpannedLexeme(Lexeme::Colon, colon)) => (None, colon.end),
            Some(SpannedLexeme(Lexeme::Semicolon, semicolon)) => {
                let (block, span, colon) = self.scan_parameters(semicolon.end)?;
                (Some((block, span)), colon.end)
            }
            other => return Err(self.missing_colon(&name, other)),
        };
        let (value, value_span) = self.scan_value(value_start)?;

        let is_begin = name.eq_ignore_ascii_case(KW_BEGIN);
        if is_begin || name.eq_ignore_ascii_case(KW_END) {
            let keyword = if is_begin { KW_BEGIN } else { KW_END };
            if let Some((_, span)) = parameters {
                let message = format!("{keyword} must not carry parameters");
                return Err(LineError::new(message, span));
            }
            if value.is_empty() || !value.chars().all(is_name_char) {
                let message = format!("malformed component name {value:?} after {keyword}");
                return Err(LineError::new(message, value_span));
            }

            let component = value.to_ascii_uppercase();
            let span = Span::new(name_span.start, value_span.end);
            return if is_begin {
                self.begin(component, span)
            } else {
                self.end(component, span)
            };
        }

        if self.contexts.is_empty() {
            let message = format!("expected {KW_BEGIN}:{KW_VCALENDAR}, found property {name}");
            return Err(LineError::new(message, name_span));
        }

        self.emit(TokenKind::PropertyName(name), name_span);
        if let Some((block, span)) = parameters {
            self.emit(TokenKind::ParameterBlock(block), span);
        }
        self.emit(TokenKind::Value(value), value_span);
        Ok(())
    }

    fn begin(&mut self, component: String, span: Span) -> Result<(), LineError> {
        let context = match self.contexts.last() {
            Some(parent) => parent.child(&component),
            None if component == KW_VCALENDAR => Context::Calendar,
            None => {
                let message =
                    format!("expected {KW_BEGIN}:{KW_VCALENDAR}, found {KW_BEGIN}:{component}");
                return Err(LineError::new(message, span));
            }
        };
        self.contexts.push(context);
        self.emit(TokenKind::Begin(component), span);
        Ok(())
    }

    fn end(&mut self, component: String, span: Span) -> Result<(), LineError> {
        if self.contexts.pop().is_none() {
            let message = format!("expected {KW_BEGIN}:{KW_VCALENDAR}, found {KW_END}:{component}");
            return Err(LineError::new(message, span));
        }
        self.emit(TokenKind::End(component), span);

        if self.contexts.is_empty() {
            self.done = true;
            while let Some(SpannedLexeme(Lexeme::Newline, _)) = self.lexemes.peek() {
                self.lexemes.next();
            }
            if let Some(SpannedLexeme(_, trailing)) = self.lexemes.peek() {
                tracing::debug!(offset = trailing.start, "ignoring input after the closing END");
            }
        }
        Ok(())
    }

    /// Name tokens may be split across folds, so consecutive words are joined.
    fn scan_name(&mut self) -> Result<(String, Span), LineError> {
        let mut name = String::new();
        let mut span: Option<Span> = None;
        while let Some(&SpannedLexeme(Lexeme::Word(word), word_span)) = self.lexemes.peek() {
            self.lexemes.next();
            name.push_str(word);
            span = Some(Span::new(
                span.map_or(word_span.start, |s| s.start),
                word_span.end,
            ));
        }

        match span {
            Some(span) if name.chars().all(is_name_char) => Ok((name, span)),
            Some(span) => Err(LineError::new(format!("invalid property name {name:?}"), span)),
            None => {
                let next = self.lexemes.peek().copied();
                Err(self.unexpected("property name", next))
            }
        }
    }

    fn scan_parameters(&mut self, start: usize) -> Result<(String, Span, Span), LineError> {
        let mut block = String::new();
        let mut quoted = false;
        loop {
            match self.lexemes.next() {
                Some(SpannedLexeme(Lexeme::Colon, colon)) if !quoted => {
                    return Ok((block, Span::new(start, colon.start), colon));
                }
                Some(SpannedLexeme(Lexeme::Newline, span)) => {
                    let message = if quoted {
                        "unterminated quoted parameter value"
                    } else {
                        "missing ':' after parameters"
                    };
                    return Err(LineError::new(message, span));
                }
                None => {
                    let message = "unexpected end of input in parameters";
                    return Err(LineError::new(message, self.eof_span()));
                }
                Some(SpannedLexeme(Lexeme::Error, span)) => return Err(self.invalid_char(span)),
                Some(SpannedLexeme(lexeme, _)) => {
                    if lexeme == Lexeme::DQuote {
                        quoted = !quoted;
                    }
                    block.push_str(lexeme.text());
                }
            }
        }
    }

    fn scan_value(&mut self, start: usize) -> Result<(String, Span), LineError> {
        let mut value = String::new();
        let mut end = start;
        loop {
            match self.lexemes.next() {
                None | Some(SpannedLexeme(Lexeme::Newline, _)) => {
                    return Ok((value, Span::new(start, end)));
                }
                Some(SpannedLexeme(Lexeme::Error, span)) => return Err(self.invalid_char(span)),
                Some(SpannedLexeme(lexeme, span)) => {
                    value.push_str(lexeme.text());
                    end = span.end;
                }
            }
        }
    }

    fn missing_colon(&self, name: &str, found: Option<SpannedLexeme<'_>>) -> LineError {
        match found {
            Some(SpannedLexeme(Lexeme::Error, span)) => self.invalid_char(span),
            Some(SpannedLexeme(Lexeme::Newline, span)) => {
                LineError::new(format!("missing ':' after property name {name}"), span)
            }
            Some(SpannedLexeme(lexeme, span)) => LineError::new(
                format!("missing ':' after property name {name}, found {lexeme}"),
                span,
            ),
            None => LineError::new(
                format!("missing ':' after property name {name}, found end of input"),
                self.eof_span(),
            ),
        }
    }

    fn unexpected(&self, expected: &str, found: Option<SpannedLexeme<'_>>) -> LineError {
        match found {
            Some(SpannedLexeme(Lexeme::Error, span)) => self.invalid_char(span),
            Some(SpannedLexeme(lexeme, span)) => {
                LineError::new(format!("expected {expected}, found {lexeme}"), span)
            }
            None => LineError::new(
                format!("expected {expected}, found end of input"),
                self.eof_span(),
            ),
        }
    }

    fn invalid_char(&self, span: Span) -> LineError {
        let found = self.src.get(span.into_range()).unwrap_or_default();
        LineError::new(format!("invalid character {found:?}"), span)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.done {
                return None;
            }
            if let Err(err) = self.scan_line() {
                self.done = true;
                self.pending.clear();
                let position = self.index.position(self.src, err.span.start);
                return Some(Token {
                    kind: TokenKind::Error(err.message),
                    span: err.span,
                    position,
                });
            }
        }
    }
}

impl FusedIterator for Tokenizer<'_> {}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

#[cfg(test)]
mod tests {
    #![expect(clippy::indexing_slicing)]

    use super::TokenKind::*;
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Tokenizer::new(src).map(|token| token.kind).collect()
    }

    fn begin(name: &str) -> TokenKind {
        Begin(name.to_string())
    }

    fn end(name: &str) -> TokenKind {
        End(name.to_string())
    }

    fn prop(name: &str) -> TokenKind {
        PropertyName(name.to_string())
    }

    fn value(value: &str) -> TokenKind {
        Value(value.to_string())
    }

    #[test]
    fn tokenizes_minimal_calendar() {
        let src = "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n";
        assert_eq!(kinds(src), [begin("VCALENDAR"), end("VCALENDAR")]);
    }

    #[test]
    fn skips_leading_byte_order_mark() {
        let src = "\u{feff}BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n";
        let tokens: Vec<_> = Tokenizer::new(src).collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, begin("VCALENDAR"));
        assert_eq!((tokens[0].position.line, tokens[0].position.column), (1, 1));
        assert_eq!(tokens[0].position.offset, 3);
    }

    #[test]
    fn tokenizes_properties_and_parameters() {
        let src = "\
BEGIN:VCALENDAR\r
VERSION:2.0\r
BEGIN:VEVENT\r
DTSTART;TZID=Europe/Berlin:20250101T090000\r
ATTENDEE;CN=\"Doe; John\";ROLE=CHAIR:mailto:john@example.com\r
END:VEVENT\r
END:VCALENDAR\r
";
        let expected = [
            begin("VCALENDAR"),
            prop("VERSION"),
            value("2.0"),
            begin("VEVENT"),
            prop("DTSTART"),
            ParameterBlock("TZID=Europe/Berlin".to_string()),
            value("20250101T090000"),
            prop("ATTENDEE"),
            ParameterBlock("CN=\"Doe; John\";ROLE=CHAIR".to_string()),
            value("mailto:john@example.com"),
            end("VEVENT"),
            end("VCALENDAR"),
        ];
        assert_eq!(kinds(src), expected);
    }

    #[test]
    fn quoted_colon_stays_in_parameter_block() {
        let src = "BEGIN:VCALENDAR\r\nX-A;ALTREP=\"cid:x@y\":v\r\nEND:VCALENDAR\r\n";
        assert_eq!(
            kinds(src),
            [
                begin("VCALENDAR"),
                prop("X-A"),
                ParameterBlock("ALTREP=\"cid:x@y\"".to_string()),
                value("v"),
                end("VCALENDAR"),
            ]
        );
    }

    #[test]
    fn unfolds_continuation_lines() {
        let src = "BEGIN:VCALENDAR\r\nDESC\r\n RIPTION:Hello\r\n\t world\r\nEND:VCALENDAR\r\n";
        assert_eq!(
            kinds(src),
            [
                begin("VCALENDAR"),
                prop("DESCRIPTION"),
                value("Hello world"),
                end("VCALENDAR"),
            ]
        );
    }

    #[test]
    fn accepts_cr_lf_and_crlf_line_endings() {
        for sep in ["\r\n", "\n", "\r"] {
            let src = format!("BEGIN:VCALENDAR{sep}VERSION:2.0{sep}END:VCALENDAR{sep}");
            assert_eq!(
                kinds(&src),
                [
                    begin("VCALENDAR"),
                    prop("VERSION"),
                    value("2.0"),
                    end("VCALENDAR"),
                ],
                "{sep:?}"
            );
        }
    }

    #[test]
    fn skips_blank_lines_and_tolerates_missing_final_newline() {
        let src = "BEGIN:VCALENDAR\r\n\r\nVERSION:2.0\r\n\r\nEND:VCALENDAR";
        assert_eq!(
            kinds(src),
            [
                begin("VCALENDAR"),
                prop("VERSION"),
                value("2.0"),
                end("VCALENDAR"),
            ]
        );
    }

    #[test]
    fn uppercases_component_names() {
        let src = "begin:vcalendar\r\nend:VCalendar\r\n";
        assert_eq!(kinds(src), [begin("VCALENDAR"), end("VCALENDAR")]);
    }

    #[test]
    fn emits_begin_for_unknown_components() {
        let src = "BEGIN:VCALENDAR\r\nBEGIN:VTODO\r\nEND:VTODO\r\nEND:VCALENDAR\r\n";
        assert_eq!(
            kinds(src),
            [
                begin("VCALENDAR"),
                begin("VTODO"),
                end("VTODO"),
                end("VCALENDAR"),
            ]
        );
    }

    #[test]
    fn stops_after_the_calendar_closes() {
        let src = "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\nGARBAGE WITHOUT COLON\r\n";
        assert_eq!(kinds(src), [begin("VCALENDAR"), end("VCALENDAR")]);
    }

    #[test]
    fn missing_colon_is_the_last_token() {
        let src = "BEGIN:VCALENDAR\r\nSUMMARY Hello\r\nEND:VCALENDAR\r\n";
        let tokens: Vec<_> = Tokenizer::new(src).collect();
        assert_eq!(tokens.len(), 2);
        let Error(message) = &tokens[1].kind else {
            panic!("expected error token, got {:?}", tokens[1]);
        };
        assert!(message.contains("missing ':'"), "{message}");
        assert_eq!((tokens[1].position.line, tokens[1].position.column), (2, 8));
    }

    #[test]
    fn end_of_input_inside_component_is_an_error() {
        let src = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nUID:1\r\n";
        let tokens: Vec<_> = Tokenizer::new(src).collect();
        let last = tokens.last().unwrap();
        assert_eq!(
            last.kind,
            Error("unexpected end of input inside VEVENT".to_string())
        );
        assert_eq!(last.position.line, 4);
    }

    #[test]
    fn requires_vcalendar_first() {
        for src in ["", "VERSION:2.0\r\n", "BEGIN:VEVENT\r\nEND:VEVENT\r\n"] {
            let tokens = kinds(src);
            assert_eq!(tokens.len(), 1, "{src:?}");
            assert!(matches!(tokens[0], Error(_)), "{src:?}");
        }
    }

    #[test]
    fn rejects_parameters_on_begin_and_end() {
        let src = "BEGIN;X=1:VCALENDAR\r\nEND:VCALENDAR\r\n";
        let tokens = kinds(src);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0], Error("BEGIN must not carry parameters".to_string()));
    }

    #[test]
    fn rejects_unterminated_parameter_block() {
        let src = "BEGIN:VCALENDAR\r\nDTSTART;TZID=\"Europe/Berlin:2025\r\nEND:VCALENDAR\r\n";
        let tokens = kinds(src);
        assert_eq!(tokens.len(), 2);
        assert!(matches!(&tokens[1], Error(m) if m.contains("unterminated")));
    }

    #[test]
    fn control_characters_are_errors() {
        let src = "BEGIN:VCALENDAR\r\nSUMMARY:bad\x07bell\r\nEND:VCALENDAR\r\n";
        let tokens = kinds(src);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1], Error("invalid character \"\\u{7}\"".to_string()));
    }

    #[test]
    fn reports_token_positions() {
        let src = "BEGIN:VCALENDAR\r\nSUMMARY;LANGUAGE=en:Hi\r\nEND:VCALENDAR\r\n";
        let tokens: Vec<_> = Tokenizer::new(src).collect();
        let positions: Vec<_> = tokens
            .iter()
            .map(|t| (t.position.line, t.position.column))
            .collect();
        assert_eq!(positions, [(1, 1), (2, 1), (2, 9), (2, 21), (3, 1)]);
        assert_eq!(tokens[3].span, Span::new(37, 39));
    }

    #[test]
    fn is_fused_after_error() {
        let mut tokenizer = Tokenizer::new("nonsense");
        assert!(matches!(tokenizer.next().map(|t| t.kind), Some(Error(_))));
        assert_eq!(tokenizer.next(), None);
        assert_eq!(tokenizer.next(), None);
    }
}
