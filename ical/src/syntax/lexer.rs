// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lexer for iCalendar content lines as defined in RFC 5545.
//!
//! Folded lines are unfolded here: a line break followed by a single space or
//! horizontal tab is skipped, so the text of a logical line is the
//! concatenation of its lexemes.

use std::fmt::{self, Display};

use logos::{Logos, SpannedIter};

use crate::syntax::position::Span;

/// U+FEFF, written at the start of files by some exporters
pub(crate) const BYTE_ORDER_MARK: char = '\u{feff}';

/// Lex iCalendar source text into spanned lexemes.
///
/// A leading byte order mark is skipped; spans still index `src`.
/// Characters rejected by the lexer are reported as [`Lexeme::Error`].
#[must_use]
pub fn lex(src: &str) -> Lexemes<'_> {
    let mut lexer = Lexeme::lexer(src);
    if src.starts_with(BYTE_ORDER_MARK) {
        lexer.bump(BYTE_ORDER_MARK.len_utf8());
    }
    Lexemes(lexer.spanned())
}

/// Iterator returned by [`lex`]
pub struct Lexemes<'src>(SpannedIter<'src, Lexeme<'src>>);

impl fmt::Debug for Lexemes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Lexemes").finish_non_exhaustive()
    }
}

impl<'src> Iterator for Lexemes<'src> {
    type Item = SpannedLexeme<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(lexeme, span)| match lexeme {
            Ok(lexeme) => SpannedLexeme(lexeme, Span::new(span.start, span.end)),
            Err(()) => SpannedLexeme(Lexeme::Error, Span::new(span.start, span.end)),
        })
    }
}

/// Lexeme emitted by the iCalendar lexer
#[derive(PartialEq, Eq, Clone, Copy, Logos)]
#[logos(skip r"(\r\n|\r|\n)[ \t]")] // skip folding
pub enum Lexeme<'a> {
    /// Double Quote ("), decimal codepoint 22
    #[token(r#"""#)]
    DQuote,

    /// Comma (,), decimal codepoint 44
    #[token(",")]
    Comma,

    /// Colon (:), decimal codepoint 58
    #[token(":")]
    Colon,

    /// Semicolon (;), decimal codepoint 59
    #[token(";")]
    Semicolon,

    /// Equal sign (=), decimal codepoint 61
    #[token("=")]
    Equal,

    /// ASCII symbols: sequences of printable ASCII characters, space and tab
    #[regex(r#"[\t !#$%&'()*+./<>?@\[\\\]\^`\{|\}~]+"#)]
    Symbol(&'a str),

    /// Line break: CRLF, or a bare CR or LF
    #[regex(r"\r\n|\r|\n")]
    Newline,

    /// ASCII word characters: 0-9, A-Z, a-z, underscore, hyphen
    #[regex("[0-9A-Za-z_-]+")]
    Word(&'a str),

    /// NON-US-ASCII  = UTF8-2 / UTF8-3 / UTF8-4
    #[regex(r"[^\x00-\x7F]+")]
    UnicodeText(&'a str),

    /// Control character rejected by the lexer
    Error,
}

impl<'a> Lexeme<'a> {
    /// Source text of the lexeme, empty for [`Lexeme::Newline`] and [`Lexeme::Error`]
    #[must_use]
    pub const fn text(self) -> &'a str {
        match self {
            Self::DQuote => "\"",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::Equal => "=",
            Self::Symbol(s) | Self::Word(s) | Self::UnicodeText(s) => s,
            Self::Newline | Self::Error => "",
        }
    }
}

impl Display for Lexeme<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DQuote => write!(f, "DQuote"),
            Self::Comma => write!(f, "Comma"),
            Self::Colon => write!(f, "Colon"),
            Self::Semicolon => write!(f, "Semicolon"),
            Self::Equal => write!(f, "Equal"),
            Self::Symbol(s) => write!(f, "Symbol({s})"),
            Self::Newline => write!(f, "Newline"),
            Self::Word(s) => write!(f, "Word({s})"),
            Self::UnicodeText(s) => write!(f, "UnicodeText({s})"),
            Self::Error => write!(f, "Error"),
        }
    }
}

impl fmt::Debug for Lexeme<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// A lexeme with its associated span in the source code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpannedLexeme<'src>(pub Lexeme<'src>, pub Span);

#[cfg(test)]
mod tests {
    #![expect(clippy::indexing_slicing)]

    use super::Lexeme::*;
    use super::*;

    fn lexemes(src: &str) -> Vec<Lexeme<'_>> {
        lex(src).map(|SpannedLexeme(lexeme, _)| lexeme).collect()
    }

    #[test]
    fn lexes_special_ascii_chars() {
        let src = r#";:=,"\_"#;
        let expected = [
            Semicolon,
            Colon,
            Equal,
            Comma,
            DQuote,
            Symbol(r"\"),
            Word("_"),
        ];
        assert_eq!(lexemes(src), expected);
    }

    #[test]
    fn skips_folding_after_any_line_break() {
        #[rustfmt::skip]
        let cases = [
            "WORD1\r\n WORD2",
            "WORD1\r\n\tWORD2",
            "WORD1\n WORD2",
            "WORD1\r WORD2",
        ];
        for src in cases {
            assert_eq!(lexemes(src), [Word("WORD1"), Word("WORD2")], "{src:?}");
        }
    }

    #[test]
    fn lexes_all_line_terminators_as_newline() {
        #[rustfmt::skip]
        let cases = [
            "A\r\nB",
            "A\nB",
            "A\rB",
        ];
        for src in cases {
            assert_eq!(lexemes(src), [Word("A"), Newline, Word("B")], "{src:?}");
        }
        assert_eq!(
            lexemes("A\r\n\r\nB"),
            [Word("A"), Newline, Newline, Word("B")]
        );
    }

    #[test]
    fn fold_removes_only_one_whitespace() {
        let src = "SUMMARY:a\r\n  b";
        assert_eq!(
            lexemes(src),
            [Word("SUMMARY"), Colon, Word("a"), Symbol(" "), Word("b")]
        );
    }

    #[test]
    fn lexes_words_symbols_and_unicode() {
        let src = "ABC_foo-123 456 \u{4f60}\u{597d}Hello";
        let expected = [
            Word("ABC_foo-123"),
            Symbol(" "),
            Word("456"),
            Symbol(" "),
            UnicodeText("\u{4f60}\u{597d}"),
            Word("Hello"),
        ];
        assert_eq!(lexemes(src), expected);
    }

    #[test]
    fn lexes_control_chars_as_error() {
        for src in ["\x00", "\x07", "\x1B", "\x7F"] {
            assert_eq!(lexemes(src), [Error], "{src:?}");
        }
        assert_eq!(
            lexemes("WORD\x01WORD2"),
            [Word("WORD"), Error, Word("WORD2")]
        );
    }

    #[test]
    fn lexes_htab_as_symbol() {
        assert_eq!(
            lexemes("WORD1\tWORD2"),
            [Word("WORD1"), Symbol("\t"), Word("WORD2")]
        );
    }

    #[test]
    fn reports_spans() {
        let tokens: Vec<_> = lex("BEGIN:VCALENDAR").collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], SpannedLexeme(Word("BEGIN"), Span::new(0, 5)));
        assert_eq!(tokens[1], SpannedLexeme(Colon, Span::new(5, 6)));
        assert_eq!(tokens[2], SpannedLexeme(Word("VCALENDAR"), Span::new(6, 15)));
    }

    #[test]
    fn skips_leading_byte_order_mark() {
        let tokens: Vec<_> = lex("\u{feff}BEGIN:VCALENDAR").collect();
        assert_eq!(tokens[0], SpannedLexeme(Word("BEGIN"), Span::new(3, 8)));
        assert_eq!(lexemes("A\u{feff}"), [Word("A"), UnicodeText("\u{feff}")]);
    }

    #[test]
    fn text_reassembles_the_logical_line() {
        let src = "DESCRIPTION:Meet at caf\u{e9};\r\n bring \"notes\", pens";
        let text: String = lex(src).map(|SpannedLexeme(l, _)| l.text()).collect();
        assert_eq!(text, "DESCRIPTION:Meet at caf\u{e9};bring \"notes\", pens");
    }
}
