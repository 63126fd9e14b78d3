// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lexical layer: unfolding, lexing and tokenizing iCalendar text.
//!
//! ```text
//! Source Text → Lexer → Lexemes → Tokenizer → Tokens
//! ```

pub mod lexer;
pub mod position;
pub mod tokenizer;

pub use crate::syntax::position::{LineIndex, Position, Span};
pub use crate::syntax::tokenizer::{Token, TokenKind, Tokenizer};
