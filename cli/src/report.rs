// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use colored::Colorize;
use icsread_ical::ParseError;

/// Print a decode error to standard error, pointing into `src` when the
/// error has a position.
pub fn eprint(name: &str, src: &str, err: &ParseError) -> io::Result<()> {
    let Some(position) = err.position() else {
        eprintln!("{} {name}: {err}", "Error:".red());
        return Ok(());
    };

    let span = char_span(src, position.offset);
    Report::build(ReportKind::Error, span.clone())
        .with_config(Config::new().with_index_type(IndexType::Byte))
        .with_code(code(err))
        .with_message(format!("failed to decode {name}"))
        .with_label(
            Label::new(span)
                .with_message(err.to_string())
                .with_color(Color::Red),
        )
        .finish()
        .eprint(Source::from(src))
}

fn code(err: &ParseError) -> u8 {
    match err {
        ParseError::Syntax { .. } => 1,
        ParseError::Value { .. } => 2,
        ParseError::Structural { .. } => 3,
        ParseError::Io(_) => 4,
    }
}

/// Byte range of the character starting at `offset`, empty at the end of
/// the text
fn char_span(src: &str, offset: usize) -> Range<usize> {
    let len = src
        .get(offset..)
        .and_then(|rest| rest.chars().next())
        .map_or(0, char::len_utf8);
    offset..offset + len
}
