// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Text list and URI values as defined in RFC 5545 Sections 3.3.11 and 3.3.13.
//!
//! Text is kept in its raw, still-escaped form.

use chumsky::prelude::*;
use url::Url;

use crate::error::ValueError;
use crate::value::{Extra, first_error};

/// Format Definition:
///
/// ```txt
/// text       = *(TSAFE-CHAR / ":" / DQUOTE / ESCAPED-CHAR)
/// ESCAPED-CHAR = ("\\" / "\;" / "\," / "\N" / "\n")
/// ```
///
/// Escapes are kept as written, so `\,` stays inside its element.
fn text_list<'src>() -> impl Parser<'src, &'src str, Vec<String>, Extra<'src>> {
    let escape = just('\\').then(any()).ignored();
    let plain = none_of(",\\").ignored();
    let text = choice((escape, plain))
        .repeated()
        .to_slice()
        .map(str::to_string);

    text.separated_by(just(','))
        .collect::<Vec<_>>()
        .then_ignore(end())
}

/// Decode a comma separated text list, such as the value of `CATEGORIES`.
///
/// Only unescaped commas separate elements.
///
/// ## Errors
/// If the value ends in a dangling backslash.
pub fn decode_text_list(raw: &str) -> Result<Vec<String>, ValueError> {
    text_list()
        .parse(raw)
        .into_result()
        .map_err(|errs| ValueError::Text {
            value: raw.to_string(),
            reason: first_error(errs),
        })
}

/// Decode a URI value.
///
/// ## Errors
/// If the value is not a syntactically valid absolute URL.
pub fn decode_url(raw: &str) -> Result<Url, ValueError> {
    Url::parse(raw).map_err(|e| ValueError::Url {
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
