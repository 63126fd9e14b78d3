// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property parameters as defined in RFC 5545 Section 3.2.

use std::collections::HashMap;

use chumsky::prelude::*;

use crate::error::ValueError;
use crate::value::{Extra, first_error};

/// Parameters attached to a property, keyed by uppercased parameter name.
///
/// Values keep their raw text with surrounding double quotes removed; a
/// multi-valued parameter is kept as its comma separated list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Parameters(HashMap<String, String>);

impl Parameters {
    /// Look up a parameter value, ignoring case of the name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_uppercase()).map(String::as_str)
    }

    /// Set a parameter, replacing any previous value of the same name
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_ascii_uppercase(), value.into());
    }

    /// Number of parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(NAME, value)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Decode the text of a parameter block.
///
/// Format Definition:
///
/// ```txt
/// param        = param-name "=" param-value *("," param-value)
/// param-value  = paramtext / quoted-string
/// quoted-string = DQUOTE *QSAFE-CHAR DQUOTE
/// ```
///
/// ## Errors
/// If the block is not a `;` separated list of `NAME=VALUE` entries.
pub fn decode_parameters(block: &str) -> Result<Parameters, ValueError> {
    let entries = parameters()
        .parse(block)
        .into_result()
        .map_err(|errs| ValueError::Parameters {
            block: block.to_string(),
            reason: first_error(errs),
        })?;

    let mut params = Parameters::default();
    for (name, value) in entries {
        params.insert(name, value);
    }
    Ok(params)
}

fn parameters<'src>() -> impl Parser<'src, &'src str, Vec<(&'src str, String)>, Extra<'src>> {
    let name = any()
        .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '-')
        .repeated()
        .at_least(1)
        .to_slice();

    let quoted = just('"')
        .ignore_then(none_of('"').repeated().to_slice())
        .then_ignore(just('"'));
    let unquoted = none_of("\";,").repeated().to_slice();

    let value = quoted
        .or(unquoted)
        .separated_by(just(','))
        .at_least(1)
        .collect::<Vec<_>>()
        .map(|values| values.join(","));

    name.then_ignore(just('='))
        .then(value)
        .separated_by(just(';'))
        .at_least(1)
        .collect::<Vec<_>>()
        .then_ignore(end())
}
