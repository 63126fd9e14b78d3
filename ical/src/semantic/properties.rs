// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property values shared by several components.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::ValueError;
use crate::parameter::Parameters;

/// Non-standard properties keyed by the name after the `X-` prefix
pub type XProperties = HashMap<String, String>;

/// Calendar user address with its parameters, as used by `ORGANIZER`,
/// `ATTENDEE` and `PARTICIPANT`.
///
/// The parameters are kept uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalAddress {
    /// Raw address, usually a `mailto:` URI
    pub value: String,
    /// Parameters such as `CN`, `ROLE` or `PARTSTAT`
    pub parameters: Parameters,
}

/// Attachment reference of an alarm (`ATTACH`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// URI or inline encoded content
    pub value: String,
    /// Parameters such as `FMTTYPE` or `ENCODING`
    pub parameters: Parameters,
}

/// Decode a member of an enumerated value set.
pub(crate) fn decode_keyword<T: FromStr>(raw: &str, kind: &'static str) -> Result<T, ValueError> {
    raw.parse().map_err(|_| ValueError::Enum {
        kind,
        value: raw.to_string(),
    })
}
