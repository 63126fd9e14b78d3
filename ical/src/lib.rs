// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Decode iCalendar (RFC 5545) streams into a typed calendar model.
//!
//! The pipeline is a [`Tokenizer`](syntax::Tokenizer) that turns content
//! lines into structural tokens, and a recursive descent parser that builds a
//! [`Calendar`] from them while decoding property values. Parsing is fail-fast:
//! the first error ends it and no partial calendar is returned.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

mod config;
mod error;
pub mod keyword;
pub mod parameter;
pub mod parser;
pub mod semantic;
pub mod syntax;
pub mod value;

use std::io::Read;

pub use crate::config::ParseOptions;
pub use crate::error::{ParseError, ValueError};
pub use crate::parameter::Parameters;
pub use crate::semantic::{
    Alarm, AlarmAction, Attachment, CalAddress, Calendar, Classification, Event, EventStatus,
    GeoPoint, Observance, ResolvedTimeZone, TimeZone, Transparency, Trigger, TriggerRelation,
    TriggerValue, XProperties,
};
pub use crate::value::{
    DateTimeValue, Duration, Frequency, RecurrenceRule, Weekday, WeekdayNum, ZonedDateTime,
};

/// Parse an iCalendar document, pulling tokens on demand.
///
/// ## Errors
/// The first syntax, value or structural error found.
///
/// ## Examples
///
/// ```
/// # use icsread_ical::parse;
/// let src = "\
/// BEGIN:VCALENDAR\r\n\
/// BEGIN:VEVENT\r\n\
/// SUMMARY:Test Event\r\n\
/// END:VEVENT\r\n\
/// END:VCALENDAR\r\n\
/// ";
/// let calendar = parse(src).unwrap();
/// assert_eq!(calendar.events[0].summary.as_deref(), Some("Test Event"));
/// ```
///
/// Mismatched components are rejected:
///
/// ```
/// # use icsread_ical::{ParseError, parse};
/// let src = "\
/// BEGIN:VCALENDAR\r\n\
/// BEGIN:VEVENT\r\n\
/// END:VCALENDAR\r\n\
/// ";
/// let err = parse(src).unwrap_err();
/// assert!(matches!(err, ParseError::Structural { .. }));
/// ```
pub fn parse(src: &str) -> Result<Calendar, ParseError> {
    parse_with(src, &ParseOptions::default())
}

/// Parse an iCalendar document with explicit options.
///
/// ## Errors
/// The first syntax, value or structural error found.
#[tracing::instrument(skip_all)]
pub fn parse_with(src: &str, options: &ParseOptions) -> Result<Calendar, ParseError> {
    parser::parse_source(src, options)
}

/// Read `reader` to the end and parse it.
///
/// ## Errors
/// [`ParseError::Io`] if reading fails or the input is not UTF-8, otherwise
/// as [`parse_with`].
#[tracing::instrument(skip_all)]
pub fn parse_reader(mut reader: impl Read, options: &ParseOptions) -> Result<Calendar, ParseError> {
    let mut src = String::new();
    reader.read_to_string(&mut src)?;
    parser::parse_source(&src, options)
}
