// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Time zone component (VTIMEZONE) and its STANDARD and DAYLIGHT
//! observances.

use jiff::tz::{self, Offset};
use url::Url;

use crate::error::ParseError;
use crate::keyword::{
    KW_COMMENT, KW_DAYLIGHT, KW_DTSTART, KW_LAST_MODIFIED, KW_RRULE, KW_STANDARD, KW_TZID,
    KW_TZNAME, KW_TZOFFSETFROM, KW_TZOFFSETTO, KW_TZURL, KW_VTIMEZONE,
};
use crate::parser::{RawProperty, Step, TokenCursor, unsupported_child};
use crate::semantic::XProperties;
use crate::syntax::Token;
use crate::value::{
    DateTimeValue, RecurrenceRule, decode_recurrence_rule, decode_url, decode_utc_offset,
    resolve_time_zone,
};

/// Time zone definition
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TimeZone {
    /// `TZID`, resolved through the IANA database
    pub tzid: Option<ResolvedTimeZone>,
    /// Location of an up-to-date definition
    pub tz_url: Option<Url>,
    /// Last revision time
    pub last_modified: Option<DateTimeValue>,
    /// Standard time rule
    pub standard: Option<Observance>,
    /// Daylight saving time rule
    pub daylight: Option<Observance>,
    /// Non-standard properties
    pub x_properties: XProperties,
}

/// Time zone identifier together with the zone it resolves to.
///
/// Two values are equal when their identifiers are.
#[derive(Debug, Clone)]
pub struct ResolvedTimeZone {
    /// Identifier as written in the source
    pub name: String,
    /// Resolved zone
    pub tz: tz::TimeZone,
}

impl PartialEq for ResolvedTimeZone {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ResolvedTimeZone {}

/// STANDARD or DAYLIGHT sub-component
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Observance {
    /// First onset of the rule
    pub dt_start: Option<DateTimeValue>,
    /// Offset in use before the onset
    pub offset_from: Option<Offset>,
    /// Offset in use after the onset
    pub offset_to: Option<Offset>,
    /// Customary abbreviation, such as `CET`
    pub tz_name: Option<String>,
    /// Recurrence of the onset
    pub rrule: Option<RecurrenceRule>,
    /// Free-form comment
    pub comment: Option<String>,
    /// Non-standard properties
    pub x_properties: XProperties,
}

impl TimeZone {
    /// Parse the body of a VTIMEZONE whose `BEGIN` was already consumed
    pub(crate) fn parse<I: Iterator<Item = Token>>(
        cursor: &mut TokenCursor<I>,
    ) -> Result<Self, ParseError> {
        let mut time_zone = Self::default();
        loop {
            match cursor.step(KW_VTIMEZONE)? {
                Step::Property(prop) => time_zone.apply(prop)?,
                Step::Child { name, position } => match name.as_str() {
                    KW_STANDARD => {
                        time_zone.standard = Some(Observance::parse(cursor, KW_STANDARD)?);
                        tracing::debug!("attached standard observance");
                    }
                    KW_DAYLIGHT => {
                        time_zone.daylight = Some(Observance::parse(cursor, KW_DAYLIGHT)?);
                        tracing::debug!("attached daylight observance");
                    }
                    _ => return Err(unsupported_child(KW_VTIMEZONE, &name, position)),
                },
                Step::Closed => return Ok(time_zone),
            }
        }
    }

    fn apply(&mut self, prop: RawProperty) -> Result<(), ParseError> {
        match prop.name.to_ascii_uppercase().as_str() {
            KW_TZID => {
                let tz = prop.decode(resolve_time_zone)?;
                self.tzid = Some(ResolvedTimeZone {
                    name: prop.value,
                    tz,
                });
            }
            KW_TZURL => self.tz_url = Some(prop.decode(decode_url)?),
            KW_LAST_MODIFIED => self.last_modified = Some(prop.date_time()?),
            _ => prop.store_extension(KW_VTIMEZONE, &mut self.x_properties)?,
        }
        Ok(())
    }
}

impl Observance {
    /// Parse the body of a STANDARD or DAYLIGHT component named `kind`
    pub(crate) fn parse<I: Iterator<Item = Token>>(
        cursor: &mut TokenCursor<I>,
        kind: &str,
    ) -> Result<Self, ParseError> {
        let mut observance = Self::default();
        loop {
            match cursor.step(kind)? {
                Step::Property(prop) => observance.apply(prop, kind)?,
                Step::Child { name, position } => {
                    return Err(unsupported_child(kind, &name, position));
                }
                Step::Closed => return Ok(observance),
            }
        }
    }

    fn apply(&mut self, prop: RawProperty, kind: &str) -> Result<(), ParseError> {
        match prop.name.to_ascii_uppercase().as_str() {
            KW_DTSTART => self.dt_start = Some(prop.date_time()?),
            KW_TZOFFSETFROM => self.offset_from = Some(prop.decode(decode_utc_offset)?),
            KW_TZOFFSETTO => self.offset_to = Some(prop.decode(decode_utc_offset)?),
            KW_TZNAME => self.tz_name = Some(prop.value),
            KW_RRULE => self.rrule = Some(prop.decode(decode_recurrence_rule)?),
            KW_COMMENT => self.comment = Some(prop.value),
            _ => prop.store_extension(kind, &mut self.x_properties)?,
        }
        Ok(())
    }
}
