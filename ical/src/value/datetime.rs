// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Date, date-time and UTC offset values as defined in RFC 5545 Section 3.3.

use std::fmt::{self, Display};

use chumsky::prelude::*;
use jiff::civil::{Date, DateTime, Time};
use jiff::tz::{Offset, TimeZone};
use jiff::{Timestamp, Zoned};
use lexical::FromLexical;

use crate::error::ValueError;
use crate::keyword::KW_TZID;
use crate::parameter::Parameters;
use crate::value::{Extra, first_error};

/// Decoded DATE or DATE-TIME value
#[derive(Debug, Clone, PartialEq)]
pub enum DateTimeValue {
    /// Absolute time, `YYYYMMDDTHHMMSSZ`
    Utc(Timestamp),
    /// Naive local time without zone, `YYYYMMDDTHHMMSS`
    Floating(DateTime),
    /// Calendar date, `YYYYMMDD`
    Date(Date),
    /// Value qualified by a `TZID` parameter
    Zoned(ZonedDateTime),
}

/// Time in a named IANA time zone
#[derive(Debug, Clone, PartialEq)]
pub struct ZonedDateTime {
    /// Time zone identifier as written in the `TZID` parameter
    pub tzid: String,
    /// The resolved time
    pub zoned: Zoned,
}

impl DateTimeValue {
    /// Wall clock time of the value; dates map to midnight and UTC times to
    /// their UTC wall clock.
    #[must_use]
    pub fn civil(&self) -> DateTime {
        match self {
            Self::Utc(ts) => Offset::UTC.to_datetime(*ts),
            Self::Floating(dt) => *dt,
            Self::Date(date) => date.to_datetime(Time::midnight()),
            Self::Zoned(z) => z.zoned.datetime(),
        }
    }

    /// Whether the value is a plain date
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Absolute instant of the value, if it has one
    #[must_use]
    pub fn timestamp(&self) -> Option<Timestamp> {
        match self {
            Self::Utc(ts) => Some(*ts),
            Self::Zoned(z) => Some(z.zoned.timestamp()),
            Self::Floating(_) | Self::Date(_) => None,
        }
    }

    fn in_time_zone(self, tzid: &str, tz: TimeZone) -> Result<Self, ValueError> {
        let zoned = match self {
            Self::Utc(ts) => ts.to_zoned(tz),
            Self::Floating(dt) => tz.to_zoned(dt).map_err(|e| date_time_error(tzid, &e))?,
            Self::Date(date) => tz
                .to_zoned(date.to_datetime(Time::midnight()))
                .map_err(|e| date_time_error(tzid, &e))?,
            Self::Zoned(_) => return Ok(self),
        };
        Ok(Self::Zoned(ZonedDateTime {
            tzid: tzid.to_string(),
            zoned,
        }))
    }
}

impl Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc(ts) => write!(f, "{ts}"),
            Self::Floating(dt) => write!(f, "{dt}"),
            Self::Date(date) => write!(f, "{date}"),
            Self::Zoned(z) => write!(f, "{}", z.zoned),
        }
    }
}

fn date_time_error(value: &str, err: &jiff::Error) -> ValueError {
    ValueError::DateTime {
        value: value.to_string(),
        reason: err.to_string(),
    }
}

/// Resolve an IANA time zone identifier.
///
/// ## Errors
/// If the time zone database does not know `tzid`.
pub fn resolve_time_zone(tzid: &str) -> Result<TimeZone, ValueError> {
    TimeZone::get(tzid).map_err(|err| {
        tracing::debug!(tzid, %err, "failed to resolve time zone");
        ValueError::TimeZone {
            tzid: tzid.to_string(),
        }
    })
}

/// Decode a DATE or DATE-TIME value.
///
/// The forms are tried in order: UTC (`YYYYMMDDTHHMMSSZ`), local
/// (`YYYYMMDDTHHMMSS`), date (`YYYYMMDD`). With a `TZID` parameter the zone
/// is resolved first and the decoded value is then placed in it: naive
/// values are read as wall clock time of the zone, UTC values keep their
/// instant.
///
/// ## Errors
/// If the zone is unknown or the value matches none of the forms.
pub fn decode_date_time(raw: &str, params: &Parameters) -> Result<DateTimeValue, ValueError> {
    let tz = match params.get(KW_TZID) {
        Some(tzid) => Some((tzid, resolve_time_zone(tzid)?)),
        None => None,
    };

    let value = date_time_value()
        .parse(raw)
        .into_result()
        .map_err(|errs| ValueError::DateTime {
            value: raw.to_string(),
            reason: first_error(errs),
        })?;

    match tz {
        Some((tzid, tz)) => value.in_time_zone(tzid, tz),
        None => Ok(value),
    }
}

/// Decode a comma separated list of DATE or DATE-TIME values sharing the
/// same parameters.
///
/// ## Errors
/// If any element fails to decode.
pub fn decode_date_time_list(
    raw: &str,
    params: &Parameters,
) -> Result<Vec<DateTimeValue>, ValueError> {
    raw.split(',')
        .map(|item| decode_date_time(item, params))
        .collect()
}

/// Decode a UTC offset.
///
/// Format Definition:
/// ```txt
/// utc-offset = time-numzone
/// time-numzone = ("+" / "-") time-hour time-minute [time-second]
/// ```
///
/// ## Errors
/// If the text is not a valid offset.
pub fn decode_utc_offset(raw: &str) -> Result<Offset, ValueError> {
    utc_offset()
        .parse(raw)
        .into_result()
        .map_err(|_| ValueError::UtcOffset {
            value: raw.to_string(),
        })
}

fn date_time_value<'src>() -> impl Parser<'src, &'src str, DateTimeValue, Extra<'src>> {
    let date_time = date()
        .then_ignore(just('T'))
        .then(time())
        .map(|(date, time)| date.to_datetime(time));

    let utc = date_time
        .clone()
        .then_ignore(just('Z'))
        .then_ignore(end())
        .try_map(|dt, span| {
            Offset::UTC
                .to_timestamp(dt)
                .map(DateTimeValue::Utc)
                .map_err(|e| Rich::custom(span, e))
        });
    let local = date_time.then_ignore(end()).map(DateTimeValue::Floating);
    let date_only = date().then_ignore(end()).map(DateTimeValue::Date);

    choice((utc, local, date_only))
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-28, 01-29, 01-30, 01-31
///                                    ;based on month/year
/// ```
fn date<'src>() -> impl Parser<'src, &'src str, Date, Extra<'src>> + Clone {
    fixed_digits::<i16>(4)
        .then(fixed_digits::<i8>(2))
        .then(fixed_digits::<i8>(2))
        .try_map(|((year, month), day), span| {
            Date::new(year, month, day).map_err(|e| Rich::custom(span, e))
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// time         = time-hour time-minute time-second [time-utc]
/// time-hour    = 2DIGIT        ;00-23
/// time-minute  = 2DIGIT        ;00-59
/// time-second  = 2DIGIT        ;00-60
/// ```
fn time<'src>() -> impl Parser<'src, &'src str, Time, Extra<'src>> + Clone {
    fixed_digits::<i8>(2)
        .then(fixed_digits::<i8>(2))
        .then(fixed_digits::<i8>(2))
        .try_map(|((hour, minute), second), span| {
            if second > 60 {
                return Err(Rich::custom(span, "second out of range"));
            }
            // NOTE: leap second 60 is contracted to 59
            Time::new(hour, minute, second.min(59), 0).map_err(|e| Rich::custom(span, e))
        })
}

fn utc_offset<'src>() -> impl Parser<'src, &'src str, Offset, Extra<'src>> {
    one_of("+-")
        .then(fixed_digits::<i32>(2))
        .then(fixed_digits::<i32>(2))
        .then(fixed_digits::<i32>(2).or_not())
        .try_map(|(((sign, hour), minute), second), span| {
            let second = second.unwrap_or(0);
            if hour > 23 || minute > 59 || second > 59 {
                return Err(Rich::custom(span, "offset component out of range"));
            }
            let seconds = hour * 3600 + minute * 60 + second;
            let seconds = if sign == '-' { -seconds } else { seconds };
            Offset::from_seconds(seconds).map_err(|e| Rich::custom(span, e))
        })
}

/// Exactly `count` ASCII digits
fn fixed_digits<'src, T: FromLexical>(
    count: usize,
) -> impl Parser<'src, &'src str, T, Extra<'src>> + Clone {
    select! { c @ '0'..='9' => c }
        .repeated()
        .exactly(count)
        .to_slice()
        .try_map(|s: &str, span| {
            lexical::parse::<T, _>(s).map_err(|_| Rich::custom(span, "number out of range"))
        })
}
