// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule values as defined in RFC 5545 Section 3.3.10.

use chumsky::prelude::*;

use crate::error::ValueError;
use crate::keyword::{
    KW_RRULE_BYDAY, KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY,
    KW_RRULE_BYSECOND, KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT,
    KW_RRULE_FREQ, KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::parameter::Parameters;
use crate::value::datetime::{DateTimeValue, decode_date_time};
use crate::value::numeric::{decode_int_list, decode_integer};
use crate::value::{Extra, first_error};

/// Recurrence rule.
///
/// Parts missing from the source stay unset; no RFC defaults are filled in.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecurrenceRule {
    /// Frequency of recurrence
    pub freq: Option<Frequency>,
    /// Until date for recurrence
    pub until: Option<DateTimeValue>,
    /// Number of occurrences
    pub count: Option<u32>,
    /// Interval between recurrences
    pub interval: Option<u32>,
    /// Second specifier, 0-60
    pub by_second: Vec<u8>,
    /// Minute specifier, 0-59
    pub by_minute: Vec<u8>,
    /// Hour specifier, 0-24
    pub by_hour: Vec<u8>,
    /// Day of month specifier, 1-31
    pub by_month_day: Vec<u8>,
    /// Day of year specifier, 1-366
    pub by_year_day: Vec<u16>,
    /// Week number specifier, 1-53
    pub by_week_no: Vec<u8>,
    /// Month specifier, 1-12
    pub by_month: Vec<u8>,
    /// Day of week specifier
    pub by_day: Vec<WeekdayNum>,
    /// Position in the recurrence set, 1-366
    pub by_set_pos: Vec<u16>,
    /// Start day of week
    pub wkst: Option<Weekday>,
}

impl RecurrenceRule {
    /// Interval, or the RFC default of 1 when the rule does not set one
    #[must_use]
    pub fn interval_or_default(&self) -> u32 {
        self.interval.unwrap_or(1)
    }

    /// Week start, or the RFC default of Monday when the rule does not set one
    #[must_use]
    pub fn wkst_or_default(&self) -> Weekday {
        self.wkst.unwrap_or(Weekday::Monday)
    }
}

/// Recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum Weekday {
    #[strum(serialize = "SU")]
    Sunday,
    #[strum(serialize = "MO")]
    Monday,
    #[strum(serialize = "TU")]
    Tuesday,
    #[strum(serialize = "WE")]
    Wednesday,
    #[strum(serialize = "TH")]
    Thursday,
    #[strum(serialize = "FR")]
    Friday,
    #[strum(serialize = "SA")]
    Saturday,
}

/// Day of week with optional occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayNum {
    /// Signed occurrence within the period, `-1` for the last one
    pub ordinal: Option<i8>,
    /// Day of the week
    pub weekday: Weekday,
}

/// Decode a recurrence rule.
///
/// Format Definition:
/// ```txt
/// recur           = recur-rule-part *( ";" recur-rule-part )
/// ```
///
/// Parts are dispatched by name; unknown names are ignored and a repeated
/// part overwrites the earlier one.
///
/// ## Errors
/// If a part is not `NAME=VALUE` or a known part has an invalid value.
pub fn decode_recurrence_rule(raw: &str) -> Result<RecurrenceRule, ValueError> {
    let mut rule = RecurrenceRule::default();
    for part in raw.split(';') {
        let Some((name, value)) = part.split_once('=') else {
            return Err(ValueError::RulePart {
                part: part.to_string(),
            });
        };

        match name.to_ascii_uppercase().as_str() {
            KW_RRULE_FREQ => {
                let freq = value.parse().map_err(|_| ValueError::Enum {
                    kind: "frequency",
                    value: value.to_string(),
                })?;
                rule.freq = Some(freq);
            }
            KW_RRULE_UNTIL => {
                rule.until = Some(decode_date_time(value, &Parameters::default())?);
            }
            KW_RRULE_COUNT => rule.count = Some(decode_integer(value)?),
            KW_RRULE_INTERVAL => rule.interval = Some(decode_integer(value)?),
            KW_RRULE_BYSECOND => rule.by_second = decode_int_list(value, 0..=60)?,
            KW_RRULE_BYMINUTE => rule.by_minute = decode_int_list(value, 0..=59)?,
            KW_RRULE_BYHOUR => rule.by_hour = decode_int_list(value, 0..=24)?,
            KW_RRULE_BYMONTHDAY => rule.by_month_day = decode_int_list(value, 1..=31)?,
            KW_RRULE_BYYEARDAY => rule.by_year_day = decode_int_list(value, 1..=366)?,
            KW_RRULE_BYWEEKNO => rule.by_week_no = decode_int_list(value, 1..=53)?,
            KW_RRULE_BYMONTH => rule.by_month = decode_int_list(value, 1..=12)?,
            KW_RRULE_BYSETPOS => rule.by_set_pos = decode_int_list(value, 1..=366)?,
            KW_RRULE_BYDAY => rule.by_day = decode_weekday_list(value)?,
            KW_RRULE_WKST => rule.wkst = Some(decode_weekday(value)?),
            _ => tracing::debug!(part, "ignoring unknown recurrence rule part"),
        }
    }
    Ok(rule)
}

fn decode_weekday(raw: &str) -> Result<Weekday, ValueError> {
    raw.parse().map_err(|_| ValueError::Enum {
        kind: "weekday",
        value: raw.to_string(),
    })
}

fn decode_weekday_list(raw: &str) -> Result<Vec<WeekdayNum>, ValueError> {
    weekdaynum()
        .separated_by(just(','))
        .at_least(1)
        .collect()
        .parse(raw)
        .into_result()
        .map_err(|errs| ValueError::Enum {
            kind: "weekday list",
            value: format!("{raw} ({})", first_error(errs)),
        })
}

/// ```txt
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// ordwk       = 1*2DIGIT       ;1 to 53
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
fn weekdaynum<'src>() -> impl Parser<'src, &'src str, WeekdayNum, Extra<'src>> {
    let ordwk = select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(2)
        .to_slice()
        .try_map(|s: &str, span| match lexical::parse::<i8, _>(s) {
            Ok(n) if (1..=53).contains(&n) => Ok(n),
            _ => Err(Rich::custom(span, "ordinal out of range 1..=53")),
        });

    let weekday = any()
        .filter(char::is_ascii_alphabetic)
        .repeated()
        .exactly(2)
        .to_slice()
        .try_map(|s: &str, span| {
            s.parse::<Weekday>()
                .map_err(|_| Rich::custom(span, format!("unknown weekday {s:?}")))
        });

    one_of("+-")
        .or_not()
        .then(ordwk)
        .map(|(sign, n)| if sign == Some('-') { -n } else { n })
        .or_not()
        .then(weekday)
        .map(|(ordinal, weekday)| WeekdayNum { ordinal, weekday })
}
