// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Duration value type parser as defined in RFC 5545 Section 3.3.6.

use chumsky::prelude::*;
use jiff::SignedDuration;

use crate::error::ValueError;
use crate::value::Extra;

/// Duration Value defined in RFC 5545 Section 3.3.6
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duration {
    /// Date and Time Duration
    DateTime {
        /// Whether the duration is positive
        positive: bool,
        /// Day Duration
        day: u32,
        /// Hour Duration
        hour: u32,
        /// Minute Duration
        minute: u32,
        /// Second Duration
        second: u32,
    },

    /// Week Duration
    Week {
        /// Whether the duration is positive
        positive: bool,
        /// Week Duration
        week: u32,
    },
}

impl Duration {
    /// Exact length of the duration, counting a day as 24 hours
    #[must_use]
    pub fn to_signed_duration(self) -> SignedDuration {
        let (positive, secs) = match self {
            Self::DateTime {
                positive,
                day,
                hour,
                minute,
                second,
            } => (
                positive,
                i64::from(day) * 86_400
                    + i64::from(hour) * 3_600
                    + i64::from(minute) * 60
                    + i64::from(second),
            ),
            Self::Week { positive, week } => (positive, i64::from(week) * 7 * 86_400),
        };
        SignedDuration::from_secs(if positive { secs } else { -secs })
    }
}

/// Decode a duration value.
///
/// ## Errors
/// If the text is not a valid duration.
pub fn decode_duration(raw: &str) -> Result<Duration, ValueError> {
    duration()
        .parse(raw)
        .into_result()
        .map_err(|_| ValueError::Duration {
            value: raw.to_string(),
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// dur-value  = (["+"] / "-") "P" (dur-date / dur-time / dur-week)
///
/// dur-date   = dur-day [dur-time]
/// dur-time   = "T" (dur-hour / dur-minute / dur-second)
/// dur-week   = 1*DIGIT "W"
/// dur-hour   = 1*DIGIT "H" [dur-minute]
/// dur-minute = 1*DIGIT "M" [dur-second]
/// dur-second = 1*DIGIT "S"
/// dur-day    = 1*DIGIT "D"
/// ```
fn duration<'src>() -> impl Parser<'src, &'src str, Duration, Extra<'src>> {
    // case-sensitive
    let int = select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(10) // u32 max is 10 digits: 4_294_967_295
        .to_slice()
        .try_map(|s: &str, span| {
            lexical::parse::<u32, _>(s).map_err(|_| Rich::custom(span, "duration out of range"))
        });

    let week = int.clone().then_ignore(just('W'));

    let second_val = int.clone().then_ignore(just('S'));
    let minute_val = int.clone().then_ignore(just('M'));
    let hour_val = int.clone().then_ignore(just('H'));

    // dur-second = 1*DIGIT "S"
    let second_only = second_val.clone().map(|s| (0, 0, s));

    // dur-minute = 1*DIGIT "M" [dur-second]
    let minute_with_second = minute_val
        .clone()
        .then(second_val.clone().or_not())
        .map(|(m, s)| (0, m, s.unwrap_or(0)));

    // dur-hour = 1*DIGIT "H" [dur-minute]
    let hour_with_minute = hour_val
        .then(minute_val.then(second_val.or_not()).or_not())
        .map(|(h, opt_ms)| match opt_ms {
            Some((m, opt_s)) => (h, m, opt_s.unwrap_or(0)),
            None => (h, 0, 0),
        });

    // dur-time = "T" (dur-hour / dur-minute / dur-second)
    let time = just('T').ignore_then(choice((hour_with_minute, minute_with_second, second_only)));

    let day = int.then_ignore(just('D'));
    let date = day.then(time.clone().or_not());

    let prefix = one_of("+-")
        .or_not()
        .map(|sign| !matches!(sign, Some('-')))
        .then_ignore(just('P'));

    choice((
        prefix.clone().then(date).map(|(positive, (day, time))| {
            let (hour, minute, second) = time.unwrap_or((0, 0, 0));
            Duration::DateTime {
                positive,
                day,
                hour,
                minute,
                second,
            }
        }),
        prefix
            .clone()
            .then(time)
            .map(|(positive, (hour, minute, second))| Duration::DateTime {
                positive,
                day: 0,
                hour,
                minute,
                second,
            }),
        prefix
            .then(week)
            .map(|(positive, week)| Duration::Week { positive, week }),
    ))
}

#[cfg(test)]
mod tests {
    use super::Duration::{DateTime, Week};
    use super::*;

    #[test]
    fn decodes_duration() {
        #[rustfmt::skip]
        let success_cases = [
            // examples from RFC 5545 Section 3.3.6
            ("P15DT5H0M20S", DateTime { positive: true, day: 15, hour: 5, minute: 0, second: 20 }),
            ("P7W",  Week { positive: true,  week: 7 }),
            // extra tests
            ("+P3W", Week { positive: true,  week: 3 }),
            ("-P1W", Week { positive: false, week: 1 }),
            ("P1D",          DateTime { positive: true,  day: 1, hour:  0, minute:  0, second:  0 }),
            ("-PT10H11M12S", DateTime { positive: false, day: 0, hour: 10, minute: 11, second: 12 }),
            ("PT15M",        DateTime { positive: true,  day: 0, hour:  0, minute: 15, second:  0 }),
            ("PT30S",        DateTime { positive: true,  day: 0, hour:  0, minute:  0, second: 30 }),
            ("PT1H30M",      DateTime { positive: true,  day: 0, hour:  1, minute: 30, second:  0 }),
        ];
        for (src, expected) in success_cases {
            assert_eq!(decode_duration(src), Ok(expected), "Failed to parse: {src}");
        }

        let fail_cases = [
            "P",           // missing duration value
            "PT",          // missing time value
            "P3X",         // invalid designator
            "P-3W",        // invalid negative sign position
            "P3DT4H5M6",   // missing 'S' designator
            "3W",          // missing 'P' designator
            "P10H11M12S3", // missing 'T' designator
            "pt15m",       // lowercase designators
        ];
        for src in fail_cases {
            assert!(decode_duration(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn converts_to_signed_duration() {
        assert_eq!(
            decode_duration("-PT15M").unwrap().to_signed_duration(),
            SignedDuration::from_mins(-15)
        );
        assert_eq!(
            decode_duration("P1W").unwrap().to_signed_duration(),
            SignedDuration::from_hours(7 * 24)
        );
        assert_eq!(
            decode_duration("P1DT1S").unwrap().to_signed_duration(),
            SignedDuration::from_secs(86_401)
        );
    }
}
