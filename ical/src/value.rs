// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Value decoders for iCalendar property values.
//!
//! Each decoder is a pure function from the raw value text (and, where the
//! value type needs them, the property parameters) to a typed value. The
//! grammars follow RFC 5545 Section 3.3.

mod datetime;
mod duration;
mod numeric;
mod rrule;
mod text;

use chumsky::error::Rich;
use chumsky::extra;

pub use crate::value::datetime::{
    DateTimeValue, ZonedDateTime, decode_date_time, decode_date_time_list, decode_utc_offset,
    resolve_time_zone,
};
pub use crate::value::duration::{Duration, decode_duration};
pub use crate::value::numeric::{
    GeoPoint, decode_float, decode_geo, decode_int_list, decode_integer,
};
pub use crate::value::rrule::{
    Frequency, RecurrenceRule, Weekday, WeekdayNum, decode_recurrence_rule,
};
pub use crate::value::text::{decode_text_list, decode_url};

/// Parser extra shared by the value grammars
pub(crate) type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Render the first parser diagnostic
pub(crate) fn first_error(errs: Vec<Rich<'_, char>>) -> String {
    errs.into_iter()
        .next()
        .map(|e| e.to_string())
        .unwrap_or_default()
}
