// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Event component (VEVENT).

use url::Url;

use crate::error::{ParseError, ValueError};
use crate::keyword::{
    KW_ATTENDEE, KW_CATEGORIES, KW_CLASS, KW_COMMENT, KW_CREATED, KW_DESCRIPTION, KW_DTEND,
    KW_DTSTAMP, KW_DTSTART, KW_DURATION, KW_EXDATE, KW_GEO, KW_LAST_MODIFIED, KW_LOCATION,
    KW_ORGANIZER, KW_PARTICIPANT, KW_PRIORITY, KW_RECURRENCE_ID, KW_RRULE, KW_SEQUENCE, KW_STATUS,
    KW_SUMMARY, KW_TRANSP, KW_UID, KW_URL, KW_VALARM, KW_VEVENT,
};
use crate::parser::{RawProperty, Step, TokenCursor, unsupported_child};
use crate::semantic::properties::decode_keyword;
use crate::semantic::{Alarm, CalAddress, XProperties};
use crate::syntax::Token;
use crate::value::{
    DateTimeValue, Duration, GeoPoint, RecurrenceRule, decode_duration, decode_geo,
    decode_integer, decode_recurrence_rule, decode_text_list, decode_url,
};

/// A scheduled event
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Event {
    /// Unique identifier, not enforced
    pub uid: Option<String>,
    /// Revision sequence number
    pub sequence: Option<i64>,
    /// Access classification
    pub class: Option<Classification>,
    /// Confirmation status
    pub status: Option<EventStatus>,
    /// Whether the event blocks time
    pub transp: Option<Transparency>,
    /// Short summary
    pub summary: Option<String>,
    /// Full description
    pub description: Option<String>,
    /// Venue
    pub location: Option<String>,
    /// Free-form comment
    pub comment: Option<String>,
    /// Categories, in source order
    pub categories: Vec<String>,
    /// Geographic position
    pub geo: Option<GeoPoint>,
    /// Associated URL
    pub url: Option<Url>,
    /// Start
    pub dt_start: Option<DateTimeValue>,
    /// End
    pub dt_end: Option<DateTimeValue>,
    /// Time the object was created or last sent
    pub dt_stamp: Option<DateTimeValue>,
    /// Creation time in the calendar store
    pub created: Option<DateTimeValue>,
    /// Last revision time
    pub last_modified: Option<DateTimeValue>,
    /// Instance of a recurring event this one overrides
    pub recurrence_id: Option<DateTimeValue>,
    /// Length, alternative to `dt_end`
    pub duration: Option<Duration>,
    /// Priority, 0 (undefined) to 9 (lowest)
    pub priority: Option<u8>,
    /// Dates excluded from the recurrence set, all `EXDATE` lines combined
    pub ex_dates: Vec<DateTimeValue>,
    /// Recurrence rule
    pub rrule: Option<RecurrenceRule>,
    /// Reminder, the last `VALARM` wins
    pub alarm: Option<Alarm>,
    /// Organizer
    pub organizer: Option<CalAddress>,
    /// Attendees in source order
    pub attendees: Vec<CalAddress>,
    /// Participants in source order
    pub participants: Vec<CalAddress>,
    /// Non-standard properties
    pub x_properties: XProperties,
}

/// Access classification (`CLASS`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum Classification {
    Public,
    Private,
    Confidential,
}

/// Event status (`STATUS`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum EventStatus {
    Tentative,
    Confirmed,
    Cancelled,
}

/// Time transparency (`TRANSP`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Transparency {
    /// Blocks time on busy time searches
    Opaque,
    /// Invisible to busy time searches
    Transparent,
}

impl Event {
    /// Parse the body of a VEVENT whose `BEGIN` was already consumed
    pub(crate) fn parse<I: Iterator<Item = Token>>(
        cursor: &mut TokenCursor<I>,
    ) -> Result<Self, ParseError> {
        let mut event = Self::default();
        loop {
            match cursor.step(KW_VEVENT)? {
                Step::Property(prop) => event.apply(prop)?,
                Step::Child { name, position } => match name.as_str() {
                    KW_VALARM => {
                        let alarm = Alarm::parse(cursor)?;
                        tracing::debug!(action = ?alarm.action, "attached alarm");
                        event.alarm = Some(alarm);
                    }
                    _ => return Err(unsupported_child(KW_VEVENT, &name, position)),
                },
                Step::Closed => return Ok(event),
            }
        }
    }

    fn apply(&mut self, prop: RawProperty) -> Result<(), ParseError> {
        match prop.name.to_ascii_uppercase().as_str() {
            KW_UID => self.uid = Some(prop.value),
            KW_SEQUENCE => self.sequence = Some(prop.decode(decode_integer)?),
            KW_CLASS => self.class = Some(prop.decode(|v| decode_keyword(v, "classification"))?),
            KW_STATUS => self.status = Some(prop.decode(|v| decode_keyword(v, "event status"))?),
            KW_TRANSP => self.transp = Some(prop.decode(|v| decode_keyword(v, "transparency"))?),
            KW_SUMMARY => self.summary = Some(prop.value),
            KW_DESCRIPTION => self.description = Some(prop.value),
            KW_LOCATION => self.location = Some(prop.value),
            KW_COMMENT => self.comment = Some(prop.value),
            KW_CATEGORIES => self.categories = prop.decode(decode_text_list)?,
            KW_GEO => self.geo = Some(prop.decode(decode_geo)?),
            KW_URL => self.url = Some(prop.decode(decode_url)?),
            KW_DTSTART => self.dt_start = Some(prop.date_time()?),
            KW_DTEND => self.dt_end = Some(prop.date_time()?),
            KW_DTSTAMP => self.dt_stamp = Some(prop.date_time()?),
            KW_CREATED => self.created = Some(prop.date_time()?),
            KW_LAST_MODIFIED => self.last_modified = Some(prop.date_time()?),
            KW_RECURRENCE_ID => self.recurrence_id = Some(prop.date_time()?),
            KW_DURATION => self.duration = Some(prop.decode(decode_duration)?),
            KW_PRIORITY => self.priority = Some(prop.decode(decode_priority)?),
            KW_EXDATE => self.ex_dates.extend(prop.date_time_list()?),
            KW_RRULE => self.rrule = Some(prop.decode(decode_recurrence_rule)?),
            KW_ORGANIZER => self.organizer = Some(cal_address(prop)),
            KW_ATTENDEE => self.attendees.push(cal_address(prop)),
            KW_PARTICIPANT => self.participants.push(cal_address(prop)),
            _ => prop.store_extension(KW_VEVENT, &mut self.x_properties)?,
        }
        Ok(())
    }
}

pub(crate) fn cal_address(prop: RawProperty) -> CalAddress {
    CalAddress {
        value: prop.value,
        parameters: prop.parameters,
    }
}

fn decode_priority(raw: &str) -> Result<u8, ValueError> {
    let priority: i64 = decode_integer(raw)?;
    match u8::try_from(priority) {
        Ok(p @ 0..=9) => Ok(p),
        _ => Err(ValueError::OutOfRange {
            value: priority,
            min: 0,
            max: 9,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_enumerated_values_ignoring_case() {
        assert_eq!(decode_keyword("public", "classification"), Ok(Classification::Public));
        assert_eq!(decode_keyword("CANCELLED", "event status"), Ok(EventStatus::Cancelled));
        assert_eq!(decode_keyword("Transparent", "transparency"), Ok(Transparency::Transparent));
        assert_eq!(
            decode_keyword::<EventStatus>("DONE", "event status"),
            Err(ValueError::Enum {
                kind: "event status",
                value: "DONE".to_string()
            })
        );
    }

    #[test]
    fn priority_is_bounded() {
        assert_eq!(decode_priority("0"), Ok(0));
        assert_eq!(decode_priority("9"), Ok(9));
        assert_eq!(
            decode_priority("10"),
            Err(ValueError::OutOfRange {
                value: 10,
                min: 0,
                max: 9
            })
        );
        assert!(decode_priority("-1").is_err());
        assert!(decode_priority("high").is_err());
    }
}
