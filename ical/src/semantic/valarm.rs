// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Alarm component (VALARM).

use crate::error::{ParseError, ValueError};
use crate::keyword::{
    KW_ACTION, KW_ATTACH, KW_ATTENDEE, KW_DESCRIPTION, KW_DURATION, KW_RELATED, KW_REPEAT,
    KW_SUMMARY, KW_TRIGGER, KW_VALARM, KW_VALUE, KW_VALUE_DATE_TIME,
};
use crate::parameter::Parameters;
use crate::parser::{RawProperty, Step, TokenCursor, unsupported_child};
use crate::semantic::properties::decode_keyword;
use crate::semantic::vevent::cal_address;
use crate::semantic::{Attachment, CalAddress, XProperties};
use crate::syntax::Token;
use crate::value::{DateTimeValue, Duration, decode_date_time, decode_duration, decode_integer};

/// Reminder attached to an event
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Alarm {
    /// What happens when the alarm fires
    pub action: Option<AlarmAction>,
    /// When the alarm fires
    pub trigger: Option<Trigger>,
    /// Additional repetitions after the first trigger
    pub repeat: Option<u32>,
    /// Delay between repetitions
    pub duration: Option<Duration>,
    /// Text shown by display and email alarms
    pub description: Option<String>,
    /// Subject of email alarms
    pub summary: Option<String>,
    /// Recipients of email alarms
    pub attendees: Vec<CalAddress>,
    /// Sound or attachment, the last `ATTACH` wins
    pub attach: Option<Attachment>,
    /// Non-standard properties
    pub x_properties: XProperties,
}

/// Alarm action (`ACTION`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum AlarmAction {
    Audio,
    Display,
    Email,
    Procedure,
}

/// Alarm trigger (`TRIGGER`)
#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    /// Offset or absolute time
    pub value: TriggerValue,
    /// Anchor of a relative trigger, from the `RELATED` parameter
    pub related: Option<TriggerRelation>,
}

/// Value of a [`Trigger`]
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerValue {
    /// Offset from the start or end of the event
    Duration(Duration),
    /// Absolute time, selected with `VALUE=DATE-TIME`
    DateTime(DateTimeValue),
}

/// Anchor of a relative trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum TriggerRelation {
    Start,
    End,
}

impl Alarm {
    /// Parse the body of a VALARM whose `BEGIN` was already consumed
    pub(crate) fn parse<I: Iterator<Item = Token>>(
        cursor: &mut TokenCursor<I>,
    ) -> Result<Self, ParseError> {
        let mut alarm = Self::default();
        loop {
            match cursor.step(KW_VALARM)? {
                Step::Property(prop) => alarm.apply(prop)?,
                Step::Child { name, position } => {
                    return Err(unsupported_child(KW_VALARM, &name, position));
                }
                Step::Closed => return Ok(alarm),
            }
        }
    }

    fn apply(&mut self, prop: RawProperty) -> Result<(), ParseError> {
        match prop.name.to_ascii_uppercase().as_str() {
            KW_ACTION => self.action = Some(prop.decode(|v| decode_keyword(v, "alarm action"))?),
            KW_TRIGGER => {
                let params = &prop.parameters;
                self.trigger = Some(prop.decode(|v| decode_trigger(v, params))?);
            }
            KW_REPEAT => self.repeat = Some(prop.decode(decode_integer)?),
            KW_DURATION => self.duration = Some(prop.decode(decode_duration)?),
            KW_DESCRIPTION => self.description = Some(prop.value),
            KW_SUMMARY => self.summary = Some(prop.value),
            KW_ATTENDEE => self.attendees.push(cal_address(prop)),
            KW_ATTACH => {
                self.attach = Some(Attachment {
                    value: prop.value,
                    parameters: prop.parameters,
                });
            }
            _ => prop.store_extension(KW_VALARM, &mut self.x_properties)?,
        }
        Ok(())
    }
}

/// Decode a trigger, a duration unless `VALUE=DATE-TIME` is given.
fn decode_trigger(raw: &str, params: &Parameters) -> Result<Trigger, ValueError> {
    let related = params
        .get(KW_RELATED)
        .map(|v| decode_keyword(v, "trigger relation"))
        .transpose()?;

    let value = match params.get(KW_VALUE) {
        Some(v) if v.eq_ignore_ascii_case(KW_VALUE_DATE_TIME) => {
            TriggerValue::DateTime(decode_date_time(raw, params)?)
        }
        _ => TriggerValue::Duration(decode_duration(raw)?),
    };
    Ok(Trigger { value, related })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_defaults_to_duration() {
        let trigger = decode_trigger("-PT15M", &Parameters::default()).unwrap();
        assert_eq!(
            trigger.value,
            TriggerValue::Duration(Duration::DateTime {
                positive: false,
                day: 0,
                hour: 0,
                minute: 15,
                second: 0,
            })
        );
        assert_eq!(trigger.related, None);
    }

    #[test]
    fn trigger_reads_parameters() {
        let mut params = Parameters::default();
        params.insert("RELATED", "END");
        let trigger = decode_trigger("PT5M", &params).unwrap();
        assert_eq!(trigger.related, Some(TriggerRelation::End));

        let mut params = Parameters::default();
        params.insert("VALUE", "date-time");
        let trigger = decode_trigger("19980101T050000Z", &params).unwrap();
        assert!(matches!(trigger.value, TriggerValue::DateTime(DateTimeValue::Utc(_))));
    }

    #[test]
    fn trigger_rejects_bad_relation() {
        let mut params = Parameters::default();
        params.insert("RELATED", "MIDDLE");
        assert!(matches!(
            decode_trigger("PT5M", &params),
            Err(ValueError::Enum { kind: "trigger relation", .. })
        ));
    }
}
