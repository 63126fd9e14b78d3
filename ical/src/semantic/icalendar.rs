// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Root calendar component (VCALENDAR).

use crate::error::ParseError;
use crate::keyword::{
    KW_CALSCALE, KW_METHOD, KW_PRODID, KW_VCALENDAR, KW_VERSION, KW_VEVENT, KW_VTIMEZONE,
};
use crate::parser::{RawProperty, Step, TokenCursor, unsupported_child};
use crate::semantic::{Event, TimeZone, XProperties};
use crate::syntax::Token;

/// A parsed calendar
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Calendar {
    /// `VERSION`
    pub version: Option<String>,
    /// `PRODID`
    pub prod_id: Option<String>,
    /// `CALSCALE`
    pub cal_scale: Option<String>,
    /// `METHOD`
    pub method: Option<String>,
    /// Time zone definition, the last `VTIMEZONE` wins
    pub time_zone: Option<TimeZone>,
    /// Events in source order
    pub events: Vec<Event>,
    /// Non-standard properties
    pub x_properties: XProperties,
}

impl Calendar {
    /// Parse the body of a VCALENDAR whose `BEGIN` was already consumed
    pub(crate) fn parse<I: Iterator<Item = Token>>(
        cursor: &mut TokenCursor<I>,
    ) -> Result<Self, ParseError> {
        let mut calendar = Self::default();
        loop {
            match cursor.step(KW_VCALENDAR)? {
                Step::Property(prop) => calendar.apply(prop)?,
                Step::Child { name, position } => match name.as_str() {
                    KW_VEVENT => {
                        let event = Event::parse(cursor)?;
                        tracing::debug!(uid = event.uid.as_deref(), "attached event");
                        calendar.events.push(event);
                    }
                    KW_VTIMEZONE => {
                        let time_zone = TimeZone::parse(cursor)?;
                        tracing::debug!(
                            tzid = time_zone.tzid.as_ref().map(|tz| tz.name.as_str()),
                            "attached time zone"
                        );
                        calendar.time_zone = Some(time_zone);
                    }
                    _ => return Err(unsupported_child(KW_VCALENDAR, &name, position)),
                },
                Step::Closed => return Ok(calendar),
            }
        }
    }

    fn apply(&mut self, prop: RawProperty) -> Result<(), ParseError> {
        match prop.name.to_ascii_uppercase().as_str() {
            KW_VERSION => self.version = Some(prop.value),
            KW_PRODID => self.prod_id = Some(prop.value),
            KW_CALSCALE => self.cal_scale = Some(prop.value),
            KW_METHOD => self.method = Some(prop.value),
            _ => prop.store_extension(KW_VCALENDAR, &mut self.x_properties)?,
        }
        Ok(())
    }
}
