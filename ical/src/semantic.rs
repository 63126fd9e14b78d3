// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Typed calendar model and the per-component parsers that build it.
//!
//! Each component knows a fixed set of properties. Names starting with `X-`
//! are kept in the component's `x_properties` map under the text after the
//! prefix; any other unknown name aborts the parse.

mod icalendar;
mod properties;
mod valarm;
mod vevent;
mod vtimezone;

pub use crate::semantic::icalendar::Calendar;
pub use crate::semantic::properties::{Attachment, CalAddress, XProperties};
pub use crate::semantic::valarm::{Alarm, AlarmAction, Trigger, TriggerRelation, TriggerValue};
pub use crate::semantic::vevent::{Classification, Event, EventStatus, Transparency};
pub use crate::semantic::vtimezone::{Observance, ResolvedTimeZone, TimeZone};
pub use crate::value::GeoPoint;
