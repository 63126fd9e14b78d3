// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use clap::{Arg, ArgMatches, arg, value_parser};
use colored::{Color, Colorize};
use icsread_ical::{Calendar, DateTimeValue, Event, EventStatus};

use crate::table::{Column, Table};

/// How the decoded calendar is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Calendar header and a table of events
    Summary,
    /// The full decoded model
    Debug,
}

impl OutputFormat {
    pub fn arg() -> Arg {
        arg!(--format <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("summary")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("format")
            .copied()
            .unwrap_or(OutputFormat::Summary)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CalendarFormatter {
    format: OutputFormat,
}

impl CalendarFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format<'a>(&'a self, calendar: &'a Calendar) -> Display<'a> {
        Display {
            calendar,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    calendar: &'a Calendar,
    formatter: &'a CalendarFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            OutputFormat::Debug => writeln!(f, "{:#?}", self.calendar),
            OutputFormat::Summary => self.summary(f),
        }
    }
}

impl Display<'_> {
    fn summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let calendar = self.calendar;
        let fields = [
            ("Version", calendar.version.as_deref()),
            ("Product", calendar.prod_id.as_deref()),
            ("Method", calendar.method.as_deref()),
            (
                "Time zone",
                calendar
                    .time_zone
                    .as_ref()
                    .and_then(|tz| tz.tzid.as_ref())
                    .map(|tzid| tzid.name.as_str()),
            ),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                writeln!(f, "{:<10} {value}", format!("{label}:").bold())?;
            }
        }

        writeln!(f, "🗓️ {} ({})", "Events".bold(), calendar.events.len())?;
        if !calendar.events.is_empty() {
            let columns = [
                EventColumn::Start,
                EventColumn::Summary,
                EventColumn::Location,
                EventColumn::Uid,
            ];
            write!(f, "{}", Table::new(&columns, &calendar.events))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum EventColumn {
    Start,
    Summary,
    Location,
    Uid,
}

impl Column<Event> for EventColumn {
    fn name(&self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Summary => "SUMMARY",
            Self::Location => "LOCATION",
            Self::Uid => "UID",
        }
    }

    fn format(&self, event: &Event) -> String {
        let text = match self {
            Self::Start => return event.dt_start.as_ref().map(format_date_time).unwrap_or_default(),
            Self::Summary => event.summary.as_deref(),
            Self::Location => event.location.as_deref(),
            Self::Uid => event.uid.as_deref(),
        };
        text.unwrap_or_default().to_string()
    }

    fn color(&self, event: &Event) -> Option<Color> {
        match (self, event.status) {
            (_, Some(EventStatus::Cancelled)) => Some(Color::BrightBlack),
            (Self::Start, Some(EventStatus::Tentative)) => Some(Color::Yellow),
            _ => None,
        }
    }
}

fn format_date_time(value: &DateTimeValue) -> String {
    match value {
        DateTimeValue::Date(date) => date.strftime("%Y-%m-%d").to_string(),
        DateTimeValue::Floating(dt) => dt.strftime("%Y-%m-%d %H:%M").to_string(),
        DateTimeValue::Utc(_) => format!("{} UTC", value.civil().strftime("%Y-%m-%d %H:%M")),
        DateTimeValue::Zoned(z) => format!("{} {}", z.zoned.strftime("%Y-%m-%d %H:%M"), z.tzid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRC: &str = "\
BEGIN:VCALENDAR\r
VERSION:2.0\r
PRODID:-//Example//EN\r
BEGIN:VEVENT\r
UID:a@example.com\r
SUMMARY:Standup\r
DTSTART;TZID=Europe/Berlin:20250106T100000\r
END:VEVENT\r
BEGIN:VEVENT\r
UID:b@example.com\r
SUMMARY:Holiday\r
LOCATION:Home\r
DTSTART:20250110\r
END:VEVENT\r
END:VCALENDAR\r
";

    #[test]
    fn summary_lists_events() {
        colored::control::set_override(false);
        let calendar = icsread_ical::parse(SRC).unwrap();
        let out = CalendarFormatter::new(OutputFormat::Summary)
            .format(&calendar)
            .to_string();

        assert!(out.contains("Version:   2.0"), "{out}");
        assert!(out.contains("Product:   -//Example//EN"), "{out}");
        assert!(out.contains("Events (2)"), "{out}");
        assert!(out.contains("2025-01-06 10:00 Europe/Berlin"), "{out}");
        assert!(out.contains("2025-01-10"), "{out}");
        assert!(out.contains("Holiday"), "{out}");
        assert!(!out.contains("Method"), "{out}");
    }

    #[test]
    fn debug_prints_model() {
        let calendar = icsread_ical::parse(SRC).unwrap();
        let out = CalendarFormatter::new(OutputFormat::Debug)
            .format(&calendar)
            .to_string();
        assert!(out.starts_with("Calendar {"), "{out}");
        assert!(out.contains("\"b@example.com\""), "{out}");
    }

    #[test]
    fn formats_each_date_time_form() {
        let utc = DateTimeValue::Utc("2025-01-06T09:00:00Z".parse().unwrap());
        assert_eq!(format_date_time(&utc), "2025-01-06 09:00 UTC");
        let floating = DateTimeValue::Floating(jiff::civil::datetime(2025, 1, 6, 9, 30, 0, 0));
        assert_eq!(format_date_time(&floating), "2025-01-06 09:30");
    }
}
