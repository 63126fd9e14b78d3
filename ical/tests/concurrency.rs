// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Tests for running the tokenizer on its own thread.

use std::fmt::Write;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};

use icsread_ical::parser::parse_tokens_threaded;
use icsread_ical::syntax::Tokenizer;
use icsread_ical::{ParseError, ParseOptions, parse, parse_with};

fn calendar(events: usize) -> String {
    let mut src = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n");
    for i in 0..events {
        let hour = i % 24;
        write!(
            src,
            "BEGIN:VEVENT\r\nUID:{i}@example.com\r\nSUMMARY:Event {i}\r\n\
             DTSTART:20250101T{hour:02}0000Z\r\nEND:VEVENT\r\n",
        )
        .unwrap();
    }
    src.push_str("END:VCALENDAR\r\n");
    src
}

fn threaded(capacity: usize) -> ParseOptions {
    ParseOptions::threaded(NonZeroUsize::new(capacity).unwrap())
}

#[test_log::test]
fn threaded_parse_matches_sequential() {
    let src = calendar(200);
    let sequential = parse(&src).unwrap();
    for capacity in [1, 2, 64, 4096] {
        let calendar = parse_with(&src, &threaded(capacity)).unwrap();
        assert_eq!(calendar, sequential, "capacity {capacity}");
    }
    assert_eq!(sequential.events.len(), 200);
    assert_eq!(sequential.events[199].uid.as_deref(), Some("199@example.com"));
}

#[test_log::test]
fn threaded_parse_stops_producer_on_early_error() {
    let mut src = String::from("BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nSEQUENCE:x\r\nEND:VEVENT\r\n");
    src.push_str(&calendar(500)["BEGIN:VCALENDAR\r\n".len()..]);

    let err = parse_with(&src, &threaded(1)).unwrap_err();
    assert!(matches!(err, ParseError::Value { .. }), "{err}");
    assert_eq!(err.position().map(|p| p.line), Some(3));

    let total = Tokenizer::new(&src).count();
    let pulled = AtomicUsize::new(0);
    let tokens = Tokenizer::new(&src).inspect(|_| {
        pulled.fetch_add(1, Ordering::Relaxed);
    });
    let capacity = NonZeroUsize::new(1).unwrap();
    let err = parse_tokens_threaded(tokens, capacity).unwrap_err();
    assert!(matches!(err, ParseError::Value { .. }), "{err}");

    // Four tokens consumed, plus the queued one and the one held by a blocked send.
    let pulled = pulled.load(Ordering::Relaxed);
    assert!(total > 4000, "{total} tokens");
    assert!(pulled <= 8, "producer read {pulled} of {total} tokens");
}

#[test_log::test]
fn threaded_parse_reports_tokenizer_errors() {
    let src = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nUID:1\r\n";
    let sequential = parse(src).unwrap_err().to_string();
    let threaded = parse_with(src, &threaded(4)).unwrap_err().to_string();
    assert_eq!(sequential, threaded);
}
