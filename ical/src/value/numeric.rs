// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Numeric values as defined in RFC 5545 Sections 3.3.7 and 3.3.8, and the
//! GEO property value.

use std::ops::RangeInclusive;

use chumsky::prelude::*;

use crate::error::ValueError;
use crate::value::Extra;

/// Geographic position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// integer    = (["+"] / "-") 1*DIGIT
/// ```
fn integer<'src>() -> impl Parser<'src, &'src str, i64, Extra<'src>> + Clone {
    one_of("+-")
        .or_not()
        .then(select! { c @ '0'..='9' => c }.repeated().at_least(1))
        .to_slice()
        .try_map(|s: &str, span| {
            lexical::parse::<i64, _>(s).map_err(|_| Rich::custom(span, "integer out of range"))
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// float      = (["+"] / "-") 1*DIGIT ["." 1*DIGIT]
/// ```
fn float<'src>() -> impl Parser<'src, &'src str, f64, Extra<'src>> + Clone {
    let digits = select! { c @ '0'..='9' => c }.repeated().at_least(1);
    one_of("+-")
        .or_not()
        .then(digits.clone())
        .then(just('.').then(digits).or_not())
        .to_slice()
        .try_map(|s: &str, span| match lexical::parse::<f64, _>(s) {
            Ok(f) if f.is_finite() => Ok(f),
            _ => Err(Rich::custom(span, "float out of range")),
        })
}

/// Decode a signed decimal integer into any integer type it fits.
///
/// ## Errors
/// If the text is not an integer or does not fit `T`.
pub fn decode_integer<T: TryFrom<i64>>(raw: &str) -> Result<T, ValueError> {
    let err = || ValueError::Integer {
        value: raw.to_string(),
    };
    let n = integer().parse(raw).into_result().map_err(|_| err())?;
    T::try_from(n).map_err(|_| err())
}

/// Decode a floating point number.
///
/// ## Errors
/// If the text is not a float.
pub fn decode_float(raw: &str) -> Result<f64, ValueError> {
    float()
        .parse(raw)
        .into_result()
        .map_err(|_| ValueError::Float {
            value: raw.to_string(),
        })
}

/// Decode a comma separated integer list, checking every element against
/// the inclusive `range`.
///
/// ## Errors
/// If an element is not an integer or lies outside `range`.
pub fn decode_int_list<T: TryFrom<i64>>(
    raw: &str,
    range: RangeInclusive<i64>,
) -> Result<Vec<T>, ValueError> {
    raw.split(',')
        .map(|item| {
            let n: i64 = decode_integer(item)?;
            let out_of_range = || ValueError::OutOfRange {
                value: n,
                min: *range.start(),
                max: *range.end(),
            };
            if !range.contains(&n) {
                return Err(out_of_range());
            }
            T::try_from(n).map_err(|_| out_of_range())
        })
        .collect()
}

/// Decode a GEO value.
///
/// Format Definition:
/// ```txt
/// geovalue = float ";" float
/// ;Latitude and Longitude components
/// ```
///
/// ## Errors
/// If the value does not have exactly two float elements.
pub fn decode_geo(raw: &str) -> Result<GeoPoint, ValueError> {
    let err = || ValueError::Geo {
        value: raw.to_string(),
    };
    let parts: Vec<&str> = raw.split(';').collect();
    let [latitude, longitude] = parts.as_slice() else {
        return Err(err());
    };
    Ok(GeoPoint {
        latitude: decode_float(latitude).map_err(|_| err())?,
        longitude: decode_float(longitude).map_err(|_| err())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_integer() {
        #[rustfmt::skip]
        let success_cases = [
            // examples from RFC 5545 Section 3.3.8
            ("1234567890", 1_234_567_890),
            ("-1234567890", -1_234_567_890),
            ("+1234567890", 1_234_567_890),
            ("432109876", 432_109_876),
            // extra tests
            ("0", 0),
            ("-0", 0),
            ("007", 7),
        ];
        for (src, expected) in success_cases {
            assert_eq!(decode_integer::<i64>(src), Ok(expected), "{src}");
        }

        let fail_cases = ["", "+", "1.5", "12a", " 1", "99999999999999999999"];
        for src in fail_cases {
            assert!(decode_integer::<i64>(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn integer_must_fit_target_type() {
        assert_eq!(decode_integer::<u32>("42"), Ok(42));
        assert!(decode_integer::<u32>("-1").is_err());
        assert!(decode_integer::<i8>("300").is_err());
    }

    #[test]
    fn decodes_float() {
        #[rustfmt::skip]
        let success_cases = [
            // examples from RFC 5545 Section 3.3.7
            ("1000000.0000001", 1_000_000.000_000_1),
            ("1.333", 1.333),
            ("-2.75", -2.75),
            // extra tests
            ("+2", 2.0),
            ("0.5", 0.5),
        ];
        for (src, expected) in success_cases {
            let f = decode_float(src).unwrap();
            assert!((f - expected).abs() < 1e-9, "{src}: {f}");
        }

        let fail_cases = ["", ".5", "1.", "1e5", "abc", "1.2.3"];
        for src in fail_cases {
            assert!(decode_float(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn decodes_int_list_with_ranges() {
        assert_eq!(decode_int_list::<u8>("2", 1..=12), Ok(vec![2]));
        assert_eq!(
            decode_int_list::<u8>("0,15,30,45", 0..=59),
            Ok(vec![0, 15, 30, 45])
        );
        assert_eq!(decode_int_list::<u16>("366", 1..=366), Ok(vec![366]));

        assert_eq!(
            decode_int_list::<u8>("13", 1..=12),
            Err(ValueError::OutOfRange {
                value: 13,
                min: 1,
                max: 12
            })
        );
        assert_eq!(
            decode_int_list::<u8>("-1", 1..=31),
            Err(ValueError::OutOfRange {
                value: -1,
                min: 1,
                max: 31
            })
        );
        assert!(matches!(
            decode_int_list::<u8>("1,,2", 1..=31),
            Err(ValueError::Integer { .. })
        ));
        assert!(decode_int_list::<u8>("", 1..=31).is_err());
    }

    #[test]
    fn decodes_geo_from_both_elements() {
        let geo = decode_geo("37.5739497;-85.7399606").unwrap();
        assert!((geo.latitude - 37.573_949_7).abs() < 1e-9);
        assert!((geo.longitude - -85.739_960_6).abs() < 1e-9);

        let fail_cases = ["37.5", "1;2;3", "a;b", ";", "37.5,-85.7"];
        for src in fail_cases {
            assert_eq!(
                decode_geo(src),
                Err(ValueError::Geo {
                    value: src.to_string()
                }),
                "{src}"
            );
        }
    }
}
