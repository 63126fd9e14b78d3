// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Error types of the decoder.

use crate::syntax::Position;

/// Fatal error aborting a parse.
///
/// The first error encountered ends the parse, no partial calendar is returned.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Grammar violation found by the tokenizer or the parser
    #[error("syntax error at {position}: {message}")]
    Syntax {
        /// Where the violation was found
        position: Position,
        /// What went wrong
        message: String,
    },

    /// A property value failed to decode
    #[error("invalid value for {property} at {position}: {source}")]
    Value {
        /// Position of the offending value
        position: Position,
        /// Property name as written in the source
        property: String,
        /// Decoder failure
        source: ValueError,
    },

    /// Mismatched `END` or unsupported nested component
    #[error("structural error at {position}: {message}")]
    Structural {
        /// Position of the offending `BEGIN` or `END`
        position: Position,
        /// What went wrong
        message: String,
    },

    /// The input stream could not be read
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Source position of the error, if it has one
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        match self {
            Self::Syntax { position, .. }
            | Self::Value { position, .. }
            | Self::Structural { position, .. } => Some(*position),
            Self::Io(_) => None,
        }
    }
}

/// Failure of a value decoder
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// Not a signed decimal integer
    #[error("invalid integer {value:?}")]
    Integer {
        /// Raw text
        value: String,
    },

    /// Not a decimal floating point number
    #[error("invalid float {value:?}")]
    Float {
        /// Raw text
        value: String,
    },

    /// Matches none of the date-time forms
    #[error("invalid date-time {value:?}: {reason}")]
    DateTime {
        /// Raw text
        value: String,
        /// Decoder diagnostic
        reason: String,
    },

    /// `TZID` names no known time zone
    #[error("unknown time zone {tzid:?}")]
    TimeZone {
        /// The time zone identifier
        tzid: String,
    },

    /// List element outside its permitted range
    #[error("{value} is out of range {min}..={max}")]
    OutOfRange {
        /// Decoded element
        value: i64,
        /// Inclusive lower bound
        min: i64,
        /// Inclusive upper bound
        max: i64,
    },

    /// Not a member of an enumerated value set
    #[error("invalid {kind} {value:?}")]
    Enum {
        /// Name of the value set
        kind: &'static str,
        /// Raw text
        value: String,
    },

    /// Recurrence rule part without `=`
    #[error("malformed recurrence rule part {part:?}")]
    RulePart {
        /// Raw part
        part: String,
    },

    /// Geographic position that is not `latitude;longitude`
    #[error("invalid geographic position {value:?}")]
    Geo {
        /// Raw text
        value: String,
    },

    /// Unparsable URL
    #[error("invalid URL {value:?}: {reason}")]
    Url {
        /// Raw text
        value: String,
        /// Parser diagnostic
        reason: String,
    },

    /// Unparsable duration
    #[error("invalid duration {value:?}")]
    Duration {
        /// Raw text
        value: String,
    },

    /// Text list with a dangling escape
    #[error("invalid text {value:?}: {reason}")]
    Text {
        /// Raw text
        value: String,
        /// Parser diagnostic
        reason: String,
    },

    /// Unparsable UTC offset
    #[error("invalid UTC offset {value:?}")]
    UtcOffset {
        /// Raw text
        value: String,
    },

    /// Unparsable parameter block
    #[error("invalid parameters {block:?}: {reason}")]
    Parameters {
        /// Raw block
        block: String,
        /// Parser diagnostic
        reason: String,
    },
}
