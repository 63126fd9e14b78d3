// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parse options.

use std::num::NonZeroUsize;

/// Options controlling how a stream is parsed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct ParseOptions {
    /// Bound of the token queue between the tokenizer and the parser.
    ///
    /// `None` pulls tokens on demand on the calling thread. `Some(n)` runs the
    /// tokenizer on a separate thread that blocks once `n` tokens are waiting.
    pub token_queue_capacity: Option<NonZeroUsize>,
}

impl ParseOptions {
    /// Options that run the tokenizer on its own thread with a queue of
    /// `capacity` tokens
    #[must_use]
    pub const fn threaded(capacity: NonZeroUsize) -> Self {
        Self {
            token_queue_capacity: Some(capacity),
        }
    }
}
