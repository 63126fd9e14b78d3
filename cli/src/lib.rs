// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command line driver: decode an iCalendar file and print what it contains.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]

mod cli;
mod config;
mod formatter;
mod report;
mod table;

pub use crate::cli::{APP_NAME, Cli, Input, run};
pub use crate::config::Config;
pub use crate::formatter::OutputFormat;
