// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::ffi::OsString;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::{fmt, fs};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt as log_fmt};

use crate::config::Config;
use crate::formatter::{CalendarFormatter, OutputFormat};
use crate::report;

/// Name of the application
pub const APP_NAME: &str = "icsread";

/// Run the command line interface.
#[must_use]
pub fn run() -> ExitCode {
    let cli = match Cli::parse() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.verbose);
    match cli.run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

/// Install the log subscriber; `--verbose` forces debug output, otherwise
/// `RUST_LOG` applies with a default of `warn`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(log_fmt::layer().with_writer(io::stderr))
        .try_init();
    if let Err(e) = result {
        eprintln!("{} failed to install logger: {e}", "Warning:".yellow());
    }
}

/// Command-line interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// Log debug information
    pub verbose: bool,

    /// How to print the calendar
    pub format: OutputFormat,

    /// Where to read the calendar from
    pub input: Input,
}

/// Source of the calendar text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Standard input
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => write!(f, "<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Input {
    fn read(&self) -> Result<String, Box<dyn Error>> {
        match self {
            Self::Stdin => {
                let mut src = String::new();
                io::stdin()
                    .read_to_string(&mut src)
                    .map_err(|e| format!("Failed to read standard input: {e}"))?;
                Ok(src)
            }
            Self::File(path) => fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {e}", path.display()).into()),
        }
    }
}

impl Cli {
    /// Create the command-line interface
    #[must_use]
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Decode an iCalendar file and print its calendar.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $ICSREAD_CONFIG, then to icsread/config.toml \
in the user configuration directory if it exists.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(arg!(-v --verbose "Log debug information to standard error"))
            .arg(OutputFormat::arg())
            .arg(
                arg!([FILE] "iCalendar file to read, `-` or nothing for standard input")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
    }

    /// Parse the command-line arguments
    ///
    /// ## Errors
    /// Never in practice, clap exits on invalid arguments.
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let matches = Self::command().get_matches();
        Ok(Self::from(&matches))
    }

    /// Parse the specified arguments
    ///
    /// ## Errors
    /// If the arguments are invalid.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        Ok(Self::from(&matches))
    }

    /// Create a CLI instance from the `ArgMatches`
    #[must_use]
    pub fn from(matches: &ArgMatches) -> Self {
        let input = match matches.get_one::<PathBuf>("FILE") {
            Some(path) if path.as_os_str() != "-" => Input::File(path.clone()),
            _ => Input::Stdin,
        };

        Self {
            config: matches.get_one("config").cloned(),
            verbose: matches.get_flag("verbose"),
            format: OutputFormat::from(matches),
            input,
        }
    }

    /// Decode the input and print it, returning whether it decoded.
    ///
    /// A decoding failure is reported against the source text.
    ///
    /// ## Errors
    /// If the configuration or the input cannot be read.
    pub fn run(self) -> Result<bool, Box<dyn Error>> {
        let config = Config::load(self.config.as_deref())?;
        tracing::debug!(?config, input = %self.input, "decoding calendar");

        let src = self.input.read()?;
        match icsread_ical::parse_with(&src, &config.parser) {
            Ok(calendar) => {
                print!("{}", CalendarFormatter::new(self.format).format(&calendar));
                Ok(true)
            }
            Err(err) => {
                report::eprint(&self.input.to_string(), &src, &err)?;
                Ok(false)
            }
        }
    }
}
