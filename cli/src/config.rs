// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, fs};

use icsread_ical::ParseOptions;

use crate::cli::APP_NAME;

const ICSREAD_CONFIG_ENV: &str = "ICSREAD_CONFIG";

/// Configuration of the command line driver.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Options handed to the decoder, the `[parser]` table
    pub parser: ParseOptions,
}

impl Config {
    /// Load the configuration from `path`, else from `$ICSREAD_CONFIG`, else
    /// from the user configuration directory. Without any file the defaults
    /// apply.
    ///
    /// ## Errors
    /// If an explicitly named file cannot be read, or any file found is not
    /// valid.
    #[tracing::instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let path = if let Some(path) = path {
            path.to_path_buf()
        } else if let Some(env_path) = env::var_os(ICSREAD_CONFIG_ENV) {
            PathBuf::from(env_path)
        } else {
            match default_config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    tracing::debug!("no config file found, using defaults");
                    return Ok(Self::default());
                }
            }
        };

        fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read config file at {}: {e}", path.display()))?
            .parse()
            .map_err(|e| format!("Invalid config file at {}: {e}", path.display()).into())
    }
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"))
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use std::num::NonZeroUsize;
    use std::sync::Mutex;

    use tempfile::TempDir;

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn parses_parser_table() {
        let config: Config = "[parser]\ntoken_queue_capacity = 32\n".parse().unwrap();
        assert_eq!(config.parser.token_queue_capacity, NonZeroUsize::new(32));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.parser.token_queue_capacity, None);
    }

    #[test]
    fn rejects_invalid_config() {
        let cases = [
            "[parser]\ntoken_queue_capacity = 0\n",
            "[parser]\ntoken_queue_capacity = \"many\"\n",
            "[unknown]\n",
            "parser = ",
        ];
        for src in cases {
            assert!(src.parse::<Config>().is_err(), "{src:?} should be rejected");
        }
    }

    #[test]
    fn cli_flag_overrides_env_var() {
        let temp_dir = TempDir::new().unwrap();
        let flag_path = temp_dir.path().join("flag.toml");
        fs::write(&flag_path, "[parser]\ntoken_queue_capacity = 1\n").unwrap();
        let env_path = temp_dir.path().join("env.toml");
        fs::write(&env_path, "[parser]\ntoken_queue_capacity = 2\n").unwrap();

        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            env::set_var(ICSREAD_CONFIG_ENV, &env_path);
        }

        let from_flag = Config::load(Some(&flag_path));
        let from_env = Config::load(None);

        unsafe {
            env::remove_var(ICSREAD_CONFIG_ENV);
        }

        assert_eq!(from_flag.unwrap().parser.token_queue_capacity, NonZeroUsize::new(1));
        assert_eq!(from_env.unwrap().parser.token_queue_capacity, NonZeroUsize::new(2));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = Config::load(Some(&temp_dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }
}
