//! Session resolution and run-wide settings.
//!
//! The session cookie comes from `--session` or from the `AOC_SESSION` key of
//! a local `.env` file. Everything else a request needs lives in [`Settings`],
//! which is built once in `main` and handed down by reference.

use derive_builder::Builder;
use std::{collections::HashMap, fs, io, path::Path, time::Duration};
use thiserror::Error;
use tracing::{debug, warn};

pub const SESSION_KEY: &str = "AOC_SESSION";
pub const DEFAULT_BASE_URL: &str = "https://adventofcode.com";
pub const DEFAULT_USER_AGENT: &str = concat!("aoc-init/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
/// The value shown in the usage examples; almost certainly not a real cookie.
pub const PLACEHOLDER_SESSION: &str = "YOUR_AOC_SESSION_COOKIE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(
        "Advent of Code session cookie not found. Provide it with -s/--session, \
         or set {key} in '{env_file}'.",
        key = SESSION_KEY
    )]
    MissingSession { env_file: String },
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Settings {
    session: String,
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    base_url: String,
    #[builder(default = "DEFAULT_USER_AGENT.to_string()")]
    user_agent: String,
    #[builder(default = "DEFAULT_TIMEOUT")]
    timeout: Duration,
}

impl Settings {
    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Parses a `KEY=VALUE` file. Every line stands alone: blank lines and `#`
/// comments are ignored, key and value are trimmed, one pair of matching
/// outer quotes is stripped and a repeated key keeps its last value. Values
/// are taken literally.
pub fn parse_env_file(path: impl AsRef<Path>) -> Result<HashMap<String, String>, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let mut vars = HashMap::new();
    for (index, line) in content.lines().enumerate() {
        let Some((key, value)) = split_line(line) else {
            continue;
        };
        for item in dotenvy::from_read_iter(literal_line(key, value).as_bytes()) {
            match item {
                Ok((key, value)) => {
                    vars.insert(key, value);
                }
                Err(err) => warn!(
                    "Ignoring malformed line {} in {}: {err}",
                    index + 1,
                    path.display()
                ),
            }
        }
    }
    Ok(vars)
}

fn split_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), strip_quotes(value.trim())))
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Re-quotes a value so dotenvy reads it back verbatim: single quotes when
/// possible, otherwise double quotes with `\\`, `"` and `$` escaped.
fn literal_line(key: &str, value: &str) -> String {
    if !value.contains('\'') {
        return format!("{key}='{value}'");
    }
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "\\$");
    format!("{key}=\"{escaped}\"")
}

/// Like [`parse_env_file`], but a missing file yields an empty map and an
/// unreadable one only logs a warning.
pub fn load_env_file(path: impl AsRef<Path>) -> HashMap<String, String> {
    let path = path.as_ref();
    match parse_env_file(path) {
        Ok(vars) => {
            debug!("Loaded {} entries from {}", vars.len(), path.display());
            vars
        }
        Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            HashMap::new()
        }
        Err(err) => {
            warn!("Could not read env file. {err}");
            HashMap::new()
        }
    }
}

/// The flag value wins over the file value; empty strings count as absent.
pub fn resolve_session(flag: Option<&str>, file: Option<&str>) -> Option<String> {
    flag.filter(|s| !s.is_empty())
        .or(file.filter(|s| !s.is_empty()))
        .map(str::to_string)
}

/// Resolves the session from the flag and the env file at `env_file`.
pub fn load_session(flag: Option<&str>, env_file: &Path) -> Result<String, ConfigError> {
    let vars = load_env_file(env_file);
    let from_file = vars.get(SESSION_KEY).map(String::as_str);
    if flag.map_or(true, str::is_empty) && from_file.is_some() {
        debug!("Loaded {SESSION_KEY} from {}", env_file.display());
    }

    let session = resolve_session(flag, from_file).ok_or_else(|| ConfigError::MissingSession {
        env_file: env_file.display().to_string(),
    })?;
    if session == PLACEHOLDER_SESSION {
        warn!("The session cookie '{PLACEHOLDER_SESSION}' looks like a placeholder.");
    }
    Ok(session)
}
