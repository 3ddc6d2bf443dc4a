//! `.snipsimrc` configuration file parser.
//!
//! One setting per line:
//!
//! | Key        | Values                                   | Default |
//! |------------|------------------------------------------|---------|
//! | `language` | any accepted language name (`kotlin`, `py`, …) | none |
//! | `timing`   | `on`/`off`, `true`/`false`, `1`/`0`      | `off`   |
//! | `color`    | `auto`, `always`, `never`                | `auto`  |
//! | `format`   | `text`, `json`                           | `text`  |
//!
//! Blank lines and lines starting with `#` or `;` are ignored.  A bad line is
//! reported as a [`ConfigError`] and skipped; the rest of the file still loads.

use std::path::Path;
use std::str::FromStr;

use crate::lang::Language;

// ── Public API ────────────────────────────────────────────────────────────────

/// A non-fatal error encountered while loading a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// When to style terminal output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Only when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" | "on" => Ok(ColorMode::Always),
            "never" | "off" => Ok(ColorMode::Never),
            _ => Err(format!("invalid color mode: {s}")),
        }
    }
}

/// How a result is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("invalid format: {s}")),
        }
    }
}

/// User settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Language used when neither `-l` nor the file extension decides.
    pub language: Option<Language>,
    /// Print the elapsed time after the transcript.
    pub timing: bool,
    pub color: ColorMode,
    pub format: OutputFormat,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config string.
    ///
    /// Returns the config and a list of any errors on individual lines.
    pub fn load_str(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Config::new();
        let mut errors = Vec::new();

        for (i, raw) in s.lines().enumerate() {
            let lineno = i + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                errors.push(ConfigError {
                    line: lineno,
                    message: format!("expected `key = value`, got `{line}`"),
                });
                continue;
            };
            if let Err(message) = config.set(key.trim(), unquote(value.trim())) {
                errors.push(ConfigError { line: lineno, message });
            }
        }

        (config, errors)
    }

    /// Read and parse a config file from disk.
    pub fn load_file(path: &Path) -> std::io::Result<(Self, Vec<ConfigError>)> {
        let s = std::fs::read_to_string(path)?;
        Ok(Self::load_str(&s))
    }

    /// Apply one `key = value` setting.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key.to_ascii_lowercase().as_str() {
            "language" | "lang" => {
                self.language = Some(value.parse().map_err(|e| format!("{e}"))?);
            }
            "timing" => self.timing = parse_flag(value)?,
            "color" | "colour" => self.color = value.parse()?,
            "format" => self.format = value.parse()?,
            _ => return Err(format!("unknown setting: {key}")),
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(format!("expected on/off, got `{value}`")),
    }
}

/// Strip one pair of matching surrounding quotes.
fn unquote(s: &str) -> &str {
    for q in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(q).and_then(|r| r.strip_suffix(q)) {
            return inner;
        }
    }
    s
}

// ── Tests ─────────────────────────────────────────────────────────────────────
