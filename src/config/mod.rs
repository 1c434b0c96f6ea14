use std::{env, str::FromStr};

use crate::service::ShortenPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Short links: form, creation and redirects.
    Shortener,
    /// Name collection form backed by the `users` table.
    Names,
}

impl FromStr for AppMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shortener" | "urls" => Ok(Self::Shortener),
            "names" | "users" => Ok(Self::Names),
            other => Err(format!("unknown app mode '{other}'")),
        }
    }
}

/// How an unknown short code is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundMode {
    /// Re-render the form with an error message.
    Inline,
    /// Dedicated 404 page.
    Page,
}

impl FromStr for NotFoundMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" => Ok(Self::Inline),
            "page" | "404" => Ok(Self::Page),
            other => Err(format!("unknown not-found mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Logging settings are read separately so the subscriber can be installed
/// before the rest of the config emits its warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    pub dir: Option<String>,
}

impl LogConfig {
    pub fn load() -> Self {
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            format: parse_or(&lookup, "LOG_FORMAT", LogFormat::Pretty),
            dir: lookup("LOG_DIR").filter(|dir| !dir.trim().is_empty()),
        }
    }
}

pub struct Config {
    pub mode: AppMode,
    pub base_url: Option<String>,
    pub database_url: String,
    pub db_max_connections: u32,
    pub server_addr: String,
    pub shorten: ShortenPolicy,
    pub not_found: NotFoundMode,
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the config from any variable source; `load` uses the process
    /// environment. Missing or unparsable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ShortenPolicy::default();
        let shorten = ShortenPolicy {
            validate: parse_bool_or(&lookup, "VALIDATE_URLS", defaults.validate),
            code_length: parse_or(&lookup, "SHORT_CODE_LENGTH", defaults.code_length)
                .clamp(1, 64),
            max_attempts: parse_or(&lookup, "MAX_CODE_ATTEMPTS", defaults.max_attempts).max(1),
        };

        let base_url = lookup("BASE_URL").and_then(|raw| {
            let raw = raw.trim().trim_end_matches('/').to_string();
            match url::Url::parse(&raw) {
                Ok(_) => Some(raw),
                Err(e) => {
                    tracing::warn!(
                        "BASE_URL '{}' is not a valid URL ({}), using the request host instead",
                        raw,
                        e
                    );
                    None
                }
            }
        });

        Self {
            mode: parse_or(&lookup, "APP_MODE", AppMode::Shortener),
            base_url,
            database_url: get_env_or(&lookup, "DATABASE_URL", "sqlite://database.db?mode=rwc"),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5u32).max(1),
            server_addr: get_env_or(&lookup, "SERVER_ADDRESS", "0.0.0.0:8080"),
            shorten,
            not_found: parse_or(&lookup, "NOT_FOUND_MODE", NotFoundMode::Inline),
        }
    }
}

fn get_env_or<F>(lookup: &F, var: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var).unwrap_or_else(|| {
        tracing::warn!(
            "{} environment variable not set, using default: {}",
            var,
            default
        );
        default.to_string()
    })
}

fn parse_or<F, T>(lookup: &F, var: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(var) else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|e| {
        tracing::warn!("{} has invalid value '{}' ({}), using default", var, raw, e);
        default
    })
}

fn parse_bool_or<F>(lookup: &F, var: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return default;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            tracing::warn!("{} has invalid value '{}', using default: {}", var, raw, default);
            default
        }
    }
}
