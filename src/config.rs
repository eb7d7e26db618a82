// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Slowest and fastest redraw rates accepted for the live timer stream.
pub const MIN_REDRAW_HZ: u32 = 10;
pub const MAX_REDRAW_HZ: u32 = 60;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Directory holding the durable slot files
    pub data_dir: PathBuf,
    /// Slot key the activity collection is stored under
    pub store_key: String,
    /// Frontend URL for CORS and share links
    pub frontend_url: String,
    /// Live timer redraw rate (Hz), clamped to 10..=60
    pub redraw_hz: u32,
    /// Window after a split during which the finished lap is not shown
    pub quiet_period_ms: i64,
    /// How often the file slot checks for writes from other processes
    pub slot_poll_ms: u64,
    /// Style-spec reference document for the style catalog
    pub style_spec_path: Option<PathBuf>,
    /// Directory of style fixtures for the style catalog
    pub styles_dir: Option<PathBuf>,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            data_dir: PathBuf::from("./data"),
            store_key: "activities".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            redraw_hz: 30,
            quiet_period_ms: 1800,
            slot_poll_ms: 500,
            style_spec_path: None,
            styles_dir: None,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let store_key = env::var("STORE_KEY").unwrap_or_else(|_| "activities".to_string());
        if store_key.is_empty()
            || !store_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::Invalid("STORE_KEY", store_key));
        }

        Ok(Self {
            port: parse_or("PORT", 8080)?,
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            store_key,
            frontend_url: env::var("FRONTEND_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            redraw_hz: clamp_redraw_hz(parse_or("REDRAW_HZ", 30)?),
            quiet_period_ms: parse_or("QUIET_PERIOD_MS", 1800)?,
            slot_poll_ms: parse_or("SLOT_POLL_MS", 500)?,
            style_spec_path: env::var("STYLE_SPEC_PATH").ok().map(PathBuf::from),
            styles_dir: env::var("STYLES_DIR").ok().map(PathBuf::from),
        })
    }
}

/// Clamp a requested redraw rate into the supported range.
pub fn clamp_redraw_hz(hz: u32) -> u32 {
    hz.clamp(MIN_REDRAW_HZ, MAX_REDRAW_HZ)
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
