use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::feed::Timeframe;

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    /// Feed window to query. The USGS endpoint also offers all_week and
    /// all_month summaries.
    pub timeframe: String,
    /// Mapbox tile access token, passed through to the page untouched.
    pub mapbox_token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: 3001,
            timeframe: Timeframe::default().as_str().to_string(),
            mapbox_token: None,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        let mut settings = if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            Self::parse(&content)
        } else {
            Settings::default()
        };

        // Env var wins over the file so the token never has to be written
        // to disk.
        if let Ok(token) = std::env::var("MAPBOX_TOKEN") {
            if !token.is_empty() {
                settings.mapbox_token = Some(token);
            }
        }

        Ok(settings)
    }

    /// Parses the key=value config format. Unknown keys are ignored,
    /// malformed values fall back to defaults.
    fn parse(content: &str) -> Self {
        let mut settings = Settings::default();
        let mut config_map = HashMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.starts_with('#') || line.is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config_map.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        if let Some(port_str) = config_map.get("port") {
            if let Ok(port) = port_str.parse::<u16>() {
                settings.port = port;
            }
        }
        if let Some(timeframe) = config_map.get("timeframe") {
            let timeframe = timeframe.trim_matches('"');
            if timeframe.parse::<Timeframe>().is_ok() {
                settings.timeframe = timeframe.to_string();
            }
        }
        if let Some(token) = config_map.get("mapbox_token") {
            let token = token.trim_matches('"');
            if !token.is_empty() {
                settings.mapbox_token = Some(token.to_string());
            }
        }

        settings
    }

    /// The configured timeframe as a typed value; lenient, falls back to
    /// the default window on a bad string.
    pub fn timeframe(&self) -> Timeframe {
        self.timeframe.parse().unwrap_or_default()
    }

    pub fn config_path() -> PathBuf {
        let mut path = std::env::current_exe()
            .unwrap_or_default()
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .to_path_buf();

        if path.ends_with("target/debug") || path.ends_with("target/release") {
            path.pop();
            path.pop();
        }
        path.push("quakemap.ini");
        path
    }
}
