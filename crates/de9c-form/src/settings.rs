//! Defaults remembered between runs

use crate::types::*;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::Path;

/// File name used when no other location is given
pub const DEFAULT_SETTINGS_FILE: &str = "de9c_defaults.json";

/// Values pre-filled on the next run. Stored as text exactly as entered;
/// numbers in a hand-edited file are read as their text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(deserialize_with = "text_or_number")]
    pub year: String,
    #[serde(deserialize_with = "text_or_number")]
    pub quarter: String,
    #[serde(deserialize_with = "text_or_number")]
    pub employer_account: String,
    #[serde(deserialize_with = "text_or_number")]
    pub signature_name: String,
    #[serde(deserialize_with = "text_or_number")]
    pub signature_title: String,
    #[serde(deserialize_with = "text_or_number")]
    pub signature_phone: String,
}

fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected text or number, got {other}"
        ))),
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            year: "2024".to_string(),
            quarter: "2".to_string(),
            employer_account: String::new(),
            signature_name: String::new(),
            signature_title: String::new(),
            signature_phone: String::new(),
        }
    }
}

impl Settings {
    /// Load settings from JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let settings = serde_json::from_slice(&bytes)?;
        Ok(settings)
    }

    /// Load settings, falling back to the built-in defaults when the file is
    /// absent or unreadable. Keys missing from the file keep their defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.is_file() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save settings to JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
