//! # Mask Configuration
//!
//! Settings shared by every masked field in a process.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MONEY_INPUT_LOCALE=de_DE                                           │
//! │     MONEY_INPUT_MAX_DIGITS=12                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/money-input/mask.toml (Linux)                            │
//! │     ~/Library/Application Support/com.money-input.money-input/         │
//! │       mask.toml (macOS)                                                │
//! │                                                                         │
//! │  3. System locale (LC_ALL, then LANG), only for the default locale     │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     en_US, 15 digits, caret tidy + snap on                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # mask.toml
//! [locale]
//! default = "de_DE"
//!
//! [input]
//! max_digits = 15
//!
//! [caret]
//! tidy_on_focus = true
//! snap_selection = true
//! ```

use money_input_core::{LocaleId, MAX_SAFE_DIGITS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{FieldError, FieldResult};

// =============================================================================
// Sections
// =============================================================================

/// `[locale]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleSettings {
    /// Locale for fields installed without one (`en_US` when unset).
    #[serde(default)]
    pub default: Option<String>,
}

/// `[input]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSettings {
    /// Edits that would push the digit count past this are rejected.
    #[serde(default = "default_max_digits")]
    pub max_digits: usize,
}

fn default_max_digits() -> usize {
    15
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            max_digits: default_max_digits(),
        }
    }
}

/// `[caret]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaretSettings {
    /// Move a stale caret to the end of the number when focus returns.
    #[serde(default = "default_true")]
    pub tidy_on_focus: bool,

    /// Keep user-placed carets out of a trailing currency symbol.
    #[serde(default = "default_true")]
    pub snap_selection: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CaretSettings {
    fn default() -> Self {
        Self {
            tidy_on_focus: true,
            snap_selection: true,
        }
    }
}

// =============================================================================
// Mask Config
// =============================================================================

/// Complete masking configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskConfig {
    #[serde(default)]
    pub locale: LocaleSettings,

    #[serde(default)]
    pub input: InputSettings,

    #[serde(default)]
    pub caret: CaretSettings,
}

impl MaskConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads config from file, environment, and defaults.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> FieldResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading mask config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config, falling back to defaults on any error.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load mask config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Writes the config as pretty TOML, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> FieldResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| FieldError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| FieldError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| FieldError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Mask config saved");
        Ok(())
    }

    /// Validates value ranges.
    pub fn validate(&self) -> FieldResult<()> {
        let max_digits = self.input.max_digits;
        if !(1..=MAX_SAFE_DIGITS).contains(&max_digits) {
            return Err(FieldError::InvalidConfig(format!(
                "max_digits must be between 1 and {}, got {}",
                MAX_SAFE_DIGITS, max_digits
            )));
        }

        if let Some(ref locale) = self.locale.default {
            locale.parse::<LocaleId>().map_err(|e| {
                FieldError::InvalidConfig(format!("default locale {:?}: {}", locale, e))
            })?;
        }

        Ok(())
    }

    /// The configured default locale, or `en_US`.
    pub fn default_locale(&self) -> LocaleId {
        LocaleId::parse_or(self.locale.default.as_deref(), &LocaleId::default())
    }

    /// Applies overrides from the process environment.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides read through `lookup`.
    ///
    /// Unparseable values, malformed locales included, are logged and
    /// ignored. The system locale only fills in a default locale that
    /// neither the file nor `MONEY_INPUT_LOCALE` set.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(locale) = lookup("MONEY_INPUT_LOCALE") {
            match locale.parse::<LocaleId>() {
                Ok(_) => {
                    debug!(locale = %locale, "Overriding default locale from environment");
                    self.locale.default = Some(locale);
                }
                Err(err) => warn!(value = %locale, %err, "Ignoring malformed MONEY_INPUT_LOCALE"),
            }
        }

        if let Some(digits) = lookup("MONEY_INPUT_MAX_DIGITS") {
            match digits.parse::<usize>() {
                Ok(n) => self.input.max_digits = n,
                Err(_) => warn!(value = %digits, "Ignoring non-numeric MONEY_INPUT_MAX_DIGITS"),
            }
        }

        if let Some(flag) = lookup("MONEY_INPUT_TIDY_ON_FOCUS") {
            match parse_flag(&flag) {
                Some(on) => self.caret.tidy_on_focus = on,
                None => warn!(value = %flag, "Ignoring MONEY_INPUT_TIDY_ON_FOCUS"),
            }
        }

        if let Some(flag) = lookup("MONEY_INPUT_SNAP_SELECTION") {
            match parse_flag(&flag) {
                Some(on) => self.caret.snap_selection = on,
                None => warn!(value = %flag, "Ignoring MONEY_INPUT_SNAP_SELECTION"),
            }
        }

        if self.locale.default.is_none() {
            let system = ["LC_ALL", "LANG"]
                .into_iter()
                .filter_map(&lookup)
                .find(|value| value.parse::<LocaleId>().is_ok());
            if let Some(locale) = system {
                debug!(locale = %locale, "Using system locale as default");
                self.locale.default = Some(locale);
            }
        }
    }

    /// Returns the default config file path.
    ///
    /// - Linux: `~/.config/money-input/mask.toml`
    /// - macOS: `~/Library/Application Support/com.money-input.money-input/mask.toml`
    /// - Windows: `%APPDATA%\money-input\money-input\config\mask.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "money-input", "money-input")
            .map(|dirs| dirs.config_dir().join("mask.toml"))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = MaskConfig::default();
        assert_eq!(config.input.max_digits, 15);
        assert!(config.caret.tidy_on_focus);
        assert!(config.caret.snap_selection);
        assert_eq!(config.default_locale().to_string(), "en_US");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: MaskConfig = toml::from_str("[locale]\ndefault = \"de_DE\"\n").unwrap();
        assert_eq!(config.default_locale().to_string(), "de_DE");
        assert_eq!(config.input.max_digits, 15);
        assert!(config.caret.snap_selection);
    }

    #[test]
    fn test_config_validation() {
        let mut config = MaskConfig::default();

        config.input.max_digits = 0;
        assert!(config.validate().is_err());

        config.input.max_digits = MAX_SAFE_DIGITS + 1;
        assert!(config.validate().is_err());

        config.input.max_digits = MAX_SAFE_DIGITS;
        assert!(config.validate().is_ok());

        config.locale.default = Some("not a locale".into());
        assert!(matches!(
            config.validate(),
            Err(FieldError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = MaskConfig::default();
        config.apply_overrides_from(env(&[
            ("MONEY_INPUT_LOCALE", "pt_BR"),
            ("MONEY_INPUT_MAX_DIGITS", "9"),
            ("MONEY_INPUT_TIDY_ON_FOCUS", "off"),
            ("MONEY_INPUT_SNAP_SELECTION", "maybe"),
            ("LANG", "de_DE.UTF-8"),
        ]));

        assert_eq!(config.default_locale().to_string(), "pt_BR");
        assert_eq!(config.input.max_digits, 9);
        assert!(!config.caret.tidy_on_focus);
        // Unparseable flag is ignored
        assert!(config.caret.snap_selection);
    }

    #[test]
    fn test_system_locale_fills_unset_default() {
        let mut config = MaskConfig::default();
        config.apply_overrides_from(env(&[("LC_ALL", "C"), ("LANG", "fr_FR.UTF-8")]));
        assert_eq!(config.default_locale().to_string(), "fr_FR");

        let mut config: MaskConfig = toml::from_str("[locale]\ndefault = \"ja_JP\"").unwrap();
        config.apply_overrides_from(env(&[("LANG", "fr_FR.UTF-8")]));
        assert_eq!(config.default_locale().to_string(), "ja_JP");
    }

    #[test]
    fn test_malformed_env_locale_is_ignored() {
        let mut config = MaskConfig::default();
        config.apply_overrides_from(env(&[("MONEY_INPUT_LOCALE", "english")]));
        assert_eq!(config.locale.default, None);
        assert!(config.validate().is_ok());

        let mut config: MaskConfig = toml::from_str("[locale]\ndefault = \"it_IT\"").unwrap();
        config.apply_overrides_from(env(&[("MONEY_INPUT_LOCALE", "english")]));
        assert_eq!(config.default_locale().to_string(), "it_IT");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("mask.toml");
        let mut config = MaskConfig::default();
        config.locale.default = Some("it_IT".into());
        config.input.max_digits = 12;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[locale]"));
        assert!(contents.contains("[input]"));

        let loaded: MaskConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.toml");
        std::fs::write(&path, "[input]\nmax_digits = \"lots\"\n").unwrap();

        let err = MaskConfig::load(Some(path)).unwrap_err();
        assert!(err.is_load_error());
    }
}
