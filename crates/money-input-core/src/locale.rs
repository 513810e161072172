//! # Locale Module
//!
//! Locale identifiers, separator metadata, and the built-in currency table.
//!
//! ## Locale Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Locale Identifier → Currency Style                  │
//! │                                                                         │
//! │  "de_DE"  ──parse──►  LocaleId { de, DE }  ──exact──►  de_DE style      │
//! │  "de-at"  ──parse──►  LocaleId { de, AT }  ──language─► de_DE style     │
//! │  "xx_YY"  ──parse──►  LocaleId { xx, YY }  ──miss────►  default style   │
//! │  "en_"    ──parse──►  LocaleError          ──────────►  default style   │
//! │  None     ──────────────────────────────────────────►  default style   │
//! │                                                                         │
//! │  Every path ends in a style: typing never stops for a bad locale.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identifier Format
//! `<language>_<country>` as used by the platform bridges (`en_US`). Hyphens
//! (`en-US`), lowercase countries (`en_us`) and POSIX suffixes
//! (`de_DE.UTF-8@euro`) are accepted so that `LANG` values parse directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{LocaleError, LocaleResult};

/// Space placed between a currency symbol and the number (no-break space).
pub const SYMBOL_SPACE: char = '\u{00A0}';

// =============================================================================
// Locale Identifier
// =============================================================================

/// A parsed `<language>_<country>` locale identifier.
///
/// ## Example
/// ```rust
/// use money_input_core::locale::LocaleId;
///
/// let locale: LocaleId = "en-us".parse().unwrap();
/// assert_eq!(locale.to_string(), "en_US");
/// assert_eq!(locale.language(), "en");
/// assert_eq!(locale.country(), Some("US"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleId {
    language: String,
    country: Option<String>,
}

impl LocaleId {
    /// Creates a locale from already-validated parts.
    ///
    /// Use `str::parse` for untrusted input.
    pub fn new(language: &str, country: Option<&str>) -> Self {
        LocaleId {
            language: language.to_ascii_lowercase(),
            country: country.map(str::to_ascii_uppercase),
        }
    }

    /// Returns the lowercase language subtag (`"en"`).
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the uppercase country subtag (`"US"`), if present.
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Parses `identifier`, falling back to `fallback` when it is absent or
    /// malformed. Never fails.
    ///
    /// ## Example
    /// ```rust
    /// use money_input_core::locale::LocaleId;
    ///
    /// let fallback = LocaleId::new("en", Some("US"));
    /// assert_eq!(LocaleId::parse_or(Some("fr_FR"), &fallback).to_string(), "fr_FR");
    /// assert_eq!(LocaleId::parse_or(Some("???"), &fallback), fallback);
    /// assert_eq!(LocaleId::parse_or(None, &fallback), fallback);
    /// ```
    pub fn parse_or(identifier: Option<&str>, fallback: &LocaleId) -> LocaleId {
        match identifier.map(str::parse::<LocaleId>) {
            Some(Ok(locale)) => locale,
            Some(Err(err)) => {
                tracing::debug!(error = %err, fallback = %fallback, "Malformed locale identifier");
                fallback.clone()
            }
            None => fallback.clone(),
        }
    }
}

impl Default for LocaleId {
    fn default() -> Self {
        LocaleId::new("en", Some("US"))
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.country {
            Some(country) => write!(f, "{}_{}", self.language, country),
            None => write!(f, "{}", self.language),
        }
    }
}

impl FromStr for LocaleId {
    type Err = LocaleError;

    fn from_str(s: &str) -> LocaleResult<Self> {
        // Drop POSIX codeset and modifier: "de_DE.UTF-8@euro" -> "de_DE"
        let core = s
            .trim()
            .split(|c| c == '.' || c == '@')
            .next()
            .unwrap_or_default();

        if core.is_empty() {
            return Err(LocaleError::Empty);
        }

        let mut parts = core.splitn(2, |c| c == '_' || c == '-');
        let language = parts.next().unwrap_or_default();
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(LocaleError::InvalidLanguage(language.to_string()));
        }

        let country = match parts.next() {
            None => None,
            Some(country) if is_valid_country(country) => Some(country),
            Some(country) => return Err(LocaleError::InvalidCountry(country.to_string())),
        };

        Ok(LocaleId::new(language, country))
    }
}

fn is_valid_country(country: &str) -> bool {
    let letters = country.len() == 2 && country.chars().all(|c| c.is_ascii_alphabetic());
    let region = country.len() == 3 && country.chars().all(|c| c.is_ascii_digit());
    letters || region
}

// =============================================================================
// Locale Metadata
// =============================================================================

/// Where the currency symbol sits relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SymbolPosition {
    /// `$1,234.56`
    Prefix,
    /// `1.234,56 €`
    Suffix,
}

/// Separator metadata the caret tracker needs from the formatting provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LocaleMetadata {
    /// Thousands separator (`,` in en_US, `.` in de_DE).
    pub grouping_separator: char,

    /// Decimal separator (`.` in en_US, `,` in de_DE).
    pub decimal_separator: char,

    /// Number of minor-unit digits (2 for USD, 0 for JPY).
    pub max_fraction_digits: u8,

    /// Currency symbol placement.
    pub symbol_position: SymbolPosition,
}

// =============================================================================
// Built-in Currency Styles
// =============================================================================

/// Everything needed to render an amount for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyStyle {
    pub language: &'static str,
    pub country: &'static str,
    pub symbol: &'static str,
    pub position: SymbolPosition,
    /// Whether a [`SYMBOL_SPACE`] separates symbol and number.
    pub symbol_spacing: bool,
    pub grouping_separator: char,
    pub decimal_separator: char,
    pub fraction_digits: u8,
}

impl CurrencyStyle {
    /// Returns the separator metadata for this style.
    pub fn metadata(&self) -> LocaleMetadata {
        LocaleMetadata {
            grouping_separator: self.grouping_separator,
            decimal_separator: self.decimal_separator,
            max_fraction_digits: self.fraction_digits,
            symbol_position: self.position,
        }
    }

    /// Returns the locale this style belongs to.
    pub fn locale_id(&self) -> LocaleId {
        LocaleId::new(self.language, Some(self.country))
    }

    fn matches(&self, locale: &LocaleId) -> bool {
        self.language == locale.language() && Some(self.country) == locale.country()
    }
}

const fn style(
    language: &'static str,
    country: &'static str,
    symbol: &'static str,
    position: SymbolPosition,
    symbol_spacing: bool,
    separators: (char, char),
    fraction_digits: u8,
) -> CurrencyStyle {
    CurrencyStyle {
        language,
        country,
        symbol,
        position,
        symbol_spacing,
        grouping_separator: separators.0,
        decimal_separator: separators.1,
        fraction_digits,
    }
}

use SymbolPosition::{Prefix, Suffix};

/// Currency styles shipped with the built-in provider.
///
/// Language fallback picks the FIRST entry for a language, so the most
/// common country for each language is listed first.
pub const BUILTIN_STYLES: &[CurrencyStyle] = &[
    style("en", "US", "$", Prefix, false, (',', '.'), 2),
    style("en", "GB", "£", Prefix, false, (',', '.'), 2),
    style("en", "CA", "$", Prefix, false, (',', '.'), 2),
    style("en", "AU", "$", Prefix, false, (',', '.'), 2),
    style("de", "DE", "€", Suffix, true, ('.', ','), 2),
    style("de", "CH", "CHF", Prefix, true, ('\u{2019}', '.'), 2),
    style("fr", "FR", "€", Suffix, true, ('\u{202F}', ','), 2),
    style("it", "IT", "€", Suffix, true, ('.', ','), 2),
    style("nl", "NL", "€", Prefix, true, ('.', ','), 2),
    style("pt", "BR", "R$", Prefix, true, ('.', ','), 2),
    style("ja", "JP", "¥", Prefix, false, (',', '.'), 0),
];

/// Finds the style for an exact language + country match.
pub fn find_style(locale: &LocaleId) -> Option<&'static CurrencyStyle> {
    BUILTIN_STYLES.iter().find(|s| s.matches(locale))
}

/// Finds the first style sharing the locale's language.
pub fn find_style_for_language(language: &str) -> Option<&'static CurrencyStyle> {
    BUILTIN_STYLES.iter().find(|s| s.language == language)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_locale_variants() {
        let cases = [
            ("en_US", "en_US"),
            ("en-US", "en_US"),
            ("EN_us", "en_US"),
            ("de_DE.UTF-8", "de_DE"),
            ("de_DE.UTF-8@euro", "de_DE"),
            ("  fr_FR  ", "fr_FR"),
            ("ja", "ja"),
            ("es_419", "es_419"),
        ];
        for (input, expected) in cases {
            let locale: LocaleId = input.parse().unwrap();
            assert_eq!(locale.to_string(), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_parse_locale_errors() {
        assert_eq!("".parse::<LocaleId>(), Err(LocaleError::Empty));
        assert_eq!(".UTF-8".parse::<LocaleId>(), Err(LocaleError::Empty));
        assert_eq!(
            "C".parse::<LocaleId>(),
            Err(LocaleError::InvalidLanguage("C".to_string()))
        );
        assert_eq!(
            "12_US".parse::<LocaleId>(),
            Err(LocaleError::InvalidLanguage("12".to_string()))
        );
        assert_eq!(
            "en_".parse::<LocaleId>(),
            Err(LocaleError::InvalidCountry(String::new()))
        );
        assert_eq!(
            "en_US_POSIX".parse::<LocaleId>(),
            Err(LocaleError::InvalidCountry("US_POSIX".to_string()))
        );
    }

    #[test]
    fn test_parse_or_falls_back() {
        let fallback = LocaleId::new("de", Some("DE"));
        assert_eq!(LocaleId::parse_or(Some("en_GB"), &fallback).to_string(), "en_GB");
        assert_eq!(LocaleId::parse_or(Some("en_"), &fallback), fallback);
        assert_eq!(LocaleId::parse_or(None, &fallback), fallback);
    }

    #[test]
    fn test_find_style() {
        let style = find_style(&"de_DE".parse().unwrap()).unwrap();
        assert_eq!(style.symbol, "€");
        assert_eq!(style.position, SymbolPosition::Suffix);

        assert!(find_style(&"de_AT".parse().unwrap()).is_none());
        assert_eq!(find_style_for_language("de").unwrap().country, "DE");
        assert!(find_style_for_language("xx").is_none());
    }

    #[test]
    fn test_builtin_styles_are_round_trip_safe() {
        // Symbols and separators must never contain ASCII digits, otherwise
        // unmasking a rendered string would pick them up as amount digits.
        for style in BUILTIN_STYLES {
            assert!(!style.symbol.chars().any(|c| c.is_ascii_digit()));
            assert!(!style.grouping_separator.is_ascii_digit());
            assert!(!style.decimal_separator.is_ascii_digit());
            assert_ne!(style.grouping_separator, style.decimal_separator);
        }
    }

    #[test]
    fn test_metadata_serializes_camel_case() {
        let metadata = find_style(&LocaleId::default()).unwrap().metadata();
        let json = serde_json::to_value(metadata).unwrap();
        assert_eq!(json["groupingSeparator"], ",");
        assert_eq!(json["maxFractionDigits"], 2);
        assert_eq!(json["symbolPosition"], "prefix");
    }
}
