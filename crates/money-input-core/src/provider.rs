//! # Formatting Provider
//!
//! The seam between masking logic and locale data.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    FormattingProvider::render                           │
//! │                                                                         │
//! │  (Amount, LocaleId) ──► Rendered { text, metadata }                     │
//! │                                                                         │
//! │  1. Deterministic: same amount + locale = same text                    │
//! │  2. Round-trip lawful: the ASCII digits of `text`, read in order,       │
//! │     reproduce the amount's minor units                                  │
//! │  3. Total: unknown locales render with a fallback, never fail           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Platform bridges can implement the trait over their native number
//! formatter; [`BuiltinProvider`] renders from the table in
//! [`crate::locale::BUILTIN_STYLES`].

use tracing::debug;

use crate::amount::Amount;
use crate::locale::{
    find_style, find_style_for_language, CurrencyStyle, LocaleId, LocaleMetadata,
    SymbolPosition, BUILTIN_STYLES, SYMBOL_SPACE,
};

// =============================================================================
// Provider Trait
// =============================================================================

/// A rendered amount together with the metadata used to render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub metadata: LocaleMetadata,
}

/// Maps a locale and an amount to a formatted currency string.
pub trait FormattingProvider {
    /// Renders `amount` (minor units) for `locale`.
    fn render(&self, amount: Amount, locale: &LocaleId) -> Rendered;

    /// Returns the separator metadata for `locale` without rendering.
    fn metadata(&self, locale: &LocaleId) -> LocaleMetadata;

    /// The locale used when a caller supplies none or a malformed one.
    fn default_locale(&self) -> &LocaleId;

    /// Resolves an optional identifier against [`Self::default_locale`].
    fn resolve_locale(&self, identifier: Option<&str>) -> LocaleId {
        LocaleId::parse_or(identifier, self.default_locale())
    }
}

impl<P: FormattingProvider + ?Sized> FormattingProvider for &P {
    fn render(&self, amount: Amount, locale: &LocaleId) -> Rendered {
        (**self).render(amount, locale)
    }

    fn metadata(&self, locale: &LocaleId) -> LocaleMetadata {
        (**self).metadata(locale)
    }

    fn default_locale(&self) -> &LocaleId {
        (**self).default_locale()
    }
}

// =============================================================================
// Built-in Provider
// =============================================================================

/// Table-driven provider over [`BUILTIN_STYLES`].
///
/// ## Lookup Order
/// 1. Exact `language_COUNTRY` match
/// 2. First style with the same language
/// 3. The default locale's style
#[derive(Debug, Clone)]
pub struct BuiltinProvider {
    default_locale: LocaleId,
    default_style: &'static CurrencyStyle,
}

impl BuiltinProvider {
    /// Creates a provider defaulting to `en_US`.
    pub fn new() -> Self {
        Self::with_default_locale(LocaleId::default())
    }

    /// Creates a provider whose fallback is `locale`.
    ///
    /// If `locale` itself is not in the table, its language is tried, then
    /// `en_US`.
    pub fn with_default_locale(locale: LocaleId) -> Self {
        let default_style = find_style(&locale)
            .or_else(|| find_style_for_language(locale.language()))
            .unwrap_or(&BUILTIN_STYLES[0]);

        if default_style.language != locale.language() {
            debug!(
                requested = %locale,
                using = %default_style.locale_id(),
                "Default locale has no currency style"
            );
        }

        BuiltinProvider {
            default_locale: locale,
            default_style,
        }
    }

    /// Returns the style used for `locale`, applying the fallback chain.
    pub fn style_for(&self, locale: &LocaleId) -> &'static CurrencyStyle {
        if let Some(style) = find_style(locale) {
            return style;
        }
        match find_style_for_language(locale.language()) {
            Some(style) => {
                debug!(%locale, using = %style.locale_id(), "Falling back to language style");
                style
            }
            None => {
                debug!(%locale, using = %self.default_style.locale_id(), "Unknown locale");
                self.default_style
            }
        }
    }
}

impl Default for BuiltinProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FormattingProvider for BuiltinProvider {
    fn render(&self, amount: Amount, locale: &LocaleId) -> Rendered {
        let style = self.style_for(locale);
        Rendered {
            text: render_with_style(style, amount),
            metadata: style.metadata(),
        }
    }

    fn metadata(&self, locale: &LocaleId) -> LocaleMetadata {
        self.style_for(locale).metadata()
    }

    fn default_locale(&self) -> &LocaleId {
        &self.default_locale
    }
}

/// Renders `amount` with a currency style.
///
/// ## Layout
/// ```text
/// major digits grouped by 3 ─┐    ┌─ minor digits, zero padded
///                            ▼    ▼
///   Prefix:   $        1,234 . 56
///   Suffix:            1.234 , 56 ␣€       (␣ = no-break space)
/// ```
///
/// ## Example
/// ```rust
/// use money_input_core::amount::Amount;
/// use money_input_core::locale::{find_style, LocaleId};
/// use money_input_core::provider::render_with_style;
///
/// let style = find_style(&LocaleId::default()).unwrap();
/// assert_eq!(render_with_style(style, Amount::from_minor(123456)), "$1,234.56");
/// assert_eq!(render_with_style(style, Amount::zero()), "$0.00");
/// ```
pub fn render_with_style(style: &CurrencyStyle, amount: Amount) -> String {
    let fraction_digits = style.fraction_digits;
    let major = amount.major_part(fraction_digits).to_string();

    let mut number = String::with_capacity(major.len() + major.len() / 3 + 8);
    let len = major.len();
    for (i, digit) in major.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            number.push(style.grouping_separator);
        }
        number.push(digit);
    }

    if fraction_digits > 0 {
        number.push(style.decimal_separator);
        number.push_str(&format!(
            "{:0width$}",
            amount.minor_part(fraction_digits),
            width = usize::from(fraction_digits)
        ));
    }

    let mut text = String::with_capacity(number.len() + style.symbol.len() + 2);
    match style.position {
        SymbolPosition::Prefix => {
            text.push_str(style.symbol);
            if style.symbol_spacing {
                text.push(SYMBOL_SPACE);
            }
            text.push_str(&number);
        }
        SymbolPosition::Suffix => {
            text.push_str(&number);
            if style.symbol_spacing {
                text.push(SYMBOL_SPACE);
            }
            text.push_str(style.symbol);
        }
    }
    text
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(amount: u64, locale: &str) -> String {
        BuiltinProvider::new()
            .render(Amount::from_minor(amount), &locale.parse().unwrap())
            .text
    }

    #[test]
    fn test_render_en_us() {
        assert_eq!(render(0, "en_US"), "$0.00");
        assert_eq!(render(5, "en_US"), "$0.05");
        assert_eq!(render(99999, "en_US"), "$999.99");
        assert_eq!(render(999999, "en_US"), "$9,999.99");
        assert_eq!(render(123456789, "en_US"), "$1,234,567.89");
    }

    #[test]
    fn test_render_suffix_locales() {
        assert_eq!(render(123456, "de_DE"), "1.234,56\u{a0}€");
        assert_eq!(render(5, "it_IT"), "0,05\u{a0}€");
        assert_eq!(render(123456, "fr_FR"), "1\u{202f}234,56\u{a0}€");
    }

    #[test]
    fn test_render_prefix_with_spacing() {
        assert_eq!(render(123456, "pt_BR"), "R$\u{a0}1.234,56");
        assert_eq!(render(123456, "de_CH"), "CHF\u{a0}1\u{2019}234.56");
        assert_eq!(render(100, "nl_NL"), "€\u{a0}1,00");
    }

    #[test]
    fn test_render_zero_fraction_digits() {
        assert_eq!(render(0, "ja_JP"), "¥0");
        assert_eq!(render(1234, "ja_JP"), "¥1,234");
    }

    #[test]
    fn test_render_max_amount() {
        assert_eq!(render(u64::MAX, "en_US"), "$184,467,440,737,095,516.15");
    }

    #[test]
    fn test_fallback_chain() {
        let provider = BuiltinProvider::new();
        // Language fallback
        assert_eq!(render(100, "de_AT"), "1,00\u{a0}€");
        // Unknown language falls back to the default style
        assert_eq!(render(100, "xx_YY"), "$1.00");

        let german = BuiltinProvider::with_default_locale("de_DE".parse().unwrap());
        let text = german.render(Amount::from_minor(100), &"xx_YY".parse().unwrap()).text;
        assert_eq!(text, "1,00\u{a0}€");
        assert_eq!(provider.default_locale().to_string(), "en_US");
    }

    #[test]
    fn test_resolve_locale() {
        let provider = BuiltinProvider::with_default_locale("fr_FR".parse().unwrap());
        assert_eq!(provider.resolve_locale(None).to_string(), "fr_FR");
        assert_eq!(provider.resolve_locale(Some("en_")).to_string(), "fr_FR");
        assert_eq!(provider.resolve_locale(Some("ja_JP")).to_string(), "ja_JP");
    }

    #[test]
    fn test_metadata_matches_render() {
        let provider = BuiltinProvider::new();
        for style in BUILTIN_STYLES {
            let locale = style.locale_id();
            let rendered = provider.render(Amount::from_minor(1), &locale);
            assert_eq!(rendered.metadata, provider.metadata(&locale));
        }
    }
}
