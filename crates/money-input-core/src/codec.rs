//! # Amount Codec
//!
//! Conversion between raw field text, [`Amount`], and formatted strings.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  RawInput "$1,2345.6"                                                   │
//! │       │                                                                 │
//! │       ▼ unmask: keep ASCII digits, read as minor units                  │
//! │  Amount(123456)                                                         │
//! │       │                                                                 │
//! │       ▼ mask: FormattingProvider::render                                │
//! │  FormattedString "$1,234.56"                                            │
//! │                                                                         │
//! │  Law: unmask(mask(a, L)) == a        for every amount and locale        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use money_input_core::codec::{unmask, AmountCodec};
//! use money_input_core::locale::LocaleId;
//!
//! let codec = AmountCodec::default();
//! let amount = unmask("$1,2345.6");
//! assert_eq!(amount.minor_units(), 123456);
//! assert_eq!(codec.mask(amount, &LocaleId::default()), "$1,234.56");
//! ```

use crate::amount::Amount;
use crate::locale::{LocaleId, LocaleMetadata};
use crate::provider::{BuiltinProvider, FormattingProvider, Rendered};

// =============================================================================
// Unmasking
// =============================================================================

/// Extracts an amount from raw text.
///
/// ## Rules
/// - Every character that is not an ASCII digit is discarded
/// - No digits at all → `Amount(0)`
/// - The digit string is read directly as minor units ("1234" → 12.34 when
///   the locale has 2 fraction digits)
/// - Digit strings beyond `u64::MAX` saturate; bound input upstream
///
/// ## Example
/// ```rust
/// use money_input_core::codec::unmask;
///
/// assert_eq!(unmask("ab12cd").minor_units(), 12);
/// assert_eq!(unmask("").minor_units(), 0);
/// assert_eq!(unmask("1.234,56 €").minor_units(), 123456);
/// ```
pub fn unmask(raw_text: &str) -> Amount {
    raw_text
        .bytes()
        .filter(u8::is_ascii_digit)
        .fold(Amount::zero(), |amount, digit| amount.push_digit(digit - b'0'))
}

/// Counts the ASCII digits in `raw_text`.
///
/// Hosts use this to bound input before it can saturate an [`Amount`].
pub fn digit_count(raw_text: &str) -> usize {
    raw_text.bytes().filter(u8::is_ascii_digit).count()
}

// =============================================================================
// Codec
// =============================================================================

/// Masks and unmasks amounts through a [`FormattingProvider`].
#[derive(Debug, Clone)]
pub struct AmountCodec<P = BuiltinProvider> {
    provider: P,
}

impl<P: FormattingProvider> AmountCodec<P> {
    /// Creates a codec over `provider`.
    pub fn new(provider: P) -> Self {
        AmountCodec { provider }
    }

    /// Returns the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// See [`unmask`].
    #[inline]
    pub fn unmask(&self, raw_text: &str) -> Amount {
        unmask(raw_text)
    }

    /// Renders `amount` for `locale`, verbatim from the provider.
    pub fn mask(&self, amount: Amount, locale: &LocaleId) -> String {
        self.provider.render(amount, locale).text
    }

    /// Renders `amount` and returns the separator metadata alongside.
    pub fn mask_with_metadata(&self, amount: Amount, locale: &LocaleId) -> Rendered {
        self.provider.render(amount, locale)
    }

    /// Returns the separator metadata for `locale`.
    pub fn metadata(&self, locale: &LocaleId) -> LocaleMetadata {
        self.provider.metadata(locale)
    }

    /// Normalizes arbitrary text into its formatted form.
    ///
    /// ## Example
    /// ```rust
    /// use money_input_core::codec::AmountCodec;
    /// use money_input_core::locale::LocaleId;
    ///
    /// let codec = AmountCodec::default();
    /// let (amount, text) = codec.remask("12abc3", &LocaleId::default());
    /// assert_eq!(amount.minor_units(), 123);
    /// assert_eq!(text, "$1.23");
    /// ```
    pub fn remask(&self, raw_text: &str, locale: &LocaleId) -> (Amount, String) {
        let amount = unmask(raw_text);
        (amount, self.mask(amount, locale))
    }
}

impl Default for AmountCodec<BuiltinProvider> {
    fn default() -> Self {
        AmountCodec::new(BuiltinProvider::new())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
