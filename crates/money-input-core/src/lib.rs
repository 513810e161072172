//! # money-input-core: Pure Currency Masking
//!
//! This crate is the **heart** of money-input. It turns raw keystrokes in a
//! text field into a locale-formatted currency string and tells the host
//! where to put the caret, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        money-input Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Host text widget (native / terminal)               │   │
//! │  │      keystroke ──► EditDescriptor      CaretDecision ──► text   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               money-input-field (host adapter)                  │   │
//! │  │    per-field context, listener detach/reattach, config          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ money-input-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  amount   │  │  locale   │  │   codec   │  │   caret   │  │   │
//! │  │   │  Amount   │  │ LocaleId  │  │  unmask   │  │ CaretTra- │  │   │
//! │  │   │           │  │ metadata  │  │  mask     │  │ cker      │  │   │
//! │  │   └───────────┘  └─────┬─────┘  └───────────┘  └───────────┘  │   │
//! │  │                  ┌─────▼─────┐                                  │   │
//! │  │                  │ provider  │  FormattingProvider trait        │   │
//! │  │                  └───────────┘                                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO WIDGETS • NO FLOATS • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`amount`] - `Amount`, a non-negative count of minor units
//! - [`locale`] - Locale identifiers, separator metadata, built-in styles
//! - [`provider`] - The `FormattingProvider` seam and the built-in provider
//! - [`codec`] - `unmask` / `mask` between text and amounts
//! - [`caret`] - Edit descriptors and caret placement
//! - [`error`] - Locale parsing errors
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same edit + locale = same decision
//! 2. **Integer Money**: amounts are minor units (u64), never floats
//! 3. **Never Block Typing**: bad digits, carets and locales degrade, they
//!    don't fail
//!
//! ## Example Usage
//!
//! ```rust
//! use money_input_core::{extract_value, format_money, Amount};
//!
//! assert_eq!(format_money(Amount::from_minor(123456), Some("en_US")), "$1,234.56");
//! assert_eq!(format_money(Amount::from_minor(123456), Some("de_DE")), "1.234,56\u{a0}€");
//! assert_eq!(extract_value("$1,234.56").minor_units(), 123456);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod amount;
pub mod caret;
pub mod codec;
pub mod error;
pub mod locale;
pub mod provider;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use amount::Amount;
pub use caret::{
    end_of_input, on_focus_gained, on_selection_changed, CaretDecision, CaretRule, CaretTracker,
    EditDescriptor, ReplacedRange,
};
pub use codec::{digit_count, unmask, AmountCodec};
pub use error::{LocaleError, LocaleResult};
pub use locale::{LocaleId, LocaleMetadata, SymbolPosition};
pub use provider::{BuiltinProvider, FormattingProvider, Rendered};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Locale used when none is given and no other default is configured.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Digits an `Amount` can always hold without saturating.
///
/// `u64::MAX` has 20 digits, so any 19-digit string fits. Hosts should
/// bound input at or below this.
pub const MAX_SAFE_DIGITS: usize = 19;

// =============================================================================
// Public API
// =============================================================================

/// Formats `amount` for `locale` with the built-in provider.
///
/// An absent or malformed locale falls back to [`DEFAULT_LOCALE`].
pub fn format_money(amount: Amount, locale: Option<&str>) -> String {
    let codec = AmountCodec::default();
    let locale = codec.provider().resolve_locale(locale);
    codec.mask(amount, &locale)
}

/// Extracts the amount from a label shown in a money field.
///
/// Locale-independent: every ASCII digit is a minor-unit digit.
pub fn extract_value(label: &str) -> Amount {
    unmask(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money_falls_back_to_default_locale() {
        assert_eq!(format_money(Amount::zero(), None), "$0.00");
        assert_eq!(format_money(Amount::from_minor(5), Some("not a locale")), "$0.05");
        assert_eq!(format_money(Amount::from_minor(5), Some("xx_YY")), "$0.05");
    }

    #[test]
    fn test_default_locale_constant_parses() {
        let locale: LocaleId = DEFAULT_LOCALE.parse().unwrap();
        assert_eq!(locale, LocaleId::default());
    }

    #[test]
    fn test_max_safe_digits_fit() {
        let widest = "9".repeat(MAX_SAFE_DIGITS);
        assert!(unmask(&widest).minor_units() < u64::MAX);
        assert_eq!(extract_value(&widest).minor_units(), 9_999_999_999_999_999_999);
    }
}
