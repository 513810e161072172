//! # Amount Module
//!
//! Provides the `Amount` type: a non-negative count of minor currency units.
//!
//! ## Why Integer Minor Units?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHAT THE USER TYPES IS ALREADY AN INTEGER                              │
//! │                                                                         │
//! │  Keystrokes:  1  2  3  4                                                │
//! │  Digits:      "1234"                                                    │
//! │  Amount:      1234 minor units                                          │
//! │  Display:     $12.34  (en_US, 2 fraction digits)                        │
//! │               ¥1,234  (ja_JP, 0 fraction digits)                        │
//! │                                                                         │
//! │  The digit string IS the minor-unit count. No division, no floats,      │
//! │  no rounding: 0.1 + 0.2 never enters the picture.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use money_input_core::amount::Amount;
//!
//! let amount = Amount::from_minor(1234);
//! assert_eq!(amount.major_part(2), 12);
//! assert_eq!(amount.minor_part(2), 34);
//!
//! let same = Amount::from_major_minor(12, 34, 2);
//! assert_eq!(amount, same);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Amount Type
// =============================================================================

/// A non-negative amount in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **u64 (unsigned)**: the masking flow never produces negative values
/// - **Saturating**: arithmetic clamps at `u64::MAX` instead of panicking,
///   so a runaway digit string degrades instead of crashing a keystroke
/// - **Newtype serde**: serializes as a bare number for the JS side
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Amount(u64);

impl Amount {
    /// Creates an amount from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use money_input_core::amount::Amount;
    ///
    /// let price = Amount::from_minor(1099); // $10.99 in en_US
    /// assert_eq!(price.minor_units(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor_units: u64) -> Self {
        Amount(minor_units)
    }

    /// Creates an amount from a major part, a minor part and the number of
    /// fraction digits the currency uses.
    ///
    /// Minor parts wider than `fraction_digits` are carried into the major
    /// part (`from_major_minor(1, 150, 2)` is 2.50).
    ///
    /// ## Example
    /// ```rust
    /// use money_input_core::amount::Amount;
    ///
    /// assert_eq!(Amount::from_major_minor(10, 99, 2).minor_units(), 1099);
    /// assert_eq!(Amount::from_major_minor(1500, 0, 0).minor_units(), 1500);
    /// ```
    pub fn from_major_minor(major: u64, minor: u64, fraction_digits: u8) -> Self {
        let scale = scale_factor(fraction_digits);
        Amount(major.saturating_mul(scale).saturating_add(minor))
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor_units(&self) -> u64 {
        self.0
    }

    /// Returns the major (whole currency unit) part.
    ///
    /// ## Example
    /// ```rust
    /// use money_input_core::amount::Amount;
    ///
    /// assert_eq!(Amount::from_minor(1099).major_part(2), 10);
    /// assert_eq!(Amount::from_minor(1099).major_part(0), 1099);
    /// ```
    #[inline]
    pub fn major_part(&self, fraction_digits: u8) -> u64 {
        self.0 / scale_factor(fraction_digits)
    }

    /// Returns the minor part (always below `10^fraction_digits`).
    #[inline]
    pub fn minor_part(&self, fraction_digits: u8) -> u64 {
        self.0 % scale_factor(fraction_digits)
    }

    /// Returns the zero amount.
    #[inline]
    pub const fn zero() -> Self {
        Amount(0)
    }

    /// Checks if the amount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Appends one decimal digit, the way a keystroke at the end of the
    /// field extends the amount. Saturates at `u64::MAX`.
    ///
    /// ## Example
    /// ```rust
    /// use money_input_core::amount::Amount;
    ///
    /// let amount = Amount::from_minor(12).push_digit(3);
    /// assert_eq!(amount.minor_units(), 123);
    /// ```
    #[inline]
    pub fn push_digit(self, digit: u8) -> Self {
        Amount(
            self.0
                .saturating_mul(10)
                .saturating_add(u64::from(digit.min(9))),
        )
    }
}

/// Returns `10^fraction_digits`, saturating for absurd digit counts.
///
/// No real currency uses more than 4 fraction digits, but the provider
/// contract only promises "a non-negative integer".
pub(crate) fn scale_factor(fraction_digits: u8) -> u64 {
    10u64.saturating_pow(u32::from(fraction_digits))
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain minor-unit count. Locale formatting lives in the codec.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(minor_units: u64) -> Self {
        Amount(minor_units)
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
