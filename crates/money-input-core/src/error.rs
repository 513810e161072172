//! # Error Types
//!
//! Error types for money-input-core.
//!
//! ## Error Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    What Can Go Wrong While Typing?                      │
//! │                                                                         │
//! │  Malformed digits   "ab12cd"      → stripped          (never an error)  │
//! │  Caret out of range  offset 42    → clamped           (never an error)  │
//! │  Unknown locale      "xx_YY"      → default locale    (never an error)  │
//! │  Malformed locale    "en_"        → LocaleError ───┐                    │
//! │                                                    │                    │
//! │                       LocaleId::from_str returns it,                    │
//! │                       the masking path swallows it into a fallback      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing on the keystroke path is allowed to fail. `LocaleError` exists so
//! that callers who *want* strict validation (config loading, tests) can get
//! it from `str::parse`.

use thiserror::Error;

// =============================================================================
// Locale Error
// =============================================================================

/// Locale identifier parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    /// The identifier was empty or whitespace.
    #[error("locale identifier is empty")]
    Empty,

    /// The language subtag is not 2-3 ASCII letters.
    ///
    /// ## Examples
    /// - `"e_US"` (too short)
    /// - `"12_US"` (digits)
    #[error("invalid language subtag '{0}' (expected 2-3 ASCII letters)")]
    InvalidLanguage(String),

    /// The country subtag is not 2 ASCII letters or 3 digits.
    #[error("invalid country subtag '{0}' (expected 2 letters or 3 digits)")]
    InvalidCountry(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for locale parsing results.
pub type LocaleResult<T> = Result<T, LocaleError>;

// =============================================================================
// Unit Tests
// =============================================================================
