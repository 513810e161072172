//! # Caret Tracker
//!
//! Decides where the caret goes after every masked edit.
//!
//! ## The Problem
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The host replaces the whole field text on every keystroke.             │
//! │  Left alone, its caret would land wherever the replace put it.          │
//! │                                                                         │
//! │  Before:  $999.99|          user types "9"                              │
//! │  Raw:     $999.999|                                                     │
//! │  Masked:  $9,999.99         a comma appeared LEFT of the caret          │
//! │                    ^                                                    │
//! │                    caret must move right by one to stay after "99"      │
//! │                                                                         │
//! │  Before:  $1,23|4.56        user deletes "3"                            │
//! │  Masked:  $124.56           the comma vanished LEFT of the caret        │
//! │              ^              caret must move left by one                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pipeline
//! ```text
//! EditDescriptor ──apply──► raw text ──unmask──► Amount ──mask──► formatted
//!       │                                                           │
//!       └──classify (leading edge / deletion / insert)──┐           │
//!                                                       ▼           ▼
//!                                  tie-break rule ──► caret ──► separator drift
//!                                                                   │
//!                                                  clamp to boundary and text
//!                                                                   ▼
//!                                                            CaretDecision
//! ```
//!
//! All offsets are character (Unicode scalar value) offsets, not bytes.
//!
//! ## Usage
//! ```rust
//! use money_input_core::caret::{CaretTracker, EditDescriptor};
//! use money_input_core::locale::LocaleId;
//!
//! let tracker = CaretTracker::default();
//! let edit = EditDescriptor::insert("", 0, "5");
//! let decision = tracker.compute(&edit, &LocaleId::default());
//!
//! assert_eq!(decision.new_display_text, "$0.05");
//! assert_eq!(decision.new_caret_offset, 5);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::amount::Amount;
use crate::codec::{unmask, AmountCodec};
use crate::locale::LocaleId;
use crate::provider::{BuiltinProvider, FormattingProvider, Rendered};

// =============================================================================
// Edit Descriptor
// =============================================================================

/// A `[start, start + length)` character range in the previous text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReplacedRange {
    pub start: usize,
    pub length: usize,
}

impl ReplacedRange {
    pub fn new(start: usize, length: usize) -> Self {
        ReplacedRange { start, length }
    }
}

/// One discrete text-change event, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EditDescriptor {
    /// Field text before the edit.
    pub previous_text: String,

    /// Characters of `previous_text` being replaced.
    pub replaced_range: ReplacedRange,

    /// Characters typed or pasted in their place (empty for a delete).
    pub inserted_text: String,
}

impl EditDescriptor {
    /// Creates a replace edit: `length` chars at `start` become `inserted_text`.
    pub fn replace(
        previous_text: impl Into<String>,
        start: usize,
        length: usize,
        inserted_text: impl Into<String>,
    ) -> Self {
        EditDescriptor {
            previous_text: previous_text.into(),
            replaced_range: ReplacedRange::new(start, length),
            inserted_text: inserted_text.into(),
        }
    }

    /// Creates a pure insert at `at`.
    pub fn insert(previous_text: impl Into<String>, at: usize, text: impl Into<String>) -> Self {
        Self::replace(previous_text, at, 0, text)
    }

    /// Creates a pure delete of `length` chars at `start`.
    pub fn delete(previous_text: impl Into<String>, start: usize, length: usize) -> Self {
        Self::replace(previous_text, start, length, String::new())
    }

    /// Derives the edit that turns `previous` into `current`.
    ///
    /// For hosts that only report full snapshots. The common prefix and
    /// suffix are kept; whatever differs in between is the edit.
    ///
    /// ## Example
    /// ```rust
    /// use money_input_core::caret::{EditDescriptor, ReplacedRange};
    ///
    /// let edit = EditDescriptor::diff("$1,234.56", "$1,24.56");
    /// assert_eq!(edit.replaced_range, ReplacedRange::new(4, 1));
    /// assert_eq!(edit.inserted_text, "");
    /// ```
    pub fn diff(previous: &str, current: &str) -> Self {
        let old: Vec<char> = previous.chars().collect();
        let new: Vec<char> = current.chars().collect();

        let prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
        let max_suffix = old.len().min(new.len()) - prefix;
        let suffix = old
            .iter()
            .rev()
            .zip(new.iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();

        EditDescriptor {
            previous_text: previous.to_string(),
            replaced_range: ReplacedRange::new(prefix, old.len() - prefix - suffix),
            inserted_text: new[prefix..new.len() - suffix].iter().collect(),
        }
    }

    /// The replaced range clamped into `previous_text`.
    ///
    /// Hosts occasionally report stale ranges; they are clamped, never
    /// rejected.
    pub fn clamped_range(&self) -> ReplacedRange {
        let len = self.previous_text.chars().count();
        let start = self.replaced_range.start.min(len);
        let length = self.replaced_range.length.min(len - start);
        ReplacedRange { start, length }
    }

    /// Returns `previous_text` with the edit applied.
    ///
    /// ## Example
    /// ```rust
    /// use money_input_core::caret::EditDescriptor;
    ///
    /// assert_eq!(EditDescriptor::insert("$9.99", 5, "9").apply(), "$9.999");
    /// assert_eq!(EditDescriptor::delete("$9.99", 1, 1).apply(), "$.99");
    /// ```
    pub fn apply(&self) -> String {
        let range = self.clamped_range();
        let mut out = String::with_capacity(self.previous_text.len() + self.inserted_text.len());
        let mut chars = self.previous_text.chars();
        out.extend(chars.by_ref().take(range.start));
        out.push_str(&self.inserted_text);
        out.extend(chars.skip(range.length));
        out
    }

    /// True when nothing is inserted.
    pub fn is_deletion(&self) -> bool {
        self.inserted_text.is_empty()
    }
}

// =============================================================================
// Caret Decision
// =============================================================================

/// Which tie-break rule placed the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum CaretRule {
    /// The field unmasked to zero: park at the numeric boundary.
    ZeroAmount,
    /// Edit at the tail of the number: re-anchor to the boundary.
    LeadingEdge,
    /// Mid-string delete: stay where the deleted character was.
    MidDeletion,
    /// Mid-string insert: re-anchor to the boundary.
    MidInsertion,
    /// Nothing else matched: boundary.
    Fallback,
    /// The host refused the edit (input bound); previous text re-rendered,
    /// caret left where it was.
    Rejected,
}

/// The output of one masking pass. The host applies text and caret together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CaretDecision {
    /// Caret offset in characters, always `<= new_display_text` length.
    pub new_caret_offset: usize,

    /// The formatted text to show.
    pub new_display_text: String,

    /// The amount `new_display_text` renders.
    pub amount: Amount,

    /// The rule that chose the caret before drift correction.
    pub rule: CaretRule,
}

/// How an edit relates to the previous text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditClass {
    /// The edit starts at or near the end of the number.
    pub is_leading_edge: bool,
    /// Nothing was inserted.
    pub is_deletion: bool,
    /// Something was inserted in the middle of a field longer than 3 chars.
    pub is_insert: bool,
}

impl EditClass {
    /// Classifies `descriptor` relative to its previous text.
    ///
    /// `suffix_symbol` widens the leading edge to the last 3 characters so
    /// edits just before a trailing `" €"` still count as appending.
    pub fn classify(descriptor: &EditDescriptor, suffix_symbol: bool) -> Self {
        let previous_len = char_len(&descriptor.previous_text);
        let location = descriptor.clamped_range().start as i64;

        let edge_width = if suffix_symbol { 3 } else { 1 };
        let is_leading_edge = location >= previous_len - edge_width;
        let is_deletion = descriptor.is_deletion();
        let is_insert = previous_len > 3 && !is_deletion && !is_leading_edge;

        EditClass {
            is_leading_edge,
            is_deletion,
            is_insert,
        }
    }
}

// =============================================================================
// Caret Tracker
// =============================================================================

/// Computes [`CaretDecision`]s. Holds no per-field state.
#[derive(Debug, Clone)]
pub struct CaretTracker<P = BuiltinProvider> {
    codec: AmountCodec<P>,
}

impl<P: FormattingProvider> CaretTracker<P> {
    pub fn new(codec: AmountCodec<P>) -> Self {
        CaretTracker { codec }
    }

    pub fn codec(&self) -> &AmountCodec<P> {
        &self.codec
    }

    /// Masks the edited text and places the caret.
    ///
    /// ## Tie-Break Order (first match wins)
    /// | # | Condition       | Caret                  |
    /// |---|-----------------|------------------------|
    /// | a | amount is zero  | numeric boundary       |
    /// | b | leading edge    | numeric boundary       |
    /// | c | deletion        | start of deleted range |
    /// | d | mid insert      | numeric boundary       |
    /// | e | anything else   | numeric boundary       |
    ///
    /// The numeric boundary (`endOfInput`) is `len - 2` when the formatted
    /// text ends in a symbol and `len + 1` otherwise.
    ///
    /// ## Separator Drift
    /// Grouping separators are counted in the first `caret - 1` characters
    /// of the new and previous text. A positive difference always shifts the
    /// caret; a negative one only for edits away from the leading edge.
    /// Zero amounts skip this step so they always land on the boundary.
    ///
    /// ## Clamping
    /// The caret never passes the boundary and never passes the text end.
    ///
    /// Rule (d) ignores where the digit went in; an insert in the middle of
    /// `$1,234.56` sends the caret to the end. Kept for parity with the
    /// platform widgets this replaces.
    pub fn compute(&self, descriptor: &EditDescriptor, locale: &LocaleId) -> CaretDecision {
        let new_raw_text = descriptor.apply();
        let amount = unmask(&new_raw_text);
        let Rendered { text, metadata } = self.codec.mask_with_metadata(amount, locale);

        let formatted: Vec<char> = text.chars().collect();
        let suffix = is_suffix_symbol(&formatted);
        let len = formatted.len() as i64;
        let end = boundary(len, suffix);
        let class = EditClass::classify(descriptor, suffix);

        let (rule, mut caret) = if amount.is_zero() {
            (CaretRule::ZeroAmount, end)
        } else if class.is_leading_edge {
            (CaretRule::LeadingEdge, end)
        } else if class.is_deletion {
            (
                CaretRule::MidDeletion,
                descriptor.clamped_range().start as i64,
            )
        } else if class.is_insert {
            (CaretRule::MidInsertion, end)
        } else {
            (CaretRule::Fallback, end)
        };

        if rule != CaretRule::ZeroAmount && caret > 0 {
            let window = (caret - 1) as usize;
            let separator = metadata.grouping_separator;
            let previous: Vec<char> = descriptor.previous_text.chars().collect();
            let after = count_separators(&formatted, window, separator);
            let before = count_separators(&previous, window, separator);
            let offset = after - before;
            if offset > 0 || !class.is_leading_edge {
                caret += offset;
            }
        }

        let caret = caret.min(end).clamp(0, len) as usize;

        debug!(
            %locale,
            amount = %amount,
            rule = ?rule,
            caret,
            "Masked edit"
        );

        CaretDecision {
            new_caret_offset: caret,
            new_display_text: text,
            amount,
            rule,
        }
    }
}

impl Default for CaretTracker<BuiltinProvider> {
    fn default() -> Self {
        CaretTracker::new(AmountCodec::default())
    }
}

// =============================================================================
// Focus and Selection
// =============================================================================

/// Tidies the caret when a field regains focus.
///
/// ## Rules
/// - Empty text, or no stored caret, or a stored caret past the end: reset to
///   the end of the text (one before the end if it ends in a symbol)
/// - Otherwise keep the stored caret
///
/// ## Example
/// ```rust
/// use money_input_core::caret::on_focus_gained;
///
/// assert_eq!(on_focus_gained("$12.34", None), 6);
/// assert_eq!(on_focus_gained("$12.34", Some(40)), 6);
/// assert_eq!(on_focus_gained("$12.34", Some(3)), 3);
/// assert_eq!(on_focus_gained("", Some(3)), 0);
/// ```
pub fn on_focus_gained(current_text: &str, stored_caret: Option<usize>) -> usize {
    let chars: Vec<char> = current_text.chars().collect();
    let len = chars.len();

    match stored_caret {
        Some(caret) if len > 0 && caret <= len => caret,
        _ if is_suffix_symbol(&chars) => len - 1,
        _ => len,
    }
}

/// Keeps a user-placed caret out of a trailing currency symbol.
///
/// ## Example
/// ```rust
/// use money_input_core::caret::on_selection_changed;
///
/// // "1,00 €" with a no-break space: the number ends at offset 4
/// assert_eq!(on_selection_changed("1,00\u{a0}€", 6), 4);
/// assert_eq!(on_selection_changed("1,00\u{a0}€", 2), 2);
/// assert_eq!(on_selection_changed("$1.00", 5), 5);
/// ```
pub fn on_selection_changed(current_text: &str, caret: usize) -> usize {
    let chars: Vec<char> = current_text.chars().collect();
    let len = chars.len();

    if is_suffix_symbol(&chars) && caret > len.saturating_sub(2) {
        len.saturating_sub(2)
    } else {
        caret.min(len)
    }
}

/// The numeric boundary of a formatted string, clamped into the text.
///
/// ## Example
/// ```rust
/// use money_input_core::caret::end_of_input;
///
/// assert_eq!(end_of_input("$0.05"), 5);
/// assert_eq!(end_of_input("0,05\u{a0}€"), 4);
/// ```
pub fn end_of_input(formatted: &str) -> usize {
    let chars: Vec<char> = formatted.chars().collect();
    let len = chars.len() as i64;
    boundary(len, is_suffix_symbol(&chars)).clamp(0, len) as usize
}

// =============================================================================
// Helpers
// =============================================================================

fn boundary(len: i64, suffix_symbol: bool) -> i64 {
    if suffix_symbol {
        len - 2
    } else {
        len + 1
    }
}

fn is_suffix_symbol(chars: &[char]) -> bool {
    chars.last().is_some_and(|c| !c.is_ascii_digit())
}

fn count_separators(chars: &[char], window: usize, separator: char) -> i64 {
    chars.iter().take(window).filter(|&&c| c == separator).count() as i64
}

fn char_len(text: &str) -> i64 {
    text.chars().count() as i64
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::BUILTIN_STYLES;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn en_us() -> LocaleId {
        LocaleId::default()
    }

    fn de_de() -> LocaleId {
        "de_DE".parse().unwrap()
    }

    fn decide(edit: EditDescriptor, locale: &LocaleId) -> CaretDecision {
        CaretTracker::default().compute(&edit, locale)
    }

    // -------------------------------------------------------------------------
    // EditDescriptor
    // -------------------------------------------------------------------------

    #[test]
    fn test_apply_replaces_by_characters() {
        let edit = EditDescriptor::replace("1.234,56\u{a0}€", 2, 1, "9");
        assert_eq!(edit.apply(), "1.934,56\u{a0}€");
    }

    #[test]
    fn test_apply_clamps_stale_ranges() {
        let edit = EditDescriptor::replace("$1.00", 40, 3, "5");
        assert_eq!(edit.clamped_range(), ReplacedRange::new(5, 0));
        assert_eq!(edit.apply(), "$1.005");

        let edit = EditDescriptor::delete("$1.00", 3, 99);
        assert_eq!(edit.apply(), "$1.");
    }

    #[test]
    fn test_diff() {
        let edit = EditDescriptor::diff("$9.99", "$9.999");
        assert_eq!(edit.replaced_range, ReplacedRange::new(5, 0));
        assert_eq!(edit.inserted_text, "9");

        let edit = EditDescriptor::diff("$1.00", "$1.00");
        assert_eq!(edit.replaced_range, ReplacedRange::new(5, 0));
        assert_eq!(edit.inserted_text, "");

        let edit = EditDescriptor::diff("$12.34", "");
        assert_eq!(edit.replaced_range, ReplacedRange::new(0, 6));
    }

    #[test]
    fn test_descriptor_serializes_camel_case() {
        let edit = EditDescriptor::insert("$0.00", 5, "1");
        let json = serde_json::to_value(&edit).unwrap();
        assert_eq!(json["previousText"], "$0.00");
        assert_eq!(json["replacedRange"]["start"], 5);
        assert_eq!(json["insertedText"], "1");
    }

    // -------------------------------------------------------------------------
    // Classification
    // -------------------------------------------------------------------------

    #[test]
    fn test_classify_prefix_locale() {
        let tail = EditClass::classify(&EditDescriptor::insert("$1,234.56", 8, "7"), false);
        assert!(tail.is_leading_edge);
        assert!(!tail.is_insert);

        let middle = EditClass::classify(&EditDescriptor::insert("$1,234.56", 3, "7"), false);
        assert!(!middle.is_leading_edge);
        assert!(middle.is_insert);

        let short = EditClass::classify(&EditDescriptor::insert("$12", 1, "7"), false);
        assert!(!short.is_insert);
    }

    #[test]
    fn test_classify_suffix_widens_leading_edge() {
        let edit = EditDescriptor::insert("1,00\u{a0}€", 3, "7");
        assert!(EditClass::classify(&edit, true).is_leading_edge);
        assert!(!EditClass::classify(&edit, false).is_leading_edge);
    }

    #[test]
    fn test_classify_empty_previous_is_leading_edge() {
        let class = EditClass::classify(&EditDescriptor::insert("", 0, "5"), false);
        assert!(class.is_leading_edge);
    }

    // -------------------------------------------------------------------------
    // Scenarios
    // -------------------------------------------------------------------------

    #[test]
    fn test_first_digit_into_empty_field() {
        let decision = decide(EditDescriptor::insert("", 0, "5"), &en_us());
        assert_eq!(decision.amount, Amount::from_minor(5));
        assert_eq!(decision.new_display_text, "$0.05");
        assert_eq!(decision.new_caret_offset, 5);
        assert_eq!(decision.rule, CaretRule::LeadingEdge);
    }

    #[test]
    fn test_mid_delete_keeps_position_minus_vanished_separator() {
        // Delete the "3" in "$1,234.56"
        let decision = decide(EditDescriptor::delete("$1,234.56", 4, 1), &en_us());
        assert_eq!(decision.new_display_text, "$124.56");
        assert_eq!(decision.rule, CaretRule::MidDeletion);
        // Deletion location is 4; the comma left of it disappeared
        assert_eq!(decision.new_caret_offset, 3);
    }

    #[test]
    fn test_mid_delete_with_separator_shifting_left() {
        // Delete the "3" in "$12,345.67"
        let decision = decide(EditDescriptor::delete("$12,345.67", 4, 1), &en_us());
        assert_eq!(decision.new_display_text, "$1,245.67");
        assert_eq!(decision.rule, CaretRule::MidDeletion);
        // "$12" -> "$1,": the comma moved into the window left of the caret
        assert_eq!(decision.new_caret_offset, 5);
    }

    #[test]
    fn test_append_introducing_separator() {
        let decision = decide(EditDescriptor::insert("$999.99", 7, "9"), &en_us());
        assert_eq!(decision.new_display_text, "$9,999.99");
        assert_eq!(decision.rule, CaretRule::LeadingEdge);
        assert_eq!(decision.new_caret_offset, 9);
    }

    #[test]
    fn test_backspace_at_tail() {
        let decision = decide(EditDescriptor::delete("$1,234.56", 8, 1), &en_us());
        assert_eq!(decision.new_display_text, "$123.45");
        assert_eq!(decision.new_caret_offset, 7);
    }

    #[test]
    fn test_mid_insert_reanchors_to_end() {
        let decision = decide(EditDescriptor::insert("$1,234.56", 3, "9"), &en_us());
        assert_eq!(decision.new_display_text, "$19,234.56");
        assert_eq!(decision.rule, CaretRule::MidInsertion);
        assert_eq!(decision.new_caret_offset, 10);
    }

    #[test]
    fn test_delete_to_zero_parks_at_boundary() {
        let decision = decide(EditDescriptor::delete("$0.05", 4, 1), &en_us());
        assert_eq!(decision.new_display_text, "$0.00");
        assert_eq!(decision.rule, CaretRule::ZeroAmount);
        assert_eq!(decision.new_caret_offset, 5);
    }

    #[test]
    fn test_malformed_input_masks_digits_only() {
        let decision = decide(EditDescriptor::insert("", 0, "ab12cd"), &en_us());
        assert_eq!(decision.amount, Amount::from_minor(12));
        assert_eq!(decision.new_display_text, "$0.12");
    }

    #[test]
    fn test_suffix_locale_typing() {
        let locale = de_de();
        let first = decide(EditDescriptor::insert("", 0, "1"), &locale);
        assert_eq!(first.new_display_text, "0,01\u{a0}€");
        assert_eq!(first.new_caret_offset, 4);

        let second = decide(EditDescriptor::insert(first.new_display_text, 4, "2"), &locale);
        assert_eq!(second.new_display_text, "0,12\u{a0}€");
        assert_eq!(second.new_caret_offset, 4);
    }

    #[test]
    fn test_suffix_locale_grouping_drift() {
        let decision = decide(EditDescriptor::insert("1.234,56\u{a0}€", 8, "7"), &de_de());
        assert_eq!(decision.new_display_text, "12.345,67\u{a0}€");
        assert_eq!(decision.new_caret_offset, 9);
    }

    #[test]
    fn test_suffix_locale_clear_all_lands_on_boundary() {
        let decision = decide(EditDescriptor::delete("1.234,56\u{a0}€", 0, 10), &de_de());
        assert_eq!(decision.new_display_text, "0,00\u{a0}€");
        assert_eq!(decision.new_caret_offset, 4);
    }

    #[test]
    fn test_zero_fraction_locale() {
        let decision = decide(EditDescriptor::insert("¥999", 4, "9"), &"ja_JP".parse().unwrap());
        assert_eq!(decision.new_display_text, "¥9,999");
        assert_eq!(decision.new_caret_offset, 6);
    }

    #[test]
    fn test_decision_serializes_camel_case() {
        let decision = decide(EditDescriptor::insert("", 0, "5"), &en_us());
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["newCaretOffset"], 5);
        assert_eq!(json["newDisplayText"], "$0.05");
        assert_eq!(json["amount"], 5);
        assert_eq!(json["rule"], "leadingEdge");
    }

    // -------------------------------------------------------------------------
    // Focus and selection
    // -------------------------------------------------------------------------

    #[test]
    fn test_on_focus_gained_suffix() {
        assert_eq!(on_focus_gained("1,00\u{a0}€", None), 5);
        assert_eq!(on_focus_gained("1,00\u{a0}€", Some(2)), 2);
        assert_eq!(on_focus_gained("1,00\u{a0}€", Some(9)), 5);
    }

    #[test]
    fn test_on_selection_changed_bounds() {
        assert_eq!(on_selection_changed("$1.00", 40), 5);
        assert_eq!(on_selection_changed("", 3), 0);
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    fn any_locale() -> impl Strategy<Value = LocaleId> {
        (0..BUILTIN_STYLES.len()).prop_map(|i| BUILTIN_STYLES[i].locale_id())
    }

    fn any_edit() -> impl Strategy<Value = EditDescriptor> {
        ("[0-9$,. €a-z]{0,16}", 0usize..20, 0usize..6, "[0-9a-z]{0,3}").prop_map(
            |(previous, start, length, inserted)| {
                EditDescriptor::replace(previous, start, length, inserted)
            },
        )
    }

    proptest! {
        #[test]
        fn prop_caret_is_bounded(edit in any_edit(), locale in any_locale()) {
            let decision = CaretTracker::default().compute(&edit, &locale);
            prop_assert!(decision.new_caret_offset <= decision.new_display_text.chars().count());
        }

        #[test]
        fn prop_zero_amount_lands_on_boundary(
            previous in "[$,. €a-z0-9]{0,16}",
            locale in any_locale(),
        ) {
            let len = previous.chars().count();
            let edit = EditDescriptor::delete(previous, 0, len);
            let decision = CaretTracker::default().compute(&edit, &locale);
            prop_assert!(decision.amount.is_zero());
            prop_assert_eq!(
                decision.new_caret_offset,
                end_of_input(&decision.new_display_text)
            );
        }

        #[test]
        fn prop_display_round_trips(edit in any_edit(), locale in any_locale()) {
            let decision = CaretTracker::default().compute(&edit, &locale);
            prop_assert_eq!(unmask(&decision.new_display_text), decision.amount);
        }
    }
}
