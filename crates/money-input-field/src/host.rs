//! # Text Host
//!
//! The seam between the masking engine and a concrete text widget.
//!
//! A native bridge implements [`TextHost`] over its widget; [`MemoryField`]
//! is the in-process implementation the CLI and tests drive.

use money_input_core::EditDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{HostError, HostResult};

// =============================================================================
// Field Identifier
// =============================================================================

/// Opaque identifier for a masked field.
///
/// Bridges map their native view handles onto this with `From`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldId(u64);

impl FieldId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for FieldId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field#{}", self.0)
    }
}

// =============================================================================
// Host Trait
// =============================================================================

/// A text widget that shows one masked field.
///
/// Offsets are character offsets. Implementations may report the change
/// caused by `replace_text` back to the registry; that echo is ignored while
/// the field's listener is detached.
pub trait TextHost {
    /// Current text.
    fn text(&self) -> String;

    /// Replaces the whole text.
    fn replace_text(&mut self, text: &str);

    /// Current caret offset, if the widget tracks one.
    fn caret(&self) -> Option<usize>;

    /// Moves the caret. May refuse, for example when `offset` is stale.
    fn set_caret(&mut self, offset: usize) -> HostResult<()>;
}

// =============================================================================
// In-Memory Host
// =============================================================================

/// A headless single-line field: text plus a caret.
///
/// ## Example
/// ```rust
/// use money_input_field::{MemoryField, TextHost};
///
/// let mut field = MemoryField::new("$1.00");
/// assert_eq!(field.caret(), Some(5));
///
/// let edit = field.backspace().unwrap();
/// assert_eq!(edit.apply(), "$1.0");
/// assert!(field.set_caret(9).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryField {
    text: String,
    caret: usize,
}

impl MemoryField {
    /// Creates a field with the caret at the end of `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.chars().count();
        MemoryField { text, caret }
    }

    /// The edit produced by typing (or pasting) `typed` at the caret.
    pub fn typing(&self, typed: &str) -> EditDescriptor {
        EditDescriptor::insert(self.text.clone(), self.caret, typed)
    }

    /// The edit produced by Backspace, or `None` at the start of the text.
    pub fn backspace(&self) -> Option<EditDescriptor> {
        let at = self.caret.checked_sub(1)?;
        Some(EditDescriptor::delete(self.text.clone(), at, 1))
    }

    /// The edit produced by Delete, or `None` at the end of the text.
    pub fn forward_delete(&self) -> Option<EditDescriptor> {
        if self.caret >= self.len() {
            return None;
        }
        Some(EditDescriptor::delete(self.text.clone(), self.caret, 1))
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }
}

impl TextHost for MemoryField {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn replace_text(&mut self, text: &str) {
        self.text = text.to_string();
        // A widget keeps its caret where it was, clamped into the new text
        self.caret = self.caret.min(self.len());
    }

    fn caret(&self) -> Option<usize> {
        Some(self.caret)
    }

    fn set_caret(&mut self, offset: usize) -> HostResult<()> {
        let len = self.len();
        if offset > len {
            return Err(HostError::CaretOutOfRange { offset, len });
        }
        self.caret = offset;
        Ok(())
    }
}
