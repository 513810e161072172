//! # Field Observers
//!
//! A field may have an observer installed alongside its mask, typically the
//! application's own change handler. It sees every masked change and focus
//! change after the mask has handled it.

use money_input_core::CaretDecision;

use crate::host::FieldId;

/// Receives a field's events after masking.
pub trait FieldObserver {
    /// Called after a decision has been applied to the host.
    fn on_masked_change(&mut self, field: FieldId, decision: &CaretDecision);

    /// Called after focus tidy has run.
    fn on_focus_changed(&mut self, _field: FieldId, _has_focus: bool) {}
}

/// Closures observe changes only.
impl<F> FieldObserver for F
where
    F: FnMut(FieldId, &CaretDecision),
{
    fn on_masked_change(&mut self, field: FieldId, decision: &CaretDecision) {
        self(field, decision)
    }
}
