//! # Field Registry
//!
//! Owns one masking context per installed field and routes widget events
//! through the caret tracker.
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         FieldRegistry::on_edit                          │
//! │                                                                         │
//! │  widget change ──► context lookup ──► listener attached? ──no──► drop   │
//! │                        │                     │ yes                      │
//! │                        ▼                     ▼                          │
//! │                  host dropped?        digit bound exceeded?             │
//! │                  (remove context)       │ no          │ yes             │
//! │                                         ▼             ▼                 │
//! │                              CaretTracker::compute   re-render previous │
//! │                                         │             │                 │
//! │                                         └──────┬──────┘                 │
//! │                                                ▼                        │
//! │             detach ─► replace_text ─► set_caret ─► reattach             │
//! │                                                │                        │
//! │                                                ▼                        │
//! │                                    observer.on_masked_change            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The registry holds a `Weak` handle to each widget. A widget that has been
//! dropped is forgotten on its next event; nothing panics.

use money_input_core::{
    digit_count, end_of_input, on_focus_gained, on_selection_changed, AmountCodec,
    BuiltinProvider, CaretDecision, CaretRule, CaretTracker, EditDescriptor, FormattingProvider,
    LocaleId,
};
use serde::Deserialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use tracing::{debug, trace, warn};

use crate::config::MaskConfig;
use crate::host::{FieldId, TextHost};
use crate::listener::ListenerState;
use crate::observer::FieldObserver;

// =============================================================================
// Install Options
// =============================================================================

/// Options passed when a mask is installed on a field.
///
/// Deserializable so bridges can pass the JS options object straight through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskOptions {
    /// Locale identifier (`"de_DE"`). Absent or malformed uses the default.
    #[serde(default)]
    pub locale: Option<String>,
}

impl MaskOptions {
    pub fn with_locale(locale: impl Into<String>) -> Self {
        MaskOptions {
            locale: Some(locale.into()),
        }
    }
}

// =============================================================================
// Field Context
// =============================================================================

struct FieldContext {
    host: Weak<RefCell<dyn TextHost>>,
    locale: LocaleId,
    listener: ListenerState,
    /// Last caret the mask placed or observed.
    caret: Option<usize>,
    /// Text as of the last applied decision, for snapshot-only hosts.
    text: String,
    observer: Option<Box<dyn FieldObserver>>,
}

// =============================================================================
// Registry
// =============================================================================

/// Per-field masking contexts for one UI thread.
pub struct FieldRegistry<P = BuiltinProvider> {
    tracker: CaretTracker<P>,
    config: MaskConfig,
    fields: HashMap<FieldId, FieldContext>,
}

impl FieldRegistry<BuiltinProvider> {
    /// Creates a registry over the built-in provider, defaulting to the
    /// config's locale.
    pub fn from_config(config: MaskConfig) -> Self {
        let provider = BuiltinProvider::with_default_locale(config.default_locale());
        Self::with_tracker(CaretTracker::new(AmountCodec::new(provider)), config)
    }
}

impl Default for FieldRegistry<BuiltinProvider> {
    fn default() -> Self {
        Self::from_config(MaskConfig::default())
    }
}

impl<P: FormattingProvider> FieldRegistry<P> {
    /// Creates a registry over a custom tracker.
    pub fn with_tracker(tracker: CaretTracker<P>, config: MaskConfig) -> Self {
        FieldRegistry {
            tracker,
            config,
            fields: HashMap::new(),
        }
    }

    pub fn config(&self) -> &MaskConfig {
        &self.config
    }

    pub fn tracker(&self) -> &CaretTracker<P> {
        &self.tracker
    }

    // -------------------------------------------------------------------------
    // Install / Uninstall
    // -------------------------------------------------------------------------

    /// Installs a mask on `host` under `id`.
    ///
    /// Installing over an existing mask replaces it: the old listener is
    /// retired and the old observer dropped. Returns the new listener state.
    pub fn install<H>(
        &mut self,
        id: FieldId,
        host: &Rc<RefCell<H>>,
        options: MaskOptions,
        observer: Option<Box<dyn FieldObserver>>,
    ) -> ListenerState
    where
        H: TextHost + 'static,
    {
        let locale = self
            .tracker
            .codec()
            .provider()
            .resolve_locale(options.locale.as_deref());

        let (text, caret) = match host.try_borrow() {
            Ok(widget) => (widget.text(), widget.caret()),
            Err(_) => (String::new(), None),
        };

        if let Some(previous) = self.fields.remove(&id) {
            debug!(field = %id, "Replacing existing mask");
            previous.listener.retire();
        }

        let weak = Rc::downgrade(host);
        let weak: Weak<RefCell<dyn TextHost>> = weak;
        let listener = ListenerState::new();
        debug!(field = %id, %locale, "Mask installed");

        self.fields.insert(
            id,
            FieldContext {
                host: weak,
                locale,
                listener: listener.clone(),
                caret,
                text,
                observer,
            },
        );
        listener
    }

    /// Removes the mask from `id`. Returns false if none was installed.
    pub fn uninstall(&mut self, id: FieldId) -> bool {
        match self.fields.remove(&id) {
            Some(context) => {
                context.listener.retire();
                debug!(field = %id, "Mask removed");
                true
            }
            None => false,
        }
    }

    pub fn is_installed(&self, id: FieldId) -> bool {
        self.fields.contains_key(&id)
    }

    /// Number of installed fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The listener state for `id`, shared with the context.
    pub fn listener_state(&self, id: FieldId) -> Option<ListenerState> {
        self.fields.get(&id).map(|ctx| ctx.listener.clone())
    }

    pub fn locale(&self, id: FieldId) -> Option<&LocaleId> {
        self.fields.get(&id).map(|ctx| &ctx.locale)
    }

    /// Last caret the mask placed or observed for `id`.
    pub fn stored_caret(&self, id: FieldId) -> Option<usize> {
        self.fields.get(&id).and_then(|ctx| ctx.caret)
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Handles one text-change event from the widget.
    ///
    /// Returns `None` when the event is ignored: no mask, the listener is
    /// detached (the change is the mask's own echo), the widget is gone, or
    /// the widget is borrowed elsewhere so the decision could not be applied.
    pub fn on_edit(&mut self, id: FieldId, descriptor: &EditDescriptor) -> Option<CaretDecision> {
        let host = self.live_host(id)?;
        let context = self.fields.get_mut(&id)?;

        if !context.listener.is_attached() {
            trace!(field = %id, "Ignoring change while listener is detached");
            return None;
        }

        let decision = if digit_count(&descriptor.apply()) > self.config.input.max_digits {
            debug!(
                field = %id,
                max_digits = self.config.input.max_digits,
                "Rejecting edit past digit limit"
            );
            let (amount, text) = self
                .tracker
                .codec()
                .remask(&descriptor.previous_text, &context.locale);
            let caret = context
                .caret
                .unwrap_or_else(|| end_of_input(&text))
                .min(text.chars().count());
            CaretDecision {
                new_caret_offset: caret,
                new_display_text: text,
                amount,
                rule: CaretRule::Rejected,
            }
        } else {
            self.tracker.compute(descriptor, &context.locale)
        };

        if !apply_decision(id, context, &host, &decision) {
            return None;
        }

        if let Some(observer) = context.observer.as_mut() {
            observer.on_masked_change(id, &decision);
        }
        Some(decision)
    }

    /// Handles a host that reports only the new text.
    ///
    /// The edit is derived against the text the mask last applied.
    pub fn on_text_snapshot(&mut self, id: FieldId, current_text: &str) -> Option<CaretDecision> {
        let previous = &self.fields.get(&id)?.text;
        let descriptor = EditDescriptor::diff(previous, current_text);
        self.on_edit(id, &descriptor)
    }

    /// Handles a focus change. On gain, tidies the caret if configured.
    pub fn on_focus_changed(&mut self, id: FieldId, has_focus: bool) {
        let Some(host) = self.live_host(id) else {
            return;
        };
        let tidy = self.config.caret.tidy_on_focus;
        let Some(context) = self.fields.get_mut(&id) else {
            return;
        };

        if has_focus && tidy {
            let text = match host.try_borrow() {
                Ok(widget) => widget.text(),
                Err(_) => {
                    warn!(field = %id, "Host busy, skipping focus tidy");
                    return;
                }
            };
            let caret = on_focus_gained(&text, context.caret);
            place_caret(id, context, &host, caret);
        }

        if let Some(observer) = context.observer.as_mut() {
            observer.on_focus_changed(id, has_focus);
        }
    }

    /// Handles a user-placed caret. Returns the caret after snapping, or
    /// `None` if the snapped caret could not be placed.
    pub fn on_selection_changed(&mut self, id: FieldId, caret: usize) -> Option<usize> {
        let host = self.live_host(id)?;
        let snap = self.config.caret.snap_selection;
        let context = self.fields.get_mut(&id)?;

        if !context.listener.is_attached() {
            return None;
        }

        if !snap {
            context.caret = Some(caret);
            return Some(caret);
        }

        let text = host.try_borrow().ok()?.text();
        let snapped = on_selection_changed(&text, caret);
        if snapped != caret {
            trace!(field = %id, from = caret, to = snapped, "Snapping caret out of symbol");
            if !place_caret(id, context, &host, snapped) {
                return None;
            }
        } else {
            context.caret = Some(caret);
        }
        Some(snapped)
    }

    /// Upgrades the host handle, forgetting the field if the widget is gone.
    fn live_host(&mut self, id: FieldId) -> Option<Rc<RefCell<dyn TextHost>>> {
        match self.fields.get(&id).map(|ctx| ctx.host.upgrade()) {
            None => {
                trace!(field = %id, "Event for field without a mask");
                None
            }
            Some(None) => {
                debug!(field = %id, "Host dropped, removing mask");
                if let Some(context) = self.fields.remove(&id) {
                    context.listener.retire();
                }
                None
            }
            Some(Some(host)) => Some(host),
        }
    }
}

// =============================================================================
// Applying Decisions
// =============================================================================

/// Writes text and caret to the host under a detached listener. Returns
/// false, leaving the context untouched, when the host is busy.
fn apply_decision(
    id: FieldId,
    context: &mut FieldContext,
    host: &RefCell<dyn TextHost>,
    decision: &CaretDecision,
) -> bool {
    let _guard = context.listener.detach();
    let Ok(mut widget) = host.try_borrow_mut() else {
        warn!(field = %id, "Host busy, dropping decision");
        return false;
    };

    widget.replace_text(&decision.new_display_text);
    context.text = decision.new_display_text.clone();

    match widget.set_caret(decision.new_caret_offset) {
        Ok(()) => context.caret = Some(decision.new_caret_offset),
        Err(err) => {
            debug!(field = %id, %err, "Host refused caret");
            context.caret = widget.caret();
        }
    }
    true
}

fn place_caret(
    id: FieldId,
    context: &mut FieldContext,
    host: &RefCell<dyn TextHost>,
    caret: usize,
) -> bool {
    let _guard = context.listener.detach();
    let Ok(mut widget) = host.try_borrow_mut() else {
        warn!(field = %id, "Host busy, caret not moved");
        return false;
    };

    match widget.set_caret(caret) {
        Ok(()) => {
            context.caret = Some(caret);
            true
        }
        Err(err) => {
            debug!(field = %id, %err, "Host refused caret");
            false
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
