//! Registry behavior against widgets that echo changes, refuse carets, or
//! panic mid-update.

use money_input_core::{CaretDecision, EditDescriptor};
use money_input_field::{
    FieldId, FieldRegistry, HostError, HostResult, ListenerState, MaskOptions, TextHost,
};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::panic::AssertUnwindSafe;
use std::rc::Rc;

/// Records whether the listener was attached whenever text was replaced.
#[derive(Default)]
struct RecordingHost {
    text: String,
    caret: usize,
    listener: Option<ListenerState>,
    attached_during_replace: Vec<bool>,
    refuse_caret: bool,
    panic_on_caret: bool,
}

impl TextHost for RecordingHost {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn replace_text(&mut self, text: &str) {
        let attached = self.listener.as_ref().is_some_and(ListenerState::is_attached);
        self.attached_during_replace.push(attached);
        self.text = text.to_string();
    }

    fn caret(&self) -> Option<usize> {
        Some(self.caret)
    }

    fn set_caret(&mut self, offset: usize) -> HostResult<()> {
        if self.panic_on_caret {
            panic!("widget exploded");
        }
        if self.refuse_caret {
            return Err(HostError::Unavailable("detached from window".into()));
        }
        self.caret = offset;
        Ok(())
    }
}

fn setup(host: RecordingHost) -> (FieldRegistry, Rc<RefCell<RecordingHost>>, ListenerState) {
    let mut registry = FieldRegistry::default();
    let widget = Rc::new(RefCell::new(host));
    let listener = registry.install(FieldId::from(1), &widget, MaskOptions::default(), None);
    widget.borrow_mut().listener = Some(listener.clone());
    (registry, widget, listener)
}

fn edit(registry: &mut FieldRegistry, e: EditDescriptor) -> Option<CaretDecision> {
    registry.on_edit(FieldId::from(1), &e)
}

#[test]
fn test_listener_detached_while_text_is_replaced() {
    let (mut registry, widget, listener) = setup(RecordingHost::default());

    edit(&mut registry, EditDescriptor::insert("", 0, "1")).unwrap();
    edit(&mut registry, EditDescriptor::insert("$0.01", 5, "2")).unwrap();

    assert_eq!(widget.borrow().attached_during_replace, vec![false, false]);
    assert!(listener.is_attached());
    assert_eq!(widget.borrow().text, "$0.12");
}

#[test]
fn test_refused_caret_is_swallowed() {
    let (mut registry, widget, listener) = setup(RecordingHost {
        refuse_caret: true,
        ..Default::default()
    });

    let decision = edit(&mut registry, EditDescriptor::insert("", 0, "5")).unwrap();

    assert_eq!(decision.new_display_text, "$0.05");
    assert_eq!(widget.borrow().text, "$0.05");
    assert_eq!(widget.borrow().caret, 0);
    assert!(listener.is_attached());
}

#[test]
fn test_listener_restored_after_widget_panic() {
    let (mut registry, widget, listener) = setup(RecordingHost {
        panic_on_caret: true,
        ..Default::default()
    });

    let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
        edit(&mut registry, EditDescriptor::insert("", 0, "5"))
    }));

    assert!(result.is_err());
    assert!(listener.is_attached());

    // The widget is usable again once it stops panicking
    widget.borrow_mut().panic_on_caret = false;
    let decision = edit(&mut registry, EditDescriptor::insert("$0.05", 5, "0")).unwrap();
    assert_eq!(decision.new_display_text, "$0.50");
    assert_eq!(widget.borrow().caret, 5);
}

#[test]
fn test_fields_are_independent() {
    let mut registry = FieldRegistry::default();
    let dollars = Rc::new(RefCell::new(RecordingHost::default()));
    let euros = Rc::new(RefCell::new(RecordingHost::default()));
    registry.install(FieldId::from(1), &dollars, MaskOptions::default(), None);
    registry.install(FieldId::from(2), &euros, MaskOptions::with_locale("it_IT"), None);

    registry.on_edit(FieldId::from(1), &EditDescriptor::insert("", 0, "7"));
    registry.on_edit(FieldId::from(2), &EditDescriptor::insert("", 0, "7"));

    assert_eq!(dollars.borrow().text, "$0.07");
    assert_eq!(euros.borrow().text, "0,07\u{a0}€");
    assert_eq!(euros.borrow().caret, 4);
}
