//! # Keystroke Scripts
//!
//! Replays a sequence of keystroke tokens against one masked field.
//!
//! ## Tokens
//! | Token   | Meaning                                   |
//! |---------|-------------------------------------------|
//! | `123`   | Type each character as its own keystroke  |
//! | `+123`  | Paste `123` as a single edit              |
//! | `<`     | Backspace                                 |
//! | `>`     | Forward delete                            |
//! | `@N`    | Tap to place the caret at offset `N`      |
//! | `^`     | Blur, then focus again                    |

use money_input_core::{CaretRule, EditDescriptor};
use money_input_field::{FieldId, FieldRegistry, MaskConfig, MaskOptions, MemoryField, TextHost};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;
use tracing::debug;

use crate::error::CliError;

// =============================================================================
// Steps
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Type(String),
    Paste(String),
    Backspace,
    ForwardDelete,
    MoveCaret(usize),
    Refocus,
}

impl FromStr for Step {
    type Err = CliError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "" => Err(CliError::Usage("empty keystroke token".into())),
            "<" => Ok(Step::Backspace),
            ">" => Ok(Step::ForwardDelete),
            "^" => Ok(Step::Refocus),
            _ => {
                if let Some(offset) = token.strip_prefix('@') {
                    offset.parse().map(Step::MoveCaret).map_err(|_| {
                        CliError::Usage(format!("caret token {:?} needs a number", token))
                    })
                } else if let Some(pasted) = token.strip_prefix('+') {
                    Ok(Step::Paste(pasted.to_string()))
                } else {
                    Ok(Step::Type(token.to_string()))
                }
            }
        }
    }
}

/// Field state after one keystroke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub key: String,
    pub text: String,
    pub caret: usize,
    pub amount: u64,
    /// Present when the keystroke went through the caret tracker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<CaretRule>,
}

// =============================================================================
// Session
// =============================================================================

/// One in-memory field with a mask installed.
pub struct Session {
    registry: FieldRegistry,
    widget: Rc<RefCell<MemoryField>>,
    id: FieldId,
}

impl Session {
    pub fn new(config: MaskConfig, locale: Option<String>) -> Self {
        let mut registry = FieldRegistry::from_config(config);
        let widget = Rc::new(RefCell::new(MemoryField::default()));
        let id = FieldId::from_raw(1);
        registry.install(id, &widget, MaskOptions { locale }, None);
        Session {
            registry,
            widget,
            id,
        }
    }

    /// Runs `step`, returning one report per keystroke it contains.
    pub fn run(&mut self, step: &Step) -> Vec<StepReport> {
        match step {
            Step::Type(text) => text
                .chars()
                .map(|c| {
                    let edit = self.widget.borrow().typing(&c.to_string());
                    self.edit(c.to_string(), Some(edit))
                })
                .collect(),
            Step::Paste(text) => {
                let edit = self.widget.borrow().typing(text);
                vec![self.edit(format!("+{}", text), Some(edit))]
            }
            Step::Backspace => {
                let edit = self.widget.borrow().backspace();
                vec![self.edit("<".into(), edit)]
            }
            Step::ForwardDelete => {
                let edit = self.widget.borrow().forward_delete();
                vec![self.edit(">".into(), edit)]
            }
            Step::MoveCaret(offset) => {
                // A tap lands inside the text, then the widget reports it
                let placed = {
                    let mut widget = self.widget.borrow_mut();
                    let placed = (*offset).min(widget.text().chars().count());
                    if let Err(err) = widget.set_caret(placed) {
                        debug!(%err, "Tap ignored");
                    }
                    placed
                };
                self.registry.on_selection_changed(self.id, placed);
                vec![self.report(format!("@{}", offset), None)]
            }
            Step::Refocus => {
                self.registry.on_focus_changed(self.id, false);
                self.registry.on_focus_changed(self.id, true);
                vec![self.report("^".into(), None)]
            }
        }
    }

    fn edit(&mut self, key: String, edit: Option<EditDescriptor>) -> StepReport {
        let Some(edit) = edit else {
            debug!(key = %key, "Nothing to delete");
            return self.report(key, None);
        };
        let rule = self.registry.on_edit(self.id, &edit).map(|d| d.rule);
        self.report(key, rule)
    }

    fn report(&self, key: String, rule: Option<CaretRule>) -> StepReport {
        let widget = self.widget.borrow();
        let text = widget.text();
        StepReport {
            key,
            amount: money_input_core::unmask(&text).minor_units(),
            caret: widget.caret().unwrap_or_default(),
            text,
            rule,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
