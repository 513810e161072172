//! # money-input-field: Host Adapter
//!
//! Attaches money masking to text widgets. The pure decisions come from
//! `money-input-core`; this crate keeps the per-field state a widget needs
//! between keystrokes and applies each decision without re-triggering
//! itself.
//!
//! ## Modules
//!
//! - [`registry`] - `FieldRegistry`: install, uninstall, event handling
//! - [`host`] - `TextHost` widget seam and the in-memory `MemoryField`
//! - [`listener`] - Detach/reattach guard around self-originated changes
//! - [`observer`] - Forwarding masked changes to application handlers
//! - [`config`] - `MaskConfig` from TOML and environment
//! - [`error`] - Host and config errors
//!
//! ## Example Usage
//!
//! ```rust
//! use money_input_field::{FieldId, FieldRegistry, MaskOptions, MemoryField, TextHost};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let mut registry = FieldRegistry::default();
//! let widget = Rc::new(RefCell::new(MemoryField::default()));
//! let id = FieldId::from_raw(1);
//! registry.install(id, &widget, MaskOptions::with_locale("de_DE"), None);
//!
//! let edit = widget.borrow().typing("42");
//! registry.on_edit(id, &edit);
//!
//! assert_eq!(widget.borrow().text(), "0,42\u{a0}€");
//! assert_eq!(widget.borrow().caret(), Some(4));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod host;
pub mod listener;
pub mod observer;
pub mod registry;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::{CaretSettings, InputSettings, LocaleSettings, MaskConfig};
pub use error::{FieldError, FieldResult, HostError, HostResult};
pub use host::{FieldId, MemoryField, TextHost};
pub use listener::{ListenerGuard, ListenerState};
pub use observer::FieldObserver;
pub use registry::{FieldRegistry, MaskOptions};
