//! Event sheet editing core
//!
//! This crate holds the in-memory model and the editing operations behind a
//! visual event sheet:
//! - Events and instructions stored in an id-keyed arena ([`Store`])
//! - Locators that name a node at a place in the tree
//! - The editor selection with highlights and drag state
//! - Cycle-safe drag and drop of events and instructions
//! - Grouped bulk deletion, clipboard copy / cut / paste
//! - Tree validation and structured operation logging
//!
//! Rendering, file formats and instruction semantics live elsewhere; the
//! canvas hears about changes through a [`RefreshNotifier`].

pub mod clipboard;
pub mod errors;
pub mod locator;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod refresh;
pub mod rules;
pub mod selection;

pub use eventsheet_core_types as core_types;

// Re-export commonly used types
pub use clipboard::{Clipboard, ClipboardContent};
pub use core_types::{EventId, InstructionId};
pub use errors::{ExError, ExErrorKind, Result, SheetError};
pub use locator::{EventItem, InstructionItem, InstructionListItem, ParameterItem};
pub use model::{
    Event, EventListRef, EventSnapshot, Instruction, InstructionListRef, InstructionSnapshot,
    ListRole,
};
pub use ops::{Relayout, Store};
pub use refresh::{CountingRefreshNotifier, NoopRefreshNotifier, RefreshNotifier};
pub use rules::validate_tree;
pub use selection::{EditorSelection, EventDrop, InstructionDrop, Pasted};
