//! Core types shared across the event sheet crates
//!
//! - **Identifiers**: EventId, InstructionId
//! - **Schema constants**: Canonical field keys and event names for logging

pub mod ids;
pub mod schema;

pub use ids::{EventId, InstructionId};
