//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_EVENT_ID: &str = "event_id";
pub const FIELD_INSTRUCTION_ID: &str = "instruction_id";
pub const FIELD_POSITION: &str = "position";

// Collection sizes
pub const FIELD_SELECTED_LEN: &str = "selected_len";
pub const FIELD_INSERTED_LEN: &str = "inserted_len";
pub const FIELD_REMOVED_LEN: &str = "removed_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_REJECTED: &str = "rejected";
