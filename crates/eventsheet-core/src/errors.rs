use thiserror::Error;

/// Result type alias using SheetError
pub type Result<T> = std::result::Result<T, SheetError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// raised by the editing core. Each kind maps to a stable error code that can
/// be used for programmatic error handling, testing, and GUI messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    InvalidReference,
    OutOfRange,
    CapabilityMissing,
    ConstraintViolation,

    // Drag and drop
    NotDragging,
    InvalidDropTarget,
    CycleDetected,

    // Clipboard
    ClipboardEmpty,
    ClipboardKindMismatch,

    // Integration
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidReference => "ERR_INVALID_REFERENCE",
            ExErrorKind::OutOfRange => "ERR_OUT_OF_RANGE",
            ExErrorKind::CapabilityMissing => "ERR_CAPABILITY_MISSING",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::NotDragging => "ERR_NOT_DRAGGING",
            ExErrorKind::InvalidDropTarget => "ERR_INVALID_DROP_TARGET",
            ExErrorKind::CycleDetected => "ERR_CYCLE_DETECTED",
            ExErrorKind::ClipboardEmpty => "ERR_CLIPBOARD_EMPTY",
            ExErrorKind::ClipboardKindMismatch => "ERR_CLIPBOARD_KIND_MISMATCH",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and context for
/// debugging. Built from a [`SheetError`] via `From`.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    position: Option<usize>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            position: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (event or instruction)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add list position context
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the position context, if any
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(position) = self.position {
            write!(f, " (position: {})", position)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for event sheet editing operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetError {
    // ===== Reference Errors =====
    /// Event not found in store
    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: String },

    /// Instruction not found in store
    #[error("Instruction not found: {instruction_id}")]
    InstructionNotFound { instruction_id: String },

    /// Event cannot hold sub-events
    #[error("Event {event_id} cannot contain sub-events")]
    SubEventsNotSupported { event_id: String },

    /// Event has no instruction list in the given slot
    #[error("Event {event_id} has no instruction list in slot {slot}")]
    InstructionListNotFound { event_id: String, slot: usize },

    /// Position is past the end of the list
    #[error("Position {position} is out of range for list of length {len}")]
    PositionOutOfRange { position: usize, len: usize },

    // ===== Drag and Drop Errors =====
    /// EndDrag called while no drag of that kind is in progress
    #[error("No {kind} drag in progress")]
    NotDragging { kind: String },

    /// Drop target is absent or no longer refers to a live list
    #[error("Invalid drop target: {reason}")]
    InvalidDropTarget { reason: String },

    /// Moving the event would place it inside itself or its own subtree
    #[error("Cannot move event {event_id} into itself or one of its sub-events")]
    EventCycle { event_id: String },

    /// Moving the instruction would place it inside itself or its own subtree
    #[error(
        "Cannot move instruction {instruction_id} into itself or one of its sub-instructions"
    )]
    InstructionCycle { instruction_id: String },

    // ===== Clipboard Errors =====
    /// Nothing to paste
    #[error("Clipboard is empty")]
    ClipboardEmpty,

    /// Clipboard holds a different kind of content than the paste target accepts
    #[error("Clipboard holds {found}, expected {expected}")]
    ClipboardKindMismatch { expected: String, found: String },

    // ===== Integrity Errors (validation) =====
    /// A list references an event id that is not in the arena
    #[error("List {list} references unknown event {event_id}")]
    UnknownEventInList { list: String, event_id: String },

    /// A list references an instruction id that is not in the arena
    #[error("List {list} references unknown instruction {instruction_id}")]
    UnknownInstructionInList {
        list: String,
        instruction_id: String,
    },

    /// A node's recorded owner disagrees with the list that holds it
    #[error("Node {node_id} records owner {recorded} but is held by {actual}")]
    OwnerMismatch {
        node_id: String,
        recorded: String,
        actual: String,
    },

    /// A node is held by more than one list (or twice by one list)
    #[error("Node {node_id} is listed {count} times")]
    DuplicateListing { node_id: String, count: usize },

    /// A node is in the arena but not held by any list
    #[error("Node {node_id} is not reachable from any list")]
    UnreachableNode { node_id: String },

    /// An instruction's owning-event back-link is wrong
    #[error("Instruction {instruction_id} records event {recorded} but lives under {actual}")]
    BackLinkMismatch {
        instruction_id: String,
        recorded: String,
        actual: String,
    },

    /// Parent chain loops back on itself
    #[error("Cycle in parent chain at node {node_id}")]
    CycleInParentChain { node_id: String },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from SheetError to ExError
impl From<SheetError> for ExError {
    fn from(err: SheetError) -> Self {
        match err {
            SheetError::EventNotFound { event_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(event_id)
                .with_message("Event not found"),

            SheetError::InstructionNotFound { instruction_id } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_entity_id(instruction_id)
                    .with_message("Instruction not found")
            }

            SheetError::SubEventsNotSupported { event_id } => {
                ExError::new(ExErrorKind::CapabilityMissing)
                    .with_entity_id(event_id)
                    .with_message("Event cannot contain sub-events")
            }

            SheetError::InstructionListNotFound { event_id, slot } => {
                ExError::new(ExErrorKind::InvalidReference)
                    .with_entity_id(event_id)
                    .with_position(slot)
                    .with_message("No instruction list in slot")
            }

            SheetError::PositionOutOfRange { position, len } => {
                ExError::new(ExErrorKind::OutOfRange)
                    .with_position(position)
                    .with_message(format!("List has length {}", len))
            }

            SheetError::NotDragging { kind } => ExError::new(ExErrorKind::NotDragging)
                .with_message(format!("No {} drag in progress", kind)),

            SheetError::InvalidDropTarget { reason } => {
                ExError::new(ExErrorKind::InvalidDropTarget).with_message(reason)
            }

            SheetError::EventCycle { event_id } => ExError::new(ExErrorKind::CycleDetected)
                .with_entity_id(event_id)
                .with_message("Event cannot be moved into its own subtree"),

            SheetError::InstructionCycle { instruction_id } => {
                ExError::new(ExErrorKind::CycleDetected)
                    .with_entity_id(instruction_id)
                    .with_message("Instruction cannot be moved into its own subtree")
            }

            SheetError::ClipboardEmpty => {
                ExError::new(ExErrorKind::ClipboardEmpty).with_message("Clipboard is empty")
            }

            SheetError::ClipboardKindMismatch { expected, found } => {
                ExError::new(ExErrorKind::ClipboardKindMismatch)
                    .with_message(format!("Expected {}, found {}", expected, found))
            }

            SheetError::UnknownEventInList { list, event_id } => {
                ExError::new(ExErrorKind::ConstraintViolation)
                    .with_entity_id(event_id)
                    .with_message(format!("Listed in {} but unknown", list))
            }

            SheetError::UnknownInstructionInList {
                list,
                instruction_id,
            } => ExError::new(ExErrorKind::ConstraintViolation)
                .with_entity_id(instruction_id)
                .with_message(format!("Listed in {} but unknown", list)),

            SheetError::OwnerMismatch {
                node_id,
                recorded,
                actual,
            } => ExError::new(ExErrorKind::ConstraintViolation)
                .with_entity_id(node_id)
                .with_message(format!("Owner is {} but held by {}", recorded, actual)),

            SheetError::DuplicateListing { node_id, count } => {
                ExError::new(ExErrorKind::ConstraintViolation)
                    .with_entity_id(node_id)
                    .with_message(format!("Listed {} times", count))
            }

            SheetError::UnreachableNode { node_id } => {
                ExError::new(ExErrorKind::ConstraintViolation)
                    .with_entity_id(node_id)
                    .with_message("Not reachable from any list")
            }

            SheetError::BackLinkMismatch {
                instruction_id,
                recorded,
                actual,
            } => ExError::new(ExErrorKind::ConstraintViolation)
                .with_entity_id(instruction_id)
                .with_message(format!("Event is {} but lives under {}", recorded, actual)),

            SheetError::CycleInParentChain { node_id } => {
                ExError::new(ExErrorKind::CycleDetected)
                    .with_entity_id(node_id)
                    .with_message("Parent chain loops")
            }

            SheetError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            SheetError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to SheetError
impl From<serde_json::Error> for SheetError {
    fn from(err: serde_json::Error) -> Self {
        SheetError::Serialization {
            message: err.to_string(),
        }
    }
}
