use serde::{Deserialize, Serialize};

use super::list_ref::{EventListRef, ListRole};
use crate::core_types::{EventId, InstructionId};

/// Type name given to standard events
pub const STANDARD_EVENT_TYPE: &str = "Standard";

/// Type name given to comment events
pub const COMMENT_EVENT_TYPE: &str = "Comment";

/// One ordered list of instructions owned by an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionList {
    /// Whether the list holds conditions or actions
    pub role: ListRole,

    /// Instruction ids, in display order
    pub instructions: Vec<InstructionId>,
}

impl InstructionList {
    pub fn new(role: ListRole) -> Self {
        Self {
            role,
            instructions: Vec::new(),
        }
    }
}

/// Event - one step of the script
///
/// An event optionally owns sub-events (when `can_have_sub_events` is set)
/// and any number of instruction lists. Children are referenced by id; the
/// nodes themselves live in the [`Store`](crate::ops::Store) arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier for this event (UUID v7)
    pub id: EventId,

    /// Opaque event type name ("Standard", "Comment", ...)
    pub type_name: String,

    /// The list that holds this event
    pub owner: EventListRef,

    /// Capability flag: only capable events may hold sub-events
    pub can_have_sub_events: bool,

    /// Sub-event ids, in display order
    pub sub_events: Vec<EventId>,

    /// Instruction lists, indexed by slot
    pub instruction_lists: Vec<InstructionList>,
}

impl Event {
    /// Create a new event with the given capability and list roles
    pub fn new(
        id: EventId,
        type_name: impl Into<String>,
        owner: EventListRef,
        can_have_sub_events: bool,
        roles: &[ListRole],
    ) -> Self {
        Self {
            id,
            type_name: type_name.into(),
            owner,
            can_have_sub_events,
            sub_events: Vec::new(),
            instruction_lists: roles.iter().copied().map(InstructionList::new).collect(),
        }
    }

    /// A standard event: conditions, actions, and sub-events
    pub fn standard(id: EventId, owner: EventListRef) -> Self {
        Self::new(
            id,
            STANDARD_EVENT_TYPE,
            owner,
            true,
            &[ListRole::Conditions, ListRole::Actions],
        )
    }

    /// A comment event: no instructions, no sub-events
    pub fn comment(id: EventId, owner: EventListRef) -> Self {
        Self::new(id, COMMENT_EVENT_TYPE, owner, false, &[])
    }

    /// Check if this event has any sub-events
    pub fn has_sub_events(&self) -> bool {
        self.can_have_sub_events && !self.sub_events.is_empty()
    }

    /// Role of the instruction list in `slot`, if the slot exists
    pub fn list_role(&self, slot: usize) -> Option<ListRole> {
        self.instruction_lists.get(slot).map(|l| l.role)
    }

    /// Slot of the first list with the given role
    pub fn slot_of(&self, role: ListRole) -> Option<usize> {
        self.instruction_lists.iter().position(|l| l.role == role)
    }
}
