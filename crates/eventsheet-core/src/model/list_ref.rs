use serde::{Deserialize, Serialize};

use crate::core_types::{EventId, InstructionId};

/// Identity of a sequence that can hold events
///
/// Events live either in the project's root list or in the sub-event list of
/// another event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventListRef {
    /// The project's top-level event list
    Root,
    /// The sub-event list of the given event
    SubEvents(EventId),
}

impl EventListRef {
    /// Event owning this list, if any
    pub fn owner(&self) -> Option<EventId> {
        match self {
            EventListRef::Root => None,
            EventListRef::SubEvents(id) => Some(*id),
        }
    }
}

impl std::fmt::Display for EventListRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventListRef::Root => write!(f, "root"),
            EventListRef::SubEvents(id) => write!(f, "{}/sub_events", id),
        }
    }
}

/// Identity of a sequence that can hold instructions
///
/// An event exposes its instruction lists by slot (conditions, actions, and
/// any additional lists such as else-branches). An instruction exposes one
/// list of sub-instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InstructionListRef {
    /// Instruction list `slot` of the given event
    Event { event: EventId, slot: usize },
    /// Sub-instruction list of the given instruction
    SubInstructions(InstructionId),
}

impl InstructionListRef {
    /// Instruction owning this list, if any
    pub fn owner_instruction(&self) -> Option<InstructionId> {
        match self {
            InstructionListRef::Event { .. } => None,
            InstructionListRef::SubInstructions(id) => Some(*id),
        }
    }
}

impl std::fmt::Display for InstructionListRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstructionListRef::Event { event, slot } => write!(f, "{}/lists[{}]", event, slot),
            InstructionListRef::SubInstructions(id) => write!(f, "{}/sub_instructions", id),
        }
    }
}

/// Role of an instruction list within its event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListRole {
    Conditions,
    Actions,
}

impl ListRole {
    /// True for condition lists
    pub fn holds_conditions(&self) -> bool {
        matches!(self, ListRole::Conditions)
    }
}
