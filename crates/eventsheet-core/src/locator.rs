//! Non-owning references to a node at a place in the tree
//!
//! A locator records an id, the list the node was seen in, and the index it
//! had at that moment. Only the id and the list take part in equality and
//! hashing, so the same node seen twice at different indices is one locator.
//! Locators never keep a node alive; [`EventItem::is_live`] and friends must
//! be consulted before a locator is trusted.

use std::hash::{Hash, Hasher};

use crate::core_types::{EventId, InstructionId};
use crate::errors::{Result, SheetError};
use crate::model::{EventListRef, InstructionListRef};
use crate::ops::Store;

/// Locator of an event inside an event list
#[derive(Debug, Clone, Copy)]
pub struct EventItem {
    pub event: EventId,
    pub list: EventListRef,
    pub position: usize,
}

impl EventItem {
    pub fn new(event: EventId, list: EventListRef, position: usize) -> Self {
        Self {
            event,
            list,
            position,
        }
    }

    /// Build a locator for a live event from its current place in the tree
    ///
    /// # Errors
    ///
    /// `EventNotFound` if the event is not live or is not listed by its owner.
    pub fn locate(store: &Store, event: &EventId) -> Result<Self> {
        let owner = store.get_event(event)?.owner;
        let position = store
            .position_of_event(event)
            .ok_or_else(|| SheetError::EventNotFound {
                event_id: event.to_string(),
            })?;
        Ok(Self::new(*event, owner, position))
    }

    /// The event is live and still held by the recorded list
    pub fn is_live(&self, store: &Store) -> bool {
        store
            .get_event(&self.event)
            .is_ok_and(|e| e.owner == self.list)
            && store
                .event_list(&self.list)
                .is_ok_and(|ids| ids.contains(&self.event))
    }

    /// Index the event occupies now, if it is still live
    pub fn current_position(&self, store: &Store) -> Option<usize> {
        if !self.is_live(store) {
            return None;
        }
        store.position_of_event(&self.event)
    }
}

impl PartialEq for EventItem {
    fn eq(&self, other: &Self) -> bool {
        self.event == other.event && self.list == other.list
    }
}

impl Eq for EventItem {}

impl Hash for EventItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.event.hash(state);
        self.list.hash(state);
    }
}

/// Locator of an instruction inside an instruction list
#[derive(Debug, Clone, Copy)]
pub struct InstructionItem {
    pub instruction: InstructionId,
    pub list: InstructionListRef,
    pub position: usize,
    /// Event whose instruction tree holds the list
    pub event: EventId,
    pub is_condition: bool,
}

impl InstructionItem {
    pub fn new(
        instruction: InstructionId,
        list: InstructionListRef,
        position: usize,
        event: EventId,
        is_condition: bool,
    ) -> Self {
        Self {
            instruction,
            list,
            position,
            event,
            is_condition,
        }
    }

    /// Build a locator for a live instruction from its current place
    ///
    /// # Errors
    ///
    /// `InstructionNotFound` if the instruction is not live or not listed.
    pub fn locate(store: &Store, instruction: &InstructionId) -> Result<Self> {
        let node = store.get_instruction(instruction)?;
        let position = store.position_of_instruction(instruction).ok_or_else(|| {
            SheetError::InstructionNotFound {
                instruction_id: instruction.to_string(),
            }
        })?;
        Ok(Self::new(
            *instruction,
            node.owner,
            position,
            node.event,
            node.is_condition,
        ))
    }

    /// The instruction is live, still held by the recorded list, and still
    /// belongs to the recorded event
    pub fn is_live(&self, store: &Store) -> bool {
        store
            .get_instruction(&self.instruction)
            .is_ok_and(|i| i.owner == self.list && i.event == self.event)
            && store
                .instruction_list(&self.list)
                .is_ok_and(|ids| ids.contains(&self.instruction))
    }

    pub fn current_position(&self, store: &Store) -> Option<usize> {
        if !self.is_live(store) {
            return None;
        }
        store.position_of_instruction(&self.instruction)
    }
}

impl PartialEq for InstructionItem {
    fn eq(&self, other: &Self) -> bool {
        self.instruction == other.instruction && self.list == other.list
    }
}

impl Eq for InstructionItem {}

impl Hash for InstructionItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.instruction.hash(state);
        self.list.hash(state);
    }
}

/// Locator of a whole instruction list (drop target for empty lists)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstructionListItem {
    pub list: InstructionListRef,
    pub event: EventId,
    pub is_condition: bool,
}

impl InstructionListItem {
    pub fn new(list: InstructionListRef, event: EventId, is_condition: bool) -> Self {
        Self {
            list,
            event,
            is_condition,
        }
    }

    /// Build a locator for a list, deriving its event and polarity
    ///
    /// An event's list takes its polarity from its role; a sub-instruction
    /// list takes the polarity of the instruction that owns it.
    ///
    /// # Errors
    ///
    /// A not-found error if the list does not resolve.
    pub fn locate(store: &Store, list: InstructionListRef) -> Result<Self> {
        store.instruction_list(&list)?;
        let event = store.owning_event_of_list(&list)?;
        let is_condition = match list {
            InstructionListRef::Event { event, slot } => store
                .get_event(&event)?
                .list_role(slot)
                .is_some_and(|role| role.holds_conditions()),
            InstructionListRef::SubInstructions(owner) => store.get_instruction(&owner)?.is_condition,
        };
        Ok(Self::new(list, event, is_condition))
    }

    pub fn is_live(&self, store: &Store) -> bool {
        store.instruction_list(&self.list).is_ok()
            && store
                .owning_event_of_list(&self.list)
                .is_ok_and(|e| e == self.event)
    }
}

/// Locator of one parameter of an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterItem {
    pub instruction: InstructionId,
    pub event: EventId,
    pub parameter: usize,
}

impl ParameterItem {
    pub fn new(instruction: InstructionId, event: EventId, parameter: usize) -> Self {
        Self {
            instruction,
            event,
            parameter,
        }
    }

    pub fn is_live(&self, store: &Store) -> bool {
        store
            .get_instruction(&self.instruction)
            .is_ok_and(|i| i.event == self.event)
    }
}
