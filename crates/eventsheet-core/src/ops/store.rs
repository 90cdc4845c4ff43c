use std::collections::HashMap;

use crate::core_types::{EventId, InstructionId};
use crate::errors::{Result, SheetError};
use crate::model::{Event, EventListRef, EventSnapshot, Instruction, InstructionListRef};

use super::event_ops;

/// In-memory arena for events and instructions
///
/// Nodes are stored by id; ordering lives in the id lists held by the root
/// list, by each event, and by each instruction. Not thread-safe (no
/// Arc/RwLock) - the editor mutates it from the UI thread only.
#[derive(Debug, Clone, Default)]
pub struct Store {
    /// Map of event ID to event
    pub(crate) events: HashMap<EventId, Event>,
    /// Map of instruction ID to instruction
    pub(crate) instructions: HashMap<InstructionId, Instruction>,
    /// The project's top-level events, in display order
    pub(crate) root_events: Vec<EventId>,
}

impl Store {
    /// Create a new empty Store
    pub fn new() -> Self {
        Self {
            events: HashMap::new(),
            instructions: HashMap::new(),
            root_events: Vec::new(),
        }
    }

    /// Get an event by ID
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound` if the event is not in the arena.
    pub fn get_event(&self, id: &EventId) -> Result<&Event> {
        self.events
            .get(id)
            .ok_or_else(|| SheetError::EventNotFound {
                event_id: id.to_string(),
            })
    }

    /// Get a mutable reference to an event by ID
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound` if the event is not in the arena.
    pub fn get_event_mut(&mut self, id: &EventId) -> Result<&mut Event> {
        self.events
            .get_mut(id)
            .ok_or_else(|| SheetError::EventNotFound {
                event_id: id.to_string(),
            })
    }

    /// Get an instruction by ID
    ///
    /// # Errors
    ///
    /// Returns `InstructionNotFound` if the instruction is not in the arena.
    pub fn get_instruction(&self, id: &InstructionId) -> Result<&Instruction> {
        self.instructions
            .get(id)
            .ok_or_else(|| SheetError::InstructionNotFound {
                instruction_id: id.to_string(),
            })
    }

    /// Get a mutable reference to an instruction by ID
    ///
    /// # Errors
    ///
    /// Returns `InstructionNotFound` if the instruction is not in the arena.
    pub fn get_instruction_mut(&mut self, id: &InstructionId) -> Result<&mut Instruction> {
        self.instructions
            .get_mut(id)
            .ok_or_else(|| SheetError::InstructionNotFound {
                instruction_id: id.to_string(),
            })
    }

    /// Top-level events in display order
    pub fn root_events(&self) -> &[EventId] {
        &self.root_events
    }

    /// Total number of events in the arena
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Total number of instructions in the arena
    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    /// Check if an event is live
    pub fn contains_event(&self, id: &EventId) -> bool {
        self.events.contains_key(id)
    }

    /// Check if an instruction is live
    pub fn contains_instruction(&self, id: &InstructionId) -> bool {
        self.instructions.contains_key(id)
    }

    /// All events in the arena (unordered)
    pub fn list_events(&self) -> Vec<&Event> {
        self.events.values().collect()
    }

    /// All instructions in the arena (unordered)
    pub fn list_instructions(&self) -> Vec<&Instruction> {
        self.instructions.values().collect()
    }

    /// Resolve an event list
    ///
    /// # Errors
    ///
    /// * `EventNotFound` - the owning event is not live
    /// * `SubEventsNotSupported` - the owning event cannot hold sub-events
    pub fn event_list(&self, list: &EventListRef) -> Result<&[EventId]> {
        match list {
            EventListRef::Root => Ok(&self.root_events),
            EventListRef::SubEvents(owner) => {
                let event = self.get_event(owner)?;
                if !event.can_have_sub_events {
                    return Err(SheetError::SubEventsNotSupported {
                        event_id: owner.to_string(),
                    });
                }
                Ok(&event.sub_events)
            }
        }
    }

    /// Resolve an event list for mutation
    ///
    /// # Errors
    ///
    /// Same as [`Store::event_list`].
    pub fn event_list_mut(&mut self, list: &EventListRef) -> Result<&mut Vec<EventId>> {
        match list {
            EventListRef::Root => Ok(&mut self.root_events),
            EventListRef::SubEvents(owner) => {
                let event = self.get_event_mut(owner)?;
                if !event.can_have_sub_events {
                    return Err(SheetError::SubEventsNotSupported {
                        event_id: owner.to_string(),
                    });
                }
                Ok(&mut event.sub_events)
            }
        }
    }

    /// Resolve an instruction list
    ///
    /// # Errors
    ///
    /// * `EventNotFound` / `InstructionNotFound` - the owner is not live
    /// * `InstructionListNotFound` - the event has no list in that slot
    pub fn instruction_list(&self, list: &InstructionListRef) -> Result<&[InstructionId]> {
        match list {
            InstructionListRef::Event { event, slot } => {
                let owner = self.get_event(event)?;
                owner
                    .instruction_lists
                    .get(*slot)
                    .map(|l| l.instructions.as_slice())
                    .ok_or_else(|| SheetError::InstructionListNotFound {
                        event_id: event.to_string(),
                        slot: *slot,
                    })
            }
            InstructionListRef::SubInstructions(owner) => {
                Ok(&self.get_instruction(owner)?.sub_instructions)
            }
        }
    }

    /// Resolve an instruction list for mutation
    ///
    /// # Errors
    ///
    /// Same as [`Store::instruction_list`].
    pub fn instruction_list_mut(
        &mut self,
        list: &InstructionListRef,
    ) -> Result<&mut Vec<InstructionId>> {
        match list {
            InstructionListRef::Event { event, slot } => {
                let owner = self.get_event_mut(event)?;
                owner
                    .instruction_lists
                    .get_mut(*slot)
                    .map(|l| &mut l.instructions)
                    .ok_or_else(|| SheetError::InstructionListNotFound {
                        event_id: event.to_string(),
                        slot: *slot,
                    })
            }
            InstructionListRef::SubInstructions(owner) => {
                Ok(&mut self.get_instruction_mut(owner)?.sub_instructions)
            }
        }
    }

    /// Event whose instruction tree contains the given list
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the list owner is not live.
    pub fn owning_event_of_list(&self, list: &InstructionListRef) -> Result<EventId> {
        match list {
            InstructionListRef::Event { event, .. } => {
                self.get_event(event)?;
                Ok(*event)
            }
            InstructionListRef::SubInstructions(owner) => Ok(self.get_instruction(owner)?.event),
        }
    }

    /// Current index of an event inside its owning list
    pub fn position_of_event(&self, id: &EventId) -> Option<usize> {
        let event = self.events.get(id)?;
        self.event_list(&event.owner)
            .ok()?
            .iter()
            .position(|e| e == id)
    }

    /// Current index of an instruction inside its owning list
    pub fn position_of_instruction(&self, id: &InstructionId) -> Option<usize> {
        let instruction = self.instructions.get(id)?;
        self.instruction_list(&instruction.owner)
            .ok()?
            .iter()
            .position(|i| i == id)
    }

    /// Insert an event node into the arena without listing it anywhere
    ///
    /// This is an internal method used by tree operations and test helpers.
    pub fn insert_event(&mut self, event: Event) {
        self.events.insert(event.id, event);
    }

    /// Insert an instruction node into the arena without listing it anywhere
    ///
    /// This is an internal method used by tree operations and test helpers.
    pub fn insert_instruction(&mut self, instruction: Instruction) {
        self.instructions.insert(instruction.id, instruction);
    }

    /// Build a store from a forest of detached events (e.g. a loaded project)
    ///
    /// Every node receives a fresh id.
    pub fn from_snapshots(roots: &[EventSnapshot]) -> Self {
        let mut store = Self::new();
        for snapshot in roots {
            let id = event_ops::build_event(&mut store, snapshot, EventListRef::Root);
            store.root_events.push(id);
        }
        store
    }

    /// Export the root events as detached snapshots
    ///
    /// # Errors
    ///
    /// Returns a not-found error if a listed node is missing from the arena.
    pub fn to_snapshots(&self) -> Result<Vec<EventSnapshot>> {
        self.root_events
            .iter()
            .map(|id| event_ops::snapshot_event(self, id))
            .collect()
    }
}
