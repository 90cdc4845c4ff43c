//! Detached, id-free copies of event and instruction trees
//!
//! Snapshots are plain values: they are what clone operations copy, what the
//! clipboard holds, and the shape exchanged with the serialization layer.
//! Inserting a snapshot into a store always allocates fresh ids.

use serde::{Deserialize, Serialize};

use super::event::{COMMENT_EVENT_TYPE, STANDARD_EVENT_TYPE};
use super::list_ref::ListRole;

/// Detached instruction tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionSnapshot {
    pub type_id: String,
    pub parameters: Vec<String>,
    pub is_condition: bool,
    #[serde(default)]
    pub sub_instructions: Vec<InstructionSnapshot>,
}

impl InstructionSnapshot {
    /// A condition with the given type and parameters
    pub fn condition(type_id: impl Into<String>, parameters: &[&str]) -> Self {
        Self::new(type_id, parameters, true)
    }

    /// An action with the given type and parameters
    pub fn action(type_id: impl Into<String>, parameters: &[&str]) -> Self {
        Self::new(type_id, parameters, false)
    }

    fn new(type_id: impl Into<String>, parameters: &[&str], is_condition: bool) -> Self {
        Self {
            type_id: type_id.into(),
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
            is_condition,
            sub_instructions: Vec::new(),
        }
    }

    /// Append a sub-instruction
    pub fn with_sub_instruction(mut self, sub: InstructionSnapshot) -> Self {
        self.sub_instructions.push(sub);
        self
    }

    /// Number of instructions in this tree, including the root
    pub fn node_count(&self) -> usize {
        1 + self
            .sub_instructions
            .iter()
            .map(InstructionSnapshot::node_count)
            .sum::<usize>()
    }
}

/// Detached instruction list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionListSnapshot {
    pub role: ListRole,
    #[serde(default)]
    pub instructions: Vec<InstructionSnapshot>,
}

/// Detached event tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSnapshot {
    pub type_name: String,
    pub can_have_sub_events: bool,
    #[serde(default)]
    pub sub_events: Vec<EventSnapshot>,
    #[serde(default)]
    pub instruction_lists: Vec<InstructionListSnapshot>,
}

impl EventSnapshot {
    /// An empty standard event (conditions + actions, sub-events allowed)
    pub fn standard() -> Self {
        Self {
            type_name: STANDARD_EVENT_TYPE.to_string(),
            can_have_sub_events: true,
            sub_events: Vec::new(),
            instruction_lists: vec![
                InstructionListSnapshot {
                    role: ListRole::Conditions,
                    instructions: Vec::new(),
                },
                InstructionListSnapshot {
                    role: ListRole::Actions,
                    instructions: Vec::new(),
                },
            ],
        }
    }

    /// A comment event
    pub fn comment() -> Self {
        Self {
            type_name: COMMENT_EVENT_TYPE.to_string(),
            can_have_sub_events: false,
            sub_events: Vec::new(),
            instruction_lists: Vec::new(),
        }
    }

    /// Append an instruction to the first list with the matching role
    ///
    /// A list with that role is added if the event has none.
    pub fn with_instruction(mut self, role: ListRole, instruction: InstructionSnapshot) -> Self {
        match self.instruction_lists.iter_mut().find(|l| l.role == role) {
            Some(list) => list.instructions.push(instruction),
            None => self.instruction_lists.push(InstructionListSnapshot {
                role,
                instructions: vec![instruction],
            }),
        }
        self
    }

    /// Append a condition
    pub fn with_condition(self, instruction: InstructionSnapshot) -> Self {
        self.with_instruction(ListRole::Conditions, instruction)
    }

    /// Append an action
    pub fn with_action(self, instruction: InstructionSnapshot) -> Self {
        self.with_instruction(ListRole::Actions, instruction)
    }

    /// Append a sub-event
    pub fn with_sub_event(mut self, sub: EventSnapshot) -> Self {
        self.sub_events.push(sub);
        self
    }

    /// Number of events in this tree, including the root
    pub fn event_count(&self) -> usize {
        1 + self
            .sub_events
            .iter()
            .map(EventSnapshot::event_count)
            .sum::<usize>()
    }

    /// Number of instructions anywhere in this tree
    pub fn instruction_count(&self) -> usize {
        let own: usize = self
            .instruction_lists
            .iter()
            .flat_map(|l| l.instructions.iter())
            .map(InstructionSnapshot::node_count)
            .sum();
        own + self
            .sub_events
            .iter()
            .map(EventSnapshot::instruction_count)
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_counts() {
        let snapshot = EventSnapshot::standard()
            .with_condition(InstructionSnapshot::condition("Timer", &["1"]))
            .with_action(
                InstructionSnapshot::action("Repeat", &[])
                    .with_sub_instruction(InstructionSnapshot::action("Log", &["hi"])),
            )
            .with_sub_event(EventSnapshot::comment());

        assert_eq!(snapshot.event_count(), 2);
        assert_eq!(snapshot.instruction_count(), 3);
    }

    #[test]
    fn test_with_instruction_adds_missing_list() {
        let snapshot =
            EventSnapshot::comment().with_action(InstructionSnapshot::action("Log", &[]));

        assert_eq!(snapshot.instruction_lists.len(), 1);
        assert_eq!(snapshot.instruction_lists[0].role, ListRole::Actions);
    }

    #[test]
    fn test_json_defaults_for_missing_children() {
        let json = r#"{"type_name":"Comment","can_have_sub_events":false}"#;
        let snapshot: EventSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot, EventSnapshot::comment());
    }
}
