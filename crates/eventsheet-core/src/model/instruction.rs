use serde::{Deserialize, Serialize};

use super::list_ref::InstructionListRef;
use crate::core_types::{EventId, InstructionId};

/// Instruction - a condition or an action
///
/// The type identifier and parameters are opaque to the editing core; they
/// are interpreted by the instruction catalogue and the runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// Unique identifier for this instruction (UUID v7)
    pub id: InstructionId,

    /// Opaque instruction type identifier
    pub type_id: String,

    /// Parameter values, in declaration order
    pub parameters: Vec<String>,

    /// Condition (true) or action (false)
    pub is_condition: bool,

    /// Sub-instruction ids, in display order
    pub sub_instructions: Vec<InstructionId>,

    /// The list that holds this instruction
    pub owner: InstructionListRef,

    /// The event whose instruction tree contains this instruction
    pub event: EventId,
}

impl Instruction {
    pub fn new(
        id: InstructionId,
        type_id: impl Into<String>,
        parameters: Vec<String>,
        is_condition: bool,
        owner: InstructionListRef,
        event: EventId,
    ) -> Self {
        Self {
            id,
            type_id: type_id.into(),
            parameters,
            is_condition,
            sub_instructions: Vec::new(),
            owner,
            event,
        }
    }

    /// Parent instruction, when nested
    pub fn parent(&self) -> Option<InstructionId> {
        self.owner.owner_instruction()
    }

    /// Parameter value at `index`
    pub fn parameter(&self, index: usize) -> Option<&str> {
        self.parameters.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_instruction_has_no_parent() {
        let event = EventId::new();
        let instr = Instruction::new(
            InstructionId::new(),
            "Create",
            vec!["Player".to_string(), "0".to_string()],
            false,
            InstructionListRef::Event { event, slot: 1 },
            event,
        );

        assert_eq!(instr.parent(), None);
        assert_eq!(instr.parameter(0), Some("Player"));
        assert_eq!(instr.parameter(5), None);
        assert!(instr.sub_instructions.is_empty());
    }

    #[test]
    fn test_nested_instruction_parent() {
        let event = EventId::new();
        let parent = InstructionId::new();
        let instr = Instruction::new(
            InstructionId::new(),
            "Or",
            Vec::new(),
            true,
            InstructionListRef::SubInstructions(parent),
            event,
        );

        assert_eq!(instr.parent(), Some(parent));
    }
}
