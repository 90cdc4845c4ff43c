//! Stable node identifiers
//!
//! Events and instructions are addressed by UUIDv7 newtypes instead of memory
//! addresses. Ids are never reused, so a locator holding the id of a removed
//! node can always be detected as stale by looking it up again.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an event node in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Generate a fresh EventId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing UUID (for deserialization and fixtures)
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "event:{}", self.0)
    }
}

/// Identifier of an instruction (condition or action) node in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstructionId(Uuid);

impl InstructionId {
    /// Generate a fresh InstructionId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing UUID (for deserialization and fixtures)
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for InstructionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InstructionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "instr:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_generation() {
        let id1 = EventId::new();
        let id2 = EventId::new();

        assert_ne!(id1, id2);
    }

    #[test]
    fn test_instruction_id_generation() {
        let id1 = InstructionId::new();
        let id2 = InstructionId::new();

        assert_ne!(id1, id2);
    }

    #[test]
    fn test_display_is_prefixed() {
        let id = EventId::new();
        assert!(id.to_string().starts_with("event:"));

        let id = InstructionId::new();
        assert!(id.to_string().starts_with("instr:"));
    }

    #[test]
    fn test_from_uuid_preserves_identity() {
        let uuid = Uuid::now_v7();
        assert_eq!(EventId::from_uuid(uuid).as_uuid(), &uuid);
        assert_eq!(
            InstructionId::from_uuid(uuid),
            InstructionId::from_uuid(uuid)
        );
    }

    #[test]
    fn test_serialization() {
        let id = EventId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EventId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
