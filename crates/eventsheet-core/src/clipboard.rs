//! Copied events or instructions, held as detached snapshots

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SheetError};
use crate::model::{EventSnapshot, InstructionSnapshot};

/// What a copy or cut captured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum ClipboardContent {
    Events(Vec<EventSnapshot>),
    Instructions(Vec<InstructionSnapshot>),
}

impl ClipboardContent {
    pub fn kind(&self) -> &'static str {
        match self {
            ClipboardContent::Events(_) => "events",
            ClipboardContent::Instructions(_) => "instructions",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ClipboardContent::Events(events) => events.len(),
            ClipboardContent::Instructions(instructions) => instructions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize for the system clipboard
    ///
    /// # Errors
    ///
    /// `Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse text taken from the system clipboard
    ///
    /// # Errors
    ///
    /// `Serialization` if the text is not a clipboard payload.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Editor clipboard
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    content: Option<ClipboardContent>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the clipboard content
    pub fn set(&mut self, content: ClipboardContent) {
        self.content = Some(content);
    }

    pub fn content(&self) -> Option<&ClipboardContent> {
        self.content.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        !matches!(&self.content, Some(content) if !content.is_empty())
    }

    pub fn clear(&mut self) {
        self.content = None;
    }

    /// Copied events
    ///
    /// # Errors
    ///
    /// * `ClipboardEmpty` - nothing was copied
    /// * `ClipboardKindMismatch` - the clipboard holds instructions
    pub fn events(&self) -> Result<&[EventSnapshot]> {
        match self.non_empty()? {
            ClipboardContent::Events(events) => Ok(events),
            other => Err(SheetError::ClipboardKindMismatch {
                expected: "events".to_string(),
                found: other.kind().to_string(),
            }),
        }
    }

    /// Copied instructions
    ///
    /// # Errors
    ///
    /// * `ClipboardEmpty` - nothing was copied
    /// * `ClipboardKindMismatch` - the clipboard holds events
    pub fn instructions(&self) -> Result<&[InstructionSnapshot]> {
        match self.non_empty()? {
            ClipboardContent::Instructions(instructions) => Ok(instructions),
            other => Err(SheetError::ClipboardKindMismatch {
                expected: "instructions".to_string(),
                found: other.kind().to_string(),
            }),
        }
    }

    fn non_empty(&self) -> Result<&ClipboardContent> {
        match &self.content {
            Some(content) if !content.is_empty() => Ok(content),
            _ => Err(SheetError::ClipboardEmpty),
        }
    }
}
