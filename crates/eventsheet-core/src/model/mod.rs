pub mod event;
pub mod instruction;
pub mod list_ref;
pub mod snapshot;

pub use event::{Event, InstructionList};
pub use instruction::Instruction;
pub use list_ref::{EventListRef, InstructionListRef, ListRole};
pub use snapshot::{EventSnapshot, InstructionListSnapshot, InstructionSnapshot};
