pub mod bulk_delete;
pub mod event_ops;
pub mod instruction_ops;
pub mod relayout;
pub mod search;
pub mod store;

pub use bulk_delete::{delete_instructions, BulkDeletion};
pub use relayout::Relayout;
pub use store::Store;
