use crate::errors::{Result, SheetError};
use crate::ops::Store;

use super::invariants;

/// Validate the whole event tree
///
/// Checks that the arena and the lists agree:
///
/// 1. Every listed id exists in the arena
/// 2. Every node's recorded owner is the list that holds it
/// 3. No node is listed more than once
/// 4. Sub-events only appear under events that may hold them
/// 5. Every instruction's owning-event back-link is correct
/// 6. No parent chain loops
/// 7. Every node is reachable from the root list
///
/// # Errors
/// Returns the first violation found. Call the functions in
/// [`invariants`] directly for an exhaustive report.
pub fn validate_tree(store: &Store) -> Result<()> {
    if let Some((list, event_id)) = invariants::find_unknown_events_in_lists(store).first() {
        return Err(SheetError::UnknownEventInList {
            list: list.to_string(),
            event_id: event_id.to_string(),
        });
    }

    if let Some((list, instruction_id)) =
        invariants::find_unknown_instructions_in_lists(store).first()
    {
        return Err(SheetError::UnknownInstructionInList {
            list: list.to_string(),
            instruction_id: instruction_id.to_string(),
        });
    }

    if let Some((node, recorded, actual)) = invariants::find_event_owner_mismatches(store).first() {
        return Err(SheetError::OwnerMismatch {
            node_id: node.to_string(),
            recorded: recorded.to_string(),
            actual: actual.to_string(),
        });
    }

    if let Some((node, recorded, actual)) =
        invariants::find_instruction_owner_mismatches(store).first()
    {
        return Err(SheetError::OwnerMismatch {
            node_id: node.to_string(),
            recorded: recorded.to_string(),
            actual: actual.to_string(),
        });
    }

    if let Some((node_id, count)) = invariants::find_duplicate_listings(store).first() {
        return Err(SheetError::DuplicateListing {
            node_id: node_id.clone(),
            count: *count,
        });
    }

    if let Some(event_id) = invariants::find_sub_events_without_capability(store).first() {
        return Err(SheetError::SubEventsNotSupported {
            event_id: event_id.to_string(),
        });
    }

    if let Some((instruction_id, recorded, actual)) =
        invariants::find_back_link_mismatches(store).first()
    {
        return Err(SheetError::BackLinkMismatch {
            instruction_id: instruction_id.to_string(),
            recorded: recorded.to_string(),
            actual: actual.to_string(),
        });
    }

    for event in store.list_events() {
        if invariants::has_event_cycle(store, &event.id) {
            return Err(SheetError::CycleInParentChain {
                node_id: event.id.to_string(),
            });
        }
    }
    for instruction in store.list_instructions() {
        if invariants::has_instruction_cycle(store, &instruction.id) {
            return Err(SheetError::CycleInParentChain {
                node_id: instruction.id.to_string(),
            });
        }
    }

    if let Some(node_id) = invariants::find_unreachable_nodes(store).first() {
        return Err(SheetError::UnreachableNode {
            node_id: node_id.clone(),
        });
    }

    Ok(())
}
