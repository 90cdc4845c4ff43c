//! Containment search over the event and instruction trees
//!
//! Two flavours are provided: downward searches through child lists (used to
//! filter selections) and upward ancestor walks over parent links (used to
//! reject moves that would splice a subtree into itself).

use std::collections::HashSet;

use super::store::Store;
use crate::core_types::{EventId, InstructionId};

/// Search `list` and, recursively, the sub-events of its members for `target`
///
/// Sub-event lists are only descended when the event's capability flag is
/// set. Ids that are not live are skipped.
pub fn find_in_events_and_sub_events(store: &Store, list: &[EventId], target: &EventId) -> bool {
    list.iter().any(|id| {
        if id == target {
            return true;
        }
        match store.get_event(id) {
            Ok(event) if event.can_have_sub_events => {
                find_in_events_and_sub_events(store, &event.sub_events, target)
            }
            _ => false,
        }
    })
}

/// Search `list` and, recursively, all sub-instructions for `target`
pub fn find_in_instructions_and_sub_instructions(
    store: &Store,
    list: &[InstructionId],
    target: &InstructionId,
) -> bool {
    list.iter().any(|id| {
        id == target
            || store.get_instruction(id).is_ok_and(|instr| {
                find_in_instructions_and_sub_instructions(store, &instr.sub_instructions, target)
            })
    })
}

/// True if `node` lies strictly inside the sub-event subtree of `ancestor`
///
/// Walks the parent links upward from `node`. A looping chain is treated as
/// "not contained" (the loop itself is reported by tree validation).
pub fn is_event_descendant(store: &Store, node: &EventId, ancestor: &EventId) -> bool {
    let mut visited = HashSet::new();
    let mut current = store.get_event(node).ok().and_then(|e| e.owner.owner());

    while let Some(id) = current {
        if !visited.insert(id) {
            return false;
        }
        if id == *ancestor {
            return true;
        }
        current = store.get_event(&id).ok().and_then(|e| e.owner.owner());
    }

    false
}

/// True if `node` equals `ancestor` or lies inside its subtree
pub fn is_event_within(store: &Store, node: &EventId, ancestor: &EventId) -> bool {
    node == ancestor || is_event_descendant(store, node, ancestor)
}

/// True if `node` lies strictly inside the sub-instruction subtree of `ancestor`
pub fn is_instruction_descendant(
    store: &Store,
    node: &InstructionId,
    ancestor: &InstructionId,
) -> bool {
    let mut visited = HashSet::new();
    let mut current = store.get_instruction(node).ok().and_then(|i| i.parent());

    while let Some(id) = current {
        if !visited.insert(id) {
            return false;
        }
        if id == *ancestor {
            return true;
        }
        current = store.get_instruction(&id).ok().and_then(|i| i.parent());
    }

    false
}

/// True if `node` equals `ancestor` or lies inside its subtree
pub fn is_instruction_within(store: &Store, node: &InstructionId, ancestor: &InstructionId) -> bool {
    node == ancestor || is_instruction_descendant(store, node, ancestor)
}

/// Ids of `root` and every event below it, depth-first, parents first
pub fn collect_event_subtree(store: &Store, root: &EventId) -> Vec<EventId> {
    let mut out = Vec::new();
    let mut stack = vec![*root];
    while let Some(id) = stack.pop() {
        if let Ok(event) = store.get_event(&id) {
            out.push(id);
            stack.extend(event.sub_events.iter().rev().copied());
        }
    }
    out
}

/// Ids of `root` and every instruction below it, depth-first, parents first
pub fn collect_instruction_subtree(store: &Store, root: &InstructionId) -> Vec<InstructionId> {
    let mut out = Vec::new();
    let mut stack = vec![*root];
    while let Some(id) = stack.pop() {
        if let Ok(instr) = store.get_instruction(&id) {
            out.push(id);
            stack.extend(instr.sub_instructions.iter().rev().copied());
        }
    }
    out
}
