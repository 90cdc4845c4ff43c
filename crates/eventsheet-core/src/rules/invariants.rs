use std::collections::{HashMap, HashSet};

use crate::core_types::{EventId, InstructionId};
use crate::model::{EventListRef, InstructionListRef};
use crate::ops::Store;

/// Every event list in the arena with the ids it holds
fn event_lists(store: &Store) -> Vec<(EventListRef, &[EventId])> {
    let mut lists = vec![(EventListRef::Root, store.root_events())];
    for event in store.list_events() {
        lists.push((EventListRef::SubEvents(event.id), event.sub_events.as_slice()));
    }
    lists
}

/// Every instruction list in the arena with the ids it holds
fn instruction_lists(store: &Store) -> Vec<(InstructionListRef, &[InstructionId])> {
    let mut lists = Vec::new();
    for event in store.list_events() {
        for (slot, list) in event.instruction_lists.iter().enumerate() {
            lists.push((
                InstructionListRef::Event {
                    event: event.id,
                    slot,
                },
                list.instructions.as_slice(),
            ));
        }
    }
    for instruction in store.list_instructions() {
        lists.push((
            InstructionListRef::SubInstructions(instruction.id),
            instruction.sub_instructions.as_slice(),
        ));
    }
    lists
}

/// Check if an event's parent chain loops
pub fn has_event_cycle(store: &Store, event_id: &EventId) -> bool {
    let mut visited = HashSet::new();
    let mut current = Some(*event_id);

    while let Some(id) = current {
        if !visited.insert(id) {
            return true;
        }
        current = store.get_event(&id).ok().and_then(|e| e.owner.owner());
    }

    false
}

/// Check if an instruction's parent chain loops
pub fn has_instruction_cycle(store: &Store, instruction_id: &InstructionId) -> bool {
    let mut visited = HashSet::new();
    let mut current = Some(*instruction_id);

    while let Some(id) = current {
        if !visited.insert(id) {
            return true;
        }
        current = store.get_instruction(&id).ok().and_then(|i| i.parent());
    }

    false
}

/// Find list entries that name an event missing from the arena
///
/// Returns list of (list, event_id) tuples
pub fn find_unknown_events_in_lists(store: &Store) -> Vec<(EventListRef, EventId)> {
    let mut unknown = Vec::new();
    for (list, ids) in event_lists(store) {
        for id in ids {
            if !store.contains_event(id) {
                unknown.push((list, *id));
            }
        }
    }
    unknown.sort();
    unknown
}

/// Find list entries that name an instruction missing from the arena
pub fn find_unknown_instructions_in_lists(
    store: &Store,
) -> Vec<(InstructionListRef, InstructionId)> {
    let mut unknown = Vec::new();
    for (list, ids) in instruction_lists(store) {
        for id in ids {
            if !store.contains_instruction(id) {
                unknown.push((list, *id));
            }
        }
    }
    unknown.sort();
    unknown
}

/// Find events whose recorded owner is not the list that holds them
///
/// Returns list of (event_id, recorded, actual) tuples
pub fn find_event_owner_mismatches(store: &Store) -> Vec<(EventId, EventListRef, EventListRef)> {
    let mut mismatches = Vec::new();
    for (list, ids) in event_lists(store) {
        for id in ids {
            if let Ok(event) = store.get_event(id) {
                if event.owner != list {
                    mismatches.push((*id, event.owner, list));
                }
            }
        }
    }
    mismatches.sort();
    mismatches
}

/// Find instructions whose recorded owner is not the list that holds them
pub fn find_instruction_owner_mismatches(
    store: &Store,
) -> Vec<(InstructionId, InstructionListRef, InstructionListRef)> {
    let mut mismatches = Vec::new();
    for (list, ids) in instruction_lists(store) {
        for id in ids {
            if let Ok(instruction) = store.get_instruction(id) {
                if instruction.owner != list {
                    mismatches.push((*id, instruction.owner, list));
                }
            }
        }
    }
    mismatches.sort();
    mismatches
}

/// Find nodes listed more than once across all lists
///
/// Returns list of (node_id, count) tuples, node ids rendered for display
pub fn find_duplicate_listings(store: &Store) -> Vec<(String, usize)> {
    let mut event_counts: HashMap<EventId, usize> = HashMap::new();
    for (_, ids) in event_lists(store) {
        for id in ids {
            *event_counts.entry(*id).or_default() += 1;
        }
    }

    let mut instruction_counts: HashMap<InstructionId, usize> = HashMap::new();
    for (_, ids) in instruction_lists(store) {
        for id in ids {
            *instruction_counts.entry(*id).or_default() += 1;
        }
    }

    let mut duplicates: Vec<(String, usize)> = event_counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, count)| (id.to_string(), count))
        .chain(
            instruction_counts
                .into_iter()
                .filter(|(_, count)| *count > 1)
                .map(|(id, count)| (id.to_string(), count)),
        )
        .collect();
    duplicates.sort();
    duplicates
}

/// Find events that hold sub-events without the capability flag
pub fn find_sub_events_without_capability(store: &Store) -> Vec<EventId> {
    let mut offenders: Vec<EventId> = store
        .list_events()
        .into_iter()
        .filter(|e| !e.can_have_sub_events && !e.sub_events.is_empty())
        .map(|e| e.id)
        .collect();
    offenders.sort();
    offenders
}

/// Find instructions whose owning-event back-link is wrong
///
/// Returns list of (instruction_id, recorded, actual) tuples
pub fn find_back_link_mismatches(store: &Store) -> Vec<(InstructionId, EventId, EventId)> {
    let mut mismatches = Vec::new();
    for instruction in store.list_instructions() {
        if let Ok(actual) = store.owning_event_of_list(&instruction.owner) {
            if actual != instruction.event {
                mismatches.push((instruction.id, instruction.event, actual));
            }
        }
    }
    mismatches.sort();
    mismatches
}

/// Find nodes in the arena that cannot be reached from the root list
///
/// Returns the display ids of unreachable events then instructions
pub fn find_unreachable_nodes(store: &Store) -> Vec<String> {
    let mut seen_events = HashSet::new();
    let mut seen_instructions = HashSet::new();
    let mut event_stack: Vec<EventId> = store.root_events().to_vec();
    let mut instruction_stack: Vec<InstructionId> = Vec::new();

    while let Some(id) = event_stack.pop() {
        if !seen_events.insert(id) {
            continue;
        }
        if let Ok(event) = store.get_event(&id) {
            if event.can_have_sub_events {
                event_stack.extend(event.sub_events.iter().copied());
            }
            for list in &event.instruction_lists {
                instruction_stack.extend(list.instructions.iter().copied());
            }
        }
    }

    while let Some(id) = instruction_stack.pop() {
        if !seen_instructions.insert(id) {
            continue;
        }
        if let Ok(instruction) = store.get_instruction(&id) {
            instruction_stack.extend(instruction.sub_instructions.iter().copied());
        }
    }

    let mut events: Vec<EventId> = store
        .list_events()
        .into_iter()
        .map(|e| e.id)
        .filter(|id| !seen_events.contains(id))
        .collect();
    events.sort();

    let mut instructions: Vec<InstructionId> = store
        .list_instructions()
        .into_iter()
        .map(|i| i.id)
        .filter(|id| !seen_instructions.contains(id))
        .collect();
    instructions.sort();

    events
        .iter()
        .map(ToString::to_string)
        .chain(instructions.iter().map(ToString::to_string))
        .collect()
}
