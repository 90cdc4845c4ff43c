use super::instruction_ops;
use super::search::collect_event_subtree;
use super::store::Store;
use crate::core_types::EventId;
use crate::errors::{Result, SheetError};
use crate::model::{
    Event, EventListRef, EventSnapshot, InstructionListRef, InstructionListSnapshot, ListRole,
};

/// Create a new empty event and insert it at `position` in `list`
///
/// # Arguments
/// * `store` - Mutable reference to the Store
/// * `list` - List to insert into (root or an event's sub-events)
/// * `position` - Insertion index, `0..=len`
/// * `type_name` - Opaque event type name
/// * `can_have_sub_events` - Capability flag of the new event
/// * `roles` - Roles of the new event's instruction lists, by slot
///
/// # Returns
/// The ID of the newly created event
///
/// # Errors
/// * `EventNotFound` / `SubEventsNotSupported` - `list` does not resolve
/// * `PositionOutOfRange` - `position > len`
pub fn create_event(
    store: &mut Store,
    list: EventListRef,
    position: usize,
    type_name: impl Into<String>,
    can_have_sub_events: bool,
    roles: &[ListRole],
) -> Result<EventId> {
    check_insert_position(store, &list, position)?;

    let id = EventId::new();
    store.insert_event(Event::new(id, type_name, list, can_have_sub_events, roles));
    store.event_list_mut(&list)?.insert(position, id);

    Ok(id)
}

/// Create a standard event (conditions + actions, sub-events allowed)
///
/// # Errors
/// Same as [`create_event`].
pub fn create_standard_event(
    store: &mut Store,
    list: EventListRef,
    position: usize,
) -> Result<EventId> {
    check_insert_position(store, &list, position)?;

    let id = EventId::new();
    store.insert_event(Event::standard(id, list));
    store.event_list_mut(&list)?.insert(position, id);
    Ok(id)
}

/// Materialize a detached event tree at `position` in `list`
///
/// Every node of the inserted tree receives a fresh id.
///
/// # Errors
/// * `EventNotFound` / `SubEventsNotSupported` - `list` does not resolve
/// * `PositionOutOfRange` - `position > len`
pub fn insert_event_snapshot(
    store: &mut Store,
    list: EventListRef,
    position: usize,
    snapshot: &EventSnapshot,
) -> Result<EventId> {
    check_insert_position(store, &list, position)?;

    let id = build_event(store, snapshot, list);
    store.event_list_mut(&list)?.insert(position, id);

    Ok(id)
}

/// Take a detached deep copy of an event and everything below it
///
/// # Errors
/// * `EventNotFound` - the event (or a listed descendant) is not live
pub fn snapshot_event(store: &Store, id: &EventId) -> Result<EventSnapshot> {
    let event = store.get_event(id)?;

    let instruction_lists = event
        .instruction_lists
        .iter()
        .map(|list| {
            Ok(InstructionListSnapshot {
                role: list.role,
                instructions: list
                    .instructions
                    .iter()
                    .map(|i| instruction_ops::snapshot_instruction(store, i))
                    .collect::<Result<Vec<_>>>()?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let sub_events = if event.can_have_sub_events {
        event
            .sub_events
            .iter()
            .map(|sub| snapshot_event(store, sub))
            .collect::<Result<Vec<_>>>()?
    } else {
        Vec::new()
    };

    Ok(EventSnapshot {
        type_name: event.type_name.clone(),
        can_have_sub_events: event.can_have_sub_events,
        sub_events,
        instruction_lists,
    })
}

/// Deep-clone an event into `list` at `position`
///
/// # Errors
/// Errors from [`snapshot_event`] and [`insert_event_snapshot`].
pub fn clone_event(
    store: &mut Store,
    id: &EventId,
    list: EventListRef,
    position: usize,
) -> Result<EventId> {
    let snapshot = snapshot_event(store, id)?;
    insert_event_snapshot(store, list, position, &snapshot)
}

/// Remove an event and its whole subtree
///
/// The event is erased from its owning list by identity, never by a stored
/// index, so earlier insertions into the same list cannot misdirect it.
///
/// # Returns
/// Number of events removed from the arena (the event plus its descendants)
///
/// # Errors
/// * `EventNotFound` - the event is not live
pub fn remove_event(store: &mut Store, id: &EventId) -> Result<usize> {
    let owner = store.get_event(id)?.owner;

    if let Ok(list) = store.event_list_mut(&owner) {
        list.retain(|e| e != id);
    }

    Ok(purge_event_subtree(store, id))
}

/// Drop an event subtree from the arena without touching any list
pub(crate) fn purge_event_subtree(store: &mut Store, id: &EventId) -> usize {
    let subtree = collect_event_subtree(store, id);

    for event_id in &subtree {
        if let Some(event) = store.events.remove(event_id) {
            for instruction in event
                .instruction_lists
                .iter()
                .flat_map(|l| l.instructions.iter())
            {
                instruction_ops::purge_instruction_subtree(store, instruction);
            }
        }
    }

    subtree.len()
}

/// Build an event tree in the arena; the caller lists the returned root
pub(crate) fn build_event(store: &mut Store, snapshot: &EventSnapshot, owner: EventListRef) -> EventId {
    let id = EventId::new();
    let roles: Vec<ListRole> = snapshot.instruction_lists.iter().map(|l| l.role).collect();
    let mut event = Event::new(
        id,
        snapshot.type_name.clone(),
        owner,
        snapshot.can_have_sub_events,
        &roles,
    );

    for (slot, list) in snapshot.instruction_lists.iter().enumerate() {
        let list_ref = InstructionListRef::Event { event: id, slot };
        for instruction in &list.instructions {
            let child = instruction_ops::build_instruction(store, instruction, list_ref, id);
            event.instruction_lists[slot].instructions.push(child);
        }
    }

    if snapshot.can_have_sub_events {
        for sub in &snapshot.sub_events {
            let child = build_event(store, sub, EventListRef::SubEvents(id));
            event.sub_events.push(child);
        }
    } else if !snapshot.sub_events.is_empty() {
        tracing::warn!(
            event_id = %id,
            dropped = snapshot.sub_events.len(),
            "snapshot carries sub-events for an event that cannot hold them"
        );
    }

    store.insert_event(event);
    id
}

fn check_insert_position(store: &Store, list: &EventListRef, position: usize) -> Result<()> {
    let len = store.event_list(list)?.len();
    if position > len {
        return Err(SheetError::PositionOutOfRange { position, len });
    }
    Ok(())
}
