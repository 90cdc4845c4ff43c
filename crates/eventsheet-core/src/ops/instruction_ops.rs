use super::relayout::Relayout;
use super::search::collect_instruction_subtree;
use super::store::Store;
use crate::core_types::{EventId, InstructionId};
use crate::errors::{Result, SheetError};
use crate::model::{Instruction, InstructionListRef, InstructionSnapshot};

/// Create a new instruction and insert it at `position` in `list`
///
/// # Arguments
/// * `store` - Mutable reference to the Store
/// * `list` - An event's instruction list or an instruction's sub-list
/// * `position` - Insertion index, `0..=len`
/// * `type_id` - Opaque instruction type identifier
/// * `parameters` - Parameter values
/// * `is_condition` - Condition (true) or action (false)
///
/// # Returns
/// The new instruction's ID and the event that needs relayout
///
/// # Errors
/// * `EventNotFound` / `InstructionNotFound` / `InstructionListNotFound` -
///   `list` does not resolve
/// * `PositionOutOfRange` - `position > len`
pub fn create_instruction(
    store: &mut Store,
    list: InstructionListRef,
    position: usize,
    type_id: impl Into<String>,
    parameters: Vec<String>,
    is_condition: bool,
) -> Result<(InstructionId, Relayout)> {
    let event = check_insert_position(store, &list, position)?;

    let id = InstructionId::new();
    store.insert_instruction(Instruction::new(
        id,
        type_id,
        parameters,
        is_condition,
        list,
        event,
    ));
    store.instruction_list_mut(&list)?.insert(position, id);

    Ok((id, [event].into_iter().collect()))
}

/// Materialize a detached instruction tree at `position` in `list`
///
/// Every node of the inserted tree receives a fresh id.
///
/// # Errors
/// Same as [`create_instruction`].
pub fn insert_instruction_snapshot(
    store: &mut Store,
    list: InstructionListRef,
    position: usize,
    snapshot: &InstructionSnapshot,
) -> Result<(InstructionId, Relayout)> {
    let event = check_insert_position(store, &list, position)?;

    let id = build_instruction(store, snapshot, list, event);
    store.instruction_list_mut(&list)?.insert(position, id);

    Ok((id, [event].into_iter().collect()))
}

/// Take a detached deep copy of an instruction and its sub-instructions
///
/// # Errors
/// * `InstructionNotFound` - the instruction (or a listed descendant) is not live
pub fn snapshot_instruction(store: &Store, id: &InstructionId) -> Result<InstructionSnapshot> {
    let instruction = store.get_instruction(id)?;

    Ok(InstructionSnapshot {
        type_id: instruction.type_id.clone(),
        parameters: instruction.parameters.clone(),
        is_condition: instruction.is_condition,
        sub_instructions: instruction
            .sub_instructions
            .iter()
            .map(|sub| snapshot_instruction(store, sub))
            .collect::<Result<Vec<_>>>()?,
    })
}

/// Deep-clone an instruction into `list` at `position`
///
/// # Errors
/// Errors from [`snapshot_instruction`] and [`insert_instruction_snapshot`].
pub fn clone_instruction(
    store: &mut Store,
    id: &InstructionId,
    list: InstructionListRef,
    position: usize,
) -> Result<(InstructionId, Relayout)> {
    let snapshot = snapshot_instruction(store, id)?;
    insert_instruction_snapshot(store, list, position, &snapshot)
}

/// Remove an instruction and its sub-instructions
///
/// The instruction is erased from its owning list by identity.
///
/// # Errors
/// * `InstructionNotFound` - the instruction is not live
pub fn remove_instruction(store: &mut Store, id: &InstructionId) -> Result<Relayout> {
    let (owner, event) = {
        let instruction = store.get_instruction(id)?;
        (instruction.owner, instruction.event)
    };

    if let Ok(list) = store.instruction_list_mut(&owner) {
        list.retain(|i| i != id);
    }
    purge_instruction_subtree(store, id);

    Ok([event].into_iter().collect())
}

/// Replace the parameters of an instruction
///
/// # Errors
/// * `InstructionNotFound` - the instruction is not live
pub fn set_parameters(
    store: &mut Store,
    id: &InstructionId,
    parameters: Vec<String>,
) -> Result<Relayout> {
    let instruction = store.get_instruction_mut(id)?;
    instruction.parameters = parameters;
    Ok([instruction.event].into_iter().collect())
}

/// Drop an instruction subtree from the arena without touching any list
pub(crate) fn purge_instruction_subtree(store: &mut Store, id: &InstructionId) -> usize {
    let subtree = collect_instruction_subtree(store, id);
    for instruction in &subtree {
        store.instructions.remove(instruction);
    }
    subtree.len()
}

/// Build an instruction tree in the arena; the caller lists the returned root
pub(crate) fn build_instruction(
    store: &mut Store,
    snapshot: &InstructionSnapshot,
    owner: InstructionListRef,
    event: EventId,
) -> InstructionId {
    let id = InstructionId::new();
    let mut instruction = Instruction::new(
        id,
        snapshot.type_id.clone(),
        snapshot.parameters.clone(),
        snapshot.is_condition,
        owner,
        event,
    );

    for sub in &snapshot.sub_instructions {
        let child = build_instruction(store, sub, InstructionListRef::SubInstructions(id), event);
        instruction.sub_instructions.push(child);
    }

    store.insert_instruction(instruction);
    id
}

/// Validate an insertion point and return the event owning the list
fn check_insert_position(
    store: &Store,
    list: &InstructionListRef,
    position: usize,
) -> Result<EventId> {
    let len = store.instruction_list(list)?.len();
    if position > len {
        return Err(SheetError::PositionOutOfRange { position, len });
    }
    store.owning_event_of_list(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventListRef;
    use crate::ops::event_ops;

    fn actions_of(store: &mut Store) -> (EventId, InstructionListRef) {
        let event = event_ops::create_standard_event(store, EventListRef::Root, 0).unwrap();
        (event, InstructionListRef::Event { event, slot: 1 })
    }

    #[test]
    fn test_create_instruction_reports_relayout() {
        let mut store = Store::new();
        let (event, actions) = actions_of(&mut store);

        let (id, relayout) =
            create_instruction(&mut store, actions, 0, "Log", vec!["x".into()], false).unwrap();

        assert!(relayout.contains(&event));
        assert_eq!(store.instruction_list(&actions).unwrap(), &[id]);
        assert_eq!(store.get_instruction(&id).unwrap().event, event);
    }

    #[test]
    fn test_nested_instruction_knows_its_event() {
        let mut store = Store::new();
        let (event, actions) = actions_of(&mut store);
        let (outer, _) = create_instruction(&mut store, actions, 0, "Repeat", vec![], false).unwrap();

        let (inner, relayout) = create_instruction(
            &mut store,
            InstructionListRef::SubInstructions(outer),
            0,
            "Log",
            vec![],
            false,
        )
        .unwrap();

        assert!(relayout.contains(&event));
        assert_eq!(store.get_instruction(&inner).unwrap().event, event);
        assert_eq!(store.get_instruction(&inner).unwrap().parent(), Some(outer));
    }

    #[test]
    fn test_create_instruction_position_out_of_range() {
        let mut store = Store::new();
        let (_, actions) = actions_of(&mut store);

        let result = create_instruction(&mut store, actions, 2, "Log", vec![], false);
        assert!(matches!(
            result,
            Err(SheetError::PositionOutOfRange { position: 2, len: 0 })
        ));
        assert_eq!(store.instruction_count(), 0);
    }

    #[test]
    fn test_clone_and_remove_instruction() {
        let mut store = Store::new();
        let (_, actions) = actions_of(&mut store);
        let (original, _) = insert_instruction_snapshot(
            &mut store,
            actions,
            0,
            &InstructionSnapshot::action("Repeat", &["2"])
                .with_sub_instruction(InstructionSnapshot::action("Log", &[])),
        )
        .unwrap();

        let (copy, _) = clone_instruction(&mut store, &original, actions, 1).unwrap();
        assert_ne!(copy, original);
        assert_eq!(store.instruction_count(), 4);

        remove_instruction(&mut store, &original).unwrap();
        assert_eq!(store.instruction_list(&actions).unwrap(), &[copy]);
        assert_eq!(store.instruction_count(), 2);
    }

    #[test]
    fn test_set_parameters() {
        let mut store = Store::new();
        let (event, actions) = actions_of(&mut store);
        let (id, _) = create_instruction(&mut store, actions, 0, "Log", vec![], false).unwrap();

        let relayout = set_parameters(&mut store, &id, vec!["hello".into()]).unwrap();

        assert!(relayout.contains(&event));
        assert_eq!(store.get_instruction(&id).unwrap().parameter(0), Some("hello"));
    }
}
