#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{actions_of, event_with_actions, nested_chain};
use eventsheet_core::rules::invariants;
use eventsheet_core::{
    validate_tree, Event, EventId, EventListRef, EventSnapshot, InstructionId, SheetError, Store,
};

#[test]
fn test_built_trees_are_valid() {
    let (store, _, _, _) = nested_chain();
    validate_tree(&store).unwrap();

    let (store, _, _) = event_with_actions(&["A", "B"]);
    validate_tree(&store).unwrap();
}

#[test]
fn test_wrong_owner_is_reported() {
    // Given B recorded as a root event while A still holds it
    let (mut store, a, b, _) = nested_chain();
    store.get_event_mut(&b).unwrap().owner = EventListRef::Root;

    let err = validate_tree(&store).unwrap_err();

    assert!(matches!(err, SheetError::OwnerMismatch { .. }));
    assert_eq!(
        invariants::find_event_owner_mismatches(&store),
        vec![(b, EventListRef::Root, EventListRef::SubEvents(a))]
    );
}

#[test]
fn test_double_listing_is_reported() {
    let (mut store, a, _, _) = nested_chain();
    store.event_list_mut(&EventListRef::Root).unwrap().push(a);

    let err = validate_tree(&store).unwrap_err();

    assert_eq!(
        err,
        SheetError::DuplicateListing {
            node_id: a.to_string(),
            count: 2,
        }
    );
}

#[test]
fn test_wrong_back_link_is_reported() {
    let (mut store, event, actions) = event_with_actions(&["A"]);
    let other = EventId::new();
    store.get_instruction_mut(&actions[0]).unwrap().event = other;

    let err = validate_tree(&store).unwrap_err();

    assert!(matches!(err, SheetError::BackLinkMismatch { .. }));
    assert_eq!(
        invariants::find_back_link_mismatches(&store),
        vec![(actions[0], other, event)]
    );
}

#[test]
fn test_sub_events_under_incapable_event_are_reported() {
    let mut store = Store::from_snapshots(&[EventSnapshot::comment()]);
    let comment = store.root_events()[0];
    let stray = EventId::new();
    store.insert_event(Event::standard(stray, EventListRef::SubEvents(comment)));
    store.get_event_mut(&comment).unwrap().sub_events.push(stray);

    assert!(validate_tree(&store).is_err());
    assert_eq!(
        invariants::find_sub_events_without_capability(&store),
        vec![comment]
    );
}

#[test]
fn test_orphan_instruction_is_unreachable() {
    // Given an action removed from its list but left in the arena
    let (mut store, event, actions) = event_with_actions(&["A", "B"]);
    store
        .instruction_list_mut(&actions_of(event))
        .unwrap()
        .retain(|id| *id != actions[1]);

    let err = validate_tree(&store).unwrap_err();

    assert_eq!(
        err,
        SheetError::UnreachableNode {
            node_id: actions[1].to_string(),
        }
    );
}

#[test]
fn test_unknown_instruction_in_list_is_reported() {
    let (mut store, event, actions) = event_with_actions(&["A"]);
    let list = actions_of(event);
    let ghost = InstructionId::new();
    store.instruction_list_mut(&list).unwrap().push(ghost);

    let err = validate_tree(&store).unwrap_err();

    assert!(matches!(err, SheetError::UnknownInstructionInList { .. }));
    assert!(store.contains_instruction(&actions[0]));
}
