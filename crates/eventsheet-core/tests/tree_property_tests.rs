//! Property-based invariant tests for drag and delete on arbitrary trees
//!
//! For any forest and any selection:
//!
//! 1. An event drop either succeeds with node counts preserved or fails with
//!    a cycle error and leaves the tree untouched
//! 2. The same holds for instruction drops
//! 3. Deleting the selected instructions removes every one of them
//!
//! The drag flag is always cleared and the tree always validates.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashSet;

use eventsheet_core::{
    validate_tree, EditorSelection, EventId, EventItem, EventSnapshot, InstructionId,
    InstructionItem, InstructionSnapshot, SheetError, Store,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn instruction_strategy() -> impl Strategy<Value = InstructionSnapshot> {
    let leaf = "[A-D]".prop_map(|name| InstructionSnapshot::action(name, &[]));
    leaf.prop_recursive(3, 12, 3, |inner| {
        ("[A-D]", prop::collection::vec(inner, 0..3)).prop_map(|(name, subs)| {
            subs.into_iter()
                .fold(InstructionSnapshot::action(name, &[]), |snap, sub| {
                    snap.with_sub_instruction(sub)
                })
        })
    })
}

fn standard_with(actions: Vec<InstructionSnapshot>) -> EventSnapshot {
    actions
        .into_iter()
        .fold(EventSnapshot::standard(), |snap, action| snap.with_action(action))
}

fn event_strategy() -> impl Strategy<Value = EventSnapshot> {
    let leaf = prop_oneof![
        prop::collection::vec(instruction_strategy(), 0..3).prop_map(standard_with),
        Just(EventSnapshot::comment()),
    ];
    leaf.prop_recursive(3, 16, 3, |inner| {
        (
            prop::collection::vec(instruction_strategy(), 0..3),
            prop::collection::vec(inner, 0..3),
        )
            .prop_map(|(actions, subs)| {
                subs.into_iter()
                    .fold(standard_with(actions), |snap, sub| snap.with_sub_event(sub))
            })
    })
}

fn forest_strategy() -> impl Strategy<Value = Vec<EventSnapshot>> {
    prop::collection::vec(event_strategy(), 1..4)
}

fn picks_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(any::<usize>(), 1..4)
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn sorted_event_ids(store: &Store) -> Vec<EventId> {
    let mut ids: Vec<EventId> = store.list_events().iter().map(|e| e.id).collect();
    ids.sort();
    ids
}

fn sorted_instruction_ids(store: &Store) -> Vec<InstructionId> {
    let mut ids: Vec<InstructionId> = store.list_instructions().iter().map(|i| i.id).collect();
    ids.sort();
    ids
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Event drops preserve counts or leave the tree untouched
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn event_drop_preserves_tree(
        forest in forest_strategy(),
        picks in picks_strategy(),
        target in any::<usize>(),
    ) {
        let mut store = Store::from_snapshots(&forest);
        let ids = sorted_event_ids(&store);
        let before = store.to_snapshots().unwrap();
        let events_before = store.event_count();
        let instructions_before = store.instruction_count();

        let mut selection: EditorSelection = EditorSelection::default();
        for pick in &picks {
            let id = ids[pick % ids.len()];
            selection.add_event(&store, EventItem::locate(&store, &id).unwrap());
        }
        let target = ids[target % ids.len()];
        selection.set_highlighted_event(Some(EventItem::locate(&store, &target).unwrap()));

        selection.begin_drag_event();
        let result = selection.end_drag_event(&mut store);

        prop_assert!(!selection.is_dragging_event());
        match result {
            Ok(drop) => {
                prop_assert_eq!(store.event_count(), events_before);
                prop_assert_eq!(store.instruction_count(), instructions_before);
                prop_assert!(!drop.clones.is_empty());
                prop_assert_eq!(selection.selected_event_count(), 0);
            }
            Err(SheetError::EventCycle { .. }) => {
                prop_assert_eq!(store.to_snapshots().unwrap(), before);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
        prop_assert!(validate_tree(&store).is_ok());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Instruction drops preserve counts or leave the tree untouched
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn instruction_drop_preserves_tree(
        forest in forest_strategy(),
        picks in picks_strategy(),
        target in any::<usize>(),
    ) {
        let mut store = Store::from_snapshots(&forest);
        let ids = sorted_instruction_ids(&store);
        prop_assume!(!ids.is_empty());
        let before = store.to_snapshots().unwrap();
        let events_before = store.event_count();
        let instructions_before = store.instruction_count();

        let mut selection: EditorSelection = EditorSelection::default();
        for pick in &picks {
            let id = ids[pick % ids.len()];
            selection.add_instruction(&store, InstructionItem::locate(&store, &id).unwrap());
        }
        let target = ids[target % ids.len()];
        selection.set_highlighted_instruction(Some(InstructionItem::locate(&store, &target).unwrap()));

        selection.begin_drag_instruction();
        let result = selection.end_drag_instruction(&mut store);

        prop_assert!(!selection.is_dragging_instruction());
        match result {
            Ok(drop) => {
                prop_assert_eq!(store.event_count(), events_before);
                prop_assert_eq!(store.instruction_count(), instructions_before);
                prop_assert!(!drop.relayout.is_empty());
            }
            Err(SheetError::InstructionCycle { .. }) => {
                prop_assert_eq!(store.to_snapshots().unwrap(), before);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
        prop_assert!(validate_tree(&store).is_ok());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Deleting the selection removes every selected instruction
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn delete_selected_instructions_removes_all(
        forest in forest_strategy(),
        picks in picks_strategy(),
    ) {
        let mut store = Store::from_snapshots(&forest);
        let ids = sorted_instruction_ids(&store);
        prop_assume!(!ids.is_empty());

        let mut selection: EditorSelection = EditorSelection::default();
        let mut chosen = Vec::new();
        for pick in &picks {
            let id = ids[pick % ids.len()];
            selection.add_instruction(&store, InstructionItem::locate(&store, &id).unwrap());
            chosen.push(id);
        }

        selection.delete_selected_instructions(&mut store);

        for id in &chosen {
            prop_assert!(!store.contains_instruction(id));
        }
        let unique: HashSet<_> = chosen.iter().collect();
        prop_assert!(store.instruction_count() <= ids.len() - unique.len());
        prop_assert!(validate_tree(&store).is_ok());
    }
}
