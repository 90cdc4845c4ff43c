use eventsheet_core::{
    CountingRefreshNotifier, EditorSelection, EventId, EventItem, EventListRef, EventSnapshot,
    InstructionId, InstructionItem, InstructionListRef, InstructionSnapshot, Store,
};

/// Slot of the conditions list of a standard event
#[allow(dead_code)]
pub const CONDITIONS: usize = 0;

/// Slot of the actions list of a standard event
#[allow(dead_code)]
pub const ACTIONS: usize = 1;

/// Create a selection wired to a counting notifier
///
/// Returns the selection and a second handle on the same counter.
#[allow(dead_code)]
pub fn counting_selection() -> (EditorSelection<CountingRefreshNotifier>, CountingRefreshNotifier) {
    let counter = CountingRefreshNotifier::new();
    (EditorSelection::new(counter.clone()), counter)
}

/// Setup a nested chain: Root list -> A -> B -> C
///
/// Returns (store, a, b, c)
#[allow(dead_code)]
pub fn nested_chain() -> (Store, EventId, EventId, EventId) {
    let store = Store::from_snapshots(&[EventSnapshot::standard()
        .with_sub_event(EventSnapshot::standard().with_sub_event(EventSnapshot::standard()))]);
    let a = store.root_events()[0];
    let b = store.get_event(&a).unwrap().sub_events[0];
    let c = store.get_event(&b).unwrap().sub_events[0];
    (store, a, b, c)
}

/// Build a root list of `n` empty standard events
#[allow(dead_code)]
pub fn flat_events(n: usize) -> (Store, Vec<EventId>) {
    let forest: Vec<EventSnapshot> = (0..n).map(|_| EventSnapshot::standard()).collect();
    let store = Store::from_snapshots(&forest);
    let ids = store.root_events().to_vec();
    (store, ids)
}

/// Build one standard event whose actions are named by `names`
///
/// Returns (store, event, action ids in list order)
#[allow(dead_code)]
pub fn event_with_actions(names: &[&str]) -> (Store, EventId, Vec<InstructionId>) {
    let snapshot = names.iter().fold(EventSnapshot::standard(), |snap, name| {
        snap.with_action(InstructionSnapshot::action(*name, &[]))
    });
    let store = Store::from_snapshots(&[snapshot]);
    let event = store.root_events()[0];
    let actions = store
        .instruction_list(&actions_of(event))
        .unwrap()
        .to_vec();
    (store, event, actions)
}

#[allow(dead_code)]
pub fn actions_of(event: EventId) -> InstructionListRef {
    InstructionListRef::Event {
        event,
        slot: ACTIONS,
    }
}

#[allow(dead_code)]
pub fn conditions_of(event: EventId) -> InstructionListRef {
    InstructionListRef::Event {
        event,
        slot: CONDITIONS,
    }
}

/// Locator for a live event
#[allow(dead_code)]
pub fn event_item(store: &Store, id: EventId) -> EventItem {
    EventItem::locate(store, &id).unwrap()
}

/// Locator for a live instruction
#[allow(dead_code)]
pub fn instruction_item(store: &Store, id: InstructionId) -> InstructionItem {
    InstructionItem::locate(store, &id).unwrap()
}

/// Type ids of a list, in order
#[allow(dead_code)]
pub fn type_ids(store: &Store, list: &InstructionListRef) -> Vec<String> {
    store
        .instruction_list(list)
        .unwrap()
        .iter()
        .map(|id| store.get_instruction(id).unwrap().type_id.clone())
        .collect()
}

/// Root list position of every listed event
#[allow(dead_code)]
pub fn root_list(store: &Store) -> Vec<EventId> {
    store.event_list(&EventListRef::Root).unwrap().to_vec()
}
