//! Editor selection: selected and highlighted locators plus drag state
//!
//! One [`EditorSelection`] lives for the whole editing session. It never owns
//! the tree; every operation that reads or changes nodes takes the [`Store`]
//! explicitly. The selection owns the refresh notifier and calls it at most
//! once per user gesture.
//!
//! The operations are split by concern:
//! - this module: membership, highlighting, clearing, pruning
//! - [`drag`]: cycle-safe move of events and instructions
//! - [`edit`]: delete, copy, cut and paste of the selection

pub mod drag;
pub mod edit;

use std::collections::HashSet;

use crate::locator::{EventItem, InstructionItem, InstructionListItem, ParameterItem};
use crate::log_op_rejected;
use crate::ops::search::{find_in_events_and_sub_events, is_instruction_descendant};
use crate::ops::Store;
use crate::refresh::{NoopRefreshNotifier, RefreshNotifier};

pub use drag::{EventDrop, InstructionDrop};
pub use edit::Pasted;

#[derive(Debug, Default)]
pub struct EditorSelection<N = NoopRefreshNotifier> {
    events: HashSet<EventItem>,
    instructions: HashSet<InstructionItem>,
    highlighted_event: Option<EventItem>,
    highlighted_instruction: Option<InstructionItem>,
    highlighted_instruction_list: Option<InstructionListItem>,
    highlighted_parameter: Option<ParameterItem>,
    dragging_event: bool,
    dragging_instruction: bool,
    notifier: N,
}

impl<N: RefreshNotifier> EditorSelection<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            events: HashSet::new(),
            instructions: HashSet::new(),
            highlighted_event: None,
            highlighted_instruction: None,
            highlighted_instruction_list: None,
            highlighted_parameter: None,
            dragging_event: false,
            dragging_instruction: false,
            notifier,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Add an event to the selection
    ///
    /// A locator whose event is not live, or whose list no longer holds it,
    /// is logged and ignored. Adding an already selected event changes
    /// nothing and does not refresh.
    ///
    /// # Returns
    /// `true` if the event was newly selected
    pub fn add_event(&mut self, store: &Store, item: EventItem) -> bool {
        if !item.is_live(store) {
            log_op_rejected!(
                "add_event",
                "event is not live in the given list",
                event_id = %item.event,
                list = %item.list
            );
            return false;
        }

        let position = store.position_of_event(&item.event).unwrap_or(item.position);
        if !self.events.insert(EventItem { position, ..item }) {
            return false;
        }

        self.notifier.notify_changed();
        true
    }

    /// Add an instruction to the selection
    ///
    /// Same contract as [`EditorSelection::add_event`].
    pub fn add_instruction(&mut self, store: &Store, item: InstructionItem) -> bool {
        if !item.is_live(store) {
            log_op_rejected!(
                "add_instruction",
                "instruction is not live in the given list",
                instruction_id = %item.instruction,
                list = %item.list
            );
            return false;
        }

        let position = store
            .position_of_instruction(&item.instruction)
            .unwrap_or(item.position);
        let is_condition = store
            .get_instruction(&item.instruction)
            .map_or(item.is_condition, |node| node.is_condition);
        let stored = InstructionItem {
            position,
            is_condition,
            ..item
        };
        if !self.instructions.insert(stored) {
            return false;
        }

        self.notifier.notify_changed();
        true
    }

    pub fn event_selected(&self, item: &EventItem) -> bool {
        self.events.contains(item)
    }

    pub fn instruction_selected(&self, item: &InstructionItem) -> bool {
        self.instructions.contains(item)
    }

    /// All selected events, in no particular order
    pub fn selected_events(&self) -> Vec<EventItem> {
        self.events.iter().copied().collect()
    }

    /// Selected events that are not inside another selected event's subtree
    pub fn selected_events_without_sub_events(&self, store: &Store) -> Vec<EventItem> {
        self.events
            .iter()
            .filter(|item| {
                !self.events.iter().any(|other| {
                    other.event != item.event
                        && store.get_event(&other.event).is_ok_and(|e| {
                            e.can_have_sub_events
                                && find_in_events_and_sub_events(store, &e.sub_events, &item.event)
                        })
                })
            })
            .copied()
            .collect()
    }

    /// All selected instructions, in no particular order
    pub fn selected_instructions(&self) -> Vec<InstructionItem> {
        self.instructions.iter().copied().collect()
    }

    pub fn has_selected_actions(&self) -> bool {
        self.instructions.iter().any(|i| !i.is_condition)
    }

    pub fn has_selected_conditions(&self) -> bool {
        self.instructions.iter().any(|i| i.is_condition)
    }

    pub fn selected_event_count(&self) -> usize {
        self.events.len()
    }

    pub fn selected_instruction_count(&self) -> usize {
        self.instructions.len()
    }

    // Highlights are validated when consumed, not when set.

    pub fn set_highlighted_event(&mut self, item: Option<EventItem>) {
        self.highlighted_event = item;
    }

    pub fn set_highlighted_instruction(&mut self, item: Option<InstructionItem>) {
        self.highlighted_instruction = item;
    }

    pub fn set_highlighted_instruction_list(&mut self, item: Option<InstructionListItem>) {
        self.highlighted_instruction_list = item;
    }

    pub fn set_highlighted_parameter(&mut self, item: Option<ParameterItem>) {
        self.highlighted_parameter = item;
    }

    pub fn highlighted_event(&self) -> Option<&EventItem> {
        self.highlighted_event.as_ref()
    }

    pub fn highlighted_instruction(&self) -> Option<&InstructionItem> {
        self.highlighted_instruction.as_ref()
    }

    pub fn highlighted_instruction_list(&self) -> Option<&InstructionListItem> {
        self.highlighted_instruction_list.as_ref()
    }

    pub fn highlighted_parameter(&self) -> Option<&ParameterItem> {
        self.highlighted_parameter.as_ref()
    }

    /// Empty both selection sets
    ///
    /// Highlights and drag flags are left alone.
    pub fn clear_selection(&mut self, refresh: bool) {
        self.events.clear();
        self.instructions.clear();

        if refresh {
            self.notifier.notify_changed();
        }
    }

    /// Drop every selected or highlighted locator that no longer resolves
    ///
    /// Refreshes once if anything was dropped.
    ///
    /// # Returns
    /// Number of locators dropped
    pub fn prune_stale(&mut self, store: &Store) -> usize {
        let before = self.events.len() + self.instructions.len();
        self.events.retain(|item| item.is_live(store));
        self.instructions.retain(|item| item.is_live(store));
        let dropped = before - self.events.len() - self.instructions.len()
            + self.drop_stale_highlights(store);

        if dropped > 0 {
            tracing::debug!(op = "prune_stale", dropped, "dropped stale locators");
            self.notifier.notify_changed();
        }
        dropped
    }

    pub(crate) fn drop_stale_highlights(&mut self, store: &Store) -> usize {
        let mut dropped = 0;

        if self.highlighted_event.is_some_and(|h| !h.is_live(store)) {
            self.highlighted_event = None;
            dropped += 1;
        }
        if self.highlighted_instruction.is_some_and(|h| !h.is_live(store)) {
            self.highlighted_instruction = None;
            dropped += 1;
        }
        if self
            .highlighted_instruction_list
            .is_some_and(|h| !h.is_live(store))
        {
            self.highlighted_instruction_list = None;
            dropped += 1;
        }
        if self.highlighted_parameter.is_some_and(|h| !h.is_live(store)) {
            self.highlighted_parameter = None;
            dropped += 1;
        }

        dropped
    }

    /// Selected events sorted by list then position
    pub(crate) fn top_level_events_in_order(&self, store: &Store) -> Vec<EventItem> {
        let mut items = self.selected_events_without_sub_events(store);
        items.sort_by_key(|item| (item.list, item.position, item.event));
        items
    }

    /// Selected instructions not nested in another selected instruction,
    /// sorted by list then position
    pub(crate) fn top_level_instructions_in_order(&self, store: &Store) -> Vec<InstructionItem> {
        let mut items: Vec<InstructionItem> = self
            .instructions
            .iter()
            .filter(|item| {
                !self.instructions.iter().any(|other| {
                    is_instruction_descendant(store, &item.instruction, &other.instruction)
                })
            })
            .copied()
            .collect();
        items.sort_by_key(|item| (item.list, item.position, item.instruction));
        items
    }
}
