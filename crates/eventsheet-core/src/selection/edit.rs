//! Delete, copy, cut and paste of the selection

use std::time::Instant;

use super::EditorSelection;
use crate::clipboard::{Clipboard, ClipboardContent};
use crate::core_types::{EventId, InstructionId};
use crate::errors::{Result, SheetError};
use crate::locator::InstructionItem;
use crate::model::{EventListRef, EventSnapshot, InstructionListRef, InstructionSnapshot};
use crate::ops::event_ops::{insert_event_snapshot, remove_event, snapshot_event};
use crate::ops::instruction_ops::{insert_instruction_snapshot, snapshot_instruction};
use crate::ops::{delete_instructions, Relayout, Store};
use crate::refresh::RefreshNotifier;
use crate::{log_op_end, log_op_error, log_op_start};

/// Nodes created by a paste
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pasted {
    pub events: Vec<EventId>,
    pub instructions: Vec<InstructionId>,
    pub relayout: Relayout,
}

impl<N: RefreshNotifier> EditorSelection<N> {
    /// Delete every selected instruction in one grouped pass
    ///
    /// Clears the selection and refreshes once.
    pub fn delete_selected_instructions(&mut self, store: &mut Store) -> Relayout {
        log_op_start!(
            "delete_selected_instructions",
            selected_len = self.instructions.len()
        );
        let start = Instant::now();

        let items: Vec<_> = self
            .top_level_instructions_in_order(store)
            .into_iter()
            .map(|item| match item.current_position(store) {
                Some(position) => InstructionItem { position, ..item },
                None => item,
            })
            .collect();
        let deletion = delete_instructions(store, &items);

        self.finish_mutation(store);

        log_op_end!(
            "delete_selected_instructions",
            duration_ms = start.elapsed().as_millis() as u64,
            removed_len = deletion.removed,
            skipped = deletion.skipped
        );

        deletion.relayout
    }

    /// Delete every top-level selected event with its subtree
    ///
    /// # Returns
    /// Number of top-level events removed
    pub fn delete_selected_events(&mut self, store: &mut Store) -> usize {
        log_op_start!("delete_selected_events", selected_len = self.events.len());
        let start = Instant::now();

        let mut removed = 0;
        for item in self.live_selected_events(store) {
            if remove_event(store, &item.event).is_ok() {
                removed += 1;
            }
        }

        self.finish_mutation(store);

        log_op_end!(
            "delete_selected_events",
            duration_ms = start.elapsed().as_millis() as u64,
            removed_len = removed
        );

        removed
    }

    /// Copy the top-level selected events
    ///
    /// Leaves the clipboard untouched when no event is selected.
    ///
    /// # Returns
    /// Number of events copied
    ///
    /// # Errors
    /// Propagates snapshot errors for a corrupted tree.
    pub fn copy_selected_events(&self, store: &Store, clipboard: &mut Clipboard) -> Result<usize> {
        let snapshots = self
            .live_selected_events(store)
            .iter()
            .map(|item| snapshot_event(store, &item.event))
            .collect::<Result<Vec<EventSnapshot>>>()?;

        let copied = snapshots.len();
        if copied > 0 {
            clipboard.set(ClipboardContent::Events(snapshots));
        }
        tracing::debug!(op = "copy_selected_events", copied, "copied events");
        Ok(copied)
    }

    /// Copy the selected instructions in list order
    ///
    /// # Errors
    /// Propagates snapshot errors for a corrupted tree.
    pub fn copy_selected_instructions(
        &self,
        store: &Store,
        clipboard: &mut Clipboard,
    ) -> Result<usize> {
        let snapshots = self
            .live_selected_instructions(store)
            .iter()
            .map(|item| snapshot_instruction(store, &item.instruction))
            .collect::<Result<Vec<InstructionSnapshot>>>()?;

        let copied = snapshots.len();
        if copied > 0 {
            clipboard.set(ClipboardContent::Instructions(snapshots));
        }
        tracing::debug!(op = "copy_selected_instructions", copied, "copied instructions");
        Ok(copied)
    }

    /// Copy then delete the selected events
    ///
    /// # Errors
    /// Same as [`EditorSelection::copy_selected_events`]; nothing is deleted
    /// on error.
    pub fn cut_selected_events(
        &mut self,
        store: &mut Store,
        clipboard: &mut Clipboard,
    ) -> Result<usize> {
        self.copy_selected_events(store, clipboard)?;
        Ok(self.delete_selected_events(store))
    }

    /// Copy then delete the selected instructions
    ///
    /// # Errors
    /// Same as [`EditorSelection::copy_selected_instructions`].
    pub fn cut_selected_instructions(
        &mut self,
        store: &mut Store,
        clipboard: &mut Clipboard,
    ) -> Result<Relayout> {
        self.copy_selected_instructions(store, clipboard)?;
        Ok(self.delete_selected_instructions(store))
    }

    /// Paste the clipboard at the current highlight
    ///
    /// Events go right after the highlighted event, or at the end of the
    /// root list when nothing is highlighted. Instructions go right after
    /// the highlighted instruction, or at the end of the highlighted
    /// instruction list.
    ///
    /// # Errors
    /// * `ClipboardEmpty` - nothing to paste
    /// * `InvalidDropTarget` - instructions with no live highlight to paste at
    pub fn paste(&mut self, store: &mut Store, clipboard: &Clipboard) -> Result<Pasted> {
        log_op_start!("paste");
        let start = Instant::now();

        let result = self.paste_impl(store, clipboard).map_err(|e| {
            log_op_error!(
                "paste",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "paste",
            duration_ms = start.elapsed().as_millis() as u64,
            inserted_len = result.events.len() + result.instructions.len()
        );

        Ok(result)
    }

    fn paste_impl(&mut self, store: &mut Store, clipboard: &Clipboard) -> Result<Pasted> {
        let pasted = match clipboard.content() {
            Some(ClipboardContent::Events(_)) => self.paste_events(store, clipboard.events()?)?,
            Some(ClipboardContent::Instructions(_)) => {
                self.paste_instructions(store, clipboard.instructions()?)?
            }
            None => return Err(SheetError::ClipboardEmpty),
        };

        self.notifier.notify_changed();
        Ok(pasted)
    }

    fn paste_events(&self, store: &mut Store, snapshots: &[EventSnapshot]) -> Result<Pasted> {
        let (list, position) = match self.highlighted_event {
            Some(highlighted) => match highlighted.current_position(store) {
                Some(position) => (highlighted.list, position + 1),
                None => (EventListRef::Root, store.root_events().len()),
            },
            None => (EventListRef::Root, store.root_events().len()),
        };

        let mut pasted = Pasted::default();
        for (offset, snapshot) in snapshots.iter().enumerate() {
            pasted
                .events
                .push(insert_event_snapshot(store, list, position + offset, snapshot)?);
        }
        Ok(pasted)
    }

    fn paste_instructions(
        &self,
        store: &mut Store,
        snapshots: &[InstructionSnapshot],
    ) -> Result<Pasted> {
        let (list, position) = self.instruction_paste_target(store)?;

        let mut pasted = Pasted::default();
        for (offset, snapshot) in snapshots.iter().enumerate() {
            let (id, relayout) = insert_instruction_snapshot(store, list, position + offset, snapshot)?;
            pasted.instructions.push(id);
            pasted.relayout.merge(relayout);
        }
        Ok(pasted)
    }

    fn instruction_paste_target(&self, store: &Store) -> Result<(InstructionListRef, usize)> {
        if let Some(highlighted) = self.highlighted_instruction {
            if let Some(position) = highlighted.current_position(store) {
                return Ok((highlighted.list, position + 1));
            }
        }

        match self.highlighted_instruction_list {
            Some(highlighted) if highlighted.is_live(store) => Ok((
                highlighted.list,
                store.instruction_list(&highlighted.list)?.len(),
            )),
            _ => Err(SheetError::InvalidDropTarget {
                reason: "no live highlighted instruction or instruction list".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::EventItem;
    use crate::ops::event_ops::create_standard_event;
    use crate::refresh::CountingRefreshNotifier;

    #[test]
    fn test_delete_selected_events_skips_nested_duplicates() {
        let mut store = Store::new();
        let parent = insert_event_snapshot(
            &mut store,
            EventListRef::Root,
            0,
            &EventSnapshot::standard().with_sub_event(EventSnapshot::standard()),
        )
        .unwrap();
        let child = store.get_event(&parent).unwrap().sub_events[0];
        let counter = CountingRefreshNotifier::new();
        let mut selection = EditorSelection::new(counter.clone());
        selection.add_event(&store, EventItem::locate(&store, &parent).unwrap());
        selection.add_event(&store, EventItem::locate(&store, &child).unwrap());
        counter.reset();

        let removed = selection.delete_selected_events(&mut store);

        assert_eq!(removed, 1);
        assert_eq!(store.event_count(), 0);
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_paste_events_after_highlight() {
        let mut store = Store::new();
        let a = create_standard_event(&mut store, EventListRef::Root, 0).unwrap();
        let b = create_standard_event(&mut store, EventListRef::Root, 1).unwrap();
        let mut selection: EditorSelection = EditorSelection::default();
        let mut clipboard = Clipboard::new();
        selection.add_event(&store, EventItem::locate(&store, &b).unwrap());
        selection.copy_selected_events(&store, &mut clipboard).unwrap();
        selection.set_highlighted_event(Some(EventItem::locate(&store, &a).unwrap()));

        let pasted = selection.paste(&mut store, &clipboard).unwrap();

        assert_eq!(store.root_events(), &[a, pasted.events[0], b]);
    }

    #[test]
    fn test_paste_instructions_needs_target() {
        let mut store = Store::new();
        let mut selection: EditorSelection = EditorSelection::default();
        let mut clipboard = Clipboard::new();
        clipboard.set(ClipboardContent::Instructions(vec![InstructionSnapshot::action(
            "Log",
            &[],
        )]));

        let result = selection.paste(&mut store, &clipboard);

        assert!(matches!(result, Err(SheetError::InvalidDropTarget { .. })));
        assert_eq!(store.instruction_count(), 0);
    }

    #[test]
    fn test_cut_instruction_then_paste_after_highlight() {
        let mut store = Store::new();
        let event = insert_event_snapshot(
            &mut store,
            EventListRef::Root,
            0,
            &EventSnapshot::standard()
                .with_action(InstructionSnapshot::action("A", &[]))
                .with_action(InstructionSnapshot::action("B", &[])),
        )
        .unwrap();
        let actions = InstructionListRef::Event { event, slot: 1 };
        let ids = store.instruction_list(&actions).unwrap().to_vec();
        let mut selection: EditorSelection = EditorSelection::default();
        let mut clipboard = Clipboard::new();
        selection.add_instruction(&store, InstructionItem::locate(&store, &ids[0]).unwrap());

        let relayout = selection.cut_selected_instructions(&mut store, &mut clipboard).unwrap();
        assert!(relayout.contains(&event));
        assert_eq!(store.instruction_list(&actions).unwrap(), &[ids[1]]);

        selection.set_highlighted_instruction(Some(InstructionItem::locate(&store, &ids[1]).unwrap()));
        let pasted = selection.paste(&mut store, &clipboard).unwrap();

        assert_eq!(
            store.instruction_list(&actions).unwrap(),
            &[ids[1], pasted.instructions[0]]
        );
        assert_eq!(store.get_instruction(&pasted.instructions[0]).unwrap().type_id, "A");
    }
}
