//! Drag and drop of selected events and instructions
//!
//! A drop clones every dragged node into the target list and then removes
//! the originals. Both kinds of drop walk parent links before touching the
//! tree and refuse any move that would put a node inside its own subtree.

use std::time::Instant;

use super::EditorSelection;
use crate::core_types::{EventId, InstructionId};
use crate::errors::{Result, SheetError};
use crate::locator::{EventItem, InstructionItem};
use crate::model::{EventListRef, InstructionListRef};
use crate::ops::event_ops::{insert_event_snapshot, remove_event, snapshot_event};
use crate::ops::instruction_ops::{insert_instruction_snapshot, snapshot_instruction};
use crate::ops::search::{is_event_within, is_instruction_descendant, is_instruction_within};
use crate::ops::{delete_instructions, Relayout, Store};
use crate::refresh::RefreshNotifier;
use crate::{log_op_end, log_op_error, log_op_rejected, log_op_start};

/// Outcome of a successful event drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDrop {
    /// Ids of the inserted clones, in list order
    pub clones: Vec<EventId>,
    /// The list the clones were inserted into
    pub list: EventListRef,
}

/// Outcome of a successful instruction drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionDrop {
    /// Ids of the inserted clones, in list order
    pub clones: Vec<InstructionId>,
    pub list: InstructionListRef,
    /// Events whose instruction lists changed
    pub relayout: Relayout,
}

/// Where dropped instructions go
struct InstructionTarget {
    list: InstructionListRef,
    position: usize,
    event: EventId,
    instruction: Option<InstructionId>,
}

impl<N: RefreshNotifier> EditorSelection<N> {
    pub fn begin_drag_event(&mut self) {
        self.dragging_event = true;
    }

    pub fn is_dragging_event(&self) -> bool {
        self.dragging_event
    }

    /// Drop the selected events before the highlighted event
    ///
    /// Only the top-level selected events move; a selected event nested in
    /// another selected event travels with its ancestor.
    ///
    /// # Errors
    /// * `NotDragging` - no event drag in progress (nothing changes)
    /// * `InvalidDropTarget` - no highlighted event, or its list does not resolve
    /// * `EventCycle` - the target lies inside a dragged event
    ///
    /// On every error after the first, the drag flag is cleared and the tree
    /// and selection are left as they were.
    pub fn end_drag_event(&mut self, store: &mut Store) -> Result<EventDrop> {
        log_op_start!("end_drag_event", selected_len = self.events.len());
        let start = Instant::now();

        let result = self.end_drag_event_impl(store).map_err(|e| {
            log_op_error!(
                "end_drag_event",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "end_drag_event",
            duration_ms = start.elapsed().as_millis() as u64,
            inserted_len = result.clones.len(),
            list = %result.list
        );

        Ok(result)
    }

    fn end_drag_event_impl(&mut self, store: &mut Store) -> Result<EventDrop> {
        if !self.dragging_event {
            return Err(SheetError::NotDragging {
                kind: "event".to_string(),
            });
        }
        self.dragging_event = false;

        let target = self
            .highlighted_event
            .ok_or_else(|| SheetError::InvalidDropTarget {
                reason: "no highlighted event".to_string(),
            })?;
        let len = store
            .event_list(&target.list)
            .map_err(|e| SheetError::InvalidDropTarget {
                reason: format!("target list {} does not resolve: {e}", target.list),
            })?
            .len();
        let position = target
            .current_position(store)
            .unwrap_or(target.position)
            .min(len);

        let dragged = self.live_selected_events(store);

        for item in &dragged {
            let into_self = is_event_within(store, &target.event, &item.event)
                || target
                    .list
                    .owner()
                    .is_some_and(|owner| is_event_within(store, &owner, &item.event));
            if into_self {
                return Err(SheetError::EventCycle {
                    event_id: item.event.to_string(),
                });
            }
        }

        let snapshots = dragged
            .iter()
            .map(|item| snapshot_event(store, &item.event))
            .collect::<Result<Vec<_>>>()?;

        let mut clones = Vec::with_capacity(snapshots.len());
        for (offset, snapshot) in snapshots.iter().enumerate() {
            clones.push(insert_event_snapshot(
                store,
                target.list,
                position + offset,
                snapshot,
            )?);
        }

        for item in &dragged {
            remove_event(store, &item.event)?;
        }

        self.finish_mutation(store);

        Ok(EventDrop {
            clones,
            list: target.list,
        })
    }

    pub fn begin_drag_instruction(&mut self) {
        self.dragging_instruction = true;
    }

    pub fn is_dragging_instruction(&self) -> bool {
        self.dragging_instruction
    }

    /// Drop the selected instructions at the highlighted instruction
    ///
    /// With no live highlighted instruction, the highlighted instruction list
    /// is used and the instructions are appended to it. As with events, a
    /// selected instruction nested in another selected one travels with it.
    ///
    /// # Errors
    /// * `NotDragging` - no instruction drag in progress (nothing changes)
    /// * `InvalidDropTarget` - neither highlight resolves
    /// * `InstructionCycle` - a dragged instruction and the target nest in
    ///   each other
    pub fn end_drag_instruction(&mut self, store: &mut Store) -> Result<InstructionDrop> {
        log_op_start!(
            "end_drag_instruction",
            selected_len = self.instructions.len()
        );
        let start = Instant::now();

        let result = self.end_drag_instruction_impl(store).map_err(|e| {
            log_op_error!(
                "end_drag_instruction",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "end_drag_instruction",
            duration_ms = start.elapsed().as_millis() as u64,
            inserted_len = result.clones.len(),
            list = %result.list
        );

        Ok(result)
    }

    fn end_drag_instruction_impl(&mut self, store: &mut Store) -> Result<InstructionDrop> {
        if !self.dragging_instruction {
            return Err(SheetError::NotDragging {
                kind: "instruction".to_string(),
            });
        }
        self.dragging_instruction = false;

        let target = self.instruction_drop_target(store)?;
        let mut relayout = Relayout::new();
        relayout.mark(target.event);

        let dragged = self.live_selected_instructions(store);

        for item in &dragged {
            let onto_self = target.instruction.is_some_and(|t| {
                is_instruction_within(store, &t, &item.instruction)
                    || is_instruction_descendant(store, &item.instruction, &t)
            });
            let into_self = target
                .list
                .owner_instruction()
                .is_some_and(|owner| is_instruction_within(store, &owner, &item.instruction));
            if onto_self || into_self {
                return Err(SheetError::InstructionCycle {
                    instruction_id: item.instruction.to_string(),
                });
            }
        }

        let snapshots = dragged
            .iter()
            .map(|item| snapshot_instruction(store, &item.instruction))
            .collect::<Result<Vec<_>>>()?;

        let mut clones = Vec::with_capacity(snapshots.len());
        for (offset, snapshot) in snapshots.iter().enumerate() {
            let (id, inserted) =
                insert_instruction_snapshot(store, target.list, target.position + offset, snapshot)?;
            relayout.merge(inserted);
            clones.push(id);
        }

        // Originals at or after the drop index were pushed back by the clones.
        let inserted = clones.len();
        let originals: Vec<InstructionItem> = dragged
            .into_iter()
            .map(|mut item| {
                if item.list == target.list && item.position >= target.position {
                    item.position += inserted;
                }
                item
            })
            .collect();

        let deletion = delete_instructions(store, &originals);
        relayout.merge(deletion.relayout);

        self.finish_mutation(store);

        Ok(InstructionDrop {
            clones,
            list: target.list,
            relayout,
        })
    }

    fn instruction_drop_target(&self, store: &Store) -> Result<InstructionTarget> {
        if let Some(highlighted) = self.highlighted_instruction {
            if let Some(position) = highlighted.current_position(store) {
                return Ok(InstructionTarget {
                    list: highlighted.list,
                    position,
                    event: highlighted.event,
                    instruction: Some(highlighted.instruction),
                });
            }
        }

        if let Some(highlighted) = self.highlighted_instruction_list {
            if highlighted.is_live(store) {
                return Ok(InstructionTarget {
                    list: highlighted.list,
                    position: store.instruction_list(&highlighted.list)?.len(),
                    event: highlighted.event,
                    instruction: None,
                });
            }
        }

        Err(SheetError::InvalidDropTarget {
            reason: "no live highlighted instruction or instruction list".to_string(),
        })
    }

    /// Top-level selected events that are still live, with current positions
    pub(crate) fn live_selected_events(&self, store: &Store) -> Vec<EventItem> {
        self.top_level_events_in_order(store)
            .into_iter()
            .filter_map(|item| match item.current_position(store) {
                Some(position) => Some(EventItem { position, ..item }),
                None => {
                    log_op_rejected!(
                        "selection",
                        "selected event is no longer live",
                        event_id = %item.event
                    );
                    None
                }
            })
            .collect()
    }

    /// Top-level selected instructions that are still live, with current positions
    pub(crate) fn live_selected_instructions(&self, store: &Store) -> Vec<InstructionItem> {
        self.top_level_instructions_in_order(store)
            .into_iter()
            .filter_map(|item| match item.current_position(store) {
                Some(position) => Some(InstructionItem { position, ..item }),
                None => {
                    log_op_rejected!(
                        "selection",
                        "selected instruction is no longer live",
                        instruction_id = %item.instruction
                    );
                    None
                }
            })
            .collect()
    }

    /// Clear the selection after a structural change and refresh once
    pub(crate) fn finish_mutation(&mut self, store: &Store) {
        self.clear_selection(false);
        self.drop_stale_highlights(store);
        self.notifier.notify_changed();
    }
}
