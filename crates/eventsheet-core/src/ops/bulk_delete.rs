//! Grouped deletion of many instructions in one batch
//!
//! Items are grouped by the list that holds them and erased from the back of
//! each list towards the front, so removing one item never shifts the index
//! of another item still waiting in the same group.

use std::collections::BTreeMap;

use super::instruction_ops::purge_instruction_subtree;
use super::relayout::Relayout;
use super::store::Store;
use crate::core_types::{EventId, InstructionId};
use crate::locator::InstructionItem;
use crate::model::InstructionListRef;

/// Result of a grouped deletion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkDeletion {
    /// Events whose instruction lists changed
    pub relayout: Relayout,
    /// Instructions erased from their lists (sub-instructions not counted)
    pub removed: usize,
    /// Items that no longer resolved and were left alone
    pub skipped: usize,
}

/// Delete every instruction named by `items`
///
/// Each item's recorded index is trusted only if that slot still holds the
/// item's instruction; otherwise the instruction is looked up in the list by
/// identity. Items that resolve nowhere are skipped with a warning.
pub fn delete_instructions<'a, I>(store: &mut Store, items: I) -> BulkDeletion
where
    I: IntoIterator<Item = &'a InstructionItem>,
{
    let mut outcome = BulkDeletion::default();
    let mut groups: BTreeMap<InstructionListRef, Vec<(usize, InstructionId, EventId)>> =
        BTreeMap::new();

    for item in items {
        groups
            .entry(item.list)
            .or_default()
            .push((item.position, item.instruction, item.event));
    }

    for (list, mut entries) in groups {
        entries.sort();
        entries.dedup();

        for (position, instruction, event) in entries.into_iter().rev() {
            let Ok(ids) = store.instruction_list_mut(&list) else {
                tracing::warn!(list = %list, "instruction list no longer resolves");
                outcome.skipped += 1;
                continue;
            };

            let index = if ids.get(position) == Some(&instruction) {
                Some(position)
            } else {
                ids.iter().position(|i| *i == instruction)
            };

            match index {
                Some(index) => {
                    ids.remove(index);
                    purge_instruction_subtree(store, &instruction);
                    outcome.relayout.mark(event);
                    outcome.removed += 1;
                }
                None => {
                    tracing::warn!(
                        instruction_id = %instruction,
                        position,
                        list = %list,
                        "instruction not found in its list, skipping"
                    );
                    outcome.skipped += 1;
                }
            }
        }
    }

    outcome
}
