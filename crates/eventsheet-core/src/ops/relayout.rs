use std::collections::BTreeSet;

use crate::core_types::EventId;

/// Events whose display height must be recomputed
///
/// Returned by every operation that structurally changes an instruction list.
/// The view merges these and recomputes the listed events before redrawing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relayout {
    events: BTreeSet<EventId>,
}

impl Relayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `event` needs relayout
    pub fn mark(&mut self, event: EventId) {
        self.events.insert(event);
    }

    /// Fold another relayout set into this one
    pub fn merge(&mut self, other: Relayout) {
        self.events.extend(other.events);
    }

    pub fn contains(&self, event: &EventId) -> bool {
        self.events.contains(event)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventId> {
        self.events.iter()
    }
}

impl FromIterator<EventId> for Relayout {
    fn from_iter<I: IntoIterator<Item = EventId>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Relayout {
    type Item = EventId;
    type IntoIter = std::collections::btree_set::IntoIter<EventId>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}
