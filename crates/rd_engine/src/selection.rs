//! Pending selection: candidate units for the next move.
//!
//! Editing a selection never touches aggregates. Only `MapContext::commit`
//! turns it into a reassignment.

use std::collections::BTreeSet;

use rd_core::UnitId;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingSelection {
    ids: BTreeSet<UnitId>,
}

impl PendingSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership; returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: UnitId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Paint mode: add without toggling.
    pub fn select(&mut self, id: UnitId) {
        self.ids.insert(id);
    }

    /// Erase mode.
    pub fn deselect(&mut self, id: UnitId) {
        self.ids.remove(&id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.ids.iter().copied()
    }
}

impl Extend<UnitId> for PendingSelection {
    fn extend<T: IntoIterator<Item = UnitId>>(&mut self, iter: T) {
        self.ids.extend(iter);
    }
}

impl FromIterator<UnitId> for PendingSelection {
    fn from_iter<T: IntoIterator<Item = UnitId>>(iter: T) -> Self {
        PendingSelection { ids: iter.into_iter().collect() }
    }
}
