//! Alert de-duplication state.

use std::collections::HashSet;

use pt_core::EntityId;

/// Ids of entities currently inside the detection radius.
///
/// Owned by exactly one engine and never shared.  An alert fires only on the
/// out-of-range → in-range transition, i.e. when [`enter`][Self::enter]
/// returns `true`.
#[derive(Debug, Default)]
pub struct InRangeSet {
    ids: HashSet<EntityId>,
}

impl InRangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` as in range.  Returns `true` if it was not already.
    pub fn enter(&mut self, id: &EntityId) -> bool {
        if self.ids.contains(id) {
            return false;
        }
        self.ids.insert(id.clone())
    }

    /// Mark `id` as out of range, re-arming its next alert.
    pub fn leave(&mut self, id: &EntityId) {
        self.ids.remove(id);
    }

    #[inline]
    pub fn contains(&self, id: &EntityId) -> bool {
        self.ids.contains(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
