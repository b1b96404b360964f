use rustc_hash::FxHashMap;

/// Per-slot interaction policy. Slots never set are not allowed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionPolicy {
    allowed: FxHashMap<usize, bool>,
}

impl InteractionPolicy {
    pub const DEFAULT_ALLOWED: bool = false;

    pub fn set(&mut self, slot: usize, allowed: bool) {
        self.allowed.insert(slot, allowed);
    }

    pub fn is_allowed(&self, slot: usize) -> bool {
        self.allowed
            .get(&slot)
            .copied()
            .unwrap_or(Self::DEFAULT_ALLOWED)
    }

    /// True only if every slot is allowed.
    pub fn all_allowed(&self, slots: impl IntoIterator<Item = usize>) -> bool {
        slots.into_iter().all(|slot| self.is_allowed(slot))
    }
}
