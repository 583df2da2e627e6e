use roaring::RoaringBitmap;

/// Index of a candidate set inside [`SetArena`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct SlotId(u32);

/// Pool of candidate sets with slot reuse.
///
/// Released slots are cleared and kept on a free list, so a slot handed out
/// by [`SetArena::alloc`] is always empty.
#[derive(Clone, Debug, Default)]
pub(crate) struct SetArena {
    sets: Vec<RoaringBitmap>,
    free: Vec<SlotId>,
}

impl SetArena {
    pub(crate) fn alloc(&mut self) -> SlotId {
        if let Some(slot) = self.free.pop() {
            return slot;
        }
        let slot = SlotId(self.sets.len() as u32);
        self.sets.push(RoaringBitmap::new());
        slot
    }

    pub(crate) fn release(&mut self, slot: SlotId) {
        self.sets[slot.0 as usize].clear();
        self.free.push(slot);
    }

    #[inline]
    pub(crate) fn get(&self, slot: SlotId) -> &RoaringBitmap {
        &self.sets[slot.0 as usize]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, slot: SlotId) -> &mut RoaringBitmap {
        &mut self.sets[slot.0 as usize]
    }

    /// Slots currently handed out.
    pub(crate) fn live(&self) -> usize {
        self.sets.len() - self.free.len()
    }
}
