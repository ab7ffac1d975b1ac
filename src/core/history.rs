use crate::core::notes::{NoteMap, NoteStore};

/// Fixed-length ring of note-state snapshots, one per rendered frame.
///
/// Slots are indexed by `frame % len` and only ever overwritten, never
/// cleared; after `len` frames the ring wraps and the oldest snapshots
/// disappear under newer ones.
#[derive(Debug)]
pub struct HistoryBuffer {
    slots: Vec<NoteMap>,
}

impl HistoryBuffer {
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "history length must be non-zero");
        Self {
            slots: vec![NoteMap::new(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Record the live store for `frame`. Must run before the decay pass so
    /// the snapshot holds the volumes that were actually sounding.
    pub fn snapshot(&mut self, frame: u64, store: &NoteStore) {
        let slot = (frame % self.slots.len() as u64) as usize;
        self.slots[slot] = store.to_map();
    }

    /// Snapshot taken `offset` frames before `frame`, or `None` when that far
    /// back predates the first frame. Offsets past the ring length alias
    /// newer slots; the overwritten snapshot is gone.
    pub fn read(&self, frame: u64, offset: u64) -> Option<&NoteMap> {
        let index = frame.checked_sub(offset)?;
        Some(&self.slots[(index % self.slots.len() as u64) as usize])
    }
}
