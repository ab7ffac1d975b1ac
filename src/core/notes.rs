use std::collections::BTreeMap;

/// MIDI volumes theoretically go to 127, but everything is capped at 100
/// since it's hard to get louder than that in practice.
pub const VOLUME_CEILING: f32 = 100.0;

/// Aggregate state of one MIDI note number across all channels.
///
/// Statuses are plain values; every update replaces the map entry instead of
/// mutating it in place, so history snapshots keep the state they were taken
/// with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteStatus {
    /// Number of concurrently active presses of this note.
    pub count: u32,
    /// Perceived loudness, 0..=100, seeded from velocity and decayed per
    /// frame.
    pub volume: f32,
}

/// Sparse note-number -> status mapping; absent entries are inactive notes.
pub type NoteMap = BTreeMap<u8, NoteStatus>;

/// Live aggregation of currently sounding notes.
#[derive(Debug, Clone, Default)]
pub struct NoteStore {
    notes: NoteMap,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key press. The hold count goes up by one and the latest
    /// velocity wins, overwriting whatever a previous press had decayed to.
    pub fn note_on(&mut self, note: u8, velocity: u8) {
        let count = self.notes.get(&note).map_or(0, |s| s.count) + 1;
        let volume = (velocity as f32).min(VOLUME_CEILING);
        self.notes.insert(note, NoteStatus { count, volume });
    }

    /// Register a key release. Untracked notes are ignored: decay may already
    /// have evicted the entry. Releasing the last hold silences the note;
    /// otherwise the remaining holds keep sounding at the stored volume.
    pub fn note_off(&mut self, note: u8) {
        let Some(status) = self.notes.get(&note).copied() else {
            return;
        };
        let count = status.count.saturating_sub(1);
        let volume = if count == 0 { 0.0 } else { status.volume };
        self.notes.insert(note, NoteStatus { count, volume });
    }

    /// Per-frame decay pass: every tracked volume is multiplied by `decay`,
    /// and notes falling below `cutoff` are evicted entirely. Each note
    /// decays from its own prior value, so the pass is order-independent.
    /// Returns the highest note that was tracked going into the pass.
    pub fn decay_tick(&mut self, decay: f32, cutoff: f32) -> Option<u8> {
        let highest = self.notes.keys().next_back().copied();
        self.notes.retain(|_, status| {
            status.volume *= decay;
            status.volume >= cutoff
        });
        highest
    }

    /// Status for a single note, if it is currently tracked.
    pub fn get(&self, note: u8) -> Option<NoteStatus> {
        self.notes.get(&note).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, NoteStatus)> + '_ {
        self.notes.iter().map(|(&note, &status)| (note, status))
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Shallow copy of the current mapping, taken once per frame for the
    /// history ring.
    pub fn to_map(&self) -> NoteMap {
        self.notes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECAY: f32 = 0.95;
    const CUTOFF: f32 = 35.0;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn note_on_creates_fresh_record() {
        let mut store = NoteStore::new();
        store.note_on(60, 100);

        let status = store.get(60).unwrap();
        assert_eq!(status.count, 1);
        assert_close(status.volume, 100.0);
    }

    #[test]
    fn repeated_note_on_stacks_holds_and_takes_latest_velocity() {
        let mut store = NoteStore::new();
        store.note_on(60, 100);
        store.note_on(60, 80);

        let status = store.get(60).unwrap();
        assert_eq!(status.count, 2);
        assert_close(status.volume, 80.0);
    }

    #[test]
    fn velocity_is_capped_at_the_ceiling() {
        let mut store = NoteStore::new();
        store.note_on(60, 127);
        assert_close(store.get(60).unwrap().volume, VOLUME_CEILING);
    }

    #[test]
    fn note_off_on_untracked_note_is_a_noop() {
        let mut store = NoteStore::new();
        store.note_off(60);
        assert!(store.is_empty());
    }

    #[test]
    fn releasing_last_hold_silences_the_note() {
        let mut store = NoteStore::new();
        store.note_on(60, 100);
        store.note_off(60);

        let status = store.get(60).unwrap();
        assert_eq!(status.count, 0);
        assert_close(status.volume, 0.0);
    }

    #[test]
    fn partial_release_keeps_the_stored_volume() {
        let mut store = NoteStore::new();
        store.note_on(60, 100);
        store.note_on(60, 80);
        store.note_off(60);

        let status = store.get(60).unwrap();
        assert_eq!(status.count, 1);
        assert_close(status.volume, 80.0);
    }

    #[test]
    fn hold_count_never_goes_negative() {
        let mut store = NoteStore::new();
        store.note_on(60, 100);
        store.note_off(60);
        store.note_off(60);

        let status = store.get(60).unwrap();
        assert_eq!(status.count, 0);
        assert_close(status.volume, 0.0);
    }

    #[test]
    fn decay_reduces_volume_and_keeps_count() {
        let mut store = NoteStore::new();
        store.note_on(60, 100);
        store.decay_tick(DECAY, CUTOFF);

        let status = store.get(60).unwrap();
        assert_eq!(status.count, 1);
        assert_close(status.volume, 95.0);
    }

    #[test]
    fn retrigger_resets_volume_independent_of_decay_history() {
        let mut store = NoteStore::new();
        store.note_on(60, 100);
        store.decay_tick(DECAY, CUTOFF);
        store.note_on(60, 80);

        let status = store.get(60).unwrap();
        assert_eq!(status.count, 2);
        assert_close(status.volume, 80.0);
    }

    #[test]
    fn decay_evicts_below_the_cutoff() {
        let mut store = NoteStore::new();
        store.note_on(60, 40);

        store.decay_tick(DECAY, CUTOFF);
        assert_close(store.get(60).unwrap().volume, 38.0);

        store.decay_tick(DECAY, CUTOFF);
        assert_close(store.get(60).unwrap().volume, 36.1);

        store.decay_tick(DECAY, CUTOFF);
        assert!(store.get(60).is_none());
    }

    #[test]
    fn evicted_note_stays_absent_until_a_new_press() {
        let mut store = NoteStore::new();
        store.note_on(60, 40);
        for _ in 0..3 {
            store.decay_tick(DECAY, CUTOFF);
        }
        assert!(store.get(60).is_none());

        store.decay_tick(DECAY, CUTOFF);
        assert!(store.get(60).is_none());

        store.note_on(60, 90);
        let status = store.get(60).unwrap();
        assert_eq!(status.count, 1);
        assert_close(status.volume, 90.0);
    }

    #[test]
    fn released_note_is_evicted_on_the_next_tick() {
        let mut store = NoteStore::new();
        store.note_on(60, 100);
        store.note_off(60);

        store.decay_tick(DECAY, CUTOFF);
        assert!(store.get(60).is_none());
    }

    #[test]
    fn decay_reports_the_highest_tracked_note() {
        let mut store = NoteStore::new();
        assert_eq!(store.decay_tick(DECAY, CUTOFF), None);

        store.note_on(48, 100);
        store.note_on(72, 100);
        store.note_on(60, 100);
        assert_eq!(store.decay_tick(DECAY, CUTOFF), Some(72));
    }
}
