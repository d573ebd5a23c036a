use mezzo_types::EntryId;
use std::collections::{HashMap, HashSet};

/// Identifier for one pending decoration (album art) lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecorationId(u64);

/// Tracks asynchronous album art lookups so a completion can be matched back
/// to the entry that requested it, and dropped when that entry is gone.
#[derive(Debug, Default)]
pub struct DecorationRequests {
    pending: HashMap<DecorationId, EntryId>,
    requested: HashSet<EntryId>,
    next_id: u64,
}

impl DecorationRequests {
    /// Start tracking a lookup for `entry`. An entry gets at most one
    /// lookup; repeated requests return `None`.
    pub fn request(&mut self, entry: EntryId) -> Option<DecorationId> {
        if !self.requested.insert(entry) {
            return None;
        }

        self.next_id += 1;
        let id = DecorationId(self.next_id);
        self.pending.insert(id, entry);
        Some(id)
    }

    /// Complete a lookup, yielding the entry it was for. Unknown or
    /// invalidated ids yield `None`.
    pub fn complete(&mut self, id: DecorationId) -> Option<EntryId> {
        self.pending.remove(&id)
    }

    /// Drop any pending lookup tied to a removed entry.
    pub fn invalidate(&mut self, entry: EntryId) {
        self.pending.retain(|_, pending_entry| *pending_entry != entry);
    }

    /// Forget everything. Called when a new search clears the collection.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.requested.clear();
    }
}
