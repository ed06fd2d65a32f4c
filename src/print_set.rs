//! The print set: the ordered list of cards staged for printing.
//!
//! All mutations go through this type. Entries stay sorted by display name;
//! the same catalog card may appear any number of times, each copy with its
//! own staging id and watermark.

use crate::models::{CardRecord, StagedCard, StagingId, Watermark};
use log::debug;

pub struct PrintSet {
    entries: Vec<StagedCard>,
    next_staging_id: u64,
    default_watermark: Watermark,
}

impl Default for PrintSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PrintSet {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_staging_id: 1,
            default_watermark: Watermark::default(),
        }
    }

    /// Stage a copy of `card` for printing.
    ///
    /// Assigns a fresh staging id, initializes the watermark from the session
    /// default and re-sorts the set by display name. Returns the new id.
    pub fn add(&mut self, card: &CardRecord) -> StagingId {
        let staging_id = StagingId(self.next_staging_id);
        self.next_staging_id += 1;

        self.entries.push(StagedCard {
            staging_id,
            card: card.clone(),
            watermark: self.default_watermark,
        });
        // Stable sort: copies of the same name keep their arrival order
        self.entries.sort_by(|a, b| a.card.name.cmp(&b.card.name));

        debug!("Staged {} as {}", card.name, staging_id);
        staging_id
    }

    /// Remove the entry with the given staging id.
    ///
    /// Unknown or stale ids are a silent no-op; the return value reports
    /// whether an entry was removed.
    pub fn remove(&mut self, staging_id: StagingId) -> bool {
        match self.entries.iter().position(|e| e.staging_id == staging_id) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => {
                debug!("Remove ignored for unknown staging id {}", staging_id);
                false
            }
        }
    }

    /// Remove the entry at a position in the current ordering, shifting the
    /// tail left. Out-of-range indices are a silent no-op returning `None`.
    pub fn remove_at(&mut self, index: usize) -> Option<StagedCard> {
        if index >= self.entries.len() {
            debug!("Remove ignored for out-of-range index {}", index);
            return None;
        }
        Some(self.entries.remove(index))
    }

    /// Change the watermark of one staged entry; all other entries and the
    /// ordering are untouched. `false` for unknown ids.
    pub fn set_watermark(&mut self, staging_id: StagingId, watermark: Watermark) -> bool {
        match self.entries.iter_mut().find(|e| e.staging_id == staging_id) {
            Some(entry) => {
                entry.watermark = watermark;
                true
            }
            None => false,
        }
    }

    /// Change the watermark assigned to entries staged from now on.
    /// Already-staged entries keep theirs.
    pub fn set_default_watermark(&mut self, watermark: Watermark) {
        self.default_watermark = watermark;
    }

    pub fn default_watermark(&self) -> Watermark {
        self.default_watermark
    }

    /// Staged entries in display order (sorted by card name)
    pub fn entries(&self) -> &[StagedCard] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "print_set_tests.rs"]
mod tests;
