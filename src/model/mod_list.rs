//! Ordered mod list state machine
//!
//! Holds the authoritative order of the workshop record together with the
//! span of rows being dragged. Nothing in here knows about the terminal.

use super::entry::{ModEntry, ModState, RecordEntry};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModListError {
    #[error("a reorder span needs at least one row")]
    EmptySpan,
    #[error("row {index} is out of range (list has {len} rows)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// The mod list plus the active drag span
#[derive(Debug, Default)]
pub struct ModListModel {
    entries: Vec<ModEntry>,
    /// Sorted, non-empty while a reorder is in progress
    span: Option<Vec<usize>>,
}

impl ModListModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list. Titles start out pending.
    pub fn load(&mut self, records: Vec<RecordEntry>) {
        self.entries = records.into_iter().map(ModEntry::from_record).collect();
        self.span = None;
    }

    pub fn entries(&self) -> &[ModEntry] {
        &self.entries
    }

    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<&ModEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn span(&self) -> Option<&[usize]> {
        self.span.as_deref()
    }

    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_pending()).count()
    }

    /// Ids that occur more than once, in first-seen order
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entry in &self.entries {
            *counts.entry(entry.id.as_str()).or_default() += 1;
        }
        let mut seen = BTreeSet::new();
        self.entries
            .iter()
            .filter(|e| counts.get(e.id.as_str()).copied().unwrap_or(0) > 1)
            .filter(|e| seen.insert(e.id.clone()))
            .map(|e| e.id.clone())
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Toggle
    // ─────────────────────────────────────────────────────────────────────────

    /// Flip the enable state of one row, returning the new state
    pub fn toggle(&mut self, index: usize) -> Option<ModState> {
        let entry = self.entries.get_mut(index)?;
        entry.state = entry.state.toggled();
        Some(entry.state)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reorder
    // ─────────────────────────────────────────────────────────────────────────

    /// Start (or restart) a reorder with the given rows as the span
    pub fn begin_reorder<I>(&mut self, indices: I) -> Result<(), ModListError>
    where
        I: IntoIterator<Item = usize>,
    {
        let span: BTreeSet<usize> = indices.into_iter().collect();
        if span.is_empty() {
            return Err(ModListError::EmptySpan);
        }
        let len = self.entries.len();
        if let Some(&index) = span.iter().find(|&&i| i >= len) {
            return Err(ModListError::IndexOutOfRange { index, len });
        }
        self.span = Some(span.into_iter().collect());
        Ok(())
    }

    /// Move the span so it takes the place of the row at `target`.
    ///
    /// `target` is read in the current order, before the block is lifted out.
    /// Targets after the first span row put the block just after the target
    /// row, other targets put it just before, so dragging a multi-row block
    /// down onto row N always lands it right below that row rather than
    /// `span.len() - 1` rows further. Returns false when nothing moved: no
    /// active span, target out of range, or target inside the span.
    pub fn continue_reorder(&mut self, target: usize) -> bool {
        let Some(span) = self.span.take() else {
            return false;
        };
        let Some(&first) = span.first() else {
            return false;
        };
        if target >= self.entries.len() || span.binary_search(&target).is_ok() {
            self.span = Some(span);
            return false;
        }

        // Insertion point once the block is removed
        let rows_before = (0..target)
            .filter(|i| span.binary_search(i).is_err())
            .count();
        let insert_at = if target > first {
            rows_before + 1
        } else {
            rows_before
        };

        let mut block = Vec::with_capacity(span.len());
        for &index in span.iter().rev() {
            block.push(self.entries.remove(index));
        }
        block.reverse();

        let moved = block.len();
        self.entries.splice(insert_at..insert_at, block);
        self.span = Some((insert_at..insert_at + moved).collect());
        true
    }

    pub fn end_reorder(&mut self) {
        self.span = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Persistence & titles
    // ─────────────────────────────────────────────────────────────────────────

    /// Current order and states, ready to be written back
    pub fn snapshot(&self) -> Vec<RecordEntry> {
        self.entries.iter().map(ModEntry::to_record).collect()
    }

    /// Whether the list differs from a previously saved snapshot
    pub fn is_dirty(&self, saved: &[RecordEntry]) -> bool {
        self.entries.len() != saved.len()
            || self
                .entries
                .iter()
                .zip(saved)
                .any(|(entry, record)| entry.id != record.id || entry.state != record.state)
    }

    /// Set the title of every row with this id; returns how many rows changed
    pub fn apply_title(&mut self, id: &str, title: &str) -> usize {
        let mut updated = 0;
        for entry in self.entries.iter_mut().filter(|e| e.id == id) {
            entry.title = Some(title.to_string());
            updated += 1;
        }
        updated
    }
}
