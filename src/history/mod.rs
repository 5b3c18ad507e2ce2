//! Bounded ring of whole-surface snapshots backing undo and redo.

use crate::surface::PixelSurface;

pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Undo,
    Redo,
}

impl HistoryAction {
    pub const fn applied_message(self) -> &'static str {
        match self {
            Self::Undo => "undo applied",
            Self::Redo => "redo applied",
        }
    }

    pub const fn empty_message(self) -> &'static str {
        match self {
            Self::Undo => "undo history empty",
            Self::Redo => "redo history empty",
        }
    }
}

/// `capacity + 1` slots: `capacity` past states plus the slot holding the live
/// state while undoing, so redo can return to it.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    slots: Vec<Option<PixelSurface>>,
    current: usize,
    filled: usize,
    redo_available: usize,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl UndoHistory {
    /// Capacity is clamped to at least one snapshot.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: vec![None; capacity + 1],
            current: 0,
            filled: 0,
            redo_available: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len() - 1
    }

    pub fn has_undo(&self) -> bool {
        self.filled > 0
    }

    pub fn has_redo(&self) -> bool {
        self.redo_available > 0
    }

    pub fn undo_depth(&self) -> usize {
        self.filled
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_available
    }

    fn next_slot(&self) -> usize {
        (self.current + 1) % self.slots.len()
    }

    fn previous_slot(&self) -> usize {
        (self.current + self.slots.len() - 1) % self.slots.len()
    }

    /// Stores `surface` in the current slot, reusing its allocation when the
    /// dimensions match.
    fn store_current(&mut self, surface: &PixelSurface) {
        match &mut self.slots[self.current] {
            Some(slot) => slot.copy_from(surface),
            empty => *empty = Some(surface.clone()),
        }
    }

    fn restore_into(&self, slot: usize, surface: &mut PixelSurface) -> bool {
        match &self.slots[slot] {
            Some(snapshot) => {
                if snapshot.dimensions() != surface.dimensions() {
                    tracing::debug!(
                        from = ?surface.dimensions(),
                        to = ?snapshot.dimensions(),
                        "snapshot restore resizes surface"
                    );
                }
                surface.copy_from(snapshot);
                true
            }
            None => {
                tracing::warn!(slot, "undo history slot unexpectedly empty");
                false
            }
        }
    }

    /// Records the state the surface is in before a mutation. Once the ring is
    /// full the oldest snapshot is overwritten.
    pub fn push(&mut self, surface: &PixelSurface) {
        self.store_current(surface);
        self.redo_available = 0;
        if self.filled < self.capacity() {
            self.filled += 1;
        }
        self.current = self.next_slot();
        tracing::debug!(
            filled = self.filled,
            current = self.current,
            "undo snapshot pushed"
        );
    }

    /// Steps back one snapshot. Returns `false` without touching anything when
    /// there is nothing to undo.
    pub fn undo(&mut self, surface: &mut PixelSurface) -> bool {
        if self.filled == 0 {
            tracing::debug!("{}", HistoryAction::Undo.empty_message());
            return false;
        }
        self.store_current(surface);
        let previous = self.previous_slot();
        if !self.restore_into(previous, surface) {
            return false;
        }
        self.current = previous;
        self.filled -= 1;
        if self.redo_available < self.capacity() {
            self.redo_available += 1;
        }
        tracing::debug!(
            filled = self.filled,
            redo_available = self.redo_available,
            "{}",
            HistoryAction::Undo.applied_message()
        );
        true
    }

    /// Replays one undone snapshot. Returns `false` when nothing was undone.
    pub fn redo(&mut self, surface: &mut PixelSurface) -> bool {
        if self.redo_available == 0 {
            tracing::debug!("{}", HistoryAction::Redo.empty_message());
            return false;
        }
        let next = self.next_slot();
        if !self.restore_into(next, surface) {
            return false;
        }
        self.current = next;
        self.redo_available -= 1;
        self.filled += 1;
        tracing::debug!(
            filled = self.filled,
            redo_available = self.redo_available,
            "{}",
            HistoryAction::Redo.applied_message()
        );
        true
    }

    /// Forgets every snapshot, as on new document or load.
    pub fn clear(&mut self) {
        self.current = 0;
        self.filled = 0;
        self.redo_available = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Color;

    fn shade(value: u8) -> PixelSurface {
        PixelSurface::filled(3, 2, Color::rgb(value, value, value))
    }

    #[test]
    fn push_then_undo_restores_each_prior_state_in_order() {
        let mut history = UndoHistory::new(5);
        let mut live = shade(0);
        let mut states = Vec::new();
        for step in 1..=5 {
            states.push(live.clone());
            history.push(&live);
            live = shade(step * 10);
        }
        for expected in states.iter().rev() {
            assert!(history.undo(&mut live));
            assert_eq!(&live, expected);
        }
        assert!(!history.has_undo());
        assert!(!history.undo(&mut live));
        assert_eq!(live, shade(0));
    }

    #[test]
    fn redo_returns_to_state_before_undo() {
        let mut history = UndoHistory::new(3);
        let mut live = shade(1);
        history.push(&live);
        live = shade(2);
        history.push(&live);
        live = shade(3);

        assert!(history.undo(&mut live));
        assert_eq!(live, shade(2));
        assert!(history.has_redo());
        assert!(history.redo(&mut live));
        assert_eq!(live, shade(3));
        assert!(!history.has_redo());
        assert!(!history.redo(&mut live));
        assert_eq!(live, shade(3));
    }

    #[test]
    fn overflowing_capacity_evicts_oldest_snapshot() {
        let capacity = 3;
        let mut history = UndoHistory::new(capacity);
        let mut live = shade(0);
        for step in 1..=(capacity as u8 + 1) {
            history.push(&live);
            live = shade(step);
        }
        assert_eq!(history.undo_depth(), capacity);

        let mut undone = 0;
        while history.undo(&mut live) {
            undone += 1;
            assert_ne!(live, shade(0), "oldest snapshot must be unreachable");
        }
        assert_eq!(undone, capacity);
        assert_eq!(live, shade(1));
    }

    #[test]
    fn push_after_undo_discards_redo() {
        let mut history = UndoHistory::new(4);
        let mut live = shade(1);
        history.push(&live);
        live = shade(2);
        assert!(history.undo(&mut live));
        assert_eq!(history.redo_depth(), 1);

        history.push(&live);
        assert_eq!(history.redo_depth(), 0);
        assert!(!history.redo(&mut live));
    }

    #[test]
    fn undo_resizes_when_only_one_dimension_differs() {
        let mut history = UndoHistory::new(2);
        let mut live = PixelSurface::filled(4, 3, Color::WHITE);
        history.push(&live);
        live = PixelSurface::filled(4, 7, Color::BLACK);

        assert!(history.undo(&mut live));
        assert_eq!(live.dimensions(), (4, 3));
        assert!(history.redo(&mut live));
        assert_eq!(live.dimensions(), (4, 7));
        assert_eq!(live.color_at(0, 6), Some(Color::BLACK));
    }

    #[test]
    fn clear_resets_cursors() {
        let mut history = UndoHistory::default();
        let mut live = shade(9);
        history.push(&live);
        history.push(&live);
        assert!(history.undo(&mut live));
        history.clear();
        assert!(!history.has_undo());
        assert!(!history.has_redo());
        assert_eq!(history.capacity(), DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let history = UndoHistory::new(0);
        assert_eq!(history.capacity(), 1);
    }
}
