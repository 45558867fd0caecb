//! Cursor over a fixed trigger list.

use retrace_data::Tick;

/// Hands out one trigger per call, in order, until the list is exhausted.
///
/// The trigger list never changes after construction; the cursor is the only
/// mutable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerSequencer {
    triggers: Vec<Tick>,
    cursor: usize,
}

impl TriggerSequencer {
    /// Create a sequencer positioned at the first trigger.
    pub fn new(triggers: Vec<Tick>) -> Self {
        Self {
            triggers,
            cursor: 0,
        }
    }

    /// Trigger at the cursor, or `None` once exhausted.
    pub fn current(&self) -> Option<Tick> {
        self.triggers.get(self.cursor).copied()
    }

    /// Return the current trigger and move past it.
    ///
    /// After exhaustion this keeps returning `None` without moving the cursor.
    pub fn advance(&mut self) -> Option<Tick> {
        let tick = self.current()?;
        self.cursor += 1;
        Some(tick)
    }

    /// Number of triggers consumed so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Triggers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.triggers.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.triggers.len()
    }

    pub fn triggers(&self) -> &[Tick] {
        &self.triggers
    }
}
