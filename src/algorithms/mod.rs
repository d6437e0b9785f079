//! Step-wise sorting algorithms.
//!
//! Every sort is a resumable state machine: [`StepSequence::next_step`] runs the
//! algorithm up to its next mutation, applies it to the bars and hands control
//! back to the caller. A sequence is finite and cannot be restarted.

pub mod bubble;
pub mod insertion;
pub mod selection;

use std::fmt;

use crate::engine::{Bar, Order};

pub use bubble::BubbleSort;
pub use insertion::InsertionSort;
pub use selection::SelectionSort;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepKind {
    Swap,
    Shift, // key moved one slot towards the front
}

/// One mutation of the array. `i < j` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub kind: StepKind,
    pub i: usize,
    pub j: usize,
}

impl Step {
    pub fn swap(i: usize, j: usize) -> Self {
        Self { kind: StepKind::Swap, i: i.min(j), j: i.max(j) }
    }

    pub fn shift(i: usize, j: usize) -> Self {
        Self { kind: StepKind::Shift, i: i.min(j), j: i.max(j) }
    }
}

pub trait StepSequence {
    /// Advance to the next mutation and apply it to `bars`.
    ///
    /// Returns `None` once the sort is finished, and keeps returning `None`
    /// afterwards. The same slice (same length) must be passed on every call.
    fn next_step(&mut self, bars: &mut [Bar]) -> Option<Step>;

    /// Comparisons performed so far.
    fn comparisons(&self) -> usize;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    #[default]
    Bubble,
    Insertion,
    Selection,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bubble, Algorithm::Insertion, Algorithm::Selection];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Selection => "Selection Sort",
        }
    }

    /// Key that selects this algorithm.
    pub fn hotkey(self) -> char {
        match self {
            Algorithm::Bubble => 'B',
            Algorithm::Insertion => 'I',
            Algorithm::Selection => 'S',
        }
    }

    /// Fresh step sequence sorting in `order`.
    pub fn sequence(self, order: Order) -> Box<dyn StepSequence> {
        match self {
            Algorithm::Bubble => Box::new(BubbleSort::new(order)),
            Algorithm::Insertion => Box::new(InsertionSort::new(order)),
            Algorithm::Selection => Box::new(SelectionSort::new(order)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
