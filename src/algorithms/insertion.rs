use crate::engine::{Bar, Order};

use super::{Step, StepSequence};

/// Insertion sort. The key walks left one slot per step until it no longer
/// precedes its neighbour.
#[derive(Debug)]
pub struct InsertionSort {
    order: Order,
    // index of the key currently being inserted
    i: usize,
    // current position of that key
    j: usize,
    comparisons: usize,
}

impl InsertionSort {
    pub fn new(order: Order) -> Self {
        Self { order, i: 1, j: 1, comparisons: 0 }
    }
}

impl StepSequence for InsertionSort {
    fn next_step(&mut self, bars: &mut [Bar]) -> Option<Step> {
        let n = bars.len();
        while self.i < n {
            if self.j > 0 {
                self.comparisons += 1;
                if self.order.precedes(bars[self.j].value, bars[self.j - 1].value) {
                    bars.swap(self.j - 1, self.j);
                    let step = Step::shift(self.j - 1, self.j);
                    self.j -= 1;
                    return Some(step);
                }
            }
            self.i += 1;
            self.j = self.i;
        }
        None
    }

    fn comparisons(&self) -> usize {
        self.comparisons
    }
}
