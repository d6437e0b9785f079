use crate::engine::{Bar, Order};

use super::{Step, StepSequence};

/// Classic bubble sort: `n` passes, each bubbling the extreme value of the
/// unsorted prefix to its end. Every adjacent swap is one step.
#[derive(Debug)]
pub struct BubbleSort {
    order: Order,
    pass: usize,
    j: usize,
    comparisons: usize,
}

impl BubbleSort {
    pub fn new(order: Order) -> Self {
        Self { order, pass: 0, j: 0, comparisons: 0 }
    }
}

impl StepSequence for BubbleSort {
    fn next_step(&mut self, bars: &mut [Bar]) -> Option<Step> {
        let n = bars.len();
        while self.pass < n {
            let end = n - self.pass - 1;
            while self.j < end {
                let j = self.j;
                self.j += 1;
                self.comparisons += 1;
                if self.order.precedes(bars[j + 1].value, bars[j].value) {
                    bars.swap(j, j + 1);
                    return Some(Step::swap(j, j + 1));
                }
            }
            self.pass += 1;
            self.j = 0;
        }
        None
    }

    fn comparisons(&self) -> usize {
        self.comparisons
    }
}
