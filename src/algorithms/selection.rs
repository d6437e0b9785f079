use crate::engine::{Bar, Order};

use super::{Step, StepSequence};

/// Selection sort: each outer iteration scans the unsorted suffix for the
/// extreme value and swaps it to the front. Iterations where the extreme is
/// already in place produce no step.
#[derive(Debug)]
pub struct SelectionSort {
    order: Order,
    i: usize,
    comparisons: usize,
}

impl SelectionSort {
    pub fn new(order: Order) -> Self {
        Self { order, i: 0, comparisons: 0 }
    }
}

impl StepSequence for SelectionSort {
    fn next_step(&mut self, bars: &mut [Bar]) -> Option<Step> {
        let n = bars.len();
        while self.i < n {
            let i = self.i;
            self.i += 1;

            let mut best = i;
            for j in (i + 1)..n {
                self.comparisons += 1;
                if self.order.precedes(bars[j].value, bars[best].value) {
                    best = j;
                }
            }
            if best != i {
                bars.swap(i, best);
                return Some(Step::swap(i, best));
            }
        }
        None
    }

    fn comparisons(&self) -> usize {
        self.comparisons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_util::{bars, drain, values};

    #[test]
    fn one_swap_per_misplaced_slot() {
        let mut arr = bars(&[3, 1, 2]);
        let mut seq = SelectionSort::new(Order::Ascending);
        let steps = drain(&mut seq, &mut arr);

        assert_eq!(values(&arr), vec![1, 2, 3]);
        assert_eq!(steps, vec![Step::swap(0, 1), Step::swap(1, 2)]);
        assert_eq!(seq.comparisons(), 3);
    }

    #[test]
    fn descending_picks_maximum() {
        let mut arr = bars(&[2, 7, 7, 1, 5]);
        let steps = drain(&mut SelectionSort::new(Order::Descending), &mut arr);
        assert_eq!(values(&arr), vec![7, 7, 5, 2, 1]);
        assert_eq!(steps.first(), Some(&Step::swap(0, 1)));
    }

    #[test]
    fn sorted_input_skips_self_swaps() {
        let mut arr = bars(&[9, 6, 3]);
        assert!(drain(&mut SelectionSort::new(Order::Descending), &mut arr).is_empty());
    }
}
