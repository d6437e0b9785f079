//! Ordering properties shared by every step-wise sort.

use proptest::prelude::*;
use sort_visualizer::algorithms::{Algorithm, Step, StepKind, StepSequence};
use sort_visualizer::engine::{Bar, BarState, Order};

fn bars(values: &[u32]) -> Vec<Bar> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| Bar {
            value,
            color: [(i % 256) as u8, 0, 0],
            state: BarState::Idle,
        })
        .collect()
}

fn values(bars: &[Bar]) -> Vec<u32> {
    bars.iter().map(|b| b.value).collect()
}

fn run(algorithm: Algorithm, order: Order, arr: &mut [Bar]) -> Vec<Step> {
    let mut seq = algorithm.sequence(order);
    std::iter::from_fn(|| seq.next_step(arr)).collect()
}

fn order_strategy() -> impl Strategy<Value = Order> {
    prop_oneof![Just(Order::Ascending), Just(Order::Descending)]
}

fn algorithm_strategy() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::ALL.to_vec())
}

proptest! {
    #[test]
    fn leaves_array_ordered(
        algorithm in algorithm_strategy(),
        order in order_strategy(),
        input in prop::collection::vec(1u32..=100, 0..60),
    ) {
        let mut arr = bars(&input);
        run(algorithm, order, &mut arr);

        let mut expected = input.clone();
        expected.sort_unstable();
        if order == Order::Descending {
            expected.reverse();
        }
        prop_assert_eq!(values(&arr), expected);
    }

    #[test]
    fn second_run_takes_no_steps(
        algorithm in algorithm_strategy(),
        order in order_strategy(),
        input in prop::collection::vec(1u32..=20, 0..40),
    ) {
        let mut arr = bars(&input);
        run(algorithm, order, &mut arr);
        let sorted = arr.clone();
        prop_assert!(run(algorithm, order, &mut arr).is_empty());
        prop_assert_eq!(arr, sorted);
    }

    #[test]
    fn each_step_exchanges_exactly_the_reported_slots(
        algorithm in algorithm_strategy(),
        order in order_strategy(),
        input in prop::collection::vec(1u32..=50, 2..30),
    ) {
        let mut arr = bars(&input);
        let mut seq = algorithm.sequence(order);
        loop {
            let before = arr.clone();
            let Some(step) = seq.next_step(&mut arr) else { break };
            prop_assert!(step.i < step.j);
            prop_assert_eq!(arr[step.i], before[step.j]);
            prop_assert_eq!(arr[step.j], before[step.i]);
            for k in (0..arr.len()).filter(|&k| k != step.i && k != step.j) {
                prop_assert_eq!(arr[k], before[k]);
            }
            // every step fixes an inversion
            prop_assert!(order.precedes(arr[step.i].value, arr[step.j].value));
            if step.kind == StepKind::Shift {
                prop_assert_eq!(step.j, step.i + 1);
            }
        }
    }
}

#[test]
fn exhausted_sequences_do_not_restart() {
    for algorithm in Algorithm::ALL {
        let mut arr = bars(&[3, 1, 2]);
        let mut seq = algorithm.sequence(Order::Ascending);
        while seq.next_step(&mut arr).is_some() {}

        // scramble again; the spent sequence must not touch it
        arr.reverse();
        let scrambled = values(&arr);
        assert_eq!(seq.next_step(&mut arr), None, "{algorithm}");
        assert_eq!(values(&arr), scrambled);
    }
}

#[test]
fn step_kinds_match_algorithm() {
    let input = [5, 4, 3, 2, 1];
    let kinds = |algorithm| -> Vec<StepKind> {
        let mut arr = bars(&input);
        run(algorithm, Order::Ascending, &mut arr).iter().map(|s| s.kind).collect()
    };
    assert!(kinds(Algorithm::Bubble).iter().all(|k| *k == StepKind::Swap));
    assert!(kinds(Algorithm::Insertion).iter().all(|k| *k == StepKind::Shift));
    assert_eq!(kinds(Algorithm::Selection), vec![StepKind::Swap, StepKind::Swap]);
}

#[test]
fn reversed_input_step_counts() {
    let input: Vec<u32> = (1..=10).rev().collect();
    let count = |algorithm| run(algorithm, Order::Ascending, &mut bars(&input)).len();
    // every pair is an inversion
    assert_eq!(count(Algorithm::Bubble), 45);
    assert_eq!(count(Algorithm::Insertion), 45);
    assert_eq!(count(Algorithm::Selection), 5);
}

#[test]
fn comparisons_grow_quadratically() {
    let input: Vec<u32> = (1..=10).collect();
    for algorithm in [Algorithm::Bubble, Algorithm::Selection] {
        let mut arr = bars(&input);
        let mut seq = algorithm.sequence(Order::Ascending);
        while seq.next_step(&mut arr).is_some() {}
        assert_eq!(seq.comparisons(), 45, "{algorithm}");
    }
}
