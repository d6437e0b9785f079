use std::ops::RangeInclusive;
use std::time::Duration;

use rand::{rngs::SmallRng, Rng, SeedableRng};
use tracing::{debug, info};

use crate::algorithms::{Algorithm, StepSequence};
use crate::config::Config;
use crate::controls::Command;

/// Number of colors bars are painted from.
pub const PALETTE_SIZE: usize = 100;
/// Each palette channel is drawn from this range, keeping bars readable on the dark background.
const PALETTE_CHANNEL: RangeInclusive<u8> = 100..=255;

/// Sort direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

impl Order {
    /// Whether `a` belongs strictly before `b`. Equal values never precede each other.
    pub fn precedes(self, a: u32, b: u32) -> bool {
        match self {
            Order::Ascending => a < b,
            Order::Descending => a > b,
        }
    }

    pub fn is_sorted(self, values: &[u32]) -> bool {
        values.windows(2).all(|w| !self.precedes(w[1], w[0]))
    }

    pub fn label(self) -> &'static str {
        match self {
            Order::Ascending => "Ascending",
            Order::Descending => "Descending",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarState {
    Idle,   // 0
    Swap,   // 1
    Sorted, // 2
}

impl BarState {
    /// Value passed to the bar shader.
    pub fn shader_id(self) -> u32 {
        match self {
            BarState::Idle => 0,
            BarState::Swap => 1,
            BarState::Sorted => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bar {
    pub value: u32,
    pub color: [u8; 3],
    pub state: BarState,
}

/// Owns the array and drives at most one sort at a time.
pub struct Engine {
    bars: Vec<Bar>,
    palette: Vec<[u8; 3]>,
    rng: SmallRng,
    size: usize,
    value_range: RangeInclusive<u32>,
    max_value: u32,
    algorithm: Algorithm,
    order: Order,
    // order the running sequence was started with
    running_order: Order,
    sequence: Option<Box<dyn StepSequence>>,
    time_elapsed: Duration,
    comparisons: usize,
    steps: usize,
}

impl Engine {
    pub fn new(config: &Config) -> Self {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let palette = (0..PALETTE_SIZE)
            .map(|_| {
                [
                    rng.gen_range(PALETTE_CHANNEL),
                    rng.gen_range(PALETTE_CHANNEL),
                    rng.gen_range(PALETTE_CHANNEL),
                ]
            })
            .collect();
        let lo = config.min_value.min(config.max_value);
        let hi = config.max_value.max(config.min_value);

        let mut engine = Self {
            bars: Vec::with_capacity(config.size),
            palette,
            rng,
            size: config.size,
            value_range: lo..=hi,
            max_value: 1,
            algorithm: Algorithm::default(),
            order: Order::default(),
            running_order: Order::default(),
            sequence: None,
            time_elapsed: Duration::ZERO,
            comparisons: 0,
            steps: 0,
        };
        engine.generate();
        engine
    }

    fn generate(&mut self) {
        let rng = &mut self.rng;
        let palette = &self.palette;
        let range = self.value_range.clone();
        self.bars = (0..self.size)
            .map(|_| Bar {
                value: rng.gen_range(range.clone()),
                color: palette[rng.gen_range(0..palette.len())],
                state: BarState::Idle,
            })
            .collect();
        self.max_value = self.bars.iter().map(|b| b.value).max().unwrap_or(1).max(1);
    }

    /// New random array. Stops any running sort.
    pub fn reset(&mut self) {
        self.invalidate();
        self.generate();
        self.time_elapsed = Duration::ZERO;
        self.comparisons = 0;
        self.steps = 0;
        info!(size = self.bars.len(), max = self.max_value, "array regenerated");
    }

    /// Switch algorithm. Stops any running sort.
    pub fn select(&mut self, algorithm: Algorithm) {
        self.invalidate();
        if self.algorithm != algorithm {
            info!(algorithm = algorithm.name(), "algorithm selected");
        }
        self.algorithm = algorithm;
    }

    /// Direction for the next run; a running sort keeps the order it started with.
    pub fn set_order(&mut self, order: Order) {
        if self.order != order {
            info!(order = order.label(), "order changed");
        }
        self.order = order;
    }

    /// Begin sorting with the current algorithm and order. Ignored while sorting.
    pub fn start(&mut self) {
        if self.is_sorting() {
            return;
        }
        for bar in &mut self.bars {
            bar.state = BarState::Idle;
        }
        self.time_elapsed = Duration::ZERO;
        self.comparisons = 0;
        self.steps = 0;
        self.running_order = self.order;
        self.sequence = Some(self.algorithm.sequence(self.order));
        info!(algorithm = self.algorithm.name(), order = self.order.label(), "sort started");
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Regenerate => self.reset(),
            Command::Start => self.start(),
            Command::SetOrder(order) => self.set_order(order),
            Command::Select(algorithm) => self.select(algorithm),
        }
    }

    /// Advance the running sort by one step. Returns whether the array changed.
    pub fn step(&mut self, dt: Duration) -> bool {
        let Some(sequence) = self.sequence.as_mut() else {
            return false;
        };
        self.time_elapsed += dt;

        // Clear transient states
        for bar in &mut self.bars {
            bar.state = BarState::Idle;
        }

        match sequence.next_step(&mut self.bars) {
            Some(step) => {
                self.comparisons = sequence.comparisons();
                self.steps += 1;
                self.mark(step.i, BarState::Swap);
                self.mark(step.j, BarState::Swap);
                true
            }
            None => {
                self.comparisons = sequence.comparisons();
                self.sequence = None;
                for bar in &mut self.bars {
                    bar.state = BarState::Sorted;
                }
                debug!(
                    algorithm = self.algorithm.name(),
                    comparisons = self.comparisons,
                    steps = self.steps,
                    elapsed = ?self.time_elapsed,
                    "sort finished"
                );
                false
            }
        }
    }

    fn invalidate(&mut self) {
        if self.sequence.take().is_some() {
            info!(algorithm = self.algorithm.name(), "sort interrupted");
        }
        for bar in &mut self.bars {
            bar.state = BarState::Idle;
        }
    }

    fn mark(&mut self, idx: usize, state: BarState) {
        if let Some(bar) = self.bars.get_mut(idx) {
            bar.state = state;
        }
    }

    pub fn bars(&self) -> (&[Bar], u32) {
        (&self.bars, self.max_value)
    }

    pub fn values(&self) -> Vec<u32> {
        self.bars.iter().map(|b| b.value).collect()
    }

    pub fn palette(&self) -> &[[u8; 3]] {
        &self.palette
    }

    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn order(&self) -> Order {
        self.order
    }

    /// Order being executed while sorting, otherwise the order of the next run.
    pub fn active_order(&self) -> Order {
        if self.is_sorting() {
            self.running_order
        } else {
            self.order
        }
    }

    pub fn is_sorting(&self) -> bool {
        self.sequence.is_some()
    }

    pub fn time_elapsed(&self) -> Duration {
        self.time_elapsed
    }

    pub fn comparisons(&self) -> usize {
        self.comparisons
    }

    pub fn steps(&self) -> usize {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn seeded(size: usize) -> Engine {
        Engine::new(&Config { size, seed: Some(7), ..Config::default() })
    }

    fn run_to_end(engine: &mut Engine) -> usize {
        let mut frames = 0;
        while engine.is_sorting() {
            engine.step(FRAME);
            frames += 1;
        }
        frames
    }

    #[test]
    fn values_respect_configured_range() {
        let engine = Engine::new(&Config {
            size: 200,
            min_value: 10,
            max_value: 20,
            seed: Some(1),
            ..Config::default()
        });
        let (bars, max) = engine.bars();
        assert_eq!(bars.len(), 200);
        assert!(bars.iter().all(|b| (10..=20).contains(&b.value)));
        assert_eq!(max, bars.iter().map(|b| b.value).max().unwrap());
    }

    #[test]
    fn bar_colors_come_from_palette() {
        let engine = seeded(50);
        assert_eq!(engine.palette().len(), PALETTE_SIZE);
        for bar in engine.bars().0 {
            assert!(engine.palette().contains(&bar.color));
            assert!(bar.color.iter().all(|c| *c >= 100));
        }
    }

    #[test]
    fn same_seed_same_array() {
        assert_eq!(seeded(30).values(), seeded(30).values());
    }

    #[test]
    fn step_without_start_does_nothing() {
        let mut engine = seeded(10);
        let before = engine.values();
        assert!(!engine.step(FRAME));
        assert_eq!(engine.values(), before);
        assert_eq!(engine.time_elapsed(), Duration::ZERO);
    }

    #[test]
    fn exhaustion_clears_flag_and_freezes_timer() {
        let mut engine = seeded(25);
        engine.start();
        assert!(engine.is_sorting());
        let frames = run_to_end(&mut engine);

        assert!(Order::Ascending.is_sorted(&engine.values()));
        // one frame per step plus the frame that observes exhaustion
        assert_eq!(frames, engine.steps() + 1);
        let elapsed = engine.time_elapsed();
        assert_eq!(elapsed, FRAME * frames as u32);
        engine.step(FRAME);
        assert_eq!(engine.time_elapsed(), elapsed);
        assert!(engine.bars().0.iter().all(|b| b.state == BarState::Sorted));
    }

    #[test]
    fn start_while_sorting_is_ignored() {
        let mut engine = seeded(20);
        engine.start();
        engine.step(FRAME);
        let steps = engine.steps();
        engine.start();
        assert_eq!(engine.steps(), steps);
        assert!(engine.is_sorting());
    }

    #[test]
    fn select_and_reset_interrupt_sort() {
        let mut engine = seeded(20);
        engine.start();
        engine.step(FRAME);
        engine.select(Algorithm::Selection);
        assert!(!engine.is_sorting());
        assert_eq!(engine.algorithm(), Algorithm::Selection);

        engine.start();
        engine.reset();
        assert!(!engine.is_sorting());
        assert_eq!(engine.steps(), 0);
        assert!(engine.bars().0.iter().all(|b| b.state == BarState::Idle));
    }

    #[test]
    fn running_sort_keeps_its_order() {
        let mut engine = seeded(30);
        engine.start();
        engine.set_order(Order::Descending);
        assert_eq!(engine.active_order(), Order::Ascending);
        run_to_end(&mut engine);
        assert!(Order::Ascending.is_sorted(&engine.values()));
        assert_eq!(engine.order(), Order::Descending);
        assert_eq!(engine.active_order(), Order::Descending);

        engine.start();
        run_to_end(&mut engine);
        assert!(Order::Descending.is_sorted(&engine.values()));
    }

    #[test]
    fn rerun_on_sorted_array_takes_no_steps() {
        for algorithm in Algorithm::ALL {
            let mut engine = seeded(40);
            engine.select(algorithm);
            engine.start();
            run_to_end(&mut engine);
            engine.start();
            run_to_end(&mut engine);
            assert_eq!(engine.steps(), 0, "{algorithm}");
        }
    }

    #[test]
    fn swapped_bars_are_highlighted() {
        let mut engine = Engine::new(&Config {
            size: 2,
            min_value: 1,
            max_value: 1000,
            seed: Some(3),
            ..Config::default()
        });
        engine.set_order(if engine.values()[0] > engine.values()[1] {
            Order::Ascending
        } else {
            Order::Descending
        });
        engine.start();
        if engine.values()[0] != engine.values()[1] {
            assert!(engine.step(FRAME));
            assert!(engine.bars().0.iter().all(|b| b.state == BarState::Swap));
        }
    }

    #[test]
    fn empty_array_finishes_immediately() {
        let mut engine = seeded(0);
        assert_eq!(engine.max_value(), 1);
        engine.start();
        assert!(!engine.step(FRAME));
        assert!(!engine.is_sorting());
    }
}
