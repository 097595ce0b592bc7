use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws in `[0, 1)`
///
/// The engine never touches a global RNG; swap in [`FixedDraw`] or
/// [`SequenceDraw`] to pin match outcomes in tests.
pub trait DrawSource: Send {
    fn draw(&mut self) -> f64;
}

/// Draws backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RngDraw<R> {
    rng: R,
}

impl<R: Rng + Send> RngDraw<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDraw<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng + Send> DrawSource for RngDraw<R> {
    #[inline]
    fn draw(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Always returns the same value
#[derive(Debug, Clone, Copy)]
pub struct FixedDraw(pub f64);

impl DrawSource for FixedDraw {
    fn draw(&mut self) -> f64 {
        self.0
    }
}

/// Replays a list of values, wrapping around at the end
#[derive(Debug, Clone)]
pub struct SequenceDraw {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceDraw {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl DrawSource for SequenceDraw {
    fn draw(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value
    }
}
