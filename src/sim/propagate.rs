// propagate.rs - Discrete wave update
//
// Leapfrog step over interior cells:
//
//   current = ((W + E + N + S) of previous / 2 - current) * damping
//
// `current` still holds the state from two steps back, which carries the
// velocity term. The one-cell border is never written, so it acts as a
// fixed reflective wall.

use ndarray::{Zip, s};

use crate::field::Field;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavePropagator {
    damping: f32,
}

impl WavePropagator {
    /// `damping` must lie in (0, 1); `WaveConfig::validate` enforces this.
    pub fn new(damping: f32) -> Self {
        Self { damping }
    }

    /// Advance one tick and swap. Grids under 3x3 have no interior and
    /// only swap.
    pub fn step(&self, field: &mut Field) {
        let damping = self.damping;
        let (previous, current) = field.split_mut();
        let (cols, rows) = previous.dim();

        if cols >= 3 && rows >= 3 {
            Zip::from(current.slice_mut(s![1..-1, 1..-1]))
                .and(previous.slice(s![..-2, 1..-1]))
                .and(previous.slice(s![2.., 1..-1]))
                .and(previous.slice(s![1..-1, ..-2]))
                .and(previous.slice(s![1..-1, 2..]))
                .for_each(|cell, &west, &east, &north, &south| {
                    *cell = ((west + east + north + south) / 2.0 - *cell) * damping;
                });
        }

        field.swap();
    }
}
