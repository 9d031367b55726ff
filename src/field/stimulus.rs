// stimulus.rs - Click-driven energy deposits
//
// A stimulus is a disc of linearly falling values, peak at the centre and
// zero at the rim. It is assigned (not added) into the previous slice.

use super::{Field, Slice};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stimulus {
    pub col: isize,
    pub row: isize,
    pub radius: u32,
    pub peak: f32,
}

impl Stimulus {
    pub fn new(col: isize, row: isize, radius: u32, peak: f32) -> Self {
        Self { col, row, radius, peak }
    }

    /// Centre a stimulus on the cell under screen pixel (px, py).
    pub fn from_screen(px: u32, py: u32, cell_size: u32, radius: u32, peak: f32) -> Self {
        let cell_size = cell_size.max(1);
        Self::new(
            (px / cell_size) as isize,
            (py / cell_size) as isize,
            radius,
            peak,
        )
    }

    /// Value deposited at Euclidean distance `d` from the centre.
    #[inline]
    pub fn strength_at(&self, d: f32) -> f32 {
        if self.radius == 0 {
            return self.peak;
        }
        self.peak * (1.0 - d / self.radius as f32)
    }

    /// Every cell of the disc with its value. Not clipped to any grid.
    pub fn cells(&self) -> impl Iterator<Item = (isize, isize, f32)> + '_ {
        let r = self.radius as isize;
        let reach = self.radius as f32;
        (-r..=r)
            .flat_map(move |dx| (-r..=r).map(move |dy| (dx, dy)))
            .filter_map(move |(dx, dy)| {
                let d = ((dx * dx + dy * dy) as f32).sqrt();
                (d <= reach).then(|| (self.col + dx, self.row + dy, self.strength_at(d)))
            })
    }
}

/// Write a stimulus into the previous slice, skipping cells off the grid.
/// Returns the number of cells written.
pub fn inject(field: &mut Field, stimulus: &Stimulus) -> usize {
    let mut written = 0;
    for (col, row, value) in stimulus.cells() {
        let (Ok(col), Ok(row)) = (usize::try_from(col), usize::try_from(row)) else {
            continue;
        };
        if field.set(Slice::Previous, col, row, value).is_ok() {
            written += 1;
        }
    }
    written
}
