// grid.rs - Double-buffered scalar field
//
// Two equally shaped slices indexed [[col, row]]. The propagator reads
// `previous`, writes `current`, then swaps the two handles.

use ndarray::Array2;

use crate::error::FieldError;

/// Which of the two time slices to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    Previous,
    Current,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    previous: Array2<f32>,
    current: Array2<f32>,
}

impl Field {
    pub fn new(cols: usize, rows: usize) -> Result<Self, FieldError> {
        check_dimensions(cols, rows)?;
        Ok(Self {
            previous: Array2::zeros((cols, rows)),
            current: Array2::zeros((cols, rows)),
        })
    }

    /// Like `new`, but degenerate dimensions are raised to 1.
    pub fn clamped(cols: usize, rows: usize) -> Self {
        let (cols, rows) = (cols.max(1), rows.max(1));
        Self {
            previous: Array2::zeros((cols, rows)),
            current: Array2::zeros((cols, rows)),
        }
    }

    /// Reallocate both slices, zeroed. On error the field is left untouched.
    pub fn resize(&mut self, cols: usize, rows: usize) -> Result<(), FieldError> {
        check_dimensions(cols, rows)?;
        self.reallocate(cols, rows);
        Ok(())
    }

    /// Like `resize`, but degenerate dimensions are raised to 1.
    /// Returns the shape actually allocated.
    pub fn resize_clamped(&mut self, cols: usize, rows: usize) -> (usize, usize) {
        let (cols, rows) = (cols.max(1), rows.max(1));
        self.reallocate(cols, rows);
        (cols, rows)
    }

    fn reallocate(&mut self, cols: usize, rows: usize) {
        // Old buffers drop here
        self.previous = Array2::zeros((cols, rows));
        self.current = Array2::zeros((cols, rows));
    }

    pub fn cols(&self) -> usize {
        self.previous.dim().0
    }

    pub fn rows(&self) -> usize {
        self.previous.dim().1
    }

    #[inline]
    pub fn contains(&self, col: usize, row: usize) -> bool {
        col < self.cols() && row < self.rows()
    }

    pub fn get(&self, slice: Slice, col: usize, row: usize) -> Result<f32, FieldError> {
        self.check(col, row)?;
        Ok(self.slice(slice)[[col, row]])
    }

    pub fn set(&mut self, slice: Slice, col: usize, row: usize, value: f32) -> Result<(), FieldError> {
        self.check(col, row)?;
        let target = match slice {
            Slice::Previous => &mut self.previous,
            Slice::Current => &mut self.current,
        };
        target[[col, row]] = value;
        Ok(())
    }

    pub fn slice(&self, slice: Slice) -> &Array2<f32> {
        match slice {
            Slice::Previous => &self.previous,
            Slice::Current => &self.current,
        }
    }

    /// Most recently produced state: the slice the next step reads from.
    pub fn latest(&self) -> &Array2<f32> {
        &self.previous
    }

    /// Exchange the two slices. Moves handles only, never cell data.
    #[inline]
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.previous, &mut self.current);
    }

    /// Read `previous`, write `current`.
    pub(crate) fn split_mut(&mut self) -> (&Array2<f32>, &mut Array2<f32>) {
        (&self.previous, &mut self.current)
    }

    /// Sum of squares over both slices.
    pub fn energy(&self) -> f64 {
        self.previous
            .iter()
            .chain(self.current.iter())
            .map(|&v| (v as f64) * (v as f64))
            .sum()
    }

    /// Largest |value| in the latest slice.
    pub fn peak(&self) -> f32 {
        self.latest().iter().fold(0.0f32, |m, v| m.max(v.abs()))
    }

    fn check(&self, col: usize, row: usize) -> Result<(), FieldError> {
        if self.contains(col, row) {
            Ok(())
        } else {
            Err(FieldError::OutOfBounds {
                col,
                row,
                cols: self.cols(),
                rows: self.rows(),
            })
        }
    }
}

fn check_dimensions(cols: usize, rows: usize) -> Result<(), FieldError> {
    if cols == 0 || rows == 0 {
        return Err(FieldError::InvalidDimension { cols, rows });
    }
    Ok(())
}
