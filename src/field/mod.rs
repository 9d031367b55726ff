// field/ - Displacement field and stimulus injection
//
// Field owns both time slices. Stimuli and the propagator are the only
// writers; everything else reads.

mod grid;
mod stimulus;

pub use grid::{Field, Slice};
pub use stimulus::{Stimulus, inject};
