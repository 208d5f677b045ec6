//! Compute module - Lattice state, neighbor counting and generation stepping.

mod clock;
mod lattice;
mod neighbors;
mod projection;
mod rule;
mod shared;
mod simulation;
mod stepper;

pub use clock::*;
pub use lattice::*;
pub use neighbors::*;
pub use projection::*;
pub use rule::*;
pub use shared::*;
pub use simulation::*;
pub use stepper::*;
