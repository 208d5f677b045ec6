//! Schema module - Configuration and seeding types for lattice simulations.

mod config;
mod seed;

pub use config::*;
pub use seed::*;
