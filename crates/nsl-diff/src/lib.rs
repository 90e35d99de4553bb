//! Numerical differentiation of sampled data.
//!
//! Finite-difference stencils are built per point from the local spacing,
//! so the grid only has to be strictly monotonic, not equidistant.

pub mod diff;
pub mod stencil;

pub use diff::*;
pub use stencil::fd_weights;
