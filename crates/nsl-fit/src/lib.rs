//! Fit models for nonlinear least squares: the model catalogue, closed-form
//! model functions, analytic parameter derivatives, Jacobian assembly,
//! parameter bound mapping and data weights.
//!
//! The solver itself is not part of this crate.

pub mod bounds;
pub mod catalog;
pub mod deriv;
pub mod functions;
pub mod model;
pub mod weights;

pub use bounds::{map_bound, map_unbound, Bounds};
pub use catalog::{BasicModel, DistributionModel, FitModel, GrowthModel, ModelCategory, ModelKind, PeakModel};
pub use model::FitParameters;
pub use weights::{weights, WeightType};
