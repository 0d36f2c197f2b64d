//! Numerical building blocks.
//!
//! - [`interpolators`]: One-dimensional interpolation
//! - [`quadrature`]: Fixed-grid composite Simpson integration
//! - [`solvers`]: Bracketed root finders

pub mod interpolators;
pub mod quadrature;
pub mod solvers;
