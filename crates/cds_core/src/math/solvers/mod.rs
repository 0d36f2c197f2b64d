//! Bracketed root-finding solvers.
//!
//! ## Available Solvers
//!
//! - [`BrentSolver`]: Bisection, secant and inverse quadratic interpolation
//! - [`BisectionSolver`]: Plain interval halving
//!
//! Both implement [`BracketedRootFinder`] and are configured with
//! [`SolverConfig`]:
//! - `tolerance`: Convergence tolerance on `|f(x)|` (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Example
//!
//! ```
//! use cds_core::math::solvers::{BracketedRootFinder, BrentSolver, SolverConfig};
//!
//! let solver = BrentSolver::new(SolverConfig::default());
//! let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod bisection;
mod brent;
mod config;
mod traits;

pub use bisection::BisectionSolver;
pub use brent::BrentSolver;
pub use config::SolverConfig;
pub use traits::BracketedRootFinder;
