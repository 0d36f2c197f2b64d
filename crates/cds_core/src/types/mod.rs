//! Shared error types.

mod error;

pub use error::{ConfigError, InterpolationError, SolverError};
