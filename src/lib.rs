//! # error-bounds: Error-Bound Analysis for Time-Discretized Schemes
//!
//! A Rust library for the rigorous error-bound analysis of a time-discretized
//! numerical scheme: the mutually-recursive polynomial sequences used to
//! verify the scheme's analytic inequalities, and the backward propagation of
//! per-step local error estimates into cumulative bounds.
//!
//! ## Key Features
//!
//! - **Memoized Recursion**: Bottom-up tables turn an exponentially-branching
//!   mutual recursion into linear work per requested index
//! - **Vectorized Evaluation**: Sequences evaluate elementwise over an
//!   `ndarray` grid, with the per-index kernel parallelized via Rayon
//! - **Inequality Diagnostics**: lhs/rhs residuals and margins for the
//!   theorem's conditions (iii) and (vii), plus a parallel α-sweep
//! - **Backward Bound Propagation**: Windowed stencil recursion with
//!   boundary clamping over a fixed discrete horizon
//! - **Robust Validation**: Comprehensive parameter and dimension checking
//!
//! ## Quick Start
//!
//! ```rust
//! use error_bounds::propagator::WindowedErrorPropagator;
//! use ndarray::array;
//!
//! // Horizon of 2 steps, unit rate and step size, no contraction
//! let mut bound = WindowedErrorPropagator::new(1.0, 1.0, 0.0, 2, 1)
//!     .expect("Valid parameters");
//! bound.load_data(&array![1.0, 2.0], &array![1.0, 1.0])
//!     .expect("Matching dimensions");
//! bound.fill_error().expect("Data loaded");
//!
//! assert_eq!(bound.eepsilon()[0], 8.0);
//! assert_eq!(bound.ee()[0], 11.0);
//! ```
//!
//! ## Mathematical Foundation
//!
//! Both components share the contraction parameter α ∈ (0,1) and the integer
//! lag m (the reciprocal of the normalized step size). The polynomial engine
//! supports plot-based verification that the theorem's inequalities hold over
//! a sampled domain; the propagator turns concrete local-error estimates from
//! a discretization run into cumulative bounds for diagnostics.

// Module declarations
pub mod error;
pub mod math_utils;
pub mod polynomials;
pub mod propagator;

// Re-export commonly used types for convenience
pub use error::{BoundError, BoundResult};
