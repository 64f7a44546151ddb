// src/propagator.rs
//! Backward Propagation of Local Errors into Cumulative Bounds
//!
//! # Mathematical Framework
//!
//! Given per-step local error estimates ε_k and e_k over a horizon of n
//! steps, the cumulative bounds Ē_k (`eepsilon`) and E_k (`ee`) satisfy a
//! backward stencil with a sliding summation window of width m-1:
//!
//! ```text
//! Ē_k = (1+x)·Ē_{k+1} + ε_k + x·E_{k+1}
//! E_k = e_k + aa·(Ē_{min(k+m, n)} + Ē_k)
//!       + aa·x·Σ_{j=k+1}^{min(k+m-1, n-1)} (Ē_j + E_j)     (window may be empty)
//! ```
//!
//! where x = λ_f·Δt and aa = 1/(1-α). Both bound arrays have length n+1
//! with a sentinel Ē_n = E_n = 0 that is never written.
//!
//! # Lifecycle
//!
//! Constructed with the scheme scalars, loaded with the per-step error
//! arrays, then computed. Reloading or recomputing fully overwrites prior
//! results; the recursion is deterministic, so recomputing with unchanged
//! inputs is idempotent.

use crate::error::{validation::*, BoundError, BoundResult};
use ndarray::{s, Array1};
use std::f64;

struct StepErrors {
    epsilon: Array1<f64>,
    e: Array1<f64>,
}

/// Backward error-bound recursion over a fixed discrete horizon
pub struct WindowedErrorPropagator {
    x: f64,
    aa: f64,
    n: usize,
    m: usize,
    data: Option<StepErrors>,
    eepsilon: Array1<f64>,
    ee: Array1<f64>,
    computed: bool,
}

impl WindowedErrorPropagator {
    /// Create a propagator for the given scheme parameters
    ///
    /// Derives x = λ_f·Δt and aa = 1/(1-α).
    ///
    /// # Errors
    /// `InvalidParameter` when α = 1, m < 1, n < 1, or λ_f/Δt are not
    /// finite.
    pub fn new(lambda_f: f64, delta_t: f64, alpha: f64, n: usize, m: usize) -> BoundResult<Self> {
        validate_finite("lambda_f", lambda_f)?;
        validate_finite("delta_t", delta_t)?;
        validate_alpha("alpha", alpha)?;
        validate_horizon("n", n)?;
        validate_lag("m", m)?;
        Ok(WindowedErrorPropagator {
            x: lambda_f * delta_t,
            aa: 1.0 / (1.0 - alpha),
            n,
            m,
            data: None,
            eepsilon: Array1::zeros(n + 1),
            ee: Array1::zeros(n + 1),
            computed: false,
        })
    }

    pub fn horizon(&self) -> usize {
        self.n
    }

    /// Whether `fill_error` has run since the last load
    pub fn is_computed(&self) -> bool {
        self.computed
    }

    /// Cumulative bound sequence Ē, length n+1 with Ē_n = 0
    pub fn eepsilon(&self) -> &Array1<f64> {
        &self.eepsilon
    }

    /// Cumulative bound sequence E, length n+1 with E_n = 0
    pub fn ee(&self) -> &Array1<f64> {
        &self.ee
    }

    /// Load the per-step local error estimates
    ///
    /// Both arrays must have length exactly n. Reloading replaces any
    /// previously stored data; already-computed bounds stay readable until
    /// the next `fill_error`.
    ///
    /// # Errors
    /// `DimensionMismatch` naming the offending array; prior state is left
    /// untouched on failure.
    pub fn load_data(&mut self, epsilon: &Array1<f64>, e: &Array1<f64>) -> BoundResult<()> {
        if epsilon.len() != self.n {
            return Err(BoundError::DimensionMismatch {
                array: "epsilon".to_string(),
                expected: self.n,
                actual: epsilon.len(),
            });
        }
        if e.len() != self.n {
            return Err(BoundError::DimensionMismatch {
                array: "e".to_string(),
                expected: self.n,
                actual: e.len(),
            });
        }
        self.data = Some(StepErrors {
            epsilon: epsilon.clone(),
            e: e.clone(),
        });
        self.computed = false;
        Ok(())
    }

    /// Run the backward recursion, filling `eepsilon` and `ee`
    ///
    /// Iterates k from n-1 down to 0; each step reads only already-filled
    /// higher indices, so the order is fixed. The summation window
    /// [k+1, min(k+m-1, n-1)] is skipped when empty (m = 1).
    ///
    /// # Errors
    /// `NotLoaded` when no data has been loaded.
    pub fn fill_error(&mut self) -> BoundResult<()> {
        let Some(data) = &self.data else {
            return Err(BoundError::NotLoaded {
                operation: "fill_error".to_string(),
            });
        };
        self.eepsilon.fill(0.0);
        self.ee.fill(0.0);
        let (x, aa, n, m) = (self.x, self.aa, self.n, self.m);
        for k in (0..n).rev() {
            self.eepsilon[k] =
                (1.0 + x) * self.eepsilon[k + 1] + data.epsilon[k] + x * self.ee[k + 1];
            let idx = (k + m).min(n);
            self.ee[k] = data.e[k] + aa * (self.eepsilon[idx] + self.eepsilon[k]);
            let lo = k + 1;
            let hi = (k + m - 1).min(n - 1);
            if lo <= hi {
                let window_eepsilon: f64 = self.eepsilon.slice(s![lo..=hi]).sum();
                let window_ee: f64 = self.ee.slice(s![lo..=hi]).sum();
                self.ee[k] += aa * x * (window_eepsilon + window_ee);
            }
        }
        self.computed = true;
        Ok(())
    }
}
