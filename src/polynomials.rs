// src/polynomials.rs
//! Mutually-Recursive Polynomial Sequences for Scheme Error Bounds
//!
//! # Mathematical Framework
//!
//! For a contraction parameter α ∈ (0,1) with `factor = 1/(1-α)` and an
//! integer lag m, four vector-valued sequences are defined elementwise over
//! an evaluation grid x:
//!
//! ```text
//! P0(i,x) = 0                                          i < 1
//! P0(1,x) = 1
//! P0(i,x) = (1+x)·P0(i-1,x) + x·P1(i-1,x)              i > 1
//!
//! P1(i,x) = 0                                          i < 1
//! P1(1,x) = factor
//! P1(i,x) = 2·factor·P0(i,x) + factor·P0(i-m+1,x)      i > 1
//! ```
//!
//! Q0/Q1 share the same shape with base values Q0(1) = 0, Q1(1) = 1.
//!
//! # Evaluation Strategy
//!
//! The recursion has no cycle: P0(i) needs only index i-1, and P1(i) needs
//! P0 at index i (just computed) and at the lagged index i-m+1 (already
//! available, zero below 1). A direct recursive evaluation is nonetheless
//! exponential in i, since each P0 call spawns two same-cost subcalls. The
//! engine therefore fills a bottom-up table, one vector per index, and every
//! later query at a memoized index is a cache hit. The per-index vector
//! kernel is the only parallel axis; the index loop is a genuine data
//! dependency and stays sequential.
//!
//! # Inequality Conditions
//!
//! The theorem's conditions (iii) and (vii) compare
//!
//! ```text
//! iii: P0(i) + x·Σ_{k≤i-1} P0(k) + x·Σ_{k≤i-1} P1(k)   vs  (1-α)·P1(i)
//! vii: 2·P0(i) + x·Σ_{k≤i-m} P0(k) + x·Σ_{k≤i-m} P1(k) vs  (1-α)·P1(i)
//! ```
//!
//! and hold when rhs - lhs is nonnegative over the sampled grid.

use crate::error::{validation::*, BoundError, BoundResult};
use crate::math_utils::min_element;
use ndarray::{Array1, Zip};
use rayon::prelude::*;
use std::f64;

/// Tagged selector for the partial-sum operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    P0,
    P1,
}

/// Bottom-up table of sequence values, valid for one evaluation grid.
/// Slot j holds the vector for index j+1; the table only ever grows.
struct SequenceCache {
    x: Array1<f64>,
    p0: Vec<Array1<f64>>,
    p1: Vec<Array1<f64>>,
    q0: Vec<Array1<f64>>,
    q1: Vec<Array1<f64>>,
}

impl SequenceCache {
    fn new(x: Array1<f64>) -> Self {
        SequenceCache {
            x,
            p0: Vec::new(),
            p1: Vec::new(),
            q0: Vec::new(),
            q1: Vec::new(),
        }
    }
}

/// Memoized evaluator for the P/Q polynomial sequences
///
/// Deterministic in (α, m, i, x); the internal table is purely a
/// performance cache and never alters returned values. One instance is
/// meant to live on one thread; the table has a single writer.
pub struct PolynomialRecursionEngine {
    alpha: f64,
    m: usize,
    factor: f64,
    cache: SequenceCache,
    index_evals: usize,
}

impl PolynomialRecursionEngine {
    /// Create an engine for the given contraction parameter and lag
    ///
    /// # Errors
    /// `InvalidParameter` when α = 1 (the derived factor 1/(1-α) is a
    /// division by zero), when α is not finite, or when m < 1.
    pub fn new(alpha: f64, m: usize) -> BoundResult<Self> {
        validate_alpha("alpha", alpha)?;
        validate_lag("m", m)?;
        Ok(PolynomialRecursionEngine {
            alpha,
            m,
            factor: 1.0 / (1.0 - alpha),
            cache: SequenceCache::new(Array1::zeros(0)),
            index_evals: 0,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn m(&self) -> usize {
        self.m
    }

    /// The derived scalar 1/(1-α)
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Total number of per-index table fills performed so far. Grows
    /// linearly in the highest index queried; repeated queries at memoized
    /// indices leave it unchanged.
    pub fn index_evaluations(&self) -> usize {
        self.index_evals
    }

    /// Highest index currently held in the table
    pub fn cached_depth(&self) -> usize {
        self.cache.p0.len()
    }

    /// P0(i, x); the zero vector for i < 1
    pub fn p0(&mut self, i: i64, x: &Array1<f64>) -> Array1<f64> {
        if i < 1 {
            return Array1::zeros(x.len());
        }
        self.extend_tables(i, x);
        self.cache.p0[(i - 1) as usize].clone()
    }

    /// P1(i, x); the zero vector for i < 1
    pub fn p1(&mut self, i: i64, x: &Array1<f64>) -> Array1<f64> {
        if i < 1 {
            return Array1::zeros(x.len());
        }
        self.extend_tables(i, x);
        self.cache.p1[(i - 1) as usize].clone()
    }

    /// Q0(i, x); the zero vector for i < 1
    pub fn q0(&mut self, i: i64, x: &Array1<f64>) -> Array1<f64> {
        if i < 1 {
            return Array1::zeros(x.len());
        }
        self.extend_tables(i, x);
        self.cache.q0[(i - 1) as usize].clone()
    }

    /// Q1(i, x); the zero vector for i < 1
    pub fn q1(&mut self, i: i64, x: &Array1<f64>) -> Array1<f64> {
        if i < 1 {
            return Array1::zeros(x.len());
        }
        self.extend_tables(i, x);
        self.cache.q1[(i - 1) as usize].clone()
    }

    /// Elementwise sum of the first i terms of the chosen sequence
    ///
    /// Defined as the zero vector for i = 0.
    ///
    /// # Errors
    /// `NegativeIndex` when i < 0.
    pub fn sum(&mut self, which: Sequence, i: i64, x: &Array1<f64>) -> BoundResult<Array1<f64>> {
        if i < 0 {
            return Err(BoundError::NegativeIndex { index: i });
        }
        let mut acc = Array1::zeros(x.len());
        if i == 0 {
            return Ok(acc);
        }
        self.extend_tables(i, x);
        let table = match which {
            Sequence::P0 => &self.cache.p0,
            Sequence::P1 => &self.cache.p1,
        };
        for term in &table[..i as usize] {
            acc += term;
        }
        Ok(acc)
    }

    /// l.h.s. of condition (iii)
    pub fn iii_lhs(&mut self, i: i64, x: &Array1<f64>) -> BoundResult<Array1<f64>> {
        let s0 = self.sum(Sequence::P0, i - 1, x)?;
        let s1 = self.sum(Sequence::P1, i - 1, x)?;
        Ok(self.p0(i, x) + x * &s0 + x * &s1)
    }

    /// r.h.s. of condition (iii)
    pub fn iii_rhs(&mut self, i: i64, x: &Array1<f64>) -> Array1<f64> {
        self.p1(i, x) * (1.0 - self.alpha)
    }

    /// l.h.s. of condition (vii)
    pub fn vii_lhs(&mut self, i: i64, x: &Array1<f64>) -> BoundResult<Array1<f64>> {
        let m = self.m as i64;
        let s0 = self.sum(Sequence::P0, i - m, x)?;
        let s1 = self.sum(Sequence::P1, i - m, x)?;
        Ok(self.p0(i, x) * 2.0 + x * &s0 + x * &s1)
    }

    /// r.h.s. of condition (vii)
    pub fn vii_rhs(&mut self, i: i64, x: &Array1<f64>) -> Array1<f64> {
        self.p1(i, x) * (1.0 - self.alpha)
    }

    /// rhs - lhs of condition (iii); the condition holds where this is
    /// nonnegative
    pub fn iii_margin(&mut self, i: i64, x: &Array1<f64>) -> BoundResult<Array1<f64>> {
        let lhs = self.iii_lhs(i, x)?;
        Ok(self.iii_rhs(i, x) - lhs)
    }

    /// rhs - lhs of condition (vii); the condition holds where this is
    /// nonnegative
    pub fn vii_margin(&mut self, i: i64, x: &Array1<f64>) -> BoundResult<Array1<f64>> {
        let lhs = self.vii_lhs(i, x)?;
        Ok(self.vii_rhs(i, x) - lhs)
    }

    /// Grow the bottom-up table to hold index `target` for grid `x`.
    ///
    /// A query on a different grid (shape or content) invalidates the table;
    /// results are unaffected since every entry is recomputed for the new x.
    /// P0/Q0 at index j use only index j-1; P1/Q1 use the just-filled slot j
    /// and the lagged slot j-m+1, so a single forward pass suffices.
    fn extend_tables(&mut self, target: i64, x: &Array1<f64>) {
        if self.cache.x != *x {
            self.cache = SequenceCache::new(x.clone());
        }
        let factor = self.factor;
        let m = self.m as i64;
        let len = x.len();
        let next = self.cache.p0.len() as i64 + 1;
        for j in next..=target {
            let (p0_j, q0_j) = if j == 1 {
                (Array1::ones(len), Array1::zeros(len))
            } else {
                let prev = (j - 2) as usize;
                (
                    forward_step(x, &self.cache.p0[prev], &self.cache.p1[prev]),
                    forward_step(x, &self.cache.q0[prev], &self.cache.q1[prev]),
                )
            };
            let (p1_j, q1_j) = if j == 1 {
                (Array1::from_elem(len, factor), Array1::ones(len))
            } else {
                let lag = j - m + 1;
                let lagged = if lag >= 1 {
                    Some((lag - 1) as usize)
                } else {
                    None
                };
                (
                    lagged_step(factor, &p0_j, lagged.map(|slot| &self.cache.p0[slot])),
                    lagged_step(factor, &q0_j, lagged.map(|slot| &self.cache.q0[slot])),
                )
            };
            self.cache.p0.push(p0_j);
            self.cache.p1.push(p1_j);
            self.cache.q0.push(q0_j);
            self.cache.q1.push(q1_j);
            self.index_evals += 1;
        }
    }
}

/// (1+x)·prev0 + x·prev1, elementwise over the grid
fn forward_step(x: &Array1<f64>, prev0: &Array1<f64>, prev1: &Array1<f64>) -> Array1<f64> {
    let mut out = Array1::zeros(x.len());
    Zip::from(&mut out)
        .and(x)
        .and(prev0)
        .and(prev1)
        .par_for_each(|o, &xv, &a, &b| *o = (1.0 + xv) * a + xv * b);
    out
}

/// 2·factor·same0 + factor·lagged0, with the lag term dropped below index 1
fn lagged_step(factor: f64, same0: &Array1<f64>, lagged0: Option<&Array1<f64>>) -> Array1<f64> {
    match lagged0 {
        Some(lagged) => same0 * (2.0 * factor) + lagged * factor,
        None => same0 * (2.0 * factor),
    }
}

/// Minimum iii/vii margins over a sampled grid for one α
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionCheck {
    pub alpha: f64,
    pub min_iii_margin: f64,
    pub min_vii_margin: f64,
}

impl ConditionCheck {
    /// Both conditions hold over the sampled grid
    pub fn holds(&self) -> bool {
        self.min_iii_margin >= 0.0 && self.min_vii_margin >= 0.0
    }
}

/// Check conditions (iii) and (vii) at index i over a grid of α values
///
/// Builds one engine per α in parallel; requires i ≥ m so that both
/// partial sums are defined.
pub fn condition_sweep(
    alphas: &[f64],
    m: usize,
    i: i64,
    x: &Array1<f64>,
) -> BoundResult<Vec<ConditionCheck>> {
    alphas
        .par_iter()
        .map(|&alpha| {
            let mut engine = PolynomialRecursionEngine::new(alpha, m)?;
            let iii = engine.iii_margin(i, x)?;
            let vii = engine.vii_margin(i, x)?;
            Ok(ConditionCheck {
                alpha,
                min_iii_margin: min_element(&iii),
                min_vii_margin: min_element(&vii),
            })
        })
        .collect()
}
