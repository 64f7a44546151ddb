// src/math_utils.rs
use ndarray::Array1;

/// Build an evaluation grid [start, stop) with the given spacing, matching
/// the sampling used for plot-based inequality checks.
pub fn eval_grid(start: f64, stop: f64, step: f64) -> Array1<f64> {
    Array1::range(start, stop, step)
}

/// Smallest element of a vector, +inf for an empty vector.
pub fn min_element(v: &Array1<f64>) -> f64 {
    v.iter().copied().fold(f64::INFINITY, f64::min)
}

pub struct Timer {
    start_time: std::time::Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: std::time::Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = std::time::Instant::now();
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_grid() {
        let g = eval_grid(0.0, 1.0, 0.25);
        assert_eq!(g.len(), 4);
        assert_eq!(g[0], 0.0);
        assert_eq!(g[3], 0.75);
    }

    #[test]
    fn test_min_element() {
        let v = Array1::from(vec![3.0, -1.5, 2.0]);
        assert_eq!(min_element(&v), -1.5);
        assert_eq!(min_element(&Array1::zeros(0)), f64::INFINITY);
    }
}
