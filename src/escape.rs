//! The escape-time estimate.  Starting from zero, iterate
//! `z = z² + c` and watch how large `z` gets.  Points in the
//! Mandelbrot set stay small forever; everything else eventually runs
//! off to infinity, and we stop watching once it has passed the
//! bail-out magnitude.

use num::Complex;

use crate::error::{FractalError, Result};

/// Iteration count used when nothing else is asked for.
pub const DEFAULT_MAX_ITER: usize = 50;

/// Bail-out magnitude used when nothing else is asked for.
pub const DEFAULT_BAILOUT: f64 = 1000.0;

/// The two knobs of the escape-time algorithm.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Escape {
    /// How many times to iterate before giving up on escape.
    pub max_iter: usize,
    /// Once `|z|` passes this the point has escaped, and this value is
    /// what gets reported.
    pub bailout: f64,
}

impl Default for Escape {
    fn default() -> Self {
        Escape {
            max_iter: DEFAULT_MAX_ITER,
            bailout: DEFAULT_BAILOUT,
        }
    }
}

impl Escape {
    /// Checked constructor.
    pub fn new(max_iter: usize, bailout: f64) -> Result<Escape> {
        if max_iter == 0 {
            return Err(FractalError::InvalidSetting {
                name: "max_iter",
                reason: "at least one iteration is required".to_string(),
            });
        }
        if !(bailout.is_finite() && bailout > 0.0) {
            return Err(FractalError::InvalidSetting {
                name: "bailout",
                reason: format!("{} is not a positive finite magnitude", bailout),
            });
        }
        Ok(Escape { max_iter, bailout })
    }

    /// The magnitude of `z` after `max_iter` rounds, or exactly
    /// `bailout` if it got past that on the way.
    pub fn magnitude(&self, c: Complex<f64>) -> f64 {
        let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
        for _ in 0..self.max_iter {
            z = z * z + c;
            let m = z.norm();
            if m > self.bailout || m.is_nan() {
                return self.bailout;
            }
        }
        z.norm()
    }
}

/// Escape magnitude with the default bail-out of 1000.
pub fn escape_magnitude(c: Complex<f64>, max_iter: usize) -> f64 {
    Escape {
        max_iter,
        bailout: DEFAULT_BAILOUT,
    }
    .magnitude(c)
}
