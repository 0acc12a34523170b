//! Turns an escape magnitude into a color by looking it up in a
//! gradient strip: an image one pixel wide whose rows run from the
//! color of the set's interior down to the color of fast escape.

use crate::canvas::{Canvas, Color};
use crate::error::{FractalError, Result};

/// Rows of gradient per unit of magnitude.
pub const DEFAULT_SCALE: f64 = 300.0;

/// Row zero of the strip is never used.
pub const FIRST_ROW: usize = 1;

/// Magnitude-to-color lookup over a gradient strip.
#[derive(Clone, Debug)]
pub struct GradientColorizer {
    strip: Vec<Color>,
    scale: f64,
}

impl GradientColorizer {
    /// Build from a gradient strip.  Only column zero is read; the
    /// strip needs at least two rows.
    pub fn new(gradient: &Canvas) -> Result<GradientColorizer> {
        GradientColorizer::with_scale(gradient, DEFAULT_SCALE)
    }

    /// Build with something other than the default 300 rows per unit of
    /// magnitude.
    pub fn with_scale(gradient: &Canvas, scale: f64) -> Result<GradientColorizer> {
        if gradient.height() <= FIRST_ROW {
            return Err(FractalError::GradientTooShort(gradient.height()));
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err(FractalError::InvalidSetting {
                name: "scale",
                reason: format!("{} is not a positive finite factor", scale),
            });
        }
        let strip = (0..gradient.height()).map(|y| gradient.at(0, y)).collect();
        Ok(GradientColorizer { strip, scale })
    }

    /// The number of rows in the strip.
    pub fn len(&self) -> usize {
        self.strip.len()
    }

    /// Pairs with `len()`.  Always false, since a colorizer can't be
    /// built from an empty strip.
    pub fn is_empty(&self) -> bool {
        self.strip.is_empty()
    }

    /// Which row of the strip a magnitude lands on.  Always within
    /// `[1, len - 1]`.
    pub fn index(&self, magnitude: f64) -> usize {
        let last = self.strip.len() - 1;
        let row = (self.scale * magnitude).round();
        if row.is_nan() || row < FIRST_ROW as f64 {
            FIRST_ROW
        } else if row > last as f64 {
            last
        } else {
            row as usize
        }
    }

    /// The color for a magnitude.
    #[inline]
    pub fn colorize(&self, magnitude: f64) -> Color {
        self.strip[self.index(magnitude)]
    }
}
