// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Convolution blur.  Every output pixel is the weighted average of
//! the source pixels in a square window around it, the weight of each
//! neighbour given by a `WeightFunction` of its offset.  Neighbours
//! that fall off the canvas are left out of both the sum and the
//! normalization, so the edges don't darken.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use itertools::iproduct;

use crate::bands::{default_threads, for_each_band};
use crate::canvas::{Canvas, Color, CHANNELS};
use crate::error::{FractalError, Result};

/// Weight given to the neighbour at offset `(dx, dy)` from the pixel
/// being blurred.
pub trait WeightFunction {
    /// The weight; zero means "ignore this neighbour".
    fn weight(&self, dx: isize, dy: isize) -> f64;
}

/// The blur kernels we know about.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Weight {
    /// A plain box average.
    Box,
    /// Falls off as `1 / (1 + distance)`.
    Distance,
    /// Trails to the right along the row only, heaviest up close.
    Motion,
    /// Two taps `split` pixels either side on the same row: a ghosted
    /// double image.
    Double {
        /// Distance of each tap from the centre
        split: usize,
    },
}

impl WeightFunction for Weight {
    fn weight(&self, dx: isize, dy: isize) -> f64 {
        match *self {
            Weight::Box => 1.0,
            Weight::Distance => 1.0 / (1.0 + (dx as f64).hypot(dy as f64)),
            Weight::Motion => {
                if dy != 0 || dx < 0 {
                    0.0
                } else {
                    0.3 + 0.7 / (1.0 + dx as f64).sqrt()
                }
            }
            Weight::Double { split } => {
                if dy == 0 && dx.abs() as usize == split {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Weight::Box => write!(f, "box"),
            Weight::Distance => write!(f, "distance"),
            Weight::Motion => write!(f, "motion"),
            Weight::Double { split } => write!(f, "double:{}", split),
        }
    }
}

/// Parses `box`, `distance`, `motion`, and `double:N`.
impl FromStr for Weight {
    type Err = FractalError;

    fn from_str(s: &str) -> Result<Weight> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "box" => return Ok(Weight::Box),
            "distance" | "dist" => return Ok(Weight::Distance),
            "motion" => return Ok(Weight::Motion),
            _ => {}
        }
        if let Some(split) = lower.strip_prefix("double:") {
            if let Ok(split) = usize::from_str(split) {
                return Ok(Weight::Double { split });
            }
        }
        Err(FractalError::UnknownWeight(s.to_string()))
    }
}

/// Expand an 8-bit channel to 16 bits, the way `0xAB` becomes `0xABAB`.
#[inline]
fn expand(v: u8) -> f64 {
    f64::from(v) * 257.0
}

#[inline]
fn narrow(v: f64) -> u8 {
    let v = (v / 257.0).round();
    if v <= 0.0 {
        0
    } else if v >= 255.0 {
        255
    } else {
        v as u8
    }
}

/// Sum of the weights over a whole, unclipped window.
fn window_weight<W: WeightFunction>(radius: usize, weight: &W) -> f64 {
    let r = radius as isize;
    iproduct!(-r..=r, -r..=r)
        .map(|(dx, dy)| weight.weight(dx, dy))
        .sum()
}

/// The blurred color of one pixel, or `None` if every in-bounds
/// neighbour carries zero weight.
fn blur_pixel<W: WeightFunction>(
    source: &Canvas,
    x: usize,
    y: usize,
    radius: usize,
    weight: &W,
) -> Option<Color> {
    let x0 = x.saturating_sub(radius);
    let y0 = y.saturating_sub(radius);
    let x1 = (x + radius).min(source.width() - 1);
    let y1 = (y + radius).min(source.height() - 1);

    let mut sum = [0.0f64; CHANNELS];
    let mut weight_sum = 0.0;
    for (j, i) in iproduct!(y0..=y1, x0..=x1) {
        let w = weight.weight(i as isize - x as isize, j as isize - y as isize);
        if w == 0.0 {
            continue;
        }
        let px = source.at(i, j);
        sum[0] += expand(px.r) * w;
        sum[1] += expand(px.g) * w;
        sum[2] += expand(px.b) * w;
        sum[3] += expand(px.a) * w;
        weight_sum += w;
    }

    if weight_sum > 0.0 {
        Some(Color::rgba(
            narrow(sum[0] / weight_sum),
            narrow(sum[1] / weight_sum),
            narrow(sum[2] / weight_sum),
            narrow(sum[3] / weight_sum),
        ))
    } else {
        None
    }
}

/// Blur `source` into a new canvas, spreading the work over `threads`
/// bands of rows.  A window whose total weight is zero is refused up
/// front.  A pixel near the border whose clipped window ends up with
/// no weight at all keeps its source color.
///
/// Alpha is averaged like the color channels, so an opaque canvas
/// stays opaque and a translucent pixel bleeds its transparency into
/// its neighbours.
pub fn blur_with_threads<W>(source: &Canvas, radius: usize, weight: &W, threads: usize) -> Result<Canvas>
where
    W: WeightFunction + Sync,
{
    if window_weight(radius, weight) <= 0.0 {
        return Err(FractalError::ZeroWeight(radius));
    }

    let started = Instant::now();
    let mut output = source.clone();
    let width = source.width();
    let stride = output.stride();
    for_each_band(output.pixels_mut(), stride, threads, |first_row, band| {
        for (r, row) in band.chunks_mut(stride).enumerate() {
            let y = first_row + r;
            for (x, px) in row.chunks_mut(CHANNELS).enumerate().take(width) {
                if let Some(color) = blur_pixel(source, x, y, radius, weight) {
                    color.write_to(px);
                }
            }
        }
        true
    })?;
    debug!(
        "blurred {}x{} with radius {} in {:?}",
        width,
        source.height(),
        radius,
        started.elapsed()
    );
    Ok(output)
}

/// Blur `source` into a new canvas using every available core.
pub fn blur<W>(source: &Canvas, radius: usize, weight: &W) -> Result<Canvas>
where
    W: WeightFunction + Sync,
{
    blur_with_threads(source, radius, weight, default_threads())
}

impl Canvas {
    /// Blur this canvas in place.  Every read comes from the untouched
    /// original, and the canvas is only replaced once the whole pass
    /// has finished.
    pub fn blur<W>(&mut self, radius: usize, weight: &W) -> Result<()>
    where
        W: WeightFunction + Sync,
    {
        *self = blur(self, radius, weight)?;
        Ok(())
    }
}
