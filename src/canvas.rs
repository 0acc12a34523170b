// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Canvas is a rectangle of RGBA pixels stored row-major in one
//! contiguous buffer, four bytes to the pixel.  Direct `get`/`set`
//! access is checked and returns an error for anything outside of
//! `[0, width) x [0, height)`.  The drawing routines, on the other
//! hand, clip: a shape that hangs off the edge of the canvas is simply
//! drawn as much as fits.

use itertools::iproduct;

use crate::error::{FractalError, Result};
use crate::vector::Vector2D;

/// Number of bytes per pixel.
pub const CHANNELS: usize = 4;

/// Bytes needed for a `width` x `height` canvas, or an error if that
/// is zero or doesn't fit in memory's address space.
fn byte_len(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(FractalError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(FractalError::InvalidDimensions { width, height })
}

/// An 8-bit-per-channel color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha; 255 is fully opaque.
    pub a: u8,
}

impl Color {
    /// An opaque color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 255 }
    }

    /// Any color, alpha included.
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    /// Opaque black.
    pub fn black() -> Color {
        Color::rgb(0, 0, 0)
    }

    fn from_slice(px: &[u8]) -> Color {
        Color::rgba(px[0], px[1], px[2], px[3])
    }

    pub(crate) fn write_to(self, px: &mut [u8]) {
        px[0] = self.r;
        px[1] = self.g;
        px[2] = self.b;
        px[3] = self.a;
    }
}

/// A mutable grid of RGBA pixels.  Cloning deep-copies the buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    /// A new canvas of the given size, filled with opaque black.
    pub fn new(width: usize, height: usize) -> Result<Canvas> {
        Canvas::filled(width, height, Color::black())
    }

    /// A new canvas of the given size, every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: Color) -> Result<Canvas> {
        let len = byte_len(width, height)?;
        let mut canvas = Canvas {
            width,
            height,
            pixels: vec![0; len],
        };
        canvas.fill(color);
        Ok(canvas)
    }

    /// Wrap an already-decoded RGBA buffer, row-major, four bytes per
    /// pixel.  This is the seam through which images loaded by the
    /// embedding application enter the crate.
    pub fn from_rgba(width: usize, height: usize, pixels: Vec<u8>) -> Result<Canvas> {
        let expected = byte_len(width, height)?;
        if pixels.len() != expected {
            return Err(FractalError::InvalidBuffer {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Canvas {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw RGBA bytes, ready to be blitted.
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// Give up the raw RGBA bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Byte stride of one row.
    pub(crate) fn stride(&self) -> usize {
        self.width * CHANNELS
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    fn offset(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            None
        } else {
            Some((y as usize * self.width + x as usize) * CHANNELS)
        }
    }

    /// Read one pixel, assuming the caller has already bounds-checked.
    pub(crate) fn at(&self, x: usize, y: usize) -> Color {
        let o = (y * self.width + x) * CHANNELS;
        Color::from_slice(&self.pixels[o..o + CHANNELS])
    }

    /// Read one pixel.
    pub fn get(&self, x: isize, y: isize) -> Result<Color> {
        match self.offset(x, y) {
            Some(o) => Ok(Color::from_slice(&self.pixels[o..o + CHANNELS])),
            None => Err(self.out_of_bounds(x, y)),
        }
    }

    /// Write one pixel.
    pub fn set(&mut self, x: isize, y: isize, color: Color) -> Result<()> {
        match self.offset(x, y) {
            Some(o) => {
                color.write_to(&mut self.pixels[o..o + CHANNELS]);
                Ok(())
            }
            None => Err(self.out_of_bounds(x, y)),
        }
    }

    fn out_of_bounds(&self, x: isize, y: isize) -> FractalError {
        FractalError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// Clipped write used by the drawing routines.
    fn plot(&mut self, x: isize, y: isize, color: Color) {
        match self.offset(x, y) {
            Some(o) => color.write_to(&mut self.pixels[o..o + CHANNELS]),
            None => trace!("clipped plot at ({}, {})", x, y),
        }
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        for px in self.pixels.chunks_mut(CHANNELS) {
            color.write_to(px);
        }
    }

    /// Paint a two-axis test gradient: red grows left to right, green
    /// grows top to bottom, blue is fixed.  A one-column canvas painted
    /// this way makes a usable gradient strip.
    pub fn draw_gradient(&mut self) {
        let (width, height) = (self.width, self.height);
        for (y, x) in iproduct!(0..height, 0..width) {
            let color = Color::rgb((255 * x / width) as u8, (255 * y / height) as u8, 55);
            self.plot(x as isize, y as isize, color);
        }
    }

    /// Walk from `from` towards `to` in unit steps, one step per pixel
    /// of length (rounded), plotting each point visited.  The end point
    /// itself is not plotted.
    pub fn draw_line(&mut self, color: Color, from: Vector2D, to: Vector2D) {
        let delta = to - from;
        let step = match delta.unit() {
            Some(step) => step,
            None => return,
        };
        let limit = delta.length().round() as usize;
        for i in 0..limit {
            let p = from + step * i as f64;
            self.plot(p.x as isize, p.y as isize, color);
        }
    }

    /// Clamp an inclusive column range to the canvas.
    fn clip_x(&self, lo: isize, hi: isize) -> (isize, isize) {
        (lo.max(0), hi.min(self.width as isize - 1))
    }

    /// Clamp an inclusive row range to the canvas.
    fn clip_y(&self, lo: isize, hi: isize) -> (isize, isize) {
        (lo.max(0), hi.min(self.height as isize - 1))
    }

    /// A filled disk: every integer offset with `dx² + dy² <= radius²`.
    pub fn draw_circle(&mut self, color: Color, center: Vector2D, radius: usize) {
        let r = radius.min(isize::max_value() as usize) as isize;
        let (cx, cy) = (center.x as isize, center.y as isize);
        let (x0, x1) = self.clip_x(cx.saturating_sub(r), cx.saturating_add(r));
        let (y0, y1) = self.clip_y(cy.saturating_sub(r), cy.saturating_add(r));
        let r2 = r as i128 * r as i128;
        for (x, y) in iproduct!(x0..=x1, y0..=y1) {
            let (dx, dy) = (x as i128 - cx as i128, y as i128 - cy as i128);
            if dx * dx + dy * dy <= r2 {
                self.plot(x, y, color);
            }
        }
    }

    /// A filled rectangle, both corners included.
    pub fn draw_rect(&mut self, color: Color, min: Vector2D, max: Vector2D) {
        let (x0, x1) = self.clip_x(min.x as isize, max.x as isize);
        let (y0, y1) = self.clip_y(min.y as isize, max.y as isize);
        for (x, y) in iproduct!(x0..=x1, y0..=y1) {
            self.plot(x, y, color);
        }
    }

    /// A decorative spiral of ten thousand short segments, turning by
    /// 0.03 radians and shrinking by 0.1% each step.
    pub fn draw_spiral(&mut self, color: Color, from: Vector2D) {
        let mut dir = Vector2D::new(0.0, 2.0);
        let mut last = from;
        for _ in 0..10_000 {
            let next = last + dir;
            self.draw_line(color, last, next);
            dir = dir.rotated(0.03).scaled(0.999);
            last = next;
        }
    }
}
