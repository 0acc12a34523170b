// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Paints the Mandelbrot set onto a canvas.  Each pixel is mapped to a
//! point on the complex plane, run through the escape-time estimate,
//! and the resulting magnitude looked up in a gradient.  Pixels don't
//! depend on each other, so the canvas is cut into bands of rows and
//! each band is painted on its own thread.

use std::time::Instant;

use crate::bands::{default_threads, for_each_band};
use crate::canvas::{Canvas, CHANNELS};
use crate::colorize::GradientColorizer;
use crate::error::Result;
use crate::escape::Escape;
use crate::planes::{Pixel, PlaneMapper};
use crate::view::View;

/// How a render ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Every pixel was painted.
    Complete,
    /// The abort check fired part way through; the canvas holds a mix
    /// of old and new pixels and shouldn't be shown.
    Cancelled,
}

/// Everything needed to paint a frame, apart from the view.
#[derive(Clone, Debug)]
pub struct FractalRenderer {
    colorizer: GradientColorizer,
    escape: Escape,
    threads: usize,
}

impl FractalRenderer {
    /// A renderer with the default escape settings (50 iterations,
    /// bail-out at 1000), using every core.
    pub fn new(colorizer: GradientColorizer) -> Self {
        FractalRenderer {
            colorizer,
            escape: Escape::default(),
            threads: default_threads(),
        }
    }

    /// Replace the escape settings.
    pub fn with_escape(mut self, escape: Escape) -> Self {
        self.escape = escape;
        self
    }

    /// Set the number of worker threads; 1 paints on the calling
    /// thread.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// The escape settings in use.
    pub fn escape(&self) -> &Escape {
        &self.escape
    }

    /// The colorizer in use.
    pub fn colorizer(&self) -> &GradientColorizer {
        &self.colorizer
    }

    /// Repaint every pixel of `canvas`.
    pub fn render(&self, canvas: &mut Canvas, view: &View) -> Result<()> {
        self.render_until(canvas, view, &|| false).map(|_| ())
    }

    /// Repaint every pixel of `canvas`, unless `abort` starts returning
    /// true.  It is checked before each row.
    pub fn render_until(
        &self,
        canvas: &mut Canvas,
        view: &View,
        abort: &(dyn Fn() -> bool + Sync),
    ) -> Result<RenderOutcome> {
        let started = Instant::now();
        let plane = PlaneMapper::new(canvas.width(), canvas.height(), view.zoom(), view.center())?;
        let stride = canvas.stride();
        let complete = for_each_band(canvas.pixels_mut(), stride, self.threads, |first_row, band| {
            for (r, row) in band.chunks_mut(stride).enumerate() {
                if abort() {
                    return false;
                }
                let y = first_row + r;
                for (x, px) in row.chunks_mut(CHANNELS).enumerate() {
                    let c = plane.pixel_to_point(&Pixel(x, y));
                    let magnitude = self.escape.magnitude(c);
                    self.colorizer.colorize(magnitude).write_to(px);
                }
            }
            true
        })?;

        if complete {
            debug!(
                "rendered {}x{} at zoom {} around {} in {:?}",
                plane.integral_plane.0,
                plane.integral_plane.1,
                view.zoom(),
                view.center(),
                started.elapsed()
            );
            Ok(RenderOutcome::Complete)
        } else {
            debug!("render cancelled after {:?}", started.elapsed());
            Ok(RenderOutcome::Cancelled)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Color;
    use crate::escape::escape_magnitude;
    use num::Complex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn numbered_strip(height: usize) -> Canvas {
        let mut strip = Canvas::new(1, height).unwrap();
        for y in 0..height {
            strip.set(0, y as isize, Color::rgb((y % 256) as u8, (y / 256) as u8, 0)).unwrap();
        }
        strip
    }

    fn renderer() -> FractalRenderer {
        FractalRenderer::new(GradientColorizer::new(&numbered_strip(1024)).unwrap())
    }

    #[test]
    fn ten_by_ten_centre_is_the_origin() {
        let r = renderer();
        let view = View::new(1.0, Complex::new(0.0, 0.0)).unwrap();
        let mut canvas = Canvas::new(10, 10).unwrap();
        r.render(&mut canvas, &view).unwrap();

        let plane = PlaneMapper::new(10, 10, 1.0, Complex::new(0.0, 0.0)).unwrap();
        let c = plane.pixel_to_point(&Pixel(5, 5));
        assert_eq!(c, Complex::new(0.0, 0.0));
        let m = escape_magnitude(c, 50);
        assert!(m < 1e-12);
        // Magnitude zero lands on row one of the strip.
        assert_eq!(canvas.get(5, 5).unwrap(), Color::rgb(1, 0, 0));
        // The corner at (-5, -5) escapes at once and takes the last row.
        assert_eq!(canvas.get(0, 0).unwrap(), Color::rgb(255, 3, 0));
    }

    #[test]
    fn every_pixel_is_overwritten() {
        let r = renderer().with_threads(3);
        let view = View::new(40.0, Complex::new(-0.5, 0.0)).unwrap();
        let mut canvas = Canvas::filled(64, 48, Color::rgba(1, 2, 3, 4)).unwrap();
        r.render(&mut canvas, &view).unwrap();
        assert!(canvas.as_raw().chunks(CHANNELS).all(|px| px[3] == 255));
    }

    #[test]
    fn thread_count_does_not_change_the_picture() {
        let view = View::new(60.0, Complex::new(-0.7, 0.1)).unwrap();
        let mut single = Canvas::new(80, 60).unwrap();
        let mut many = Canvas::new(80, 60).unwrap();
        renderer().with_threads(1).render(&mut single, &view).unwrap();
        renderer().with_threads(8).render(&mut many, &view).unwrap();
        assert_eq!(single, many);
    }

    #[test]
    fn abort_stops_the_render() {
        let r = renderer().with_threads(1);
        let view = View::new(1.0, Complex::new(0.0, 0.0)).unwrap();
        let mut canvas = Canvas::new(16, 16).unwrap();
        let rows = AtomicUsize::new(0);
        let outcome = r
            .render_until(&mut canvas, &view, &|| rows.fetch_add(1, Ordering::SeqCst) >= 4)
            .unwrap();
        assert_eq!(outcome, RenderOutcome::Cancelled);
        // Rows past the fourth were never touched.
        assert_eq!(canvas.get(0, 15).unwrap(), Color::black());
    }

    #[test]
    fn escape_settings_are_used() {
        let r = renderer().with_escape(Escape::new(1, 1000.0).unwrap());
        let view = View::new(1.0, Complex::new(0.0, 0.0)).unwrap();
        let mut canvas = Canvas::new(10, 10).unwrap();
        r.render(&mut canvas, &view).unwrap();
        // One iteration from zero gives |c|; (6, 5) shows c = 1, row 300.
        assert_eq!(canvas.get(6, 5).unwrap(), Color::rgb(44, 1, 0));
    }
}
