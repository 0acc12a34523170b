#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot explorer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which iterating `z = z² + c`, starting from zero, never runs
//! off to infinity.  We can't iterate forever, so each point gets a
//! fixed number of rounds, and the size of `z` at the end (or the
//! bail-out value, if it got too big along the way) is looked up in a
//! gradient image to pick the pixel's color.
//!
//! Around that core sits a small raster toolkit: a `Canvas` of RGBA
//! pixels with line, disk, rectangle and spiral drawing, and a
//! convolution blur with a handful of weight functions.  Windowing,
//! keyboard handling and image files are left to whoever embeds this
//! crate; `Explorer` takes navigation commands over a channel and hands
//! back finished frames.

extern crate crossbeam;
extern crate failure;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

mod bands;
pub mod blur;
pub mod canvas;
pub mod colorize;
pub mod error;
pub mod escape;
pub mod explorer;
pub mod planes;
pub mod render;
pub mod vector;
pub mod view;

pub use bands::default_threads;
pub use blur::{blur, Weight, WeightFunction};
pub use canvas::{Canvas, Color};
pub use colorize::GradientColorizer;
pub use error::FractalError;
pub use escape::{escape_magnitude, Escape};
pub use explorer::{Explorer, StalePolicy};
pub use planes::{to_sample, PlaneMapper};
pub use render::{FractalRenderer, RenderOutcome};
pub use vector::Vector2D;
pub use view::{Command, Navigation, View};
