// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The error taxonomy shared by every part of the crate.  Anything
//! that can be wrong about a configuration is caught at the call that
//! introduces it; the per-pixel kernels themselves never fail.

use failure::Fail;

/// Everything that can go wrong while setting up or running a render.
#[derive(Debug, Fail, Clone, PartialEq)]
pub enum FractalError {
    /// A canvas or pixel plane was given a zero width or height.
    #[fail(display = "invalid dimensions {}x{}: both must be positive", width, height)]
    InvalidDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },

    /// Zoom must be a finite, strictly positive number of pixels per
    /// complex unit.
    #[fail(display = "invalid zoom {}: must be finite and greater than zero", _0)]
    InvalidZoom(f64),

    /// The center of the view is not a finite complex number.
    #[fail(display = "invalid center {}{:+}i: both parts must be finite", re, im)]
    InvalidCenter {
        /// Real part
        re: f64,
        /// Imaginary part
        im: f64,
    },

    /// A raw pixel buffer does not match the dimensions it was handed
    /// with.
    #[fail(display = "pixel buffer holds {} bytes, expected {}", actual, expected)]
    InvalidBuffer {
        /// width * height * 4
        expected: usize,
        /// What we got
        actual: usize,
    },

    /// A coordinate outside of `[0, width) x [0, height)`.
    #[fail(display = "pixel ({}, {}) is outside of a {}x{} canvas", x, y, width, height)]
    OutOfBounds {
        /// Column
        x: isize,
        /// Row
        y: isize,
        /// Canvas width
        width: usize,
        /// Canvas height
        height: usize,
    },

    /// A gradient strip needs at least two rows, since row zero is
    /// never sampled.
    #[fail(display = "gradient strip has {} rows, at least 2 are required", _0)]
    GradientTooShort(usize),

    /// The weight function gives nothing to average over.
    #[fail(display = "blur window of radius {} has a total weight of zero", _0)]
    ZeroWeight(usize),

    /// One of the tunable constants is out of range.
    #[fail(display = "invalid setting {}: {}", name, reason)]
    InvalidSetting {
        /// Which setting
        name: &'static str,
        /// Why it was refused
        reason: String,
    },

    /// A navigation command name that isn't one of ours.
    #[fail(display = "unknown command: {}", _0)]
    UnknownCommand(String),

    /// A weight function name that isn't one of ours.
    #[fail(display = "unknown weight function: {}", _0)]
    UnknownWeight(String),

    /// One of the scoped worker threads panicked.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, FractalError>;
