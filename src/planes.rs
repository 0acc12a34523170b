//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a window onto the complex plane described by a zoom factor and
//! the complex number shown in the middle of the window.
use num::Complex;

use crate::error::{FractalError, Result};

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the x, y of a pixel in an integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Convert a pixel offset, measured from whatever pixel shows
/// `center`, into the complex number it shows.  A zoom of 1 means one
/// pixel corresponds to one unit on the complex plane; a zoom of 100
/// means a hundred pixels do.
#[inline]
pub fn to_sample(x: isize, y: isize, zoom: f64, center: Complex<f64>) -> Complex<f64> {
    center + Complex::new(x as f64 / zoom, y as f64 / zoom)
}

/// Reject anything that isn't a usable zoom factor.
pub fn check_zoom(zoom: f64) -> Result<f64> {
    if zoom.is_finite() && zoom > 0.0 {
        Ok(zoom)
    } else {
        Err(FractalError::InvalidZoom(zoom))
    }
}

/// Reject a center with an infinite or NaN component.
pub fn check_center(center: Complex<f64>) -> Result<Complex<f64>> {
    if center.re.is_finite() && center.im.is_finite() {
        Ok(center)
    } else {
        Err(FractalError::InvalidCenter {
            re: center.re,
            im: center.im,
        })
    }
}

/// Maps pixels of an integral plane to points of the complex plane
/// and back.  The pixel at `(width / 2, height / 2)` shows `center`.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// The right-lower hand corner of the integral cartesian plane.
    /// The left-upper is assumed to be at 0,0
    pub integral_plane: IntegralPlane,
    /// Pixels per complex unit
    pub zoom: f64,
    /// The complex number shown in the middle of the plane
    pub center: Complex<f64>,
}

impl PlaneMapper {
    /// Constructor.  Validates the plane size, zoom and center once,
    /// so the mapping functions themselves never have to.
    pub fn new(width: usize, height: usize, zoom: f64, center: Complex<f64>) -> Result<PlaneMapper> {
        if width == 0 || height == 0 {
            return Err(FractalError::InvalidDimensions { width, height });
        }
        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            zoom: check_zoom(zoom)?,
            center: check_center(center)?,
        })
    }

    /// The total number of points in the integral grid.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Pairs with `len()`.  `new` refuses a zero-sized plane, so this
    /// is always false.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    fn origin(&self) -> (isize, isize) {
        (
            (self.integral_plane.0 / 2) as isize,
            (self.integral_plane.1 / 2) as isize,
        )
    }

    /// Given a pixel on the integral cartesian plane, map that to a
    /// point on the complex cartesian plane.
    #[inline]
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let (ox, oy) = self.origin();
        to_sample(
            pixel.0 as isize - ox,
            pixel.1 as isize - oy,
            self.zoom,
            self.center,
        )
    }

    /// Given a complex number, find the nearest pixel to it, or `None`
    /// if it falls outside of the integral plane.
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> Option<Pixel> {
        let (ox, oy) = self.origin();
        let left = ((point.re - self.center.re) * self.zoom).round() + ox as f64;
        let top = ((point.im - self.center.im) * self.zoom).round() + oy as f64;
        if left < 0.0
            || top < 0.0
            || left >= self.integral_plane.0 as f64
            || top >= self.integral_plane.1 as f64
        {
            return None;
        }
        Some(Pixel(left as usize, top as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planemapper_fails_on_bad_zoom() {
        let center = Complex::new(0.0, 0.0);
        assert_eq!(
            PlaneMapper::new(4, 4, 0.0, center).unwrap_err(),
            FractalError::InvalidZoom(0.0)
        );
        assert!(PlaneMapper::new(4, 4, -3.0, center).is_err());
        assert!(PlaneMapper::new(4, 4, std::f64::NAN, center).is_err());
        assert!(PlaneMapper::new(4, 4, std::f64::INFINITY, center).is_err());
    }

    #[test]
    fn planemapper_fails_on_bad_shape() {
        let pm = PlaneMapper::new(0, 4, 1.0, Complex::new(0.0, 0.0));
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_fails_on_bad_center() {
        let pm = PlaneMapper::new(4, 4, 1.0, Complex::new(std::f64::NAN, 0.0));
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = PlaneMapper::new(4, 3, 2.0, Complex::new(-1.0, 1.0)).unwrap();
        assert_eq!(pm.len(), 12);
        assert!(!pm.is_empty());
    }

    #[test]
    fn to_sample_at_origin_is_center() {
        for &zoom in &[0.001, 1.0, 16000.0, 1e12] {
            let center = Complex::new(-0.71, -0.25);
            assert_eq!(to_sample(0, 0, zoom, center), center);
        }
    }

    #[test]
    fn to_sample_scales_by_zoom() {
        let c = to_sample(10, -4, 2.0, Complex::new(1.0, 1.0));
        assert_eq!(c, Complex::new(6.0, -1.0));
    }

    #[test]
    fn pixel_to_point_is_centered() {
        let pm = PlaneMapper::new(10, 10, 1.0, Complex::new(0.0, 0.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(5, 5)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-5.0, -5.0));
        assert_eq!(pm.pixel_to_point(&Pixel(9, 7)), Complex::new(4.0, 2.0));
    }

    #[test]
    fn pixel_to_point_on_odd_planes() {
        let pm = PlaneMapper::new(5, 3, 4.0, Complex::new(1.0, 0.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(2, 1)), Complex::new(1.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 2)), Complex::new(1.5, 0.25));
    }

    #[test]
    fn point_to_pixel_inverts_pixel_to_point() {
        let pm = PlaneMapper::new(640, 480, 200.0, Complex::new(-0.5, 0.0)).unwrap();
        for &p in &[Pixel(0, 0), Pixel(320, 240), Pixel(639, 479), Pixel(17, 400)] {
            assert_eq!(pm.point_to_pixel(&pm.pixel_to_point(&p)), Some(p));
        }
    }

    #[test]
    fn point_to_pixel_off_the_plane() {
        let pm = PlaneMapper::new(4, 4, 1.0, Complex::new(0.0, 0.0)).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex::new(2.0, 0.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, -2.5)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(1.4, -2.0)), Some(Pixel(3, 0)));
    }
}
