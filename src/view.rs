//! What part of the complex plane is on screen, and the discrete
//! commands that move it around.

use std::fmt;
use std::str::FromStr;

use num::Complex;

use crate::error::{FractalError, Result};
use crate::planes::{check_center, check_zoom};

/// The zoom and center of the window onto the complex plane.  Owned
/// by whoever drives the renders, and only ever replaced between them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct View {
    zoom: f64,
    center: Complex<f64>,
}

impl View {
    /// A validated view.  Zoom is in pixels per complex unit.
    pub fn new(zoom: f64, center: Complex<f64>) -> Result<View> {
        Ok(View {
            zoom: check_zoom(zoom)?,
            center: check_center(center)?,
        })
    }

    /// Pixels per complex unit.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// The complex number in the middle of the window.
    pub fn center(&self) -> Complex<f64> {
        self.center
    }

    /// The view after one command.  A step that would leave the zoom
    /// unusable (underflowing to zero, or overflowing) is ignored.
    pub fn apply(&self, command: Command, nav: &Navigation) -> View {
        let step = nav.pan_step / self.zoom;
        let (zoom, center) = match command {
            Command::ZoomIn => (self.zoom * nav.zoom_in, self.center),
            Command::ZoomOut => (self.zoom * nav.zoom_out, self.center),
            Command::PanUp => (self.zoom, self.center - Complex::new(0.0, step)),
            Command::PanDown => (self.zoom, self.center + Complex::new(0.0, step)),
            Command::PanLeft => (self.zoom, self.center - Complex::new(step, 0.0)),
            Command::PanRight => (self.zoom, self.center + Complex::new(step, 0.0)),
        };
        match View::new(zoom, center) {
            Ok(view) => view,
            Err(e) => {
                warn!("ignoring {}: {}", command, e);
                *self
            }
        }
    }
}

/// Step sizes for navigation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Navigation {
    /// How far a pan moves, in screen pixels.
    pub pan_step: f64,
    /// Zoom multiplier for zooming in.
    pub zoom_in: f64,
    /// Zoom multiplier for zooming out.
    pub zoom_out: f64,
}

impl Default for Navigation {
    fn default() -> Self {
        Navigation {
            pan_step: 10.0,
            zoom_in: 1.05,
            zoom_out: 0.95,
        }
    }
}

impl Navigation {
    /// Checked constructor; every step has to be positive and finite.
    pub fn new(pan_step: f64, zoom_in: f64, zoom_out: f64) -> Result<Navigation> {
        for &(name, value) in &[("pan_step", pan_step), ("zoom_in", zoom_in), ("zoom_out", zoom_out)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(FractalError::InvalidSetting {
                    name,
                    reason: format!("{} is not a positive finite number", value),
                });
            }
        }
        Ok(Navigation {
            pan_step,
            zoom_in,
            zoom_out,
        })
    }
}

/// One discrete navigation step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Magnify
    ZoomIn,
    /// Shrink
    ZoomOut,
    /// Move the window up
    PanUp,
    /// Move the window down
    PanDown,
    /// Move the window left
    PanLeft,
    /// Move the window right
    PanRight,
}

impl Command {
    /// Every command, in declaration order.
    pub fn all() -> &'static [Command] {
        &[
            Command::ZoomIn,
            Command::ZoomOut,
            Command::PanUp,
            Command::PanDown,
            Command::PanLeft,
            Command::PanRight,
        ]
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Command::ZoomIn => "zoomIn",
            Command::ZoomOut => "zoomOut",
            Command::PanUp => "panUp",
            Command::PanDown => "panDown",
            Command::PanLeft => "panLeft",
            Command::PanRight => "panRight",
        };
        f.write_str(name)
    }
}

/// Accepts `zoomIn`, `zoom-in`, `zoom_in` and friends in any case,
/// along with the key names `prior`, `next`, and the four
/// `*_arrow`s.
impl FromStr for Command {
    type Err = FractalError;

    fn from_str(s: &str) -> Result<Command> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "zoomin" | "prior" | "pageup" => Ok(Command::ZoomIn),
            "zoomout" | "next" | "pagedown" => Ok(Command::ZoomOut),
            "panup" | "uparrow" | "up" => Ok(Command::PanUp),
            "pandown" | "downarrow" | "down" => Ok(Command::PanDown),
            "panleft" | "leftarrow" | "left" => Ok(Command::PanLeft),
            "panright" | "rightarrow" | "right" => Ok(Command::PanRight),
            _ => Err(FractalError::UnknownCommand(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> View {
        View::new(100.0, Complex::new(-0.5, 0.25)).unwrap()
    }

    #[test]
    fn new_view_is_validated() {
        assert!(View::new(0.0, Complex::new(0.0, 0.0)).is_err());
        assert!(View::new(-1.0, Complex::new(0.0, 0.0)).is_err());
        assert!(View::new(1.0, Complex::new(0.0, std::f64::INFINITY)).is_err());
    }

    #[test]
    fn zooming_multiplies() {
        let nav = Navigation::default();
        assert_eq!(view().apply(Command::ZoomIn, &nav).zoom(), 100.0 * 1.05);
        assert_eq!(view().apply(Command::ZoomOut, &nav).zoom(), 100.0 * 0.95);
        assert_eq!(view().apply(Command::ZoomIn, &nav).center(), view().center());
    }

    #[test]
    fn panning_moves_ten_pixels() {
        let nav = Navigation::default();
        let v = view();
        assert_eq!(v.apply(Command::PanRight, &nav).center(), Complex::new(-0.4, 0.25));
        assert_eq!(v.apply(Command::PanLeft, &nav).center(), Complex::new(-0.6, 0.25));
        assert_eq!(v.apply(Command::PanUp, &nav).center(), Complex::new(-0.5, 0.15));
        assert_eq!(v.apply(Command::PanDown, &nav).center(), Complex::new(-0.5, 0.35));
        assert_eq!(v.apply(Command::PanDown, &nav).zoom(), 100.0);
    }

    #[test]
    fn pan_step_shrinks_with_zoom() {
        let nav = Navigation::default();
        let deep = View::new(1e6, Complex::new(0.0, 0.0)).unwrap();
        let moved = deep.apply(Command::PanRight, &nav);
        assert_eq!(moved.center(), Complex::new(1e-5, 0.0));
    }

    #[test]
    fn unusable_zoom_is_ignored() {
        let nav = Navigation::new(10.0, 1e300, 0.95).unwrap();
        let v = View::new(1e300, Complex::new(0.0, 0.0)).unwrap();
        assert_eq!(v.apply(Command::ZoomIn, &nav), v);
    }

    #[test]
    fn navigation_is_validated() {
        assert!(Navigation::new(0.0, 1.05, 0.95).is_err());
        assert!(Navigation::new(10.0, std::f64::NAN, 0.95).is_err());
        assert!(Navigation::new(10.0, 1.05, -0.95).is_err());
    }

    #[test]
    fn commands_parse_from_names_and_keys() {
        for c in Command::all() {
            assert_eq!(c.to_string().parse::<Command>().unwrap(), *c);
        }
        assert_eq!("zoom-in".parse::<Command>().unwrap(), Command::ZoomIn);
        assert_eq!("PAN_LEFT".parse::<Command>().unwrap(), Command::PanLeft);
        assert_eq!("prior".parse::<Command>().unwrap(), Command::ZoomIn);
        assert_eq!("next".parse::<Command>().unwrap(), Command::ZoomOut);
        assert_eq!("down_arrow".parse::<Command>().unwrap(), Command::PanDown);
        assert_eq!(
            "spin".parse::<Command>().unwrap_err(),
            FractalError::UnknownCommand("spin".to_string())
        );
    }
}
