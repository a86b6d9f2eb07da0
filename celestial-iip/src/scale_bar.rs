//! Scale bar with angular and image-pixel lines.

use celestial_core::constants::{ARCMIN_PER_DEGREE, ARCSEC_PER_DEGREE};
use celestial_wcs::{degrees_per_pixel, Wcs};
use serde::{Deserialize, Serialize};

use crate::error::IipResult;
use crate::host::MapHost;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleBarOptions {
    /// Longest bar, in screen pixels.
    #[serde(default = "default_max_width")]
    pub max_width: u32,
    #[serde(default = "default_true")]
    pub degrees: bool,
    #[serde(default = "default_true")]
    pub pixels: bool,
}

fn default_max_width() -> u32 {
    128
}
fn default_true() -> bool {
    true
}

impl Default for ScaleBarOptions {
    fn default() -> Self {
        Self {
            max_width: default_max_width(),
            degrees: true,
            pixels: true,
        }
    }
}

/// One line of the bar: its label and width in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleLine {
    pub label: String,
    pub width: u32,
}

impl ScaleLine {
    fn new(value: f64, max_value: f64, unit: &str, max_width: u32) -> Self {
        let width = (f64::from(max_width) * value / max_value).round() as u32;
        Self {
            label: format!("{value} {unit}"),
            width,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScaleBar {
    options: ScaleBarOptions,
    degrees: Option<ScaleLine>,
    pixels: Option<ScaleLine>,
}

impl ScaleBar {
    pub fn new(options: ScaleBarOptions) -> Self {
        Self {
            options,
            degrees: None,
            pixels: None,
        }
    }

    pub fn options(&self) -> &ScaleBarOptions {
        &self.options
    }

    pub fn degrees(&self) -> Option<&ScaleLine> {
        self.degrees.as_ref()
    }

    pub fn pixels(&self) -> Option<&ScaleLine> {
        self.pixels.as_ref()
    }

    /// Recomputes both lines for the host's current center and zoom.
    pub fn update<H: MapHost + ?Sized>(&mut self, host: &H, wcs: &Wcs) -> IipResult<()> {
        let max_width = self.options.max_width;
        let zoom = host.zoom();

        if self.options.pixels {
            let image_px_per_map_px = 1.0 / wcs.scale_factor(zoom);
            self.pixels = Some(pixel_line(image_px_per_map_px * f64::from(max_width), max_width));
        }

        if self.options.degrees {
            let per_pixel = degrees_per_pixel(wcs, host.center(), zoom)?;
            self.degrees = Some(degree_line(per_pixel * f64::from(max_width), max_width));
        }
        Ok(())
    }
}

/// Largest 1, 2, 3 or 5 × 10^k not exceeding `x`.
///
/// ```
/// use celestial_iip::scale_bar::round_number;
///
/// assert_eq!(round_number(0.0734), 0.05);
/// assert_eq!(round_number(4.2), 3.0);
/// assert_eq!(round_number(1000.0), 1000.0);
/// ```
pub fn round_number(x: f64) -> f64 {
    if !(x.is_finite() && x > 0.0) {
        return 0.0;
    }
    let mut k = x.log10().floor() as i32;
    if x < pow10(k) {
        k -= 1;
    } else if x >= pow10(k + 1) {
        k += 1;
    }
    let d = x / pow10(k);
    let step = if d >= 5.0 {
        5.0
    } else if d >= 3.0 {
        3.0
    } else if d >= 2.0 {
        2.0
    } else {
        1.0
    };
    // Divide for negative exponents so 0.3 prints as 0.3.
    if k >= 0 {
        step * pow10(k)
    } else {
        step / pow10(-k)
    }
}

fn pow10(k: i32) -> f64 {
    10f64.powi(k)
}

/// Bar for an angular span, choosing mas, arcseconds, arcminutes or degrees.
pub fn degree_line(max_degrees: f64, max_width: u32) -> ScaleLine {
    let max_seconds = max_degrees * ARCSEC_PER_DEGREE;
    let (max_value, unit) = if max_seconds < 1.0 {
        (max_seconds * 1000.0, "mas")
    } else if max_seconds < 60.0 {
        (max_seconds, "\"")
    } else if max_seconds < 3600.0 {
        (max_degrees * ARCMIN_PER_DEGREE, "'")
    } else {
        (max_degrees, "°")
    };
    ScaleLine::new(round_number(max_value), max_value, unit, max_width)
}

/// Bar for a span of image pixels, choosing px, kpx or Mpx.
pub fn pixel_line(max_pixels: f64, max_width: u32) -> ScaleLine {
    let (max_value, unit) = if max_pixels > 1.0e6 {
        (max_pixels * 1.0e-6, "Mpx")
    } else if max_pixels > 1.0e3 {
        (max_pixels * 1.0e-3, "kpx")
    } else {
        (max_pixels, "px")
    };
    ScaleLine::new(round_number(max_value), max_value, unit, max_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_number_steps() {
        assert_eq!(round_number(1.0), 1.0);
        assert_eq!(round_number(1.99), 1.0);
        assert_eq!(round_number(2.5), 2.0);
        assert_eq!(round_number(9.99), 5.0);
        assert_eq!(round_number(10.0), 10.0);
        assert_eq!(round_number(37.0), 30.0);
        assert_eq!(round_number(0.31), 0.3);
        assert_eq!(round_number(0.0), 0.0);
        assert_eq!(round_number(f64::NAN), 0.0);
    }

    #[test]
    fn test_degree_line_units() {
        assert_eq!(degree_line(0.4 / 3600.0, 128).label, "300 mas");
        assert_eq!(degree_line(45.0 / 3600.0, 128).label, "30 \"");
        assert_eq!(degree_line(0.5, 128).label, "30 '");
        assert_eq!(degree_line(7.0, 128).label, "5 °");
    }

    #[test]
    fn test_degree_line_width() {
        // 30' out of 40' fills three quarters of the bar.
        let line = degree_line(40.0 / 60.0, 128);
        assert_eq!(line.label, "30 '");
        assert_eq!(line.width, 96);
    }

    #[test]
    fn test_pixel_line_units() {
        assert_eq!(pixel_line(128.0, 128).label, "100 px");
        assert_eq!(pixel_line(1000.0, 128).label, "1000 px");
        assert_eq!(pixel_line(1000.5, 128).label, "1 kpx");
        assert_eq!(pixel_line(4096.0, 128).label, "3 kpx");
        assert_eq!(pixel_line(2.5e6, 128).label, "2 Mpx");
    }

    #[test]
    fn test_pixel_line_width() {
        let line = pixel_line(128.0, 128);
        assert_eq!(line.width, 100);
    }
}
