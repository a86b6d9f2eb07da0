//! Center-coordinate display and "go to" input.
//!
//! The control shows the view center in the selected coordinate choice and
//! accepts either a coordinate pair or an object name. Names are resolved
//! through Sesame; the host performs the request and hands the reply back.

use celestial_wcs::format::{parse_free_text, parse_pair, to_sexagesimal};
use celestial_wcs::{CelestialCoord, PixelCoord, Wcs};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IipError, IipResult};
use crate::host::MapHost;
use crate::lookup::{parse_sesame_response, sesame_url};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnits {
    /// `H:MM:SS.sss ±DD:MM:SS.ss`.
    #[default]
    Hms,
    /// Decimal degrees with five decimals.
    #[serde(rename = "deg", alias = "degrees")]
    Degrees,
    /// FITS pixel coordinates of the image.
    Pixels,
    /// Decimal degrees with one decimal.
    Plain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateChoice {
    pub label: String,
    #[serde(default)]
    pub units: DisplayUnits,
    /// Show the image's own frame instead of converting to equatorial.
    #[serde(default)]
    pub native_celsys: bool,
}

impl Default for CoordinateChoice {
    fn default() -> Self {
        Self {
            label: "RA, Dec".to_string(),
            units: DisplayUnits::Hms,
            native_celsys: false,
        }
    }
}

/// What to do with text typed into the control.
#[derive(Debug, Clone, PartialEq)]
pub enum PanRequest {
    /// Pan straight there. The coordinate is in the image's frame.
    Coordinate(CelestialCoord),
    /// Not a coordinate: the host fetches `url` and passes the reply to
    /// [`CoordinateControl::handle_lookup_response`].
    Lookup { query: String, url: String },
}

#[derive(Debug, Clone)]
pub struct CoordinateControl {
    choices: Vec<CoordinateChoice>,
    current: usize,
    text: String,
}

impl Default for CoordinateControl {
    fn default() -> Self {
        Self::new(vec![CoordinateChoice::default()])
    }
}

impl CoordinateControl {
    /// An empty list falls back to a single RA/Dec choice.
    pub fn new(choices: Vec<CoordinateChoice>) -> Self {
        let choices = if choices.is_empty() {
            vec![CoordinateChoice::default()]
        } else {
            choices
        };
        Self {
            choices,
            current: 0,
            text: String::new(),
        }
    }

    pub fn choices(&self) -> &[CoordinateChoice] {
        &self.choices
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn selected(&self) -> &CoordinateChoice {
        &self.choices[self.current]
    }

    /// Current content of the input box.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn select(&mut self, index: usize) -> IipResult<()> {
        if index >= self.choices.len() {
            return Err(IipError::config(format!(
                "coordinate choice {index} out of range (have {})",
                self.choices.len()
            )));
        }
        self.current = index;
        Ok(())
    }

    /// Selects a choice and refreshes the input box.
    pub fn select_and_refresh<H: MapHost + ?Sized>(
        &mut self,
        index: usize,
        host: &H,
        wcs: &Wcs,
    ) -> IipResult<&str> {
        self.select(index)?;
        self.on_view_change(host, wcs)
    }

    /// The view center as shown for the selected choice.
    pub fn display_center<H: MapHost + ?Sized>(&self, host: &H, wcs: &Wcs) -> IipResult<String> {
        let center = host.center();
        if wcs.is_pixel() {
            return Ok(format!("{:.0} , {:.0}", center.lng_deg(), center.lat_deg()));
        }

        let choice = self.selected();
        if choice.units == DisplayUnits::Pixels {
            let pixel = wcs.celestial_to_pixel(center)?;
            return Ok(format!("{:.1} , {:.1}", pixel.x(), pixel.y()));
        }

        let shown = to_display_frame(wcs, choice, center);
        Ok(match choice.units {
            DisplayUnits::Hms => to_sexagesimal(shown),
            DisplayUnits::Degrees => format!("{:.5} , {:.5}", shown.lng_deg(), shown.lat_deg()),
            DisplayUnits::Pixels | DisplayUnits::Plain => {
                format!("{:.1} , {:.1}", shown.lng_deg(), shown.lat_deg())
            }
        })
    }

    /// Called by the host after every move or zoom; rewrites the input box.
    pub fn on_view_change<H: MapHost + ?Sized>(&mut self, host: &H, wcs: &Wcs) -> IipResult<&str> {
        self.text = self.display_center(host, wcs)?;
        Ok(&self.text)
    }

    /// Interprets `text` typed into the input box.
    pub fn pan_request(&self, wcs: &Wcs, text: &str) -> IipResult<PanRequest> {
        let choice = self.selected();
        if !wcs.is_pixel() && choice.units == DisplayUnits::Pixels {
            if let Some((x, y)) = parse_pair(text) {
                let coord = wcs.pixel_to_celestial(PixelCoord::new(x, y))?;
                return Ok(PanRequest::Coordinate(coord));
            }
        } else if let Some(coord) = parse_free_text(text) {
            let coord = if wcs.is_pixel() {
                coord
            } else {
                from_display_frame(wcs, choice, coord)
            };
            return Ok(PanRequest::Coordinate(coord));
        }

        let query = text.trim().to_string();
        debug!(%query, "not a coordinate, asking Sesame");
        Ok(PanRequest::Lookup {
            url: sesame_url(&query),
            query,
        })
    }

    /// Handles `text` end to end: pans right away for coordinates, otherwise
    /// returns the lookup the host must perform.
    pub fn submit<H: MapHost + ?Sized>(
        &mut self,
        host: &mut H,
        wcs: &Wcs,
        text: &str,
    ) -> IipResult<Option<PanRequest>> {
        match self.pan_request(wcs, text)? {
            PanRequest::Coordinate(coord) => {
                host.pan_to(coord);
                self.on_view_change(&*host, wcs)?;
                Ok(None)
            }
            lookup => Ok(Some(lookup)),
        }
    }

    /// Pans to a resolved name. Sesame answers in J2000 equatorial
    /// coordinates, which are brought into the image's frame first.
    pub fn handle_lookup_response<H: MapHost + ?Sized>(
        &mut self,
        host: &mut H,
        wcs: &Wcs,
        query: &str,
        status: u16,
        body: &str,
    ) -> IipResult<CelestialCoord> {
        let equatorial = parse_sesame_response(query, status, body)?;
        let coord = if wcs.frame().is_celestial() {
            wcs.to_celestial_system(equatorial)
        } else {
            equatorial
        };
        host.pan_to(coord);
        self.on_view_change(&*host, wcs)?;
        Ok(coord)
    }
}

fn to_display_frame(wcs: &Wcs, choice: &CoordinateChoice, coord: CelestialCoord) -> CelestialCoord {
    if choice.native_celsys {
        coord
    } else {
        wcs.from_celestial_system(coord)
    }
}

fn from_display_frame(wcs: &Wcs, choice: &CoordinateChoice, coord: CelestialCoord) -> CelestialCoord {
    if choice.native_celsys {
        coord
    } else {
        wcs.to_celestial_system(coord)
    }
}
