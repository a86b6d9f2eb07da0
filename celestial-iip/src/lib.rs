//! Viewer-side plumbing for IIPImage layers with a FITS WCS.
//!
//! `celestial-wcs` does the astrometry. This crate holds what a map viewer
//! needs around it: the center-coordinate control with Sesame name lookup,
//! the angular/pixel scale bar, IIP metadata parsing and tile requests, and
//! the TOML viewer configuration. The map widget itself is abstracted as
//! [`MapHost`].

pub mod config;
pub mod control;
pub mod error;
pub mod host;
pub mod lookup;
pub mod metadata;
pub mod scale_bar;
pub mod tiles;

pub use config::{LayerConfig, ViewerConfig};
pub use control::{CoordinateChoice, CoordinateControl, DisplayUnits, PanRequest};
pub use error::{IipError, IipResult};
pub use host::{MapHost, StaticView};
pub use lookup::{parse_sesame_response, sesame_url};
pub use metadata::IipMetadata;
pub use scale_bar::{ScaleBar, ScaleBarOptions, ScaleLine};
pub use tiles::{tile_query, tile_url, RenderSettings, TileCoord, TileGeometry};
