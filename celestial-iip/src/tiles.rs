//! Zoom geometry of an IIP pyramid and JTL tile requests.

use serde::{Deserialize, Serialize};

use crate::metadata::IipMetadata;

/// A tile address in the viewer's zoom numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: i32,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Image and grid sizes per viewer zoom level.
///
/// Viewer zoom `z` maps to server resolution `z - iip_min_zoom`. Levels above
/// `iip_max_zoom` are upsampled by the viewer and reuse the finest grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGeometry {
    tile_size: [u32; 2],
    iip_min_zoom: i32,
    iip_max_zoom: i32,
    min_zoom: i32,
    max_zoom: i32,
    image_sizes: Vec<[u32; 2]>,
    grid_sizes: Vec<[u32; 2]>,
}

impl TileGeometry {
    /// Builds the pyramid for `meta`. `min_zoom` is the lowest zoom the viewer
    /// was configured with; it is raised to the server's lowest usable level.
    pub fn from_metadata(meta: &IipMetadata, min_zoom: i32) -> Self {
        let tile = meta.tile_size;
        let max = meta.max_size;
        let server_max = meta.max_zoom();

        // Extra coarse levels until one axis fits in a single tile.
        let mut grid = [2u32, 2];
        let mut z = 0;
        while z <= server_max && grid[0] > 1 && grid[1] > 1 {
            let shift = (server_max + z) as u32;
            grid = grid_size(downsample(max, shift), tile);
            z += 1;
        }
        let iip_min_zoom = z - 1;
        let iip_max_zoom = iip_min_zoom + server_max;

        let mut image_sizes = Vec::with_capacity(iip_max_zoom as usize + 1);
        let mut grid_sizes = Vec::with_capacity(iip_max_zoom as usize + 1);
        for level in 0..=iip_max_zoom {
            let size = downsample(max, (iip_max_zoom - level) as u32);
            image_sizes.push(size);
            grid_sizes.push(grid_size(size, tile));
        }

        Self {
            tile_size: tile,
            iip_min_zoom,
            iip_max_zoom,
            min_zoom: min_zoom.max(iip_min_zoom),
            max_zoom: iip_max_zoom + 2,
            image_sizes,
            grid_sizes,
        }
    }

    /// Overrides the highest viewer zoom (default: two levels past native).
    pub fn with_max_zoom(mut self, max_zoom: i32) -> Self {
        self.max_zoom = max_zoom.max(self.min_zoom);
        self
    }

    pub fn tile_size(&self) -> [u32; 2] {
        self.tile_size
    }

    pub fn iip_min_zoom(&self) -> i32 {
        self.iip_min_zoom
    }

    /// Finest native zoom level.
    pub fn iip_max_zoom(&self) -> i32 {
        self.iip_max_zoom
    }

    pub fn min_zoom(&self) -> i32 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> i32 {
        self.max_zoom
    }

    /// Image size at `zoom`, clamped to the native range.
    pub fn image_size(&self, zoom: i32) -> [u32; 2] {
        self.image_sizes[self.level(zoom)]
    }

    /// Tiles across and down at `zoom`.
    pub fn grid_size(&self, zoom: i32) -> [u32; 2] {
        self.grid_sizes[self.level(zoom)]
    }

    fn level(&self, zoom: i32) -> usize {
        zoom.clamp(0, self.iip_max_zoom) as usize
    }

    /// Upsampling factor of tiles beyond the finest native level.
    pub fn tile_size_factor(&self, zoom: i32) -> u32 {
        if zoom > self.iip_max_zoom {
            1u32 << (zoom - self.iip_max_zoom).min(31)
        } else {
            1
        }
    }

    /// Whether the server has this tile.
    pub fn contains(&self, tile: TileCoord) -> bool {
        if tile.z < self.min_zoom || tile.z > self.max_zoom {
            return false;
        }
        let grid = self.grid_size(tile.z);
        tile.x < grid[0] && tile.y < grid[1]
    }

    /// `nzoom` for the WCS of this image: one image pixel per map pixel at
    /// the finest native level.
    pub fn nzoom(&self) -> i32 {
        self.iip_max_zoom + 1
    }
}

fn downsample(size: [u32; 2], shift: u32) -> [u32; 2] {
    size.map(|s| s.checked_shr(shift).unwrap_or(0))
}

fn grid_size(size: [u32; 2], tile: [u32; 2]) -> [u32; 2] {
    [size[0].div_ceil(tile[0]), size[1].div_ceil(tile[1])]
}

/// Server-side rendering parameters of a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    pub contrast: f64,
    pub gamma: f64,
    pub cmap: String,
    pub min_value: f64,
    pub max_value: f64,
    /// JPEG quality.
    pub quality: u32,
}

impl RenderSettings {
    /// What the server applies when a request carries no options.
    pub fn server_defaults(meta: &IipMetadata) -> Self {
        let (min_value, max_value) = meta.min_max();
        Self {
            contrast: 1.0,
            gamma: 1.0,
            cmap: "grey".to_string(),
            min_value,
            max_value,
            quality: 90,
        }
    }

    /// Initial settings for a freshly loaded image.
    pub fn from_metadata(meta: &IipMetadata) -> Self {
        Self {
            gamma: meta.gamma(),
            ..Self::server_defaults(meta)
        }
    }
}

/// Query options for `tile`, emitting only settings that differ from
/// `default`, followed by the JTL request.
///
/// ```
/// use celestial_iip::metadata::IipMetadata;
/// use celestial_iip::tiles::{tile_query, RenderSettings, TileCoord, TileGeometry};
///
/// let meta = IipMetadata::parse(
///     "Max-size:1024 1024\nTile-size:256 256\nResolution-number:3\n\
///      Bits-per-channel:8\nMin-Max-sample-values:0 255\n",
/// )
/// .unwrap();
/// let geometry = TileGeometry::from_metadata(&meta, 0);
/// let defaults = RenderSettings::server_defaults(&meta);
/// let q = tile_query(&defaults, &defaults, &geometry, TileCoord::new(1, 2, 2));
/// assert_eq!(q, "&JTL=2,9");
/// ```
pub fn tile_query(
    current: &RenderSettings,
    default: &RenderSettings,
    geometry: &TileGeometry,
    tile: TileCoord,
) -> String {
    let mut query = String::new();
    if current.cmap != default.cmap {
        query.push_str(&format!("&CMP={}", current.cmap));
    }
    if current.contrast != default.contrast {
        query.push_str(&format!("&CNT={}", current.contrast));
    }
    if current.gamma != default.gamma {
        query.push_str(&format!("&GAM={:.4}", 1.0 / current.gamma));
    }
    if current.min_value != default.min_value || current.max_value != default.max_value {
        query.push_str(&format!(
            "&MINMAX=1,{},{}",
            current.min_value, current.max_value
        ));
    }
    if current.quality != default.quality {
        query.push_str(&format!("&QLT={}", current.quality));
    }

    // Upsampled zooms fetch tiles from the finest native level.
    let level = tile.z.min(geometry.iip_max_zoom()) - geometry.iip_min_zoom();
    let grid = geometry.grid_size(tile.z);
    let index = u64::from(tile.x) + u64::from(grid[0]) * u64::from(tile.y);
    query.push_str(&format!("&JTL={},{}", level, index));
    query
}

/// Full tile URL: `base` with its own options stripped, then the query.
pub fn tile_url(
    base: &str,
    current: &RenderSettings,
    default: &RenderSettings,
    geometry: &TileGeometry,
    tile: TileCoord,
) -> String {
    format!(
        "{}{}",
        crate::metadata::base_url(base),
        tile_query(current, default, geometry, tile)
    )
}
