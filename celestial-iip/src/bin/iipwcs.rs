use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use celestial_iip::{
    tile_url, IipMetadata, MapHost, PanRequest, StaticView, TileCoord, ViewerConfig,
};
use celestial_iip::tiles::{tile_query, RenderSettings};
use celestial_wcs::format::{parse_free_text, to_sexagesimal};
use celestial_wcs::{CelestialCoord, MapPoint, PixelCoord, Wcs, WcsLayer};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "iipwcs", about = "Pixel/sky conversions for tiled FITS images")]
#[command(version)]
struct Cli {
    /// FITS header (or FITS file) describing the image
    #[arg(long, global = true)]
    header: Option<PathBuf>,

    /// Viewer configuration (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the WCS set up from the header
    Info,
    /// Pixel to sky. Without --zoom X Y are FITS pixels, otherwise map pixels
    Pix2sky {
        #[arg(allow_hyphen_values = true)]
        x: f64,
        #[arg(allow_hyphen_values = true)]
        y: f64,
        #[arg(long)]
        zoom: Option<f64>,
        /// Output decimal degrees only
        #[arg(long)]
        raw: bool,
    },
    /// Sky to pixel. Without --zoom the result is in FITS pixels
    Sky2pix {
        /// Longitude in degrees, image frame
        #[arg(allow_hyphen_values = true)]
        lng: f64,
        /// Latitude in degrees, image frame
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(long)]
        zoom: Option<f64>,
    },
    /// Interpret text as the coordinate box would
    Parse { text: String },
    /// Feed a saved Sesame reply through the coordinate control
    Resolve {
        query: String,
        /// File holding the Sesame response body
        #[arg(long)]
        response: PathBuf,
        #[arg(long, default_value = "200")]
        status: u16,
    },
    /// Scale bar at the reference point
    Scale {
        #[arg(long, default_value = "0")]
        zoom: f64,
    },
    /// Tile request for a saved IIP metadata reply
    Tile {
        /// File holding the metadata response
        #[arg(long)]
        metadata: PathBuf,
        x: u32,
        y: u32,
        z: i32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            let wcs = load_wcs(cli.header.as_deref())?;
            print_info(&wcs);
        }
        Commands::Pix2sky { x, y, zoom, raw } => {
            let wcs = load_wcs(cli.header.as_deref())?;
            let coord = match zoom {
                Some(zoom) => wcs.point_to_coordinate(MapPoint::new(x, y), zoom)?,
                None => wcs.pixel_to_celestial(PixelCoord::new(x, y))?,
            };
            if raw {
                println!("{:.8} {:.8}", coord.lng_deg(), coord.lat_deg());
            } else {
                println!(
                    "{:.8} {:.8}  {}",
                    coord.lng_deg(),
                    coord.lat_deg(),
                    to_sexagesimal(coord)
                );
            }
        }
        Commands::Sky2pix { lng, lat, zoom } => {
            if !(-90.0..=90.0).contains(&lat) {
                bail!("latitude {lat} outside [-90, 90]");
            }
            let wcs = load_wcs(cli.header.as_deref())?;
            let coord = CelestialCoord::from_degrees(lng, lat);
            match zoom {
                Some(zoom) => {
                    let p = wcs.coordinate_to_point(coord, zoom)?;
                    println!("{:.4} {:.4}", p.x, p.y);
                }
                None => {
                    let p = wcs.celestial_to_pixel(coord)?;
                    println!("{:.4} {:.4}", p.x(), p.y());
                }
            }
        }
        Commands::Parse { text } => match parse_free_text(&text) {
            Some(coord) => println!(
                "{:.6} {:.6}  {}",
                coord.lng_deg(),
                coord.lat_deg(),
                to_sexagesimal(coord)
            ),
            None => println!("name lookup: {}", celestial_iip::sesame_url(&text)),
        },
        Commands::Resolve {
            query,
            response,
            status,
        } => {
            let wcs = load_wcs(cli.header.as_deref())?;
            let body = std::fs::read_to_string(&response)
                .with_context(|| format!("Failed to read {}", response.display()))?;
            let mut view = StaticView::new(Arc::clone(&wcs), 0.0);
            let mut control = config.control();
            match control.pan_request(&wcs, &query)? {
                PanRequest::Coordinate(coord) => view.pan_to(coord),
                PanRequest::Lookup { query, .. } => {
                    control.handle_lookup_response(&mut view, &wcs, &query, status, &body)?;
                }
            }
            println!("{}", control.display_center(&view, &wcs)?);
        }
        Commands::Scale { zoom } => {
            let wcs = load_wcs(cli.header.as_deref())?;
            let view = StaticView::new(Arc::clone(&wcs), zoom);
            let mut bar = config.scale_bar();
            bar.update(&view, &wcs)?;
            for line in [bar.degrees(), bar.pixels()].into_iter().flatten() {
                println!("{:>12}  {} px", line.label, line.width);
            }
        }
        Commands::Tile { metadata, x, y, z } => {
            let text = std::fs::read_to_string(&metadata)
                .with_context(|| format!("Failed to read {}", metadata.display()))?;
            let meta = IipMetadata::parse(&text)?;
            let geometry = config.layer.geometry(&meta);
            let tile = TileCoord::new(x, y, z);
            if !geometry.contains(tile) {
                bail!(
                    "tile {x},{y} not available at zoom {z} (zooms {}..={}, grid {:?})",
                    geometry.min_zoom(),
                    geometry.max_zoom(),
                    geometry.grid_size(z)
                );
            }
            let default = RenderSettings::server_defaults(&meta);
            let current = config.layer.render_settings(&meta);
            match &config.layer.url {
                Some(url) => println!("{}", tile_url(url, &current, &default, &geometry, tile)),
                None => println!("{}", tile_query(&current, &default, &geometry, tile)),
            }
        }
    }

    Ok(())
}

fn load_wcs(header: Option<&Path>) -> Result<Arc<Wcs>> {
    let mut layer = WcsLayer::default();
    if let Some(path) = header {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read header {}", path.display()))?;
        let applied = layer.apply_header(&String::from_utf8_lossy(&bytes));
        info!(applied, path = %path.display(), "header loaded");
    }
    layer.finalize().context("Invalid WCS")
}

fn print_info(wcs: &Wcs) {
    let p = wcs.params();
    println!("Projection: {} ({:?} frame)", wcs.code(), wcs.frame());
    println!("CTYPE:      {} / {}", p.ctype.x, p.ctype.y);
    println!("NAXIS:      {} x {}", p.naxis[0], p.naxis[1]);
    println!("CRPIX:      {} {}", p.crpix[0], p.crpix[1]);
    println!(
        "CRVAL:      {:.6} {:.6}  {}",
        p.crval.lng_deg(),
        p.crval.lat_deg(),
        to_sexagesimal(p.crval)
    );
    println!("CD:         {:?}", p.cd);
    println!(
        "Pixel scale: {:.4}\"",
        wcs.linear().cd().pixel_scale() * 3600.0
    );
    println!(
        "Pole:       phi_p={:.4} delta_p={:.4}",
        wcs.rotation().phi_p_degrees(),
        wcs.rotation().delta_p_degrees()
    );
    println!("Zoom levels: {}", p.nzoom);
}
