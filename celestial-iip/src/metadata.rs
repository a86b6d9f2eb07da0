//! IIP server image metadata (`obj=max-size`, `obj=tile-size`, ...).

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{IipError, IipResult};

/// Objects requested from the server, appended to the image URL.
pub const METADATA_OBJECTS: &str = "&obj=IIP,1.0&obj=max-size&obj=tile-size\
&obj=resolution-number&obj=bits-per-channel&obj=min-max-sample-values";

const SOURCE: &str = "IIP server";

/// Halving a `u32` size more than 32 times leaves nothing.
const MAX_RESOLUTIONS: u32 = 32;

static MAX_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Max-size:\s*(\d+)\s+(\d+)").expect("static regex is valid"));
static TILE_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Tile-size:\s*(\d+)\s+(\d+)").expect("static regex is valid"));
static RESOLUTIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Resolution-number:\s*(\d+)").expect("static regex is valid"));
static BITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Bits-per-channel:\s*(\d+)").expect("static regex is valid"));
static SAMPLE_VALUES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Min-Max-sample-values:([^\r\n]*)").expect("static regex is valid")
});

/// Image URL without any query options after the first `&`.
pub fn base_url(url: &str) -> &str {
    url.split('&').next().unwrap_or(url)
}

/// URL of the metadata request for the image at `url`.
pub fn metadata_url(url: &str) -> String {
    format!("{}{METADATA_OBJECTS}", base_url(url))
}

#[derive(Debug, Clone, PartialEq)]
pub struct IipMetadata {
    /// Full-resolution image size.
    pub max_size: [u32; 2],
    pub tile_size: [u32; 2],
    /// Number of resolution levels stored by the server.
    pub resolutions: u32,
    pub bits_per_channel: u32,
    /// Per-channel sample range.
    pub min_values: Vec<f64>,
    pub max_values: Vec<f64>,
}

impl IipMetadata {
    /// Parses a metadata reply.
    ///
    /// `Max-size` and `Min-Max-sample-values` are required. A missing
    /// `Tile-size` means 256×256, a missing `Bits-per-channel` means 8, and a
    /// missing `Resolution-number` means a single level.
    pub fn parse(text: &str) -> IipResult<Self> {
        let max_size = pair(&MAX_SIZE, text)
            .ok_or_else(|| IipError::unexpected_response(SOURCE, "no Max-size"))?;
        let tile_size = pair(&TILE_SIZE, text).unwrap_or([256, 256]);
        let resolutions = match RESOLUTIONS.captures(text).and_then(|c| c.get(1)) {
            None => 1,
            Some(m) => m
                .as_str()
                .parse::<u32>()
                .ok()
                .filter(|n| (1..=MAX_RESOLUTIONS).contains(n))
                .ok_or_else(|| {
                    IipError::unexpected_response(
                        SOURCE,
                        format!("Resolution-number {} out of range", m.as_str()),
                    )
                })?,
        };
        let bits_per_channel = single(&BITS, text).unwrap_or(8);

        let samples = SAMPLE_VALUES
            .captures(text)
            .and_then(|c| c.get(1))
            .ok_or_else(|| IipError::unexpected_response(SOURCE, "no Min-Max-sample-values"))?
            .as_str()
            .split_whitespace()
            .map(str::parse::<f64>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                IipError::unexpected_response(SOURCE, format!("bad sample value: {e}"))
            })?;
        if samples.len() < 2 {
            return Err(IipError::unexpected_response(
                SOURCE,
                "Min-Max-sample-values needs at least one min and one max",
            ));
        }
        if max_size.contains(&0) || tile_size.contains(&0) {
            return Err(IipError::unexpected_response(SOURCE, "zero image or tile size"));
        }

        let (min_values, max_values) = samples.split_at(samples.len() / 2);
        debug!(?max_size, ?tile_size, resolutions, bits_per_channel, "IIP metadata");
        Ok(Self {
            max_size,
            tile_size,
            resolutions,
            bits_per_channel,
            min_values: min_values.to_vec(),
            max_values: max_values.to_vec(),
        })
    }

    /// Highest server resolution index.
    pub fn max_zoom(&self) -> i32 {
        self.resolutions as i32 - 1
    }

    /// Display gamma: only 32-bit data are likely to be linearly quantized.
    pub fn gamma(&self) -> f64 {
        if self.bits_per_channel >= 32 {
            2.2
        } else {
            1.0
        }
    }

    /// Sample range of the first channel.
    pub fn min_max(&self) -> (f64, f64) {
        (
            self.min_values.first().copied().unwrap_or(0.0),
            self.max_values.first().copied().unwrap_or(255.0),
        )
    }
}

fn pair(re: &Regex, text: &str) -> Option<[u32; 2]> {
    let caps = re.captures(text)?;
    Some([caps.get(1)?.as_str().parse().ok()?, caps.get(2)?.as_str().parse().ok()?])
}

fn single(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = "IIP:1.0\r\nMax-size:16384 12288\r\nTile-size:256 256\r\n\
Resolution-number:7\r\nBits-per-channel:32\r\nMin-Max-sample-values:-0.5 120.25 \r\n";

    #[test]
    fn test_parse_full_reply() {
        let meta = IipMetadata::parse(REPLY).unwrap();
        assert_eq!(meta.max_size, [16384, 12288]);
        assert_eq!(meta.tile_size, [256, 256]);
        assert_eq!(meta.resolutions, 7);
        assert_eq!(meta.max_zoom(), 6);
        assert_eq!(meta.bits_per_channel, 32);
        assert_eq!(meta.gamma(), 2.2);
        assert_eq!(meta.min_max(), (-0.5, 120.25));
    }

    #[test]
    fn test_multichannel_samples() {
        let text = "Max-size:100 100\nMin-Max-sample-values:0 1 2 10 11 12\n";
        let meta = IipMetadata::parse(text).unwrap();
        assert_eq!(meta.min_values, vec![0.0, 1.0, 2.0]);
        assert_eq!(meta.max_values, vec![10.0, 11.0, 12.0]);
        assert_eq!(meta.gamma(), 1.0);
        assert_eq!(meta.tile_size, [256, 256]);
    }

    #[test]
    fn test_missing_max_size() {
        let err = IipMetadata::parse("IIP:1.0\nTile-size:256 256\n").unwrap_err();
        assert!(matches!(err, IipError::UnexpectedResponse { .. }));
    }

    #[test]
    fn test_missing_samples() {
        let err = IipMetadata::parse("Max-size:100 100\n").unwrap_err();
        assert!(err.to_string().contains("Min-Max-sample-values"));
    }

    #[test]
    fn test_resolution_number_bounds() {
        for bad in ["0", "33", "3000000000", "99999999999"] {
            let text = format!("Max-size:100 100\nResolution-number:{bad}\nMin-Max-sample-values:0 1\n");
            let err = IipMetadata::parse(&text).unwrap_err();
            assert!(matches!(err, IipError::UnexpectedResponse { .. }), "{bad}");
            assert!(err.to_string().contains("Resolution-number"), "{bad}");
        }
        let text = "Max-size:100 100\nResolution-number:32\nMin-Max-sample-values:0 1\n";
        assert_eq!(IipMetadata::parse(text).unwrap().max_zoom(), 31);
    }

    #[test]
    fn test_urls() {
        let url = "http://host/fcgi-bin/iipsrv.fcgi?FIF=m31.fits&GAM=0.5";
        assert_eq!(base_url(url), "http://host/fcgi-bin/iipsrv.fcgi?FIF=m31.fits");
        assert!(metadata_url(url).ends_with("m31.fits&obj=IIP,1.0&obj=max-size&obj=tile-size\
&obj=resolution-number&obj=bits-per-channel&obj=min-max-sample-values"));
    }
}
