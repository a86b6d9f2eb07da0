//! FITS header card reading.
//!
//! Cards are located by regular expression rather than by strict 80-column
//! slicing, so headers that arrive with their newlines stripped (a single long
//! line, as some IIP servers return them) still parse. The keyword must sit at
//! the start of an 8-character field followed by `=`; the value is either a
//! quoted string without embedded blanks or a bare numeric literal.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Keywords the WCS engine reads from an image header.
pub const HEADER_KEYWORDS: [&str; 12] = [
    "CTYPE1", "CTYPE2", "NAXIS1", "NAXIS2", "CRPIX1", "CRPIX2", "CRVAL1", "CRVAL2", "CD1_1",
    "CD1_2", "CD2_1", "CD2_2",
];

static CARD_PATTERNS: Lazy<HashMap<&'static str, Regex>> = Lazy::new(|| {
    HEADER_KEYWORDS
        .iter()
        .filter_map(|&key| card_regex(key).map(|re| (key, re)))
        .collect()
});

fn card_key(keyword: &str) -> String {
    keyword.trim().to_uppercase().chars().take(8).collect()
}

fn card_regex(keyword: &str) -> Option<Regex> {
    let key = card_key(keyword);
    let padding = " ".repeat(8usize.saturating_sub(key.len()));
    let pattern = format!(
        r"{}{}=\ *(?:'(\S*)\ *'|([-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?))",
        regex::escape(&key),
        padding
    );
    Regex::new(&pattern).ok()
}

/// Keyword lookup over some header representation.
pub trait KeywordProvider {
    fn get_string(&self, key: &str) -> Option<String>;

    fn get_float(&self, key: &str) -> Option<f64> {
        self.get_string(key)?.trim().parse().ok()
    }

    /// Integer keywords accept a fractional literal and truncate it.
    fn get_int(&self, key: &str) -> Option<i64> {
        let raw = self.get_string(key)?;
        let raw = raw.trim();
        raw.parse::<i64>()
            .ok()
            .or_else(|| raw.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v.trunc() as i64))
    }
}

/// A raw FITS header text blob.
#[derive(Debug, Clone, Copy)]
pub struct FitsHeader<'a> {
    text: &'a str,
}

impl<'a> FitsHeader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Returns the raw value of the first card for `keyword`. Empty quoted
    /// strings count as absent.
    pub fn read_card(&self, keyword: &str) -> Option<&'a str> {
        let key = card_key(keyword);
        let caps = match CARD_PATTERNS.get(key.as_str()) {
            Some(re) => re.captures(self.text)?,
            None => card_regex(&key)?.captures(self.text)?,
        };

        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .filter(|v| !v.is_empty())
    }
}

impl KeywordProvider for FitsHeader<'_> {
    fn get_string(&self, key: &str) -> Option<String> {
        self.read_card(key).map(str::to_owned)
    }
}

/// Values found in a header. `None` leaves the corresponding parameter alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderOverrides {
    pub ctype: [Option<String>; 2],
    pub naxis: [Option<i64>; 2],
    pub crpix: [Option<f64>; 2],
    pub crval: [Option<f64>; 2],
    pub cd: [[Option<f64>; 2]; 2],
}

impl HeaderOverrides {
    pub fn from_provider<P: KeywordProvider + ?Sized>(provider: &P) -> Self {
        let float = |key: &str| {
            let v = provider.get_float(key);
            if v.is_none() {
                debug!(keyword = key, "header card absent or not numeric; keeping default");
            }
            v
        };
        let int = |key: &str| {
            let v = provider.get_int(key);
            if v.is_none() {
                debug!(keyword = key, "header card absent or not an integer; keeping default");
            }
            v
        };
        let string = |key: &str| {
            let v = provider.get_string(key);
            if v.is_none() {
                debug!(keyword = key, "header card absent; keeping default");
            }
            v
        };

        Self {
            ctype: [string("CTYPE1"), string("CTYPE2")],
            naxis: [int("NAXIS1"), int("NAXIS2")],
            crpix: [float("CRPIX1"), float("CRPIX2")],
            crval: [float("CRVAL1"), float("CRVAL2")],
            cd: [
                [float("CD1_1"), float("CD1_2")],
                [float("CD2_1"), float("CD2_2")],
            ],
        }
    }

    /// Number of keywords that were found.
    pub fn len(&self) -> usize {
        self.ctype.iter().filter(|v| v.is_some()).count()
            + self.naxis.iter().filter(|v| v.is_some()).count()
            + self.crpix.iter().filter(|v| v.is_some()).count()
            + self.crval.iter().filter(|v| v.is_some()).count()
            + self.cd.iter().flatten().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Extracts the WCS keywords from a FITS header text blob.
///
/// ```
/// use celestial_wcs::header::parse_header;
///
/// let hdr = "CRVAL1  =            10.684708 / RA\nCTYPE2  = 'DEC--TAN'";
/// let found = parse_header(hdr);
/// assert_eq!(found.crval[0], Some(10.684708));
/// assert_eq!(found.ctype[1].as_deref(), Some("DEC--TAN"));
/// assert_eq!(found.ctype[0], None);
/// ```
pub fn parse_header(text: &str) -> HeaderOverrides {
    HeaderOverrides::from_provider(&FitsHeader::new(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "SIMPLE  =                    T / conforms to FITS standard      \
BITPIX  =                  -32 / array data type                \
NAXIS   =                    2 / number of array dimensions     \
NAXIS1  =                 4096                                  \
NAXIS2  =                 2048                                  \
CTYPE1  = 'RA---ZEA'           / projection                     \
CTYPE2  = 'DEC--ZEA'                                            \
CRPIX1  =               2048.5                                  \
CRPIX2  =               1024.5                                  \
CRVAL1  =            10.684708                                  \
CRVAL2  =             41.26875                                  \
CD1_1   =      -7.305555556E-05                                 \
CD1_2   =                  0.0                                  \
CD2_1   =                  0.0                                  \
CD2_2   =       7.305555556E-05                                 \
END";

    #[test]
    fn test_read_card_values() {
        let hdr = FitsHeader::new(HEADER);
        assert_eq!(hdr.read_card("CTYPE1"), Some("RA---ZEA"));
        assert_eq!(hdr.read_card("crpix1"), Some("2048.5"));
        assert_eq!(hdr.read_card("CD1_1"), Some("-7.305555556E-05"));
    }

    #[test]
    fn test_naxis_does_not_match_naxis1() {
        // "NAXIS" needs three blanks before '=', so NAXIS1 cannot satisfy it.
        let hdr = FitsHeader::new(HEADER);
        assert_eq!(hdr.get_int("NAXIS"), Some(2));
        assert_eq!(hdr.get_int("NAXIS1"), Some(4096));
    }

    #[test]
    fn test_parse_full_header() {
        let found = parse_header(HEADER);
        assert_eq!(found.len(), 12);
        assert_eq!(found.naxis, [Some(4096), Some(2048)]);
        assert_eq!(found.crval, [Some(10.684708), Some(41.26875)]);
        assert_eq!(found.cd[0][0], Some(-7.305555556E-05));
        assert_eq!(found.cd[1][0], Some(0.0));
    }

    #[test]
    fn test_missing_keywords_are_none() {
        let found = parse_header("CRVAL1  =     10.684708\nCTYPE2  = 'DEC--TAN'\n");
        assert_eq!(found.len(), 2);
        assert_eq!(found.ctype[0], None);
        assert_eq!(found.crpix, [None, None]);
    }

    #[test]
    fn test_malformed_values_skipped() {
        let found = parse_header("CRPIX1  = 'abc'\nNAXIS1  = ''\nCRVAL2  =  +3.5e1");
        assert_eq!(found.crpix[0], None);
        assert_eq!(found.naxis[0], None);
        assert_eq!(found.crval[1], Some(35.0));
    }

    #[test]
    fn test_wrong_padding_not_matched() {
        let found = parse_header("CRVAL1 = 10.0");
        assert!(found.is_empty());
    }

    #[test]
    fn test_fractional_integer_truncates() {
        let hdr = FitsHeader::new("NAXIS1  = 512.7");
        assert_eq!(hdr.get_int("NAXIS1"), Some(512));
    }

    struct MapProvider(HashMap<&'static str, &'static str>);

    impl KeywordProvider for MapProvider {
        fn get_string(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    #[test]
    fn test_from_custom_provider() {
        let provider = MapProvider(HashMap::from([("CTYPE1", "GLON-TAN"), ("CD2_2", "0.5")]));
        let found = HeaderOverrides::from_provider(&provider);
        assert_eq!(found.ctype[0].as_deref(), Some("GLON-TAN"));
        assert_eq!(found.cd[1][1], Some(0.5));
        assert_eq!(found.len(), 2);
    }
}
