//! Object name resolution through the CDS Sesame service.
//!
//! The viewer does not perform HTTP itself. [`sesame_url`] gives the host the
//! URL to fetch, and [`parse_sesame_response`] turns whatever came back into a
//! J2000 equatorial coordinate.

use celestial_wcs::CelestialCoord;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{IipError, IipResult};

pub const SESAME_URL: &str = "http://cdsweb.u-strasbg.fr/cgi-bin/nph-sesame/-oI/A?";

/// Name used in transport errors.
pub const SESAME_SERVICE: &str = "Sesame service at CDS";

// `%J 10.684708 +41.268750 = 00:42:44.33 +41:16:07.5`
static J2000_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^%J\s+([-+]?\d+\.?\d*)\s+([-+]?\d+\.?\d*)").expect("static regex is valid")
});

/// Sesame request URL for `query`. Runs of whitespace become one `%20`, and
/// every byte outside the RFC 3986 unreserved set is percent-encoded.
///
/// ```
/// use celestial_iip::lookup::sesame_url;
///
/// assert_eq!(
///     sesame_url(" NGC 224 "),
///     "http://cdsweb.u-strasbg.fr/cgi-bin/nph-sesame/-oI/A?NGC%20224"
/// );
/// assert!(sesame_url("HD 1+2&x#y").ends_with("?HD%201%2B2%26x%23y"));
/// ```
pub fn sesame_url(query: &str) -> String {
    let encoded = query
        .split_whitespace()
        .map(percent_encode)
        .collect::<Vec<_>>()
        .join("%20");
    format!("{SESAME_URL}{encoded}")
}

fn percent_encode(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for b in word.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

/// Reads the `%J` line of a Sesame reply.
pub fn parse_sesame_response(query: &str, status: u16, body: &str) -> IipResult<CelestialCoord> {
    if status != 200 {
        debug!(query, status, "Sesame request failed");
        return Err(IipError::transport(SESAME_SERVICE, status));
    }

    let coord = J2000_LINE.captures(body).and_then(|caps| {
        let lng: f64 = caps.get(1)?.as_str().parse().ok()?;
        let lat: f64 = caps.get(2)?.as_str().parse().ok()?;
        (-90.0..=90.0)
            .contains(&lat)
            .then(|| CelestialCoord::from_degrees(lng, lat))
    });

    match coord {
        Some(c) => {
            debug!(query, lng = c.lng_deg(), lat = c.lat_deg(), "resolved");
            Ok(c)
        }
        None => Err(IipError::unresolved_name(query)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const M31_REPLY: &str = "\
# M31\t#Q1234
#=S=Simbad (via url):    1
%@ 503952
%I.0 M 31
%C.0 G
%J 10.684708 +41.268750 = 00:42:44.33 +41:16:07.5
%V z -0.001001 [0.000009] 2010ApJS..189...37S
";

    #[test]
    fn test_resolves_j2000_line() {
        let c = parse_sesame_response("M31", 200, M31_REPLY).unwrap();
        assert!((c.lng_deg() - 10.684708).abs() < 1e-9);
        assert!((c.lat_deg() - 41.26875).abs() < 1e-9);
    }

    #[test]
    fn test_negative_declination() {
        let c = parse_sesame_response("x", 200, "%J 83.82208 -05.39111 = ...\n").unwrap();
        assert!((c.lat_deg() + 5.39111).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_name() {
        let body = "# NoSuchThing\t#Q1\n#! *** Nothing found *** \n";
        let err = parse_sesame_response("NoSuchThing", 200, body).unwrap_err();
        assert_eq!(err.to_string(), "NoSuchThing: Unknown location");
    }

    #[test]
    fn test_http_failure() {
        let err = parse_sesame_response("M31", 500, M31_REPLY).unwrap_err();
        assert_eq!(err, IipError::transport(SESAME_SERVICE, 500));
    }

    #[test]
    fn test_url_plain_name() {
        assert_eq!(sesame_url("M31"), format!("{SESAME_URL}M31"));
    }

    #[test]
    fn test_url_encodes_reserved_characters() {
        assert_eq!(
            sesame_url("BD+30 3639"),
            format!("{SESAME_URL}BD%2B30%203639")
        );
        assert_eq!(
            sesame_url("a&b #c=d?é"),
            format!("{SESAME_URL}a%26b%20%23c%3Dd%3F%C3%A9")
        );
    }
}
