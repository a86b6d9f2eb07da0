use super::core::Angle;
use crate::constants::HALF_PI;
use crate::errors::MathErrorKind;
use crate::AstroError;

pub fn validate_latitude(angle: Angle) -> Result<Angle, AstroError> {
    let rad = angle.radians();
    if !rad.is_finite() {
        return Err(AstroError::math_error(
            "validate_latitude",
            MathErrorKind::NotFinite,
            "Lat not finite",
        ));
    }

    if (-HALF_PI..=HALF_PI).contains(&rad) {
        return Ok(angle);
    }

    Err(AstroError::math_error(
        "validate_latitude",
        MathErrorKind::OutOfRange,
        &format!("Lat {:.2}° out of range [-90°, +90°]", angle.degrees()),
    ))
}

/// Any finite longitude is valid; it comes back wrapped into [0, 2π).
pub fn validate_longitude(angle: Angle) -> Result<Angle, AstroError> {
    let rad = angle.radians();
    if !rad.is_finite() {
        return Err(AstroError::math_error(
            "validate_longitude",
            MathErrorKind::NotFinite,
            "Lon not finite",
        ));
    }

    Ok(Angle::from_radians(super::normalize::wrap_0_2pi(rad)))
}
