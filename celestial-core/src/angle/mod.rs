mod core;
mod format;
mod normalize;
mod validate;

pub use core::Angle;
pub use format::{split_sexagesimal, DmsFmt, HmsFmt, Sexagesimal};
pub use normalize::wrap_0_2pi;
pub use validate::{validate_latitude, validate_longitude};

pub use core::{deg, hours, rad};
