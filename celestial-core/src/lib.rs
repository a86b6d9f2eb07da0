//! Angle handling and small frame-rotation helpers for the IIP/WCS viewer.
//!
//! `celestial-core` is the leaf crate of the workspace. It carries the pieces every
//! other crate leans on:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`angle`] | [`Angle`] type, normalisation, colon-separated sexagesimal formatting |
//! | [`matrix`] | 3×3 rotation matrices used for celestial frame changes |
//! | [`constants`] | Unit conversions and the J2000 obliquity |
//! | [`utils`] | Longitude wrapping and angular differences in degrees |
//! | [`errors`] | [`AstroError`] |
//!
//! # Re-exports
//!
//! ```
//! use celestial_core::{Angle, RotationMatrix3};
//! use celestial_core::AstroError;
//! ```
//!
//! # Design Notes
//!
//! - **Radians internally**: [`Angle`] stores radians; the WCS crates work in
//!   degrees at their public boundary and convert on entry.
//! - **No implicit state**: every function here is pure.

pub mod angle;
pub mod constants;
pub mod errors;
pub mod math;
pub mod matrix;
pub mod utils;

pub use angle::Angle;
pub use errors::AstroError;
pub use matrix::RotationMatrix3;

pub mod test_helpers;
