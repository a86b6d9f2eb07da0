//! Projection families and the native/celestial rotation.
//!
//! A family is chosen once, from characters 5..8 of `CTYPE1`, and dispatched
//! through [`ProjectionFamily::ops`], a static table of plain function
//! pointers. Projection functions are stateless: they see only native or
//! planar coordinates, never the parameter struct.

mod rotation;
mod zenithal;

use std::fmt;

pub use rotation::SphericalRotation;

use crate::coordinate::{IntermediateCoord, NativeCoord};
use crate::error::{WcsError, WcsResult};
use crate::params::ProjectionParameters;

use zenithal::{deproject_tan, deproject_zea, paraminit_zenithal, project_tan, project_zea};

/// Function table for one projection family.
#[derive(Clone, Copy)]
pub struct ProjectionOps {
    pub code: &'static str,
    pub project: fn(NativeCoord) -> WcsResult<IntermediateCoord>,
    pub unproject: fn(IntermediateCoord) -> WcsResult<NativeCoord>,
    pub paraminit: fn(&mut ProjectionParameters),
}

impl fmt::Debug for ProjectionOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectionOps")
            .field("code", &self.code)
            .finish_non_exhaustive()
    }
}

static PROJECTIONS: [ProjectionOps; 2] = [
    ProjectionOps {
        code: "TAN",
        project: project_tan,
        unproject: deproject_tan,
        paraminit: paraminit_zenithal,
    },
    ProjectionOps {
        code: "ZEA",
        project: project_zea,
        unproject: deproject_zea,
        paraminit: paraminit_zenithal,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProjectionFamily {
    #[default]
    Tan,
    Zea,
}

impl ProjectionFamily {
    pub fn from_code(code: &str) -> WcsResult<Self> {
        match code {
            "TAN" => Ok(Self::Tan),
            "ZEA" => Ok(Self::Zea),
            other => Err(WcsError::unsupported_projection(other)),
        }
    }

    /// Reads the family from an axis type such as `RA---TAN` (characters 5..8).
    pub fn from_ctype(ctype: &str) -> WcsResult<Self> {
        let code = ctype.get(5..8).unwrap_or("");
        Self::from_code(code)
    }

    #[inline]
    pub fn ops(self) -> &'static ProjectionOps {
        &PROJECTIONS[self as usize]
    }

    #[inline]
    pub fn code(self) -> &'static str {
        self.ops().code
    }

    pub fn project(self, native: NativeCoord) -> WcsResult<IntermediateCoord> {
        (self.ops().project)(native)
    }

    pub fn unproject(self, inter: IntermediateCoord) -> WcsResult<NativeCoord> {
        (self.ops().unproject)(inter)
    }

    pub fn paraminit(self, params: &mut ProjectionParameters) {
        (self.ops().paraminit)(params)
    }
}

impl fmt::Display for ProjectionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
