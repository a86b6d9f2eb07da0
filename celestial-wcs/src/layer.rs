//! Two-state lifecycle of an image layer's WCS.
//!
//! A layer starts `Pending` with default parameters. The host may feed it a
//! FITS header (typically fetched asynchronously from the image server) and
//! then calls [`WcsLayer::finalize`] exactly once. Finalize builds the
//! immutable [`Wcs`], moves the layer to `Ready` and fires the registered
//! one-shot listeners. Conversions are only available on the `Wcs`, so a layer
//! that was never finalized cannot be used for them.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::engine::Wcs;
use crate::error::WcsResult;
use crate::header::parse_header;
use crate::params::ProjectionParameters;

pub type ReadyListener = Box<dyn FnOnce(&Arc<Wcs>) + Send>;

enum LayerState {
    Pending {
        params: ProjectionParameters,
        listeners: Vec<ReadyListener>,
    },
    Ready(Arc<Wcs>),
}

pub struct WcsLayer {
    state: LayerState,
}

impl WcsLayer {
    pub fn new(params: ProjectionParameters) -> Self {
        Self {
            state: LayerState::Pending {
                params,
                listeners: Vec::new(),
            },
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self.state, LayerState::Ready(_))
    }

    pub fn wcs(&self) -> Option<&Arc<Wcs>> {
        match &self.state {
            LayerState::Ready(wcs) => Some(wcs),
            LayerState::Pending { .. } => None,
        }
    }

    pub fn params(&self) -> &ProjectionParameters {
        match &self.state {
            LayerState::Pending { params, .. } => params,
            LayerState::Ready(wcs) => wcs.params(),
        }
    }

    /// Mutable parameters, available only before finalize.
    pub fn params_mut(&mut self) -> Option<&mut ProjectionParameters> {
        match &mut self.state {
            LayerState::Pending { params, .. } => Some(params),
            LayerState::Ready(_) => None,
        }
    }

    /// Applies the WCS keywords found in `text`. Returns how many were used.
    /// A header arriving after finalize is ignored.
    pub fn apply_header(&mut self, text: &str) -> usize {
        match &mut self.state {
            LayerState::Pending { params, .. } => params.apply_overrides(&parse_header(text)),
            LayerState::Ready(wcs) => {
                warn!(code = %wcs.code(), "header received after finalize; ignored");
                0
            }
        }
    }

    /// Registers a callback for the transition to `Ready`. If the layer is
    /// already ready the callback runs immediately.
    pub fn on_ready<F>(&mut self, listener: F)
    where
        F: FnOnce(&Arc<Wcs>) + Send + 'static,
    {
        match &mut self.state {
            LayerState::Pending { listeners, .. } => listeners.push(Box::new(listener)),
            LayerState::Ready(wcs) => listener(wcs),
        }
    }

    /// Builds the [`Wcs`] and fires the pending listeners.
    ///
    /// Calling it again returns the same `Wcs` without firing anything. On
    /// error the layer stays pending with its listeners kept.
    pub fn finalize(&mut self) -> WcsResult<Arc<Wcs>> {
        let (wcs, listeners) = match &mut self.state {
            LayerState::Ready(wcs) => return Ok(Arc::clone(wcs)),
            LayerState::Pending { params, listeners } => {
                let wcs = Arc::new(Wcs::build(params.clone())?);
                (wcs, std::mem::take(listeners))
            }
        };

        let p = wcs.params();
        info!(
            code = %wcs.code(),
            naxis1 = p.naxis[0],
            naxis2 = p.naxis[1],
            crval1 = p.crval.lng_deg(),
            crval2 = p.crval.lat_deg(),
            listeners = listeners.len(),
            "WCS ready"
        );

        self.state = LayerState::Ready(Arc::clone(&wcs));
        for listener in listeners {
            listener(&wcs);
        }
        Ok(wcs)
    }
}

impl Default for WcsLayer {
    fn default() -> Self {
        Self::new(ProjectionParameters::default())
    }
}

impl fmt::Debug for WcsLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            LayerState::Pending { params, listeners } => f
                .debug_struct("WcsLayer::Pending")
                .field("params", params)
                .field("listeners", &listeners.len())
                .finish(),
            LayerState::Ready(wcs) => f
                .debug_struct("WcsLayer::Ready")
                .field("code", &wcs.code())
                .finish(),
        }
    }
}
