//! Per-path controller: working data, optional frozen basis, and the
//! operations that rewrite them.
//!
//! In [`BasisMode::Live`] every transform reads the current working path,
//! so successive transforms compound. In [`BasisMode::Locked`] transforms
//! always read a frozen basis and only write the working path, so the same
//! transform applied twice gives the same result. Adaptive operations
//! (interpolate, extrapolate, and their pre- variants) rewrite the working
//! path and, when locked, re-snapshot it as the new basis so that later
//! transforms see the new topology.

use serde::{Deserialize, Serialize};

use crate::anchor;
use crate::config::ResolutionLimits;
use crate::extrapolate::extrapolate;
use crate::interpolate::interpolate_with_limits;
use crate::metric::Metric;
use crate::transform::{Transformer, transform_path};
use crate::types::{Path, Point, WarpError};

/// Which path a transform reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasisMode {
    /// Transforms read and write the working path.
    #[default]
    Live,
    /// Transforms read a frozen basis and write the working path.
    Locked,
}

/// Working data of one path, tagged by basis mode.
///
/// The mode is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum PathState {
    /// Transforms compound on the working path.
    Live {
        /// Current geometry.
        working: Path,
    },
    /// Transforms are re-derived from `basis` every time.
    Locked {
        /// Frozen input for transforms.
        basis: Path,
        /// Current geometry.
        working: Path,
    },
}

impl PathState {
    /// Wrap a freshly parsed path. In locked mode the basis starts as a copy
    /// of it.
    #[must_use]
    pub fn new(path: Path, mode: BasisMode) -> Self {
        match mode {
            BasisMode::Live => Self::Live { working: path },
            BasisMode::Locked => Self::Locked {
                basis: path.clone(),
                working: path,
            },
        }
    }

    /// The basis mode chosen at construction.
    #[must_use]
    pub const fn mode(&self) -> BasisMode {
        match self {
            Self::Live { .. } => BasisMode::Live,
            Self::Locked { .. } => BasisMode::Locked,
        }
    }

    /// The current geometry.
    #[must_use]
    pub const fn working(&self) -> &Path {
        match self {
            Self::Live { working } | Self::Locked { working, .. } => working,
        }
    }

    /// The path transforms read from: the frozen basis when locked,
    /// otherwise the working path.
    #[must_use]
    pub const fn basis(&self) -> &Path {
        match self {
            Self::Live { working } => working,
            Self::Locked { basis, .. } => basis,
        }
    }

    /// Apply `transformer` to the basis and store the result as the working
    /// path. Never touches a locked basis.
    pub fn transform<T>(&mut self, transformer: &T)
    where
        T: Transformer + ?Sized,
    {
        let transformed = transform_path(self.basis(), transformer);
        match self {
            Self::Live { working } | Self::Locked { working, .. } => *working = transformed,
        }
    }

    /// Subdivide the working path (see [`crate::interpolate_with_limits`]).
    ///
    /// Returns whether any segment was split.
    ///
    /// # Errors
    ///
    /// Returns [`WarpError::ResolutionLimitExceeded`] if `limits` are
    /// reached; the path is left unchanged.
    pub fn interpolate<M>(
        &mut self,
        threshold: f64,
        metric: &M,
        limits: &ResolutionLimits,
    ) -> Result<bool, WarpError>
    where
        M: Metric<Point> + ?Sized,
    {
        let mut did_work = false;
        let path = self.working().try_map_sequences(|segments| {
            let result = interpolate_with_limits(segments, threshold, metric, limits)?;
            did_work |= result.did_work;
            Ok::<_, WarpError>(result.output)
        })?;
        self.commit("interpolate", path);
        Ok(did_work)
    }

    /// Merge the working path (see [`crate::extrapolate()`]).
    ///
    /// Returns whether any segments were merged.
    pub fn extrapolate<M>(&mut self, threshold: f64, metric: &M) -> bool
    where
        M: Metric<Point> + ?Sized,
    {
        let mut did_work = false;
        let path = self.working().map_sequences(|segments| {
            let result = extrapolate(segments, threshold, metric);
            did_work |= result.did_work;
            result.output
        });
        self.commit("extrapolate", path);
        did_work
    }

    /// Subdivide the working path measuring the anchors `reference`
    /// computes (see [`anchor::pre_interpolate`]).
    ///
    /// # Errors
    ///
    /// Returns [`WarpError::ResolutionLimitExceeded`] if `limits` are
    /// reached; the path is left unchanged.
    pub fn pre_interpolate<T, M>(
        &mut self,
        reference: &T,
        threshold: f64,
        metric: &M,
        limits: &ResolutionLimits,
    ) -> Result<bool, WarpError>
    where
        T: Transformer + ?Sized,
        M: Metric<Point> + ?Sized,
    {
        let mut did_work = false;
        let path = self.working().try_map_sequences(|segments| {
            let result = anchor::pre_interpolate(segments, reference, threshold, metric, limits)?;
            did_work |= result.did_work;
            Ok::<_, WarpError>(result.output)
        })?;
        self.commit("pre-interpolate", path);
        Ok(did_work)
    }

    /// Merge the working path measuring the anchors `reference` computes
    /// (see [`anchor::pre_extrapolate`]).
    pub fn pre_extrapolate<T, M>(&mut self, reference: &T, threshold: f64, metric: &M) -> bool
    where
        T: Transformer + ?Sized,
        M: Metric<Point> + ?Sized,
    {
        let mut did_work = false;
        let path = self.working().map_sequences(|segments| {
            let result = anchor::pre_extrapolate(segments, reference, threshold, metric);
            did_work |= result.did_work;
            result.output
        });
        self.commit("pre-extrapolate", path);
        did_work
    }

    /// Store the result of an adaptive operation, re-snapshotting the basis
    /// when locked.
    fn commit(&mut self, operation: &str, path: Path) {
        log::debug!(
            "{operation}: {} -> {} segments",
            self.working().segment_count(),
            path.segment_count(),
        );
        match self {
            Self::Live { working } => *working = path,
            Self::Locked { basis, working } => {
                *basis = path.clone();
                *working = path;
            }
        }
    }
}
