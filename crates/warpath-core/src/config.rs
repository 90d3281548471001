//! Session configuration and resolution limits.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::controller::BasisMode;
use crate::types::SegmentKind;

/// Upper bounds on adaptive subdivision.
///
/// Subdivision recurses until the metric falls within the threshold. A
/// metric that never shrinks (or a threshold at or below zero) would
/// recurse forever, so both depth and output size are capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionLimits {
    /// Maximum number of times a single input segment may be halved.
    pub max_depth: usize,
    /// Maximum number of segments one subdivided sequence may hold.
    pub max_segments: usize,
}

impl ResolutionLimits {
    /// Default for [`max_depth`](Self::max_depth).
    pub const DEFAULT_MAX_DEPTH: usize = 32;
    /// Default for [`max_segments`](Self::max_segments).
    pub const DEFAULT_MAX_SEGMENTS: usize = 1 << 20;
}

impl Default for ResolutionLimits {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_segments: Self::DEFAULT_MAX_SEGMENTS,
        }
    }
}

/// Which [`ResolutionLimits`] bound was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionLimit {
    /// [`ResolutionLimits::max_depth`].
    Depth,
    /// [`ResolutionLimits::max_segments`].
    SegmentCount,
}

impl fmt::Display for ResolutionLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Depth => f.write_str("subdivision depth"),
            Self::SegmentCount => f.write_str("segment count"),
        }
    }
}

/// Configuration for a warp session.
///
/// Applied once when a document is built; the basis mode cannot change
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpConfig {
    /// Curve type every path is normalized to before parsing.
    pub curve_type: SegmentKind,

    /// Whether transforms read the live working data or a frozen basis.
    pub basis_mode: BasisMode,

    /// Bounds on adaptive subdivision.
    pub limits: ResolutionLimits,
}

impl WarpConfig {
    /// Default for [`curve_type`](Self::curve_type).
    pub const DEFAULT_CURVE_TYPE: SegmentKind = SegmentKind::Quadratic;
    /// Default for [`basis_mode`](Self::basis_mode).
    pub const DEFAULT_BASIS_MODE: BasisMode = BasisMode::Live;
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            curve_type: Self::DEFAULT_CURVE_TYPE,
            basis_mode: Self::DEFAULT_BASIS_MODE,
            limits: ResolutionLimits::default(),
        }
    }
}
