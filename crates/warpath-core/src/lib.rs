//! warpath-core: Pure path warping core (sans-IO).
//!
//! Warps vector path geometry by applying point transforms to curve
//! segments, and adapts curve resolution around those transforms:
//!
//! - [`transform`] maps point transforms over every segment,
//! - [`interpolate()`] splits segments whose metric exceeds a threshold,
//! - [`extrapolate()`] merges neighbours whose combined metric is within it,
//! - [`anchor`] runs either adaptive step against computed reference points,
//! - [`PathState`] owns one path's working data and optional frozen basis.
//!
//! This crate has **no I/O dependencies**. Parsing and serializing path
//! data and reading host documents live in `warpath-svg`.
//!
//! # Example
//!
//! ```
//! use warpath_core::{
//!     BasisMode, EuclideanDistance, Path, PathState, Point, ResolutionLimits, Segment, Subpath,
//! };
//!
//! let line = Segment::line(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
//! let mut state = PathState::new(Path::new(vec![Subpath::open(vec![line])]), BasisMode::Live);
//!
//! // Refine first so the bend stays smooth, then bend.
//! state.interpolate(10.0, &EuclideanDistance, &ResolutionLimits::default())?;
//! state.transform(&|p: Point| Point::new(p.x, (p.x / 20.0).sin() * 10.0));
//! assert_eq!(state.working().segment_count(), 16);
//! # Ok::<(), warpath_core::WarpError>(())
//! ```

pub mod anchor;
pub mod config;
pub mod controller;
pub mod extrapolate;
pub mod interpolate;
pub mod metric;
pub mod transform;
pub mod types;

pub use anchor::{AnchorMetric, Anchored};
pub use config::{ResolutionLimit, ResolutionLimits, WarpConfig};
pub use controller::{BasisMode, PathState};
pub use extrapolate::extrapolate;
pub use interpolate::{AdaptiveResult, interpolate, interpolate_with_limits};
pub use metric::{EuclideanDistance, Metric};
pub use transform::{TransformChain, Transformer, apply_transform, map_segments, transform_path};
pub use types::{Lerp, Path, Point, Segment, SegmentKind, Subpath, WarpError};
