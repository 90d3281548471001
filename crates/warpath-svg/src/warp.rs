//! [`Warp`]: a warp session over every path of one SVG document.
//!
//! Construction flattens basic shapes into paths, normalizes every path to
//! the configured curve type, and parses each into a [`PathState`].
//! Operations run over all paths; [`Warp::update`] writes the working
//! geometry back into the document.

use warpath_core::{
    EuclideanDistance, Metric, PathState, Point, ResolutionLimits, Transformer, WarpConfig,
    WarpError,
};

use crate::document::{NodeId, SvgDocument};
use crate::encode::encode;
use crate::error::SvgError;
use crate::parse::parse;

/// Warps the geometry of an SVG document.
///
/// # Examples
///
/// ```
/// use warpath_core::{Point, WarpConfig};
/// use warpath_svg::Warp;
///
/// let svg = r#"<svg><line x1="0" y1="0" x2="100" y2="0"/></svg>"#;
/// let mut warp = Warp::new(svg, &WarpConfig::default())?;
///
/// // Refine to at most 10 units per segment, then bend.
/// warp.interpolate(10.0)?;
/// warp.transform(&|p: Point| Point::new(p.x, p.y + (p.x / 20.0).sin() * 5.0));
///
/// assert!(warp.to_svg_string().contains("<path d=\"M0,0 Q"));
/// # Ok::<(), warpath_svg::SvgError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Warp {
    document: SvgDocument,
    paths: Vec<WarpPath>,
    limits: ResolutionLimits,
}

#[derive(Debug, Clone)]
struct WarpPath {
    node: NodeId,
    state: PathState,
}

impl Warp {
    /// Parse `svg` and prepare every path for warping.
    ///
    /// # Errors
    ///
    /// Returns an [`SvgError`] if the document or any path in it cannot be
    /// read. No partially prepared session is returned.
    pub fn new(svg: &str, config: &WarpConfig) -> Result<Self, SvgError> {
        Self::from_document(SvgDocument::parse(svg)?, config)
    }

    /// Prepare every path of an already parsed document.
    ///
    /// # Errors
    ///
    /// Returns an [`SvgError`] if any path in the document cannot be read.
    pub fn from_document(mut document: SvgDocument, config: &WarpConfig) -> Result<Self, SvgError> {
        let shapes = document.flatten_shapes();
        document.normalize_paths(config.curve_type)?;

        let paths = document
            .path_nodes()
            .into_iter()
            .map(|node| {
                let path = parse(document.geometry(node).unwrap_or_default())?;
                Ok(WarpPath {
                    node,
                    state: PathState::new(path, config.basis_mode),
                })
            })
            .collect::<Result<Vec<_>, SvgError>>()?;

        log::info!(
            "prepared {} paths ({shapes} shapes converted, {} segments, {:?} curves, {:?} basis)",
            paths.len(),
            paths
                .iter()
                .map(|p| p.state.working().segment_count())
                .sum::<usize>(),
            config.curve_type,
            config.basis_mode,
        );

        Ok(Self {
            document,
            paths,
            limits: config.limits,
        })
    }

    /// Apply `transformer` to every path and write the result into the
    /// document.
    pub fn transform<T>(&mut self, transformer: &T)
    where
        T: Transformer + ?Sized,
    {
        for path in &mut self.paths {
            path.state.transform(transformer);
        }
        self.update();
    }

    /// Subdivide every path until each segment spans at most `threshold`.
    ///
    /// Returns whether any segment was split. The document is not updated;
    /// call [`update`](Self::update) or [`transform`](Self::transform).
    ///
    /// # Errors
    ///
    /// Returns [`WarpError::ResolutionLimitExceeded`] if a path needs more
    /// resolution than the configured limits allow. No path is changed.
    pub fn interpolate(&mut self, threshold: f64) -> Result<bool, WarpError> {
        self.interpolate_with(threshold, &EuclideanDistance)
    }

    /// [`interpolate`](Self::interpolate) with a custom metric.
    ///
    /// # Errors
    ///
    /// See [`interpolate`](Self::interpolate).
    pub fn interpolate_with<M>(&mut self, threshold: f64, metric: &M) -> Result<bool, WarpError>
    where
        M: Metric<Point> + ?Sized,
    {
        let limits = self.limits;
        self.try_for_each_state(|state| state.interpolate(threshold, metric, &limits))
    }

    /// Merge neighbouring segments of every path while the pair spans at
    /// most `threshold`.
    ///
    /// Returns whether anything was merged. The document is not updated.
    pub fn extrapolate(&mut self, threshold: f64) -> bool {
        self.extrapolate_with(threshold, &EuclideanDistance)
    }

    /// [`extrapolate`](Self::extrapolate) with a custom metric.
    pub fn extrapolate_with<M>(&mut self, threshold: f64, metric: &M) -> bool
    where
        M: Metric<Point> + ?Sized,
    {
        let mut did_work = false;
        for path in &mut self.paths {
            did_work |= path.state.extrapolate(threshold, metric);
        }
        did_work
    }

    /// Subdivide every path until each segment spans at most `threshold`
    /// *after* `reference` is applied to its endpoints.
    ///
    /// # Errors
    ///
    /// See [`interpolate`](Self::interpolate).
    pub fn pre_interpolate<T>(&mut self, reference: &T, threshold: f64) -> Result<bool, WarpError>
    where
        T: Transformer + ?Sized,
    {
        self.pre_interpolate_with(reference, threshold, &EuclideanDistance)
    }

    /// [`pre_interpolate`](Self::pre_interpolate) with a custom metric.
    ///
    /// # Errors
    ///
    /// See [`interpolate`](Self::interpolate).
    pub fn pre_interpolate_with<T, M>(
        &mut self,
        reference: &T,
        threshold: f64,
        metric: &M,
    ) -> Result<bool, WarpError>
    where
        T: Transformer + ?Sized,
        M: Metric<Point> + ?Sized,
    {
        let limits = self.limits;
        self.try_for_each_state(|state| {
            state.pre_interpolate(reference, threshold, metric, &limits)
        })
    }

    /// Merge neighbouring segments of every path while the pair spans at
    /// most `threshold` after `reference` is applied.
    pub fn pre_extrapolate<T>(&mut self, reference: &T, threshold: f64) -> bool
    where
        T: Transformer + ?Sized,
    {
        self.pre_extrapolate_with(reference, threshold, &EuclideanDistance)
    }

    /// [`pre_extrapolate`](Self::pre_extrapolate) with a custom metric.
    pub fn pre_extrapolate_with<T, M>(&mut self, reference: &T, threshold: f64, metric: &M) -> bool
    where
        T: Transformer + ?Sized,
        M: Metric<Point> + ?Sized,
    {
        let mut did_work = false;
        for path in &mut self.paths {
            did_work |= path.state.pre_extrapolate(reference, threshold, metric);
        }
        did_work
    }

    /// Run a fallible operation on a copy of every path state and keep the
    /// copies only if all of them succeed.
    fn try_for_each_state<F>(&mut self, mut operation: F) -> Result<bool, WarpError>
    where
        F: FnMut(&mut PathState) -> Result<bool, WarpError>,
    {
        let mut did_work = false;
        let mut states = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let mut state = path.state.clone();
            did_work |= operation(&mut state)?;
            states.push(state);
        }
        for (path, state) in self.paths.iter_mut().zip(states) {
            path.state = state;
        }
        Ok(did_work)
    }

    /// Write every path's working geometry into the document.
    pub fn update(&mut self) {
        for path in &self.paths {
            self.document
                .set_geometry(path.node, encode(path.state.working()));
        }
    }

    /// Per-path state, in document order.
    pub fn paths(&self) -> impl Iterator<Item = &PathState> {
        self.paths.iter().map(|p| &p.state)
    }

    /// The host document as of the last [`update`](Self::update).
    #[must_use]
    pub const fn document(&self) -> &SvgDocument {
        &self.document
    }

    /// Consume the session, returning the document.
    #[must_use]
    pub fn into_document(self) -> SvgDocument {
        self.document
    }

    /// Serialize the document as of the last [`update`](Self::update).
    #[must_use]
    pub fn to_svg_string(&self) -> String {
        self.document.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use warpath_core::{BasisMode, ResolutionLimit, SegmentKind};

    const SQUARE: &str = concat!(
        r#"<svg><rect x="0" y="0" width="10" height="10"/>"#,
        r#"<path d="M0,20 L10,20"/></svg>"#,
    );

    fn config(basis_mode: BasisMode) -> WarpConfig {
        WarpConfig {
            basis_mode,
            ..WarpConfig::default()
        }
    }

    fn shift(p: Point) -> Point {
        Point::new(p.x + 1.0, p.y)
    }

    fn counts(warp: &Warp) -> Vec<usize> {
        warp.paths().map(|s| s.working().segment_count()).collect()
    }

    #[test]
    fn prepares_every_path_with_the_configured_curve_type() {
        let warp = Warp::new(SQUARE, &WarpConfig::default()).unwrap();
        assert_eq!(counts(&warp), vec![4, 1]);
        for state in warp.paths() {
            assert!(state.working().segments().all(|s| s.kind() == SegmentKind::Quadratic));
        }
    }

    #[test]
    fn construction_fails_fast() {
        assert!(Warp::new("<svg><path d=\"M0,0 L#\"/></svg>", &WarpConfig::default()).is_err());
        assert!(Warp::new("<svg>", &WarpConfig::default()).is_err());
    }

    #[test]
    fn transform_updates_document() {
        let mut warp = Warp::new(SQUARE, &WarpConfig::default()).unwrap();
        warp.transform(&shift);
        let out = warp.to_svg_string();
        assert!(out.contains("d=\"M1,20 Q"), "{out}");
    }

    #[test]
    fn adaptive_operations_wait_for_update() {
        let mut warp = Warp::new(SQUARE, &WarpConfig::default()).unwrap();
        let before = warp.to_svg_string();
        assert!(warp.interpolate(3.0).unwrap());
        assert_eq!(warp.to_svg_string(), before);
        warp.update();
        assert_ne!(warp.to_svg_string(), before);
        assert_eq!(counts(&warp), vec![16, 4]);
    }

    #[test]
    fn extrapolate_restores_resolution() {
        let mut warp = Warp::new(SQUARE, &WarpConfig::default()).unwrap();
        warp.interpolate(3.0).unwrap();
        assert!(warp.extrapolate(10.0));
        assert_eq!(counts(&warp), vec![4, 1]);
        assert!(!warp.extrapolate(10.0));
    }

    #[test]
    fn locked_basis_makes_transforms_repeatable() {
        let mut warp = Warp::new(SQUARE, &config(BasisMode::Locked)).unwrap();
        warp.transform(&shift);
        let once = warp.to_svg_string();
        warp.transform(&shift);
        assert_eq!(warp.to_svg_string(), once);

        let mut live = Warp::new(SQUARE, &config(BasisMode::Live)).unwrap();
        live.transform(&shift);
        live.transform(&shift);
        assert_ne!(live.to_svg_string(), once);
    }

    #[test]
    fn pre_interpolate_measures_transformed_positions() {
        let stretch = |p: Point| Point::new(p.x * 4.0, p.y);
        let mut warp = Warp::new(SQUARE, &WarpConfig::default()).unwrap();
        assert!(warp.pre_interpolate(&stretch, 10.0).unwrap());
        // Horizontal edges span 40 after stretching; vertical edges stay 10.
        assert_eq!(counts(&warp), vec![10, 4]);
        // Pairs of quarters span 20 once stretched, so the line halves.
        assert!(warp.pre_extrapolate(&stretch, 20.0));
        assert_eq!(counts(&warp)[1], 2);
    }

    #[test]
    fn failed_interpolate_changes_nothing() {
        let mut warp = Warp::new(
            SQUARE,
            &WarpConfig {
                limits: ResolutionLimits {
                    max_depth: 32,
                    max_segments: 8,
                },
                ..WarpConfig::default()
            },
        )
        .unwrap();
        let result = warp.interpolate(1.0);
        assert!(matches!(
            result,
            Err(WarpError::ResolutionLimitExceeded {
                limit: ResolutionLimit::SegmentCount,
                ..
            })
        ));
        assert_eq!(counts(&warp), vec![4, 1]);
    }

    #[test]
    fn custom_metric() {
        let horizontal = |a: &Point, b: &Point| (a.x - b.x).abs();
        let mut warp = Warp::new(SQUARE, &WarpConfig::default()).unwrap();
        warp.interpolate_with(5.0, &horizontal).unwrap();
        // Only the horizontal edges (span 10) are split.
        assert_eq!(counts(&warp), vec![6, 2]);
    }
}
