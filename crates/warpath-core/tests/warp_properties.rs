//! Integration test: properties that hold across chained warp operations.

#![allow(clippy::unwrap_used)]

use warpath_core::{
    BasisMode, EuclideanDistance, Metric, Path, PathState, Point, ResolutionLimits, Segment,
    SegmentKind, Subpath, TransformChain, extrapolate, interpolate,
};

fn drawing() -> Path {
    Path::new(vec![
        Subpath::closed(vec![
            Segment::quadratic(
                Point::new(0.0, 0.0),
                Point::new(20.0, -10.0),
                Point::new(40.0, 0.0),
            ),
            Segment::line(Point::new(40.0, 0.0), Point::new(40.0, 30.0)),
            Segment::cubic(
                Point::new(40.0, 30.0),
                Point::new(30.0, 45.0),
                Point::new(10.0, 45.0),
                Point::new(0.0, 30.0),
            ),
            Segment::line(Point::new(0.0, 30.0), Point::new(0.0, 0.0)),
        ]),
        Subpath::open(vec![Segment::line(Point::new(60.0, 0.0), Point::new(60.0, 50.0))]),
    ])
}

fn swirl(p: Point) -> Point {
    let (cx, cy) = (30.0, 25.0);
    let (dx, dy) = (p.x - cx, p.y - cy);
    let angle = dx.hypot(dy) / 40.0;
    let (sin, cos) = angle.sin_cos();
    Point::new(
        cx + cos.mul_add(dx, -sin * dy),
        cy + sin.mul_add(dx, cos * dy),
    )
}

fn assert_well_formed(path: &Path) {
    for subpath in path.subpaths() {
        for segment in &subpath.segments {
            assert_eq!(segment.points().len(), segment.kind().arity());
        }
        for pair in subpath.segments.windows(2) {
            assert_eq!(pair[0].last(), pair[1].first());
        }
    }
}

#[test]
fn chained_operations_keep_arity_and_continuity() {
    let chain = TransformChain::new().then(swirl).then(|p: Point| Point::new(p.x * 1.5, p.y));
    let mut state = PathState::new(drawing(), BasisMode::Live);
    let limits = ResolutionLimits::default();

    state.pre_interpolate(&chain, 4.0, &EuclideanDistance, &limits).unwrap();
    assert_well_formed(state.working());
    state.transform(&chain);
    assert_well_formed(state.working());
    state.extrapolate(6.0, &EuclideanDistance);
    assert_well_formed(state.working());
    state.interpolate(3.0, &EuclideanDistance, &limits).unwrap();
    assert_well_formed(state.working());

    for segment in state.working().segments() {
        assert!(EuclideanDistance.measure_segment(segment) <= 3.0);
    }
}

#[test]
fn closed_subpaths_stay_closed() {
    let mut state = PathState::new(drawing(), BasisMode::Locked);
    state.interpolate(5.0, &EuclideanDistance, &ResolutionLimits::default()).unwrap();
    state.transform(&swirl);
    let subpaths = state.working().subpaths();
    assert!(subpaths[0].closed);
    assert!(!subpaths[1].closed);
    let ring = &subpaths[0].segments;
    let (first, last) = (ring.first().unwrap(), ring.last().unwrap());
    assert_eq!(last.last(), first.first());
}

#[test]
fn locked_basis_survives_transforms() {
    let mut state = PathState::new(drawing(), BasisMode::Locked);
    for _ in 0..5 {
        state.transform(&swirl);
    }
    assert_eq!(state.basis(), &drawing());

    let mut once = PathState::new(drawing(), BasisMode::Locked);
    once.transform(&swirl);
    assert_eq!(state.working(), once.working());
}

#[test]
fn ten_unit_line_counts() {
    let line = Segment::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    let fine = interpolate(&[line.clone()], 3.0, &EuclideanDistance).unwrap();
    assert!(fine.did_work);
    assert_eq!(fine.output.len(), 4);

    let expectations = [(3.0, 4, false), (5.0, 2, true), (10.0, 1, true)];
    for (threshold, count, did_work) in expectations {
        let merged = extrapolate(&fine.output, threshold, &EuclideanDistance);
        assert_eq!(merged.output.len(), count, "threshold {threshold}");
        assert_eq!(merged.did_work, did_work, "threshold {threshold}");
    }
    assert_eq!(extrapolate(&fine.output, 10.0, &EuclideanDistance).output, vec![line]);
}

#[test]
fn segment_kinds_survive_adaptive_steps() {
    let mut state = PathState::new(drawing(), BasisMode::Live);
    state.interpolate(2.0, &EuclideanDistance, &ResolutionLimits::default()).unwrap();
    let kinds = |state: &PathState| {
        let mut kinds: Vec<SegmentKind> = state.working().segments().map(Segment::kind).collect();
        kinds.dedup();
        kinds
    };
    assert_eq!(
        kinds(&state),
        vec![
            SegmentKind::Quadratic,
            SegmentKind::Line,
            SegmentKind::Cubic,
            SegmentKind::Line,
        ]
    );
}
