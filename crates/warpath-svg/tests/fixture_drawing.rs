//! Integration test: warp every element of the fixture drawing and write
//! the result back out as SVG.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::PathBuf;

use warpath_core::{BasisMode, Point, SegmentKind, WarpConfig};
use warpath_svg::{SvgDocument, Warp, parse};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

fn fixture() -> String {
    let path = workspace_root().join("assets/fixtures/drawing.svg");
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {path:?}: {e}"))
}

fn wave(p: Point) -> Point {
    Point::new(p.x, p.y + (p.x / 15.0).sin() * 4.0)
}

#[test]
fn every_shape_becomes_a_normalized_path() {
    for curve_type in [SegmentKind::Line, SegmentKind::Quadratic, SegmentKind::Cubic] {
        let config = WarpConfig {
            curve_type,
            ..WarpConfig::default()
        };
        let warp = Warp::new(&fixture(), &config).expect("fixture should load");
        assert_eq!(warp.paths().count(), 5);
        for state in warp.paths() {
            assert!(!state.working().is_empty());
            assert!(
                state.working().segments().all(|s| s.kind() == curve_type),
                "{curve_type:?}"
            );
        }
    }
}

#[test]
fn warped_document_round_trips() {
    let mut warp = Warp::new(&fixture(), &WarpConfig::default()).unwrap();
    let did_work = warp.pre_interpolate(&wave, 5.0).unwrap();
    assert!(did_work);
    warp.transform(&wave);

    let out = warp.to_svg_string();
    assert!(out.contains("<title>warpath fixture</title>"), "{out}");
    assert!(out.contains("stroke-width=\"1\""));
    assert!(!out.contains("<rect") && !out.contains("<circle") && !out.contains("<polyline"));

    // The written document reads back with the same geometry.
    let reread = SvgDocument::parse(&out).unwrap();
    let paths = reread.path_nodes();
    assert_eq!(paths.len(), 5);
    for (id, state) in paths.iter().zip(warp.paths()) {
        let d = reread.geometry(*id).unwrap();
        let path = parse(d).unwrap();
        assert_eq!(path.segment_count(), state.working().segment_count());
    }

    let output_path = workspace_root().join("target/fixture-drawing-warped.svg");
    if std::fs::create_dir_all(output_path.parent().unwrap()).is_ok() {
        std::fs::write(&output_path, &out).unwrap();
        eprintln!("SVG written to {output_path:?} ({} bytes)", out.len());
    }
}

#[test]
fn pre_interpolated_segments_stay_short_after_stretching() {
    let threshold = 5.0;
    let stretch = |p: Point| Point::new(p.x * 3.0, p.y * 0.5);
    let mut warp = Warp::new(&fixture(), &WarpConfig::default()).unwrap();
    warp.pre_interpolate(&stretch, threshold).unwrap();
    warp.transform(&stretch);
    for state in warp.paths() {
        for segment in state.working().segments() {
            assert!(segment.first().distance(*segment.last()) <= threshold + 1e-9);
        }
    }
}

#[test]
fn locked_session_replays_from_the_same_basis() {
    let config = WarpConfig {
        basis_mode: BasisMode::Locked,
        ..WarpConfig::default()
    };
    let mut warp = Warp::new(&fixture(), &config).unwrap();
    warp.interpolate(8.0).unwrap();

    let mut frames = Vec::new();
    for _ in 0..3 {
        warp.transform(&wave);
        frames.push(warp.to_svg_string());
    }
    assert!(frames.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn extrapolate_undoes_interpolate() {
    let mut warp = Warp::new(&fixture(), &WarpConfig::default()).unwrap();
    let original: Vec<usize> = warp.paths().map(|s| s.working().segment_count()).collect();

    warp.interpolate(2.0).unwrap();
    let refined: Vec<usize> = warp.paths().map(|s| s.working().segment_count()).collect();
    assert!(refined.iter().zip(&original).all(|(r, o)| r >= o));

    warp.extrapolate(2.0);
    let merged: Vec<usize> = warp.paths().map(|s| s.working().segment_count()).collect();
    assert!(merged.iter().zip(&refined).all(|(m, r)| m <= r));
}
