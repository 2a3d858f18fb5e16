use super::*;

fn loop_track() -> Vec<Coordinate> {
    vec![
        Coordinate::new(46.50, 6.60),
        Coordinate::new(46.52, 6.60),
        Coordinate::new(46.52, 6.64),
        Coordinate::new(46.50, 6.64),
        Coordinate::new(46.50, 6.60),
    ]
}

#[test]
fn snapshot_has_requested_size_and_paper_corners() {
    let mut p = SketchMapProvider::default();
    let snap = p.snapshot(&loop_track(), 160, 120).unwrap();
    assert_eq!(snap.dimensions(), (160, 120));
    let corner = snap.pixel(0, 0).unwrap();
    assert_eq!(corner[3], 255);
}

#[test]
fn track_line_is_visible_and_reddish() {
    let coords = loop_track();
    let mut p = SketchMapProvider::default();
    let snap = p.snapshot(&coords, 200, 100).unwrap();

    let projector = Projector::new(&BoundingBox::compute(&coords).unwrap(), 200, 100, p.margin);
    let mid = projector.project(Coordinate::new(46.52, 6.62));
    let px = snap.pixel(mid.x as u32, mid.y.round() as u32).unwrap();
    assert!(px[0] > 200 && px[1] < 120 && px[2] < 120, "{px:?}");
}

#[test]
fn single_point_track_still_renders() {
    let mut p = SketchMapProvider::default();
    let snap = p.snapshot(&[Coordinate::new(0.0, 0.0)], 64, 48).unwrap();
    let px = snap.pixel(32, 24).unwrap();
    assert!(px[0] > 200 && px[1] < 120, "{px:?}");
}

#[test]
fn empty_track_is_a_snapshot_error() {
    let mut p = SketchMapProvider::default();
    assert!(matches!(
        p.snapshot(&[], 10, 10).unwrap_err(),
        TrackArtError::Snapshot(_)
    ));
}

#[test]
fn nice_step_rounds_up_to_1_2_5() {
    for (raw, want) in [(0.003, 0.005), (0.02, 0.02), (0.13, 0.2), (7.0, 10.0)] {
        let got = nice_step(raw);
        assert!((got - want).abs() < want * 1e-9, "{raw} -> {got}");
    }
}

fn one_ulp_tall_box() -> BoundingBox {
    BoundingBox {
        min_lat: 45.0,
        max_lat: f64::from_bits(45.0f64.to_bits() + 1),
        min_lon: -122.0,
        max_lon: -122.0,
    }
}

#[test]
fn graticule_of_a_one_ulp_box_is_empty() {
    let bbox = one_ulp_tall_box();
    let to_px = Projector::new(&bbox, 160, 120, 0.1).to_affine();
    assert!(graticule(&bbox, to_px, 160, 120, 8).is_empty());
}

#[test]
fn one_ulp_track_still_renders() {
    let bbox = one_ulp_tall_box();
    let coords = [
        Coordinate::new(bbox.min_lat, bbox.min_lon),
        Coordinate::new(bbox.max_lat, bbox.min_lon),
    ];
    let mut p = SketchMapProvider::default();
    let snap = p.snapshot(&coords, 160, 120).unwrap();
    assert_eq!(snap.dimensions(), (160, 120));
}

#[test]
fn grid_values_are_bounded_multiples_of_step() {
    let got: Vec<f64> = grid_values(0.05, 0.35, 0.1).collect();
    assert_eq!(got.len(), 3);
    for (v, want) in got.iter().zip([0.1, 0.2, 0.3]) {
        assert!((v - want).abs() < 1e-12, "{v} vs {want}");
    }

    assert_eq!(grid_values(0.0, 1e9, 1e-3).count(), MAX_GRID_LINES);
    assert_eq!(grid_values(0.41, 0.45, 0.1).count(), 0);
}
