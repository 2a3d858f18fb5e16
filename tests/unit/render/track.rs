use super::*;

const BG: [u8; 4] = [20, 20, 20, 255];
const RED: [u8; 4] = [255, 0, 0, 255];

fn diagonal(n: usize) -> Vec<Coordinate> {
    (0..n)
        .map(|i| Coordinate::new(i as f64, i as f64))
        .collect()
}

fn style(spacing: u32) -> DotStyle {
    DotStyle {
        color: Rgb8::RED,
        radius: 3,
        spacing,
        margin: 0.1,
    }
}

#[test]
fn dots_land_on_projected_points() {
    let canvas = Canvas::filled(100, 100, BG);
    let coords = diagonal(3);
    let out = draw_track(&canvas, &coords, &style(1)).unwrap();

    // Square box on a square canvas: inset 10px, 80px span.
    assert_eq!(out.pixel(10, 90), Some(RED));
    assert_eq!(out.pixel(50, 50), Some(RED));
    assert_eq!(out.pixel(90, 10), Some(RED));
    assert_eq!(out.pixel(90, 90), Some(BG));
    assert_eq!(out.pixel(0, 0), Some(BG));
}

#[test]
fn spacing_skips_points_but_not_the_bounding_box() {
    let canvas = Canvas::filled(100, 100, BG);
    let coords = diagonal(3);
    let out = draw_track(&canvas, &coords, &style(2)).unwrap();

    assert_eq!(out.pixel(10, 90), Some(RED));
    assert_eq!(out.pixel(50, 50), Some(BG));
    assert_eq!(out.pixel(90, 10), Some(RED));
}

#[test]
fn input_canvas_is_not_modified() {
    let canvas = Canvas::filled(40, 30, BG);
    let before = canvas.clone();
    let _ = draw_track(&canvas, &diagonal(5), &style(1)).unwrap();
    assert_eq!(canvas, before);
}

#[test]
fn single_point_track_draws_at_center() {
    let canvas = Canvas::filled(50, 40, BG);
    let out = draw_track(&canvas, &[Coordinate::new(3.0, 4.0)], &style(1)).unwrap();
    assert_eq!(out.pixel(25, 20), Some(RED));
}

#[test]
fn empty_track_is_rejected() {
    let canvas = Canvas::filled(10, 10, BG);
    assert!(matches!(
        draw_track(&canvas, &[], &style(1)).unwrap_err(),
        crate::foundation::error::TrackArtError::EmptyTrack(_)
    ));
}
