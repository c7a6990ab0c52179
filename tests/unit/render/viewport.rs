use super::*;
use crate::model::{Rgb, Shape};

fn approx(a: Point, b: Point) {
    assert!(
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
        "{a:?} != {b:?}"
    );
}

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas {
        width: w,
        height: h,
    }
}

fn two_point_drawing() -> Drawing {
    [Shape::new(
        vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)],
        Rgb::new(0.5, 0.2, 0.1),
    )]
    .into_iter()
    .collect()
}

#[test]
fn fit_maps_bounds_inside_margin_with_inverted_y() {
    let vp = Viewport::for_drawing(&two_point_drawing(), canvas(100, 100), 10).unwrap();
    assert_eq!(vp.bounds(), Rect::new(1.0, -4.0, 3.0, -2.0));
    assert!((vp.scale() - 40.0).abs() < 1e-9);

    // Larger document y ends up lower on screen.
    approx(vp.pixel_of(Point::new(1.0, 2.0)), Point::new(10.0, 10.0));
    approx(vp.pixel_of(Point::new(3.0, 4.0)), Point::new(90.0, 90.0));
    approx(
        vp.document_to_pixel() * Point::new(3.0, 4.0),
        Point::new(90.0, 90.0),
    );
}

#[test]
fn extents_cover_the_whole_canvas() {
    let vp = Viewport::for_drawing(&two_point_drawing(), canvas(100, 100), 10).unwrap();
    let e = vp.extents();
    approx(Point::new(e.x0, e.y0), Point::new(0.75, -4.25));
    approx(Point::new(e.x1, e.y1), Point::new(3.25, -1.75));
}

#[test]
fn aspect_ratio_is_preserved_and_centered() {
    let d: Drawing = [Shape::new(
        vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 5.0)],
        Rgb::new(0.0, 0.0, 0.0),
    )]
    .into_iter()
    .collect();
    let vp = Viewport::for_drawing(&d, canvas(200, 100), 0).unwrap();
    assert!((vp.scale() - 20.0).abs() < 1e-9);
    approx(vp.pixel_of(Point::new(0.0, 0.0)), Point::new(0.0, 0.0));
    approx(vp.pixel_of(Point::new(10.0, 5.0)), Point::new(200.0, 100.0));
}

#[test]
fn single_point_drawing_is_centered() {
    let d: Drawing = [Shape::new(vec![Point::new(7.0, -3.0)], Rgb::new(1.0, 0.0, 0.0))]
        .into_iter()
        .collect();
    let vp = Viewport::for_drawing(&d, canvas(64, 32), 4).unwrap();
    approx(vp.pixel_of(Point::new(7.0, -3.0)), Point::new(32.0, 16.0));
}

#[test]
fn empty_drawing_is_reported() {
    let d: Drawing = [Shape::new(vec![], Rgb::new(1.0, 0.0, 0.0))]
        .into_iter()
        .collect();
    let err = Viewport::for_drawing(&d, canvas(64, 64), 4).unwrap_err();
    assert!(matches!(err, PolytraceError::EmptyDrawing));
}

#[test]
fn margin_must_leave_room() {
    let err = Viewport::for_drawing(&two_point_drawing(), canvas(20, 20), 10).unwrap_err();
    assert!(matches!(err, PolytraceError::Validation(_)));
}

#[test]
fn extent_wider_than_f64_range_still_fits() {
    let d: Drawing = [Shape::new(
        vec![Point::new(-1.0e308, 0.0), Point::new(1.0e308, 1.0)],
        Rgb::new(0.0, 0.0, 1.0),
    )]
    .into_iter()
    .collect();
    assert!(d.render_bounds().unwrap().width().is_infinite());

    let vp = Viewport::for_drawing(&d, canvas(64, 32), 2).unwrap();
    assert!(vp.scale().is_finite() && vp.scale() > 0.0);
    assert!(vp.world_to_pixel().is_finite());
    let left = vp.pixel_of(Point::new(-1.0e308, 0.0));
    let right = vp.pixel_of(Point::new(1.0e308, 1.0));
    assert!((left.x - 2.0).abs() < 1e-6, "{left:?}");
    assert!((right.x - 62.0).abs() < 1e-6, "{right:?}");
}
