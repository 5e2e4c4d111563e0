use scopebox::{DragGesture, FitTransform, ImagePoint, ImageSize, SurfacePoint};

#[test]
fn fit_halves_an_image_twice_the_surface() {
    let t = FitTransform::fit(ImageSize::new(800, 600), 400.0, 300.0);
    assert_eq!(t.scale, 0.5);
    assert_eq!(t.offset_x, 0.0);
    assert_eq!(t.offset_y, 0.0);
}

#[test]
fn fit_centres_the_narrow_axis() {
    // Tall surface: width limits the scale, the image is centred vertically.
    let t = FitTransform::fit(ImageSize::new(200, 100), 400.0, 600.0);
    assert_eq!(t.scale, 2.0);
    assert_eq!(t.offset_x, 0.0);
    assert_eq!(t.offset_y, 200.0);
}

#[test]
fn surface_image_round_trip() {
    let transforms = [
        FitTransform::fit(ImageSize::new(800, 600), 400.0, 300.0),
        FitTransform::fit(ImageSize::new(1920, 1080), 1013.0, 777.0),
        FitTransform::fit(ImageSize::new(7, 3), 1000.0, 1000.0),
    ];
    let points = [
        ImagePoint::new(0.0, 0.0),
        ImagePoint::new(123.456, 78.9),
        ImagePoint::new(-50.0, 1e4),
    ];
    for t in transforms {
        for p in points {
            let back = t.to_image_space(t.to_surface_space(p));
            assert!((back.x - p.x).abs() < 1e-9, "{p:?} -> {back:?}");
            assert!((back.y - p.y).abs() < 1e-9, "{p:?} -> {back:?}");
        }
    }
}

#[test]
fn pointer_maps_through_the_letterbox() {
    let t = FitTransform::fit(ImageSize::new(100, 100), 300.0, 100.0);
    let p = t.to_image_space(SurfacePoint::new(150.0, 50.0));
    assert_eq!(p, ImagePoint::new(50.0, 50.0));
}

#[test]
fn hover_has_no_rectangle() {
    let g = DragGesture::hover(ImagePoint::new(3.0, 4.0));
    assert!(!g.is_dragging());
    assert!(g.rect().is_none());
    assert!(DragGesture::default().rect().is_none());
}

#[test]
fn drag_rect_is_normalized() {
    let g = DragGesture::drag(ImagePoint::new(110.0, 60.0), ImagePoint::new(10.0, 10.0));
    let r = g.rect().unwrap();
    assert_eq!(r.top_left, ImagePoint::new(10.0, 10.0));
    assert_eq!(r.bottom_right, ImagePoint::new(110.0, 60.0));
    assert_eq!((r.width(), r.height()), (100.0, 50.0));
}
