use scopebox::data::geometry::{DragRect, ImagePoint};
use scopebox::surface::{DrawCommand, Subpath};
use scopebox::{
    CalibrationRecord, DragGesture, ImageSize, OverlayColor, OverlayStyle, RecordingSurface,
    ToolKind,
};

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> DragRect {
    DragRect::from_corners(ImagePoint::new(x0, y0), ImagePoint::new(x1, y1))
}

fn volts_and_seconds() -> CalibrationRecord {
    CalibrationRecord {
        x_division_pixels: Some(100.0),
        y_division_pixels: Some(100.0),
        x_division_scale: Some(2.0),
        y_division_scale: Some(2.0),
        x_unit: Some("ms".into()),
        y_unit: Some("V".into()),
        overlay_color: None,
    }
}

#[test]
fn rectangle_width_label() {
    let cal = CalibrationRecord {
        x_division_pixels: Some(100.0),
        x_division_scale: Some(2.0),
        x_unit: Some("V".into()),
        ..Default::default()
    };
    let r = ToolKind::SimpleRectangle.readout(&cal, &rect(0.0, 0.0, 50.0, 10.0));
    assert_eq!(r.below, vec!["1.00 V".to_string()]);
}

#[test]
fn rectangle_labels_both_axes() {
    let r = ToolKind::SimpleRectangle.readout(&volts_and_seconds(), &rect(10.0, 10.0, 60.0, 160.0));
    assert_eq!(r.below, vec!["1.00 ms".to_string()]);
    assert_eq!(r.right.as_deref(), Some("3.00 V"));
}

#[test]
fn zero_division_size_does_not_panic() {
    let cal = CalibrationRecord {
        x_division_pixels: Some(0.0),
        x_division_scale: Some(2.0),
        ..Default::default()
    };
    let r = ToolKind::SimpleRectangle.readout(&cal, &rect(0.0, 0.0, 25.0, 0.0));
    assert_eq!(r.below, vec!["50.0".to_string()]);
    assert_eq!(r.right.as_deref(), Some("0.00"));
}

#[test]
fn two_period_sine_matches_rectangle_over_one_period() {
    let cal = volts_and_seconds();
    let sine = ToolKind::sine(2.0, 0.0).readout(&cal, &rect(0.0, 0.0, 200.0, 40.0));
    let plain = ToolKind::SimpleRectangle.readout(&cal, &rect(0.0, 0.0, 100.0, 40.0));
    assert_eq!(sine.below[0], format!("T = {}", plain.below[0]));
    assert_eq!(sine.below[1], "f = 500 Hz");
    assert_eq!(sine.right, plain.right);
}

#[test]
fn sine_without_parseable_unit_omits_frequency() {
    let cal = CalibrationRecord::default();
    let r = ToolKind::sine(1.0, 0.0).readout(&cal, &rect(0.0, 0.0, 80.0, 10.0));
    assert_eq!(r.below, vec!["T = 80.0".to_string()]);
}

#[test]
fn degenerate_lengths_fall_back_to_one() {
    let cal = volts_and_seconds();
    let r = rect(0.0, 0.0, 100.0, 10.0);
    assert_eq!(
        ToolKind::time_constant(0.0).readout(&cal, &r),
        ToolKind::time_constant(1.0).readout(&cal, &r)
    );
    assert_eq!(
        ToolKind::sine(f64::NAN, 0.0).readout(&cal, &r),
        ToolKind::sine(1.0, 0.0).readout(&cal, &r)
    );
}

#[test]
fn time_constant_label() {
    let r = ToolKind::time_constant(1.0).readout(&volts_and_seconds(), &rect(0.0, 0.0, 50.0, 50.0));
    assert_eq!(r.below, vec!["\u{03c4} = 1.00 ms".to_string()]);
    assert_eq!(r.right.as_deref(), Some("1.00 V"));
}

#[test]
fn division_rectangle_shows_pixels() {
    let r = ToolKind::DivisionRectangle.readout(&volts_and_seconds(), &rect(10.0, 10.0, 110.0, 60.0));
    assert_eq!(r.below, vec!["100px".to_string()]);
    assert_eq!(r.right.as_deref(), Some("50px"));
}

#[test]
fn hover_draws_only_a_crosshair() {
    let mut s = RecordingSurface::new();
    let gesture = DragGesture::hover(ImagePoint::new(20.0, 30.0));
    ToolKind::SimpleRectangle.render(
        &mut s,
        ImageSize::new(200, 100),
        &CalibrationRecord::default(),
        &gesture,
        &OverlayStyle::default(),
    );
    assert!(s.texts().is_empty());
    let strokes: Vec<_> = s.strokes().collect();
    assert_eq!(strokes.len(), 1);
    let DrawCommand::Stroke { path, color, .. } = strokes[0] else {
        unreachable!()
    };
    assert_eq!(path[0].points, vec![[20.0, 0.0], [20.0, 100.0]]);
    assert_eq!(path[1].points, vec![[0.0, 30.0], [200.0, 30.0]]);
    assert_eq!(color.a(), 51);
}

#[test]
fn drag_renders_labels_at_their_anchors() {
    let mut s = RecordingSurface::new();
    let gesture = DragGesture::drag(ImagePoint::new(100.0, 50.0), ImagePoint::new(0.0, 0.0));
    let style = OverlayStyle::default();
    ToolKind::SimpleRectangle.render(
        &mut s,
        ImageSize::new(400, 300),
        &volts_and_seconds(),
        &gesture,
        &style,
    );

    let texts: Vec<_> = s
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, x, y, .. } => Some((text.clone(), *x, *y)),
            _ => None,
        })
        .collect();
    assert_eq!(texts[0], ("2.00 ms".to_string(), 50.0, 70.0));
    assert_eq!(texts[1], ("1.00 V".to_string(), 110.0, 32.5));
    assert_eq!(s.fills().count(), 1);
}

#[test]
fn overlay_color_is_used() {
    let yellow = OverlayColor::new("Yellow", [255, 221, 0]);
    let mut cal = volts_and_seconds();
    cal.overlay_color = Some(yellow.clone());
    let mut s = RecordingSurface::new();
    ToolKind::sine(1.0, 0.0).render(
        &mut s,
        ImageSize::new(400, 300),
        &cal,
        &DragGesture::drag(ImagePoint::new(0.0, 0.0), ImagePoint::new(200.0, 100.0)),
        &OverlayStyle::default(),
    );
    let colors: Vec<_> = s
        .strokes()
        .map(|cmd| match cmd {
            DrawCommand::Stroke { color, .. } => *color,
            _ => unreachable!(),
        })
        .collect();
    // guides, then curve plus period ticks
    assert_eq!(colors, vec![yellow.shade(0.5), yellow.shade(0.3)]);
    assert!(s.commands.iter().all(|c| match c {
        DrawCommand::Text { color, .. } => *color == yellow.shade(1.0),
        _ => true,
    }));
}

#[test]
fn short_sine_period_skips_curve() {
    let mut s = RecordingSurface::new();
    ToolKind::sine(1.0, 0.0).render(
        &mut s,
        ImageSize::new(400, 300),
        &CalibrationRecord::default(),
        &DragGesture::drag(ImagePoint::new(0.0, 0.0), ImagePoint::new(5.0, 100.0)),
        &OverlayStyle::default(),
    );
    assert_eq!(s.strokes().count(), 1);
}

fn stroke_paths(s: &RecordingSurface) -> Vec<Vec<Subpath>> {
    s.strokes()
        .map(|cmd| match cmd {
            DrawCommand::Stroke { path, .. } => path.clone(),
            _ => unreachable!(),
        })
        .collect()
}

#[test]
fn sine_ticks_follow_the_drag_origin() {
    let mut s = RecordingSurface::new();
    ToolKind::sine(2.0, 0.0).render(
        &mut s,
        ImageSize::new(400, 200),
        &CalibrationRecord::default(),
        &DragGesture::drag(ImagePoint::new(30.0, 0.0), ImagePoint::new(230.0, 100.0)),
        &OverlayStyle::default(),
    );
    let strokes = stroke_paths(&s);
    assert_eq!(strokes.len(), 2);
    let curve_and_ticks = &strokes[1];

    let ticks: Vec<_> = curve_and_ticks[1..].iter().map(|p| p.points.clone()).collect();
    assert_eq!(
        ticks,
        vec![
            vec![[30.0, 0.0], [30.0, 100.0]],
            vec![[130.0, 0.0], [130.0, 100.0]],
            vec![[230.0, 0.0], [230.0, 100.0]],
            vec![[330.0, 0.0], [330.0, 100.0]],
        ]
    );

    // The curve spans the image and crosses the midline at the drag start.
    let curve = &curve_and_ticks[0].points;
    assert_eq!(curve[0][0], 0.0);
    assert_eq!(curve.last().map(|p| p[0]), Some(398.0));
    let at_start = curve.iter().find(|p| p[0] == 30.0).unwrap();
    assert_eq!(at_start[1], 50.0);
}

#[test]
fn time_constant_guide_tangent_and_curve() {
    let mut s = RecordingSurface::new();
    ToolKind::time_constant(5.0).render(
        &mut s,
        ImageSize::new(400, 200),
        &CalibrationRecord::default(),
        &DragGesture::drag(ImagePoint::new(0.0, 0.0), ImagePoint::new(250.0, 100.0)),
        &OverlayStyle::default(),
    );
    let strokes = stroke_paths(&s);
    assert_eq!(strokes.len(), 1);
    let path = &strokes[0];
    assert_eq!(path.len(), 7);

    // Four edge guides, then the guide one tau after the start.
    assert_eq!(path[4].points, vec![[50.0, 0.0], [50.0, 200.0]]);
    // Tangent from the final level at tau back to the start point.
    assert_eq!(path[5].points, vec![[50.0, 100.0], [0.0, 0.0]]);

    let curve = &path[6].points;
    assert_eq!(curve[0], [0.0, 0.0]);
    assert!(curve.iter().all(|p| (0.0..=100.0).contains(&p[1])));
    let one_tau = curve.iter().find(|p| p[0] == 50.0).unwrap();
    assert!((one_tau[1] - 100.0 * (1.0 - (-1.0f64).exp())).abs() < 1e-9);
}

#[test]
fn leftward_time_constant_stays_near_the_image() {
    let mut s = RecordingSurface::new();
    ToolKind::time_constant(1.0).render(
        &mut s,
        ImageSize::new(4000, 300),
        &CalibrationRecord::default(),
        &DragGesture::drag(ImagePoint::new(100.0, 50.0), ImagePoint::new(98.0, 150.0)),
        &OverlayStyle::default(),
    );
    let strokes = stroke_paths(&s);
    let path = &strokes[0];
    assert_eq!(path.len(), 7);
    assert!(path
        .iter()
        .flat_map(|sub| sub.points.iter())
        .all(|p| (-300.0..=600.0).contains(&p[1]) && (p[1] as f32).is_finite()));
    // Sampling stops long before the right edge.
    assert!(path[6].points.last().unwrap()[0] < 200.0);
}
