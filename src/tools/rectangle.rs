//! Plain measurement rectangle and the division-size rectangle.

use crate::data::calibration::CalibrationRecord;
use crate::data::geometry::{DragRect, ImageSize};
use crate::surface::DrawSurface;

use super::common::edge_guides;
use super::{OverlayStyle, Readout};

pub(super) fn render_simple(
    surface: &mut dyn DrawSurface,
    image: ImageSize,
    calibration: &CalibrationRecord,
    rect: &DragRect,
    style: &OverlayStyle,
) {
    let tl = rect.top_left;
    let br = rect.bottom_right;

    // Sub-grid; the outer edges are covered by the guides.
    let n = style.grid_divisions.max(1);
    surface.begin_path();
    for i in 1..n {
        let f = i as f64 / n as f64;
        let x = tl.x + rect.width() * f;
        let y = tl.y + rect.height() * f;
        surface.move_to(x, tl.y);
        surface.line_to(x, br.y);
        surface.move_to(tl.x, y);
        surface.line_to(br.x, y);
    }
    surface.set_stroke_color(calibration.color(0.1));
    surface.stroke();

    surface.begin_path();
    edge_guides(surface, image, rect);
    surface.set_stroke_color(calibration.color(1.0));
    surface.stroke();

    surface.set_fill_color(calibration.color(0.1));
    surface.fill_rect(tl.x, tl.y, rect.width(), rect.height());
}

pub(super) fn readout_simple(calibration: &CalibrationRecord, rect: &DragRect) -> Readout {
    Readout {
        below: vec![calibration.x_axis().label(rect.width())],
        right: Some(calibration.y_axis().label(rect.height())),
    }
}

pub(super) fn render_division(
    surface: &mut dyn DrawSurface,
    image: ImageSize,
    calibration: &CalibrationRecord,
    rect: &DragRect,
) {
    surface.begin_path();
    edge_guides(surface, image, rect);
    surface.set_stroke_color(calibration.color(0.4));
    surface.stroke();
}

pub(super) fn readout_division(rect: &DragRect) -> Readout {
    Readout {
        below: vec![format!("{}px", rect.width().round())],
        right: Some(format!("{}px", rect.height().round())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::geometry::ImagePoint;

    #[test]
    fn division_labels_are_rounded_pixels() {
        let rect = DragRect::from_corners(ImagePoint::new(0.0, 0.0), ImagePoint::new(99.6, 49.4));
        let r = readout_division(&rect);
        assert_eq!(r.below, vec!["100px".to_string()]);
        assert_eq!(r.right.as_deref(), Some("49px"));
    }
}
