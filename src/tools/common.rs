use crate::data::calibration::CalibrationRecord;
use crate::data::geometry::{DragRect, ImagePoint, ImageSize};
use crate::surface::{DrawSurface, TextAlign};

use super::{OverlayStyle, Readout};

/// Horizontal sampling step for curves: a hundredth of the drag width, at
/// least one image pixel.
///
/// ```
/// # use scopebox::tools::sample_step;
/// assert_eq!(sample_step(50.0), 1.0);
/// assert_eq!(sample_step(400.0), 4.0);
/// ```
pub fn sample_step(rect_width: f64) -> f64 {
    let step = rect_width / 100.0;
    if step.is_finite() {
        step.max(1.0)
    } else {
        1.0
    }
}

/// Shape parameter guarded against zero, negative and non-finite values.
pub(super) fn effective_length(length: f64) -> f64 {
    if length.is_finite() && length > 0.0 {
        length
    } else {
        1.0
    }
}

/// Faint full-extent lines through the pointer.
pub(super) fn crosshair(
    surface: &mut dyn DrawSurface,
    image: ImageSize,
    calibration: &CalibrationRecord,
    p: ImagePoint,
    style: &OverlayStyle,
) {
    surface.save();
    surface.set_line_width(style.line_width);
    surface.set_line_dash(&[]);
    surface.set_stroke_color(calibration.color(0.2));
    surface.begin_path();
    vertical(surface, image, p.x);
    horizontal(surface, image, p.y);
    surface.stroke();
    surface.restore();
}

/// Add a vertical line across the whole image to the current path.
pub(super) fn vertical(surface: &mut dyn DrawSurface, image: ImageSize, x: f64) {
    surface.move_to(x, 0.0);
    surface.line_to(x, image.height as f64);
}

/// Add a horizontal line across the whole image to the current path.
pub(super) fn horizontal(surface: &mut dyn DrawSurface, image: ImageSize, y: f64) {
    surface.move_to(0.0, y);
    surface.line_to(image.width as f64, y);
}

/// Full-extent lines through all four edges of `rect`, as one path.
pub(super) fn edge_guides(surface: &mut dyn DrawSurface, image: ImageSize, rect: &DragRect) {
    vertical(surface, image, rect.top_left.x);
    vertical(surface, image, rect.bottom_right.x);
    horizontal(surface, image, rect.top_left.y);
    horizontal(surface, image, rect.bottom_right.y);
}

pub(super) fn draw_readout(
    surface: &mut dyn DrawSurface,
    calibration: &CalibrationRecord,
    rect: &DragRect,
    readout: &Readout,
    style: &OverlayStyle,
) {
    let font = style.font_size;
    let offset = style.label_offset;

    surface.set_font_size(font);
    surface.set_fill_color(calibration.color(1.0));

    surface.set_text_align(TextAlign::Center);
    let cx = rect.top_left.x + rect.width() / 2.0;
    let mut y = rect.bottom_right.y + offset * 2.0;
    for line in &readout.below {
        surface.fill_text(line, cx, y);
        y += font * 1.5;
    }

    if let Some(right) = &readout.right {
        surface.set_text_align(TextAlign::Left);
        surface.fill_text(
            right,
            rect.bottom_right.x + offset,
            rect.top_left.y + rect.height() / 2.0 + font / 2.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_length_guards_degenerate_values() {
        assert_eq!(effective_length(2.0), 2.0);
        assert_eq!(effective_length(0.0), 1.0);
        assert_eq!(effective_length(-3.0), 1.0);
        assert_eq!(effective_length(f64::INFINITY), 1.0);
    }

    #[test]
    fn sample_step_handles_nan() {
        assert_eq!(sample_step(f64::NAN), 1.0);
    }
}
