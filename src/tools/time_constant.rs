//! Time-constant finder for exponential charge/discharge curves.

use crate::data::calibration::CalibrationRecord;
use crate::data::geometry::{DragRect, ImagePoint, ImageSize};
use crate::surface::DrawSurface;

use super::common::{edge_guides, sample_step, vertical};
use super::Readout;

/// `y(x)` of the exponential that starts at `start` and settles at `end.y`.
pub(super) fn curve_y(start: ImagePoint, end: ImagePoint, tau: f64, x: f64) -> f64 {
    end.y - (-(x - start.x) / tau).exp() * (end.y - start.y)
}

pub(super) fn render(
    surface: &mut dyn DrawSurface,
    image: ImageSize,
    calibration: &CalibrationRecord,
    start: ImagePoint,
    end: ImagePoint,
    length: f64,
) {
    let rect = DragRect::from_corners(start, end);
    let step = sample_step(rect.width());
    let tau = (end.x - start.x) / length;

    surface.begin_path();
    edge_guides(surface, image, &rect);
    vertical(surface, image, start.x + tau);

    // Tangent at the start point reaches the final level after one tau.
    surface.move_to(start.x + tau, end.y);
    surface.line_to(start.x, start.y);

    if tau != 0.0 && tau.is_finite() {
        // The curve is monotonic; once it leaves this band it does not return.
        // Leftward drags grow without bound, so sampling stops there.
        let height = image.height as f64;
        let band = -height..=2.0 * height;
        let mut first = true;
        let mut x = rect.top_left.x;
        while x < image.width as f64 {
            let y = curve_y(start, end, tau, x);
            if band.contains(&y) {
                if first {
                    surface.move_to(x, y);
                    first = false;
                } else {
                    surface.line_to(x, y);
                }
            } else if !first {
                break;
            }
            x += step;
        }
    }

    surface.set_stroke_color(calibration.color(0.5));
    surface.stroke();
}

pub(super) fn readout(calibration: &CalibrationRecord, rect: &DragRect, length: f64) -> Readout {
    let x = calibration.x_axis();
    Readout {
        below: vec![format!(
            "\u{03c4} = {}",
            x.label_value(x.measure(rect.width()) / length)
        )],
        right: Some(calibration.y_axis().label(rect.height())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_hits_63_percent_after_one_tau() {
        let start = ImagePoint::new(0.0, 0.0);
        let end = ImagePoint::new(50.0, 100.0);
        assert_eq!(curve_y(start, end, 50.0, 0.0), 0.0);
        let y = curve_y(start, end, 50.0, 50.0);
        assert!((y - 100.0 * (1.0 - (-1.0f64).exp())).abs() < 1e-9);
    }

    #[test]
    fn five_tau_divides_width() {
        let cal = CalibrationRecord {
            x_division_pixels: Some(50.0),
            x_division_scale: Some(2.0),
            x_unit: Some("ms".into()),
            ..Default::default()
        };
        let rect = DragRect::from_corners(ImagePoint::new(0.0, 0.0), ImagePoint::new(250.0, 10.0));
        let r = readout(&cal, &rect, 5.0);
        assert_eq!(r.below, vec!["\u{03c4} = 2.00 ms".to_string()]);
    }
}
