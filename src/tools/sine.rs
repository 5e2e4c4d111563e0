//! Period finder: overlays a sine whose period follows the drag width.

use std::f64::consts::TAU;

use crate::data::calibration::CalibrationRecord;
use crate::data::geometry::{DragRect, ImagePoint, ImageSize};
use crate::data::si::{inverse_unit, parse_si_unit, render_si, to_precision, LABEL_DIGITS};
use crate::surface::DrawSurface;

use super::common::{edge_guides, sample_step};
use super::Readout;

pub(super) fn render(
    surface: &mut dyn DrawSurface,
    image: ImageSize,
    calibration: &CalibrationRecord,
    start: ImagePoint,
    end: ImagePoint,
    length: f64,
    shift: f64,
) {
    let rect = DragRect::from_corners(start, end);
    let step = sample_step(rect.width());
    let period = ((end.x - start.x) / length).abs();

    surface.begin_path();
    edge_guides(surface, image, &rect);
    surface.set_stroke_color(calibration.color(0.5));
    surface.stroke();

    if !(period > 10.0 * step) {
        return;
    }

    let mid = end.y - (end.y - start.y) / 2.0;
    let amplitude = (end.y - start.y) / 2.0;
    let width = image.width as f64;

    surface.begin_path();
    let mut first = true;
    let mut x = 0.0;
    while x < width {
        let y = mid - (-(x - start.x) / period * TAU + shift).sin() * amplitude;
        if y.is_finite() {
            if first {
                surface.move_to(x, y);
                first = false;
            } else {
                surface.line_to(x, y);
            }
        }
        x += step;
    }

    // Period boundaries, aligned with the drag origin.
    let mut tick = start.x.rem_euclid(period);
    while tick < width {
        surface.move_to(tick, start.y);
        surface.line_to(tick, end.y);
        tick += period;
    }

    surface.set_stroke_color(calibration.color(0.3));
    surface.stroke();
}

pub(super) fn readout(calibration: &CalibrationRecord, rect: &DragRect, length: f64) -> Readout {
    let x = calibration.x_axis();
    let period = x.measure(rect.width()) / length;

    let mut below = vec![format!("T = {}", x.label_value(period))];
    if let Some(parsed) = parse_si_unit(x.unit) {
        let frequency = render_si(
            1.0 / (period * parsed.factor),
            &inverse_unit(&parsed.base_unit),
        );
        if frequency.value.is_finite() {
            below.push(format!(
                "f = {} {}",
                to_precision(frequency.value, LABEL_DIGITS),
                frequency.unit
            ));
        }
    }

    Readout {
        below,
        right: Some(calibration.y_axis().label(rect.height())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calibrated(unit: &str) -> CalibrationRecord {
        CalibrationRecord {
            x_division_pixels: Some(100.0),
            x_division_scale: Some(1.0),
            x_unit: Some(unit.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn frequency_from_millisecond_period() {
        let rect = DragRect::from_corners(ImagePoint::new(0.0, 0.0), ImagePoint::new(100.0, 10.0));
        let r = readout(&calibrated("ms"), &rect, 1.0);
        assert_eq!(r.below, vec!["T = 1.00 ms".to_string(), "f = 1.00 kHz".to_string()]);
    }

    #[test]
    fn zero_width_has_no_frequency() {
        let rect = DragRect::from_corners(ImagePoint::new(5.0, 0.0), ImagePoint::new(5.0, 10.0));
        let r = readout(&calibrated("s"), &rect, 1.0);
        assert_eq!(r.below.len(), 1);
    }

    #[test]
    fn unparseable_unit_has_no_frequency() {
        let rect = DragRect::from_corners(ImagePoint::new(0.0, 0.0), ImagePoint::new(100.0, 10.0));
        let r = readout(&calibrated("2div"), &rect, 1.0);
        assert_eq!(r.below, vec!["T = 1.00 2div".to_string()]);
    }
}
