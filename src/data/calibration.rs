//! Calibration record: how many image pixels make up one scope division and
//! what physical quantity a division stands for, per axis.

use eframe::egui::Color32;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::data::si::format_si;

/// Overlay colors offered in the settings panel, loosely following common
/// scope channel colors.
pub static OVERLAY_PALETTE: Lazy<Vec<OverlayColor>> = Lazy::new(|| {
    vec![
        OverlayColor::new("White", [255, 255, 255]),
        OverlayColor::new("Yellow", [255, 221, 0]),
        OverlayColor::new("Cyan", [0, 220, 255]),
        OverlayColor::new("Magenta", [255, 64, 200]),
        OverlayColor::new("Green", [64, 230, 90]),
        OverlayColor::new("Orange", [255, 150, 30]),
        OverlayColor::new("Red", [255, 60, 60]),
        OverlayColor::new("Black", [0, 0, 0]),
    ]
});

/// A named overlay color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayColor {
    pub label: String,
    #[serde(rename = "color")]
    pub rgb: [u8; 3],
}

impl OverlayColor {
    pub fn new(label: &str, rgb: [u8; 3]) -> Self {
        Self {
            label: label.to_string(),
            rgb,
        }
    }

    /// This color at the given opacity (`0.0..=1.0`).
    pub fn shade(&self, alpha: f32) -> Color32 {
        let [r, g, b] = self.rgb;
        Color32::from_rgba_unmultiplied(r, g, b, alpha_byte(alpha))
    }
}

fn alpha_byte(alpha: f32) -> u8 {
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Shade of an optional overlay color; white when none is selected.
pub fn color_shade(color: Option<&OverlayColor>, alpha: f32) -> Color32 {
    match color {
        Some(c) => c.shade(alpha),
        None => Color32::from_rgba_unmultiplied(255, 255, 255, alpha_byte(alpha)),
    }
}

/// Physical scale of the scope grid visible in the loaded picture.
///
/// Every field is optional: an unset (or zero) division size leaves that axis
/// uncalibrated, in which case measurements fall back to raw pixels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalibrationRecord {
    /// Width of one division in image pixels.
    #[serde(rename = "xDivImageSize")]
    pub x_division_pixels: Option<f64>,
    /// Height of one division in image pixels.
    #[serde(rename = "yDivImageSize")]
    pub y_division_pixels: Option<f64>,
    /// Physical amount one horizontal division stands for.
    #[serde(rename = "xDivPhysicalScale")]
    pub x_division_scale: Option<f64>,
    /// Physical amount one vertical division stands for.
    #[serde(rename = "yDivPhysicalScale")]
    pub y_division_scale: Option<f64>,
    #[serde(rename = "xDivPhysicalUnit")]
    pub x_unit: Option<String>,
    #[serde(rename = "yDivPhysicalUnit")]
    pub y_unit: Option<String>,
    #[serde(rename = "colorSelection")]
    pub overlay_color: Option<OverlayColor>,
}

/// Partial update of a [`CalibrationRecord`]; `Some` fields overwrite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibrationPatch {
    pub x_division_pixels: Option<f64>,
    pub y_division_pixels: Option<f64>,
    pub x_division_scale: Option<f64>,
    pub y_division_scale: Option<f64>,
    pub x_unit: Option<String>,
    pub y_unit: Option<String>,
    pub overlay_color: Option<OverlayColor>,
}

impl CalibrationPatch {
    /// Patch produced by a finished division-size drag.
    pub fn division_size(x: f64, y: f64) -> Self {
        Self {
            x_division_pixels: Some(x),
            y_division_pixels: Some(y),
            ..Default::default()
        }
    }
}

/// Resolved calibration of a single axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisCalibration<'a> {
    /// Divisor applied to pixel lengths; never zero.
    pub division_pixels: f64,
    pub division_scale: f64,
    pub unit: &'a str,
}

impl AxisCalibration<'_> {
    /// Physical length of `pixels` image pixels along this axis.
    pub fn measure(&self, pixels: f64) -> f64 {
        pixels / self.division_pixels * self.division_scale
    }

    /// Label for an already calibrated amount.
    pub fn label_value(&self, value: f64) -> String {
        format_si(value, self.unit)
    }

    /// Label for a pixel length.
    pub fn label(&self, pixels: f64) -> String {
        self.label_value(self.measure(pixels))
    }
}

fn divisor(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v != 0.0 => v,
        _ => 1.0,
    }
}

fn scale(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 1.0,
    }
}

impl CalibrationRecord {
    pub fn x_axis(&self) -> AxisCalibration<'_> {
        AxisCalibration {
            division_pixels: divisor(self.x_division_pixels),
            division_scale: scale(self.x_division_scale),
            unit: self.x_unit.as_deref().unwrap_or(""),
        }
    }

    pub fn y_axis(&self) -> AxisCalibration<'_> {
        AxisCalibration {
            division_pixels: divisor(self.y_division_pixels),
            division_scale: scale(self.y_division_scale),
            unit: self.y_unit.as_deref().unwrap_or(""),
        }
    }

    /// True once a usable division size has been stored for either axis.
    pub fn has_division_size(&self) -> bool {
        let usable = |v: Option<f64>| matches!(v, Some(v) if v.is_finite() && v != 0.0);
        usable(self.x_division_pixels) || usable(self.y_division_pixels)
    }

    pub fn color(&self, alpha: f32) -> Color32 {
        color_shade(self.overlay_color.as_ref(), alpha)
    }

    pub fn apply(&mut self, patch: CalibrationPatch) {
        if let Some(v) = patch.x_division_pixels {
            self.x_division_pixels = Some(v);
        }
        if let Some(v) = patch.y_division_pixels {
            self.y_division_pixels = Some(v);
        }
        if let Some(v) = patch.x_division_scale {
            self.x_division_scale = Some(v);
        }
        if let Some(v) = patch.y_division_scale {
            self.y_division_scale = Some(v);
        }
        if let Some(v) = patch.x_unit {
            self.x_unit = Some(v);
        }
        if let Some(v) = patch.y_unit {
            self.y_unit = Some(v);
        }
        if let Some(v) = patch.overlay_color {
            self.overlay_color = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_division_size_falls_back_to_one() {
        let record = CalibrationRecord {
            x_division_pixels: Some(0.0),
            x_division_scale: Some(2.0),
            ..Default::default()
        };
        let x = record.x_axis();
        assert_eq!(x.division_pixels, 1.0);
        assert_eq!(x.measure(50.0), 100.0);
    }

    #[test]
    fn unset_record_passes_pixels_through() {
        let record = CalibrationRecord::default();
        assert_eq!(record.y_axis().measure(37.0), 37.0);
        assert_eq!(record.y_axis().unit, "");
        assert!(!record.has_division_size());
    }

    #[test]
    fn default_color_is_white() {
        assert_eq!(color_shade(None, 1.0), Color32::WHITE);
        let red = OverlayColor::new("Red", [255, 0, 0]);
        assert_eq!(red.shade(0.0).a(), 0);
    }
}
