//! Measurement overlays.
//!
//! A [`ToolKind`] turns a drag gesture plus the calibration record into guide
//! lines, curves and calibrated text labels. All drawing happens in image
//! space; the caller sets up the fit transform on the surface beforehand.

mod common;
mod rectangle;
mod sine;
mod time_constant;

use crate::data::calibration::CalibrationRecord;
use crate::data::geometry::{DragGesture, DragRect, ImageSize};
use crate::surface::DrawSurface;

pub use common::sample_step;

/// Visual parameters shared by all tools, in image pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub font_size: f64,
    /// Distance between the rectangle and its labels.
    pub label_offset: f64,
    /// Number of sub-grid cells per side of the plain rectangle.
    pub grid_divisions: usize,
    pub line_width: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            font_size: 15.0,
            label_offset: 10.0,
            grid_divisions: 10,
            line_width: 1.0,
        }
    }
}

/// Text a tool shows for a given rectangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Readout {
    /// Lines centred under the rectangle, top to bottom.
    pub below: Vec<String>,
    /// Label right of the rectangle, vertically centred.
    pub right: Option<String>,
}

/// The available measurement overlays.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ToolKind {
    /// Calibrated width/height with a 10x10 sub-grid.
    #[default]
    SimpleRectangle,
    /// Raw pixel size; used while defining the division size.
    DivisionRectangle,
    /// Fits `length` periods of a sine into the drag width.
    SineWave { length: f64, shift: f64 },
    /// Exponential approach where the drag width spans `length` time constants.
    TimeConstant { length: f64 },
}

/// Tools offered in the toolbar, with their display names.
pub const TOOL_PRESETS: [(&str, ToolKind); 5] = [
    ("Rectangle", ToolKind::SimpleRectangle),
    ("Sine (1 period)", ToolKind::SineWave { length: 1.0, shift: 0.0 }),
    ("Sine (2 periods)", ToolKind::SineWave { length: 2.0, shift: 0.0 }),
    ("Time constant", ToolKind::TimeConstant { length: 1.0 }),
    ("Time constant \u{00d7}5", ToolKind::TimeConstant { length: 5.0 }),
];

impl ToolKind {
    pub fn sine(length: f64, shift: f64) -> Self {
        ToolKind::SineWave { length, shift }
    }

    pub fn time_constant(length: f64) -> Self {
        ToolKind::TimeConstant { length }
    }

    /// Display name, matching [`TOOL_PRESETS`] where possible.
    pub fn label(&self) -> String {
        if let Some((name, _)) = TOOL_PRESETS.iter().find(|(_, t)| t == self) {
            return name.to_string();
        }
        match self {
            ToolKind::SimpleRectangle => "Rectangle".into(),
            ToolKind::DivisionRectangle => "Division size".into(),
            ToolKind::SineWave { length, .. } => format!("Sine ({length} periods)"),
            ToolKind::TimeConstant { length } => format!("Time constant \u{00d7}{length}"),
        }
    }

    /// Draw the overlay for `gesture`.
    ///
    /// Without a drag start only a crosshair through the pointer is drawn;
    /// without any pointer position nothing is drawn.
    pub fn render(
        &self,
        surface: &mut dyn DrawSurface,
        image: ImageSize,
        calibration: &CalibrationRecord,
        gesture: &DragGesture,
        style: &OverlayStyle,
    ) {
        let (Some(start), Some(end)) = (gesture.start, gesture.current) else {
            if let Some(p) = gesture.current {
                common::crosshair(surface, image, calibration, p, style);
            }
            return;
        };
        let rect = DragRect::from_corners(start, end);

        surface.save();
        surface.set_line_width(style.line_width);
        surface.set_line_dash(&[]);
        match *self {
            ToolKind::SimpleRectangle => {
                rectangle::render_simple(surface, image, calibration, &rect, style)
            }
            ToolKind::DivisionRectangle => {
                rectangle::render_division(surface, image, calibration, &rect)
            }
            ToolKind::SineWave { length, shift } => sine::render(
                surface,
                image,
                calibration,
                start,
                end,
                common::effective_length(length),
                shift,
            ),
            ToolKind::TimeConstant { length } => time_constant::render(
                surface,
                image,
                calibration,
                start,
                end,
                common::effective_length(length),
            ),
        }

        let readout = self.readout(calibration, &rect);
        common::draw_readout(surface, calibration, &rect, &readout, style);
        surface.restore();
    }

    /// Labels for a finished or in-progress drag rectangle.
    pub fn readout(&self, calibration: &CalibrationRecord, rect: &DragRect) -> Readout {
        match *self {
            ToolKind::SimpleRectangle => rectangle::readout_simple(calibration, rect),
            ToolKind::DivisionRectangle => rectangle::readout_division(rect),
            ToolKind::SineWave { length, .. } => {
                sine::readout(calibration, rect, common::effective_length(length))
            }
            ToolKind::TimeConstant { length } => {
                time_constant::readout(calibration, rect, common::effective_length(length))
            }
        }
    }
}
