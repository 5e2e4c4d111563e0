//! Headless surface that records what would have been drawn.

use eframe::egui::Color32;

use super::{DrawSurface, Subpath, SurfaceCore, TextAlign};
use crate::data::geometry::ImageSize;
use crate::data::image::LoadedImage;

/// One recorded drawing operation, in device coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ClearRect {
        rect: [f64; 4],
    },
    Image {
        rect: [f64; 4],
        size: ImageSize,
    },
    Stroke {
        path: Vec<Subpath>,
        color: Color32,
        width: f64,
        dash: Vec<f64>,
    },
    Fill {
        path: Vec<Subpath>,
        color: Color32,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        align: TextAlign,
        size: f64,
        color: Color32,
    },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    core: SurfaceCore,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All text drawn so far, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn strokes(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke { .. }))
    }

    pub fn fills(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill { .. }))
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl DrawSurface for RecordingSurface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let rect = self.core.device_rect(x, y, w, h);
        self.commands.push(DrawCommand::ClearRect { rect });
    }

    fn draw_image(&mut self, image: &LoadedImage, x: f64, y: f64, w: f64, h: f64) {
        let rect = self.core.device_rect(x, y, w, h);
        self.commands.push(DrawCommand::Image {
            rect,
            size: image.size(),
        });
    }

    fn set_stroke_color(&mut self, color: Color32) {
        self.core.state.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Color32) {
        self.core.state.fill_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.core.state.line_width = width;
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.core.state.line_dash = segments.to_vec();
    }

    fn begin_path(&mut self) {
        self.core.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.core.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.core.line_to(x, y);
    }

    fn close_path(&mut self) {
        self.core.close_path();
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke {
            path: self.core.path.clone(),
            color: self.core.state.stroke_color,
            width: self.core.device_line_width(),
            dash: self.core.device_dash(),
        });
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill {
            path: self.core.path.clone(),
            color: self.core.state.fill_color,
        });
    }

    fn set_font_size(&mut self, size: f64) {
        self.core.state.font_size = size;
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.core.state.text_align = align;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let [x, y] = self.core.state.transform.apply(x, y);
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            align: self.core.state.text_align,
            size: self.core.device_font_size(),
            color: self.core.state.fill_color,
        });
    }

    fn save(&mut self) {
        self.core.save();
    }

    fn restore(&mut self) {
        self.core.restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.core.translate(dx, dy);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.core.scale(sx, sy);
    }
}
