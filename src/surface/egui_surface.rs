use eframe::egui::{self, Align2, Color32, FontId, Pos2, Shape, Stroke};

use super::{DrawSurface, Subpath, SurfaceCore, TextAlign};
use crate::data::image::LoadedImage;

/// [`DrawSurface`] that paints onto an egui [`egui::Painter`].
///
/// Device coordinates are relative to `origin`, usually the top-left corner of
/// the allocated drawing area.
pub struct EguiSurface<'a> {
    painter: &'a egui::Painter,
    origin: Pos2,
    core: SurfaceCore,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a egui::Painter, origin: Pos2) -> Self {
        Self {
            painter,
            origin,
            core: SurfaceCore::default(),
        }
    }

    fn pos(&self, p: [f64; 2]) -> Pos2 {
        Pos2::new(self.origin.x + p[0] as f32, self.origin.y + p[1] as f32)
    }

    fn screen_rect(&self, r: [f64; 4]) -> egui::Rect {
        let a = self.pos([r[0], r[1]]);
        let b = self.pos([r[0] + r[2], r[1] + r[3]]);
        egui::Rect::from_two_pos(a, b)
    }

    fn points(&self, sub: &Subpath) -> Vec<Pos2> {
        let mut pts: Vec<Pos2> = sub.points.iter().map(|p| self.pos(*p)).collect();
        if sub.closed {
            if let Some(first) = pts.first().copied() {
                pts.push(first);
            }
        }
        pts
    }
}

impl DrawSurface for EguiSurface<'_> {
    fn clear_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {
        // egui repaints the whole area every frame; nothing to erase.
    }

    fn draw_image(&mut self, image: &LoadedImage, x: f64, y: f64, w: f64, h: f64) {
        let Some(id) = image.texture_id() else {
            return;
        };
        let rect = self.screen_rect(self.core.device_rect(x, y, w, h));
        let uv = egui::Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
        self.painter.image(id, rect, uv, Color32::WHITE);
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
        let stroke = Stroke::new(
            self.core.device_line_width() as f32,
            self.core.state.stroke_color,
        );
        let dash = self.core.device_dash();
        for sub in &self.core.path {
            let pts = self.points(sub);
            if pts.len() < 2 {
                continue;
            }
            match dash.as_slice() {
                [] => {
                    self.painter.add(Shape::line(pts, stroke));
                }
                [d] => {
                    self.painter
                        .extend(Shape::dashed_line(&pts, stroke, *d as f32, *d as f32));
                }
                [d, g, ..] => {
                    self.painter
                        .extend(Shape::dashed_line(&pts, stroke, *d as f32, *g as f32));
                }
            }
        }
    }

    fn fill(&mut self) {
        let color = self.core.state.fill_color;
        for sub in &self.core.path {
            let pts: Vec<Pos2> = sub.points.iter().map(|p| self.pos(*p)).collect();
            if pts.len() < 3 {
                continue;
            }
            self.painter
                .add(Shape::convex_polygon(pts, color, Stroke::NONE));
        }
    }

    fn set_font_size(&mut self, size: f64) {
        self.core.state.font_size = size;
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.core.state.text_align = align;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let pos = self.pos(self.core.state.transform.apply(x, y));
        let anchor = match self.core.state.text_align {
            TextAlign::Left => Align2::LEFT_BOTTOM,
            TextAlign::Center => Align2::CENTER_BOTTOM,
            TextAlign::Right => Align2::RIGHT_BOTTOM,
        };
        let font = FontId::proportional(self.core.device_font_size().max(1.0) as f32);
        self.painter
            .text(pos, anchor, text, font, self.core.state.fill_color);
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
