//! Drawing surfaces.
//!
//! Measurement overlays are drawn through [`DrawSurface`], a small immediate
//! 2-D API with a transform stack and path construction. [`EguiSurface`]
//! paints onto an egui painter; [`RecordingSurface`] keeps the commands for
//! inspection in headless tests.

mod egui_surface;
mod recording;

pub use egui_surface::EguiSurface;
pub use recording::{DrawCommand, RecordingSurface};

use eframe::egui::Color32;

use crate::data::image::LoadedImage;

/// Horizontal anchor of text relative to its drawing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Logical size of a drawing surface and its pixel density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
    pub pixels_per_point: f64,
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            pixels_per_point: 1.0,
        }
    }
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64, pixels_per_point: f64) -> Self {
        Self {
            width,
            height,
            pixels_per_point,
        }
    }

    pub fn physical_width(&self) -> f64 {
        self.width * self.pixels_per_point
    }

    pub fn physical_height(&self) -> f64 {
        self.height * self.pixels_per_point
    }
}

/// Immediate-mode 2-D drawing API used by the overlays.
///
/// Coordinates go through the current transform (see [`translate`] and
/// [`scale`]) when they are added to the path, like an HTML canvas.
///
/// [`translate`]: DrawSurface::translate
/// [`scale`]: DrawSurface::scale
pub trait DrawSurface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn draw_image(&mut self, image: &LoadedImage, x: f64, y: f64, w: f64, h: f64);

    fn set_stroke_color(&mut self, color: Color32);
    fn set_fill_color(&mut self, color: Color32);
    fn set_line_width(&mut self, width: f64);
    /// Alternating dash and gap lengths; empty for a solid line.
    fn set_line_dash(&mut self, segments: &[f64]);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn stroke(&mut self);
    fn fill(&mut self);

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.move_to(x, y);
        self.line_to(x + w, y);
        self.line_to(x + w, y + h);
        self.line_to(x, y + h);
        self.close_path();
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.begin_path();
        self.rect(x, y, w, h);
        self.stroke();
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.begin_path();
        self.rect(x, y, w, h);
        self.fill();
    }

    fn set_font_size(&mut self, size: f64);
    fn set_text_align(&mut self, align: TextAlign);
    /// Draw `text` with its baseline at `y`, anchored at `x` per the text align.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn scale(&mut self, sx: f64, sy: f64);
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared state for the implementations
// ─────────────────────────────────────────────────────────────────────────────

/// Axis-aligned affine transform: `p' = p * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Affine {
    pub sx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self {
            sx: 1.0,
            sy: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }
}

impl Affine {
    pub fn apply(&self, x: f64, y: f64) -> [f64; 2] {
        [x * self.sx + self.tx, y * self.sy + self.ty]
    }

    /// Scale used for lengths such as line widths and font sizes.
    pub fn mean_scale(&self) -> f64 {
        (self.sx.abs() + self.sy.abs()) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PaintState {
    pub transform: Affine,
    pub stroke_color: Color32,
    pub fill_color: Color32,
    pub line_width: f64,
    pub line_dash: Vec<f64>,
    pub font_size: f64,
    pub text_align: TextAlign,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            transform: Affine::default(),
            stroke_color: Color32::BLACK,
            fill_color: Color32::BLACK,
            line_width: 1.0,
            line_dash: Vec::new(),
            font_size: 10.0,
            text_align: TextAlign::Left,
        }
    }
}

/// Polyline in device coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subpath {
    pub points: Vec<[f64; 2]>,
    pub closed: bool,
}

/// Paint state, save/restore stack and the path under construction.
#[derive(Debug, Default)]
pub(crate) struct SurfaceCore {
    pub state: PaintState,
    stack: Vec<PaintState>,
    pub path: Vec<Subpath>,
}

impl SurfaceCore {
    pub fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    pub fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        let t = &mut self.state.transform;
        t.tx += dx * t.sx;
        t.ty += dy * t.sy;
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        let t = &mut self.state.transform;
        t.sx *= sx;
        t.sy *= sy;
    }

    pub fn begin_path(&mut self) {
        self.path.clear();
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        let p = self.state.transform.apply(x, y);
        self.path.push(Subpath {
            points: vec![p],
            closed: false,
        });
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        let p = self.state.transform.apply(x, y);
        match self.path.last_mut() {
            Some(sub) if !sub.closed => sub.points.push(p),
            _ => self.path.push(Subpath {
                points: vec![p],
                closed: false,
            }),
        }
    }

    pub fn close_path(&mut self) {
        if let Some(sub) = self.path.last_mut() {
            sub.closed = true;
        }
    }

    /// Device-space rectangle `[x, y, w, h]` of a user-space one.
    pub fn device_rect(&self, x: f64, y: f64, w: f64, h: f64) -> [f64; 4] {
        let t = self.state.transform;
        let [x0, y0] = t.apply(x, y);
        [x0, y0, w * t.sx, h * t.sy]
    }

    pub fn device_line_width(&self) -> f64 {
        self.state.line_width * self.state.transform.mean_scale()
    }

    pub fn device_font_size(&self) -> f64 {
        self.state.font_size * self.state.transform.mean_scale()
    }

    pub fn device_dash(&self) -> Vec<f64> {
        let s = self.state.transform.mean_scale();
        self.state.line_dash.iter().map(|d| d * s).collect()
    }
}
