use eframe::egui::Color32;

use super::{Effect, InteractionState, PointerEvent};
use crate::data::calibration::CalibrationRecord;
use crate::data::geometry::SurfacePoint;
use crate::data::image::LoadedImage;
use crate::error::Result;
use crate::surface::{DrawSurface, SurfaceSize, TextAlign};
use crate::tools::{OverlayStyle, ToolKind};

pub const PLACEHOLDER_TEXT: &str = "Drag or click to upload an oscilloscope screenshot";

const PLACEHOLDER_FONT_SIZE: f64 = 15.0;
const PLACEHOLDER_BORDER_WIDTH: f64 = 2.0;
const PLACEHOLDER_DASH: [f64; 2] = [10.0, 10.0];

/// Owner of the interaction state: feeds it pointer events, keeps the
/// selected tool and draws the current state onto a surface.
#[derive(Debug)]
pub struct ScopeBox {
    state: InteractionState,
    surface: SurfaceSize,
    tool: ToolKind,
    style: OverlayStyle,
    placeholder: String,
}

impl ScopeBox {
    pub fn new(surface: SurfaceSize) -> Self {
        Self {
            state: InteractionState::AwaitImage,
            surface,
            tool: ToolKind::default(),
            style: OverlayStyle::default(),
            placeholder: PLACEHOLDER_TEXT.to_string(),
        }
    }

    pub fn with_style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Tool used for drawing right now; calibration always shows pixel sizes.
    pub fn active_tool(&self) -> ToolKind {
        if self.state.is_calibrating() {
            ToolKind::DivisionRectangle
        } else {
            self.tool
        }
    }

    fn replace_state(&mut self, next: InteractionState) {
        if next.name() != self.state.name() {
            log::debug!("interaction: {} -> {}", self.state.name(), next.name());
        }
        self.state = next;
    }

    /// The surface changed size (or density).
    pub fn resize(&mut self, surface: SurfaceSize) {
        if surface == self.surface {
            return;
        }
        log::debug!(
            "surface {}x{} pt ({}x{} px)",
            surface.width,
            surface.height,
            surface.physical_width(),
            surface.physical_height()
        );
        self.surface = surface;
        self.state.resized(surface);
    }

    /// A new image finished loading. Any drag in progress is dropped.
    ///
    /// On error the current state is kept.
    pub fn image_ready(&mut self, image: LoadedImage) -> Result<()> {
        let (w, h) = (image.width, image.height);
        match InteractionState::live(image, self.surface) {
            Ok(next) => {
                log::debug!("showing {w}x{h} image");
                self.replace_state(next);
                Ok(())
            }
            Err(e) => {
                log::warn!("rejected image: {e}");
                Err(e)
            }
        }
    }

    pub fn begin_calibration(&mut self) {
        let state = std::mem::take(&mut self.state);
        self.replace_state(state.begin_calibration());
    }

    pub fn cancel_calibration(&mut self) {
        let state = std::mem::take(&mut self.state);
        self.replace_state(state.cancel_calibration());
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let transition = state.on_pointer(event);
        self.replace_state(transition.state);
        transition.effects
    }

    pub fn pointer_down(&mut self, p: SurfacePoint) -> Vec<Effect> {
        self.handle_pointer(PointerEvent::down(p.x, p.y))
    }

    pub fn pointer_move(&mut self, p: SurfacePoint) -> Vec<Effect> {
        self.handle_pointer(PointerEvent::moved(p.x, p.y))
    }

    pub fn pointer_up(&mut self, p: SurfacePoint) -> Vec<Effect> {
        self.handle_pointer(PointerEvent::up(p.x, p.y))
    }

    /// Draw the current state. Without a surface this does nothing.
    pub fn render(&self, surface: Option<&mut dyn DrawSurface>, calibration: &CalibrationRecord) {
        let Some(surface) = surface else {
            return;
        };
        let size = self.surface;

        let Some(session) = self.state.session() else {
            self.render_placeholder(surface);
            return;
        };

        let image = session.image.size();
        let t = session.transform;
        surface.clear_rect(0.0, 0.0, size.width, size.height);
        surface.save();
        surface.translate(t.offset_x, t.offset_y);
        surface.scale(t.scale, t.scale);
        surface.draw_image(
            &session.image,
            0.0,
            0.0,
            image.width as f64,
            image.height as f64,
        );
        if session.gesture.current.is_some() {
            self.active_tool()
                .render(surface, image, calibration, &session.gesture, &self.style);
        }
        surface.restore();
    }

    fn render_placeholder(&self, surface: &mut dyn DrawSurface) {
        let size = self.surface;
        let grey = Color32::from_gray(128);

        surface.clear_rect(0.0, 0.0, size.width, size.height);
        surface.save();
        surface.set_font_size(PLACEHOLDER_FONT_SIZE);
        surface.set_fill_color(grey);
        surface.set_text_align(TextAlign::Center);
        surface.fill_text(
            &self.placeholder,
            size.width / 2.0,
            size.height / 2.0 + PLACEHOLDER_FONT_SIZE / 2.0,
        );

        let lw = PLACEHOLDER_BORDER_WIDTH;
        surface.set_stroke_color(grey);
        surface.set_line_dash(&PLACEHOLDER_DASH);
        surface.set_line_width(lw);
        surface.stroke_rect(lw, lw, size.width - lw * 2.0, size.height - lw * 2.0);
        surface.restore();
    }
}
