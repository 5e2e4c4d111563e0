//! Interaction state machine.
//!
//! What a pointer drag means depends on the workflow stage: before an image
//! is loaded nothing happens, in live measurement the drag feeds the active
//! tool, and while defining the division size the finished drag is reported
//! back as the new grid size. Transitions are pure: [`InteractionState::on_pointer`]
//! consumes the state and returns the next one plus the [`Effect`]s the owner
//! has to carry out.

mod scope_box;

pub use scope_box::{ScopeBox, PLACEHOLDER_TEXT};

use crate::data::geometry::{DragGesture, FitTransform, SurfacePoint};
use crate::data::image::LoadedImage;
use crate::error::{Result, ScopeBoxError};
use crate::surface::SurfaceSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
}

/// Pointer event in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: SurfacePoint,
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        Self {
            kind: PointerEventKind::Down,
            position: SurfacePoint::new(x, y),
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self {
            kind: PointerEventKind::Move,
            position: SurfacePoint::new(x, y),
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self {
            kind: PointerEventKind::Up,
            position: SurfacePoint::new(x, y),
        }
    }
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// A division-size drag finished; sizes are in image pixels.
    ReportDivisionSize { x: f64, y: f64 },
    /// The overlay changed and should be drawn again.
    Redraw,
}

/// An image on screen plus the gesture drawn over it.
#[derive(Debug, Clone)]
pub struct MeasureSession {
    pub image: LoadedImage,
    pub surface: SurfaceSize,
    /// Computed on entry and on resize only.
    pub transform: FitTransform,
    pub gesture: DragGesture,
}

impl MeasureSession {
    /// Fit `image` into `surface`, rejecting images without area and
    /// surfaces the image cannot be scaled into.
    pub fn new(image: LoadedImage, surface: SurfaceSize) -> Result<Self> {
        let size = image.size();
        if size.is_empty() {
            return Err(ScopeBoxError::DegenerateImage {
                width: size.width,
                height: size.height,
            });
        }
        let transform = FitTransform::fit(size, surface.width, surface.height);
        if !transform.is_usable() {
            return Err(ScopeBoxError::UnusableSurface {
                width: surface.width,
                height: surface.height,
            });
        }
        Ok(Self {
            image,
            surface,
            transform,
            gesture: DragGesture::default(),
        })
    }

    /// Physical screen pixels per image pixel.
    pub fn zoom(&self) -> f64 {
        self.transform.scale * self.surface.pixels_per_point
    }

    /// Same image with a fresh gesture.
    fn restarted(self) -> Self {
        Self {
            gesture: DragGesture::default(),
            ..self
        }
    }

    fn resize(&mut self, surface: SurfaceSize) {
        let transform = FitTransform::fit(self.image.size(), surface.width, surface.height);
        if transform.is_usable() {
            self.surface = surface;
            self.transform = transform;
        } else {
            log::debug!(
                "keeping previous fit; {}x{} surface is unusable",
                surface.width,
                surface.height
            );
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum InteractionState {
    /// No image yet; only the placeholder is shown.
    #[default]
    AwaitImage,
    LiveMeasure(MeasureSession),
    /// The next finished drag defines the division size.
    CalibrateDivision(MeasureSession),
}

/// Result of feeding a pointer event to the state machine.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: InteractionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn stay(state: InteractionState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn redraw(state: InteractionState) -> Self {
        Self {
            state,
            effects: vec![Effect::Redraw],
        }
    }
}

impl InteractionState {
    /// Enter live measurement with a freshly loaded image.
    pub fn live(image: LoadedImage, surface: SurfaceSize) -> Result<Self> {
        MeasureSession::new(image, surface).map(InteractionState::LiveMeasure)
    }

    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::AwaitImage => "await-image",
            InteractionState::LiveMeasure(_) => "live-measure",
            InteractionState::CalibrateDivision(_) => "calibrate-division",
        }
    }

    pub fn session(&self) -> Option<&MeasureSession> {
        match self {
            InteractionState::AwaitImage => None,
            InteractionState::LiveMeasure(s) | InteractionState::CalibrateDivision(s) => Some(s),
        }
    }

    pub fn is_calibrating(&self) -> bool {
        matches!(self, InteractionState::CalibrateDivision(_))
    }

    /// Switch to division-size selection on the current image.
    pub fn begin_calibration(self) -> Self {
        match self {
            InteractionState::LiveMeasure(s) => InteractionState::CalibrateDivision(s.restarted()),
            other => other,
        }
    }

    /// Leave division-size selection without reporting anything.
    pub fn cancel_calibration(self) -> Self {
        match self {
            InteractionState::CalibrateDivision(s) => InteractionState::LiveMeasure(s.restarted()),
            other => other,
        }
    }

    /// Refit the image after the surface changed size.
    pub fn resized(&mut self, surface: SurfaceSize) {
        match self {
            InteractionState::AwaitImage => {}
            InteractionState::LiveMeasure(s) | InteractionState::CalibrateDivision(s) => {
                s.resize(surface)
            }
        }
    }

    pub fn on_pointer(self, event: PointerEvent) -> Transition {
        match self {
            InteractionState::AwaitImage => Transition::stay(InteractionState::AwaitImage),
            InteractionState::LiveMeasure(mut s) => {
                let p = s.transform.to_image_space(event.position);
                match event.kind {
                    PointerEventKind::Down => {
                        s.gesture.start = Some(p);
                        Transition::stay(InteractionState::LiveMeasure(s))
                    }
                    PointerEventKind::Move => {
                        s.gesture.current = Some(p);
                        Transition::redraw(InteractionState::LiveMeasure(s))
                    }
                    PointerEventKind::Up => {
                        s.gesture.current = Some(p);
                        s.gesture.start = None;
                        Transition::redraw(InteractionState::LiveMeasure(s))
                    }
                }
            }
            InteractionState::CalibrateDivision(mut s) => {
                let p = s.transform.to_image_space(event.position);
                match event.kind {
                    PointerEventKind::Down => {
                        s.gesture.start = Some(p);
                        Transition::stay(InteractionState::CalibrateDivision(s))
                    }
                    PointerEventKind::Move => {
                        s.gesture.current = Some(p);
                        Transition::redraw(InteractionState::CalibrateDivision(s))
                    }
                    PointerEventKind::Up => {
                        s.gesture.current = Some(p);
                        let Some(start) = s.gesture.start.take() else {
                            return Transition::redraw(InteractionState::CalibrateDivision(s));
                        };
                        let x = (start.x - p.x).abs();
                        let y = (start.y - p.y).abs();
                        if x == 0.0 && y == 0.0 {
                            // A plain click does not define a grid.
                            return Transition::redraw(InteractionState::CalibrateDivision(s));
                        }
                        Transition {
                            state: InteractionState::LiveMeasure(s.restarted()),
                            effects: vec![Effect::ReportDivisionSize { x, y }, Effect::Redraw],
                        }
                    }
                }
            }
        }
    }
}
