//! Coordinate spaces and the image-to-surface fit transform.
//!
//! Pointer events arrive in surface space (logical pixels of the drawing
//! area); overlays are computed in image space (pixels of the loaded
//! picture). The two point types below keep them apart.

use eframe::egui;

/// A point in surface space (logical drawing-area pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
}

/// A point in image space (native pixels of the loaded picture).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImagePoint {
    pub x: f64,
    pub y: f64,
}

impl SurfacePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl ImagePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<egui::Pos2> for SurfacePoint {
    fn from(p: egui::Pos2) -> Self {
        Self::new(p.x as f64, p.y as f64)
    }
}

/// Pixel dimensions of a loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Uniform scale plus offset that letterboxes an image into a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for FitTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl FitTransform {
    /// Largest uniform scale at which the image fits the surface, centred.
    ///
    /// ```
    /// # use scopebox::data::geometry::{FitTransform, ImageSize};
    /// let t = FitTransform::fit(ImageSize::new(800, 600), 400.0, 300.0);
    /// assert_eq!((t.scale, t.offset_x, t.offset_y), (0.5, 0.0, 0.0));
    /// ```
    pub fn fit(image: ImageSize, surface_width: f64, surface_height: f64) -> Self {
        let iw = image.width as f64;
        let ih = image.height as f64;
        let scale = (surface_width / iw).min(surface_height / ih);
        Self {
            scale,
            offset_x: (surface_width - iw * scale) / 2.0,
            offset_y: (surface_height - ih * scale) / 2.0,
        }
    }

    /// False when the scale is zero, negative or not finite.
    pub fn is_usable(&self) -> bool {
        self.scale.is_finite()
            && self.scale > 0.0
            && self.offset_x.is_finite()
            && self.offset_y.is_finite()
    }

    pub fn to_image_space(&self, p: SurfacePoint) -> ImagePoint {
        ImagePoint::new(
            (p.x - self.offset_x) / self.scale,
            (p.y - self.offset_y) / self.scale,
        )
    }

    pub fn to_surface_space(&self, p: ImagePoint) -> SurfacePoint {
        SurfacePoint::new(
            p.x * self.scale + self.offset_x,
            p.y * self.scale + self.offset_y,
        )
    }
}

/// Optional drag start plus the current pointer position, in image space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragGesture {
    pub start: Option<ImagePoint>,
    pub current: Option<ImagePoint>,
}

impl DragGesture {
    /// Pointer hovering without a pressed button.
    pub fn hover(current: ImagePoint) -> Self {
        Self {
            start: None,
            current: Some(current),
        }
    }

    pub fn drag(start: ImagePoint, current: ImagePoint) -> Self {
        Self {
            start: Some(start),
            current: Some(current),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }

    /// Normalized rectangle spanned by the drag, if both ends are known.
    pub fn rect(&self) -> Option<DragRect> {
        match (self.start, self.current) {
            (Some(a), Some(b)) => Some(DragRect::from_corners(a, b)),
            _ => None,
        }
    }
}

/// Axis-aligned rectangle with `top_left <= bottom_right` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRect {
    pub top_left: ImagePoint,
    pub bottom_right: ImagePoint,
}

impl DragRect {
    pub fn from_corners(a: ImagePoint, b: ImagePoint) -> Self {
        Self {
            top_left: ImagePoint::new(a.x.min(b.x), a.y.min(b.y)),
            bottom_right: ImagePoint::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }

    pub fn center(&self) -> ImagePoint {
        ImagePoint::new(
            self.top_left.x + self.width() / 2.0,
            self.top_left.y + self.height() / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letterboxes_wide_surface() {
        let t = FitTransform::fit(ImageSize::new(100, 100), 300.0, 100.0);
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.offset_x, 100.0);
        assert_eq!(t.offset_y, 0.0);
    }

    #[test]
    fn zero_surface_is_unusable() {
        assert!(!FitTransform::fit(ImageSize::new(10, 10), 0.0, 50.0).is_usable());
        assert!(!FitTransform::fit(ImageSize::new(10, 10), f64::NAN, 50.0).is_usable());
    }

    #[test]
    fn rect_is_direction_independent() {
        let g = DragGesture::drag(ImagePoint::new(50.0, 5.0), ImagePoint::new(10.0, 25.0));
        let r = g.rect().unwrap();
        assert_eq!(r.top_left, ImagePoint::new(10.0, 5.0));
        assert_eq!(r.bottom_right, ImagePoint::new(50.0, 25.0));
        assert_eq!(r.center(), ImagePoint::new(30.0, 15.0));
    }
}
