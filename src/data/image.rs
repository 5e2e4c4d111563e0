//! A decoded picture as the measurement engine sees it.

use eframe::egui;

use crate::data::geometry::ImageSize;

/// Decoded image with its native pixel size.
///
/// `texture` is `None` for images that only exist headlessly (tests, or before
/// the upload to the GPU happened).
#[derive(Clone)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub texture: Option<egui::TextureHandle>,
}

impl LoadedImage {
    /// Image known only by its size.
    pub fn headless(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            texture: None,
        }
    }

    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }

    pub fn texture_id(&self) -> Option<egui::TextureId> {
        self.texture.as_ref().map(|t| t.id())
    }
}

impl std::fmt::Debug for LoadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("texture", &self.texture_id())
            .finish()
    }
}
