//! Background image decoding.
//!
//! Decoding a large screenshot takes long enough to stall a frame, so it runs
//! on a worker thread. The UI polls the [`ImageLoader`] once per frame and
//! uploads the result as a texture on the UI thread.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

use eframe::egui;

use crate::data::image::LoadedImage;
use crate::error::{Result, ScopeBoxError};

/// Decoded RGBA pixels, not yet uploaded.
#[derive(Debug)]
pub struct DecodedImage {
    pub name: String,
    pub image: egui::ColorImage,
}

impl DecodedImage {
    pub fn size(&self) -> [usize; 2] {
        self.image.size
    }

    /// Upload the pixels as an egui texture.
    pub fn into_loaded(self, ctx: &egui::Context) -> LoadedImage {
        let [w, h] = self.image.size;
        let texture = ctx.load_texture(self.name, self.image, egui::TextureOptions::LINEAR);
        LoadedImage {
            width: w as u32,
            height: h as u32,
            texture: Some(texture),
        }
    }
}

/// Decode an encoded image (PNG, JPEG, ...) into RGBA pixels.
pub fn decode_bytes(bytes: &[u8]) -> Result<egui::ColorImage> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

pub fn decode_path(path: &Path) -> Result<egui::ColorImage> {
    let bytes = std::fs::read(path)?;
    decode_bytes(&bytes)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// A single in-flight decode.
pub struct ImageLoader {
    name: String,
    rx: Receiver<Result<DecodedImage>>,
}

impl ImageLoader {
    pub fn spawn_from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        log::info!("loading image {}", path.display());
        let (tx, rx) = mpsc::channel();
        let task_name = name.clone();
        std::thread::spawn(move || {
            let result = decode_path(&path).map(|image| DecodedImage {
                name: task_name,
                image,
            });
            let _ = tx.send(result);
        });
        Self { name, rx }
    }

    pub fn spawn_from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        log::info!("loading image {name} ({} bytes)", bytes.len());
        let (tx, rx) = mpsc::channel();
        let task_name = name.clone();
        std::thread::spawn(move || {
            let result = decode_bytes(&bytes).map(|image| DecodedImage {
                name: task_name,
                image,
            });
            let _ = tx.send(result);
        });
        Self { name, rx }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The decode result once it is available.
    pub fn poll(&self) -> Option<Result<DecodedImage>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ScopeBoxError::Io(
                std::io::Error::other(format!("decoder for {} stopped", self.name)),
            ))),
        }
    }

    /// Block until the decode finishes.
    pub fn wait(self) -> Result<DecodedImage> {
        match self.rx.recv() {
            Ok(result) => result,
            Err(_) => Err(ScopeBoxError::Io(std::io::Error::other(format!(
                "decoder for {} stopped",
                self.name
            )))),
        }
    }
}
