//! Saving the annotated window as PNG.

use std::path::Path;

use chrono::{DateTime, TimeZone};
use eframe::egui;
use image::{Rgba, RgbaImage};

use crate::error::Result;

/// Default file name offered in the save dialog, e.g. `scopebox_20240131_154502.png`.
pub fn default_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("scopebox_{}.png", now.format("%Y%m%d_%H%M%S"))
}

pub fn to_rgba_image(shot: &egui::ColorImage) -> RgbaImage {
    let [w, h] = shot.size;
    let mut out = RgbaImage::new(w as u32, h as u32);
    for y in 0..h {
        for x in 0..w {
            let p = shot.pixels[y * w + x];
            out.put_pixel(x as u32, y as u32, Rgba([p.r(), p.g(), p.b(), p.a()]));
        }
    }
    out
}

/// Write a viewport capture to `path` (format from the extension).
pub fn save_png(shot: &egui::ColorImage, path: &Path) -> Result<()> {
    to_rgba_image(shot).save(path)?;
    log::info!("saved screenshot to {}", path.display());
    Ok(())
}

/// Ask for a target file and save `shot` there.
pub(crate) fn save_with_dialog(shot: &egui::ColorImage) -> Option<Result<()>> {
    let name = default_file_name(&chrono::Local::now());
    let path = rfd::FileDialog::new()
        .set_file_name(&name)
        .add_filter("PNG", &["png"])
        .save_file()?;
    Some(save_png(shot, &path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn file_name_carries_timestamp() {
        let t = Utc.with_ymd_and_hms(2024, 1, 31, 15, 45, 2).unwrap();
        assert_eq!(default_file_name(&t), "scopebox_20240131_154502.png");
    }

    #[test]
    fn saved_png_round_trips_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        let shot = egui::ColorImage::from_rgba_unmultiplied([2, 2], &[255u8, 0, 0, 255].repeat(4));
        save_png(&shot, &path).unwrap();

        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(back.dimensions(), (2, 2));
        assert_eq!(back.get_pixel(1, 1), &Rgba([255, 0, 0, 255]));
    }
}
