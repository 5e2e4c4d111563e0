//! Native ScopeBox window.
//!
//! | Sub-module         | Responsibility |
//! | ------------------ | -------------- |
//! | [`image_loader`]   | Decoding image files and dropped bytes on a worker thread |
//! | `scopebox_app`     | [`ScopeBoxApp`] (eframe) with menu, status line and drawing surface |
//! | `settings_ui`      | Calibration side panel |
//! | [`screenshot`]     | Saving the annotated window as PNG |
//! | `run`              | Top-level [`run_scopebox()`] entry point and icon loading |

pub mod image_loader;
mod run;
mod scopebox_app;
pub mod screenshot;
mod settings_ui;

pub use image_loader::{DecodedImage, ImageLoader};
pub use run::run_scopebox;
pub use scopebox_app::ScopeBoxApp;
