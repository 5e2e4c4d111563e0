//! ScopeBox crate root: re-exports and module wiring.
//!
//! ScopeBox measures oscilloscope screenshots. Load a picture of a trace,
//! drag over one grid division to tell it how large a division is, enter the
//! physical scale per division, then drag measurement overlays to read off
//! voltages, times, periods, frequencies and time constants.
//!
//! - `data`: SI units, calibration record, coordinate spaces, loaded images
//! - `tools`: the measurement overlays
//! - `surface`: the drawing abstraction (egui painter or headless recorder)
//! - `interaction`: pointer-driven state machine and the [`ScopeBox`] owner
//! - `persistence`: JSON storage of the calibration record
//! - `app`: the eframe window and [`run_scopebox`]

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod interaction;
pub mod persistence;
pub mod surface;
pub mod tools;

// Public re-exports for a compact external API
pub use app::{run_scopebox, ImageLoader, ScopeBoxApp};
pub use config::ScopeBoxConfig;
pub use data::calibration::{CalibrationPatch, CalibrationRecord, OverlayColor};
pub use data::geometry::{DragGesture, DragRect, FitTransform, ImagePoint, ImageSize, SurfacePoint};
pub use data::image::LoadedImage;
pub use error::ScopeBoxError;
pub use interaction::{Effect, InteractionState, PointerEvent, ScopeBox};
pub use persistence::CalibrationStore;
pub use surface::{DrawSurface, EguiSurface, RecordingSurface, SurfaceSize};
pub use tools::{OverlayStyle, Readout, ToolKind};
