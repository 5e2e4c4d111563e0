//! Configuration for the ScopeBox window.

use std::path::PathBuf;

use crate::data::calibration::{OverlayColor, OVERLAY_PALETTE};
use crate::interaction::PLACEHOLDER_TEXT;
use crate::persistence::default_calibration_path;
use crate::tools::{OverlayStyle, ToolKind};

/// Top-level configuration passed to [`crate::run_scopebox`].
///
/// | Field                | Purpose |
/// |----------------------|---------|
/// | `style`              | Label font size, label offset, sub-grid divisions |
/// | `calibration_path`   | Where the calibration record lives |
/// | `palette`            | Overlay colors offered in the settings panel |
#[derive(Clone)]
pub struct ScopeBoxConfig {
    // ── Window / chrome ──────────────────────────────────────────────────────
    /// Native window title.
    pub title: String,
    /// Optional eframe native-window options.
    pub native_options: Option<eframe::NativeOptions>,
    /// Text shown while no image is loaded.
    pub placeholder: String,

    // ── Measurement ──────────────────────────────────────────────────────────
    /// Tool selected at startup.
    pub initial_tool: ToolKind,
    pub style: OverlayStyle,
    /// Image opened right after startup.
    pub initial_image: Option<PathBuf>,

    // ── Calibration ──────────────────────────────────────────────────────────
    /// Calibration file. `None` falls back to `~/.scopebox/calibration.json`.
    pub calibration_path: Option<PathBuf>,
    /// Save the calibration after every change. When `false` the record only
    /// lives for the session.
    pub persist_calibration: bool,
    pub palette: Vec<OverlayColor>,
}

impl ScopeBoxConfig {
    /// Resolved calibration file, if persistence is on and a location exists.
    pub fn resolved_calibration_path(&self) -> Option<PathBuf> {
        if !self.persist_calibration {
            return None;
        }
        match &self.calibration_path {
            Some(p) => Some(p.clone()),
            None => match default_calibration_path() {
                Ok(p) => Some(p),
                Err(e) => {
                    log::warn!("calibration will not be saved: {e}");
                    None
                }
            },
        }
    }
}

impl Default for ScopeBoxConfig {
    fn default() -> Self {
        Self {
            title: "ScopeBox".to_string(),
            native_options: None,
            placeholder: PLACEHOLDER_TEXT.to_string(),

            initial_tool: ToolKind::SimpleRectangle,
            style: OverlayStyle::default(),
            initial_image: None,

            calibration_path: None,
            persist_calibration: true,
            palette: OVERLAY_PALETTE.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins_and_persistence_can_be_disabled() {
        let mut cfg = ScopeBoxConfig {
            calibration_path: Some(PathBuf::from("/tmp/cal.json")),
            ..Default::default()
        };
        assert_eq!(
            cfg.resolved_calibration_path(),
            Some(PathBuf::from("/tmp/cal.json"))
        );
        cfg.persist_calibration = false;
        assert_eq!(cfg.resolved_calibration_path(), None);
    }
}
