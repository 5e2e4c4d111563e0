//! Calibration persistence: save and load the calibration record as JSON, and
//! the [`CalibrationStore`] that owns the record at runtime.

use std::path::{Path, PathBuf};

use crate::data::calibration::{CalibrationPatch, CalibrationRecord};
use crate::error::{Result, ScopeBoxError};

const STORE_DIR: &str = ".scopebox";
const STORE_FILE: &str = "calibration.json";

/// `~/.scopebox/calibration.json`.
pub fn default_calibration_path() -> Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .ok_or(ScopeBoxError::NoHomeDir)?;
    Ok(PathBuf::from(home).join(STORE_DIR).join(STORE_FILE))
}

/// Serialize a calibration record to pretty JSON.
pub fn calibration_to_json(record: &CalibrationRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Deserialize a calibration record; missing keys keep their defaults.
pub fn calibration_from_json(json: &str) -> Result<CalibrationRecord> {
    Ok(serde_json::from_str(json)?)
}

/// Write the record to `path`, creating parent directories as needed.
pub fn save_calibration_to_path(record: &CalibrationRecord, path: &Path) -> Result<()> {
    let txt = calibration_to_json(record)?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, txt)?;
    Ok(())
}

pub fn load_calibration_from_path(path: &Path) -> Result<CalibrationRecord> {
    let txt = std::fs::read_to_string(path)?;
    calibration_from_json(&txt)
}

type Subscriber = Box<dyn FnMut(&CalibrationRecord)>;

/// Owns the calibration record, notifies subscribers on every change and,
/// when backed by a file, saves after each change.
pub struct CalibrationStore {
    record: CalibrationRecord,
    path: Option<PathBuf>,
    subscribers: Vec<Subscriber>,
    /// Edited since the last save.
    dirty: bool,
}

impl std::fmt::Debug for CalibrationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalibrationStore")
            .field("record", &self.record)
            .field("path", &self.path)
            .field("subscribers", &self.subscribers.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Default for CalibrationStore {
    fn default() -> Self {
        Self::in_memory(CalibrationRecord::default())
    }
}

impl CalibrationStore {
    /// Store that never touches the disk.
    pub fn in_memory(record: CalibrationRecord) -> Self {
        Self {
            record,
            path: None,
            subscribers: Vec::new(),
            dirty: false,
        }
    }

    /// Store backed by `path`. A missing file starts from the default record;
    /// an unreadable one is logged and replaced on the next save.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let record = if path.exists() {
            match load_calibration_from_path(&path) {
                Ok(r) => {
                    log::info!("loaded calibration from {}", path.display());
                    r
                }
                Err(e) => {
                    log::warn!("ignoring calibration at {}: {e}", path.display());
                    CalibrationRecord::default()
                }
            }
        } else {
            CalibrationRecord::default()
        };
        Self {
            record,
            path: Some(path),
            subscribers: Vec::new(),
            dirty: false,
        }
    }

    pub fn get(&self) -> &CalibrationRecord {
        &self.record
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Merge `patch` into the record.
    pub fn set(&mut self, patch: CalibrationPatch) {
        self.record.apply(patch);
        self.changed();
    }

    /// Replace the whole record.
    pub fn replace(&mut self, record: CalibrationRecord) {
        if record == self.record {
            return;
        }
        self.record = record;
        self.changed();
    }

    /// Replace the record and notify subscribers, but leave saving to
    /// [`flush`](Self::flush). Used for edits that arrive every frame.
    pub fn edit(&mut self, record: CalibrationRecord) {
        if record == self.record {
            return;
        }
        self.record = record;
        self.dirty = true;
        self.notify();
    }

    /// Save pending [`edit`](Self::edit)s, if any.
    pub fn flush(&mut self) {
        if self.dirty {
            self.persist();
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Call `callback` with the record after every change.
    pub fn subscribe(&mut self, callback: impl FnMut(&CalibrationRecord) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Write the record to the backing file, if any.
    pub fn save(&self) -> Result<()> {
        match &self.path {
            Some(path) => save_calibration_to_path(&self.record, path),
            None => Ok(()),
        }
    }

    fn notify(&mut self) {
        for cb in self.subscribers.iter_mut() {
            cb(&self.record);
        }
    }

    fn persist(&mut self) {
        match self.save() {
            Ok(()) => self.dirty = false,
            Err(e) => log::warn!("failed to save calibration: {e}"),
        }
    }

    fn changed(&mut self) {
        self.notify();
        self.persist();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_flat_camel_case_keys() {
        let record = CalibrationRecord {
            x_division_pixels: Some(42.0),
            y_unit: Some("V".into()),
            ..Default::default()
        };
        let json = calibration_to_json(&record).unwrap();
        assert!(json.contains("\"xDivImageSize\": 42.0"));
        assert!(json.contains("\"yDivPhysicalUnit\": \"V\""));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let record = calibration_from_json(r#"{"xDivPhysicalScale": 0.5}"#).unwrap();
        assert_eq!(record.x_division_scale, Some(0.5));
        assert_eq!(record.y_division_pixels, None);
    }

    #[test]
    fn garbage_json_is_a_serialization_error() {
        let err = calibration_from_json("not json").unwrap_err();
        assert!(matches!(err, ScopeBoxError::Serialization(_)));
    }
}
