use std::cell::RefCell;
use std::rc::Rc;

use scopebox::persistence::{load_calibration_from_path, save_calibration_to_path};
use scopebox::{CalibrationPatch, CalibrationRecord, CalibrationStore, OverlayColor};

fn sample_record() -> CalibrationRecord {
    CalibrationRecord {
        x_division_pixels: Some(50.0),
        y_division_pixels: Some(40.0),
        x_division_scale: Some(2.0),
        y_division_scale: Some(0.5),
        x_unit: Some("ms".into()),
        y_unit: Some("V".into()),
        overlay_color: Some(OverlayColor::new("Yellow", [255, 255, 0])),
    }
}

#[test]
fn record_survives_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("calibration.json");
    save_calibration_to_path(&sample_record(), &path).unwrap();
    assert_eq!(load_calibration_from_path(&path).unwrap(), sample_record());
}

#[test]
fn missing_file_starts_from_default() {
    let dir = tempfile::tempdir().unwrap();
    let store = CalibrationStore::with_path(dir.path().join("calibration.json"));
    assert_eq!(store.get(), &CalibrationRecord::default());
    assert!(!store.path().unwrap().exists());
}

#[test]
fn unreadable_file_starts_from_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calibration.json");
    std::fs::write(&path, "{ not json").unwrap();
    let store = CalibrationStore::with_path(&path);
    assert_eq!(store.get(), &CalibrationRecord::default());
}

#[test]
fn set_notifies_and_saves() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calibration.json");
    let mut store = CalibrationStore::with_path(&path);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |r| sink.borrow_mut().push(r.x_division_pixels));

    store.set(CalibrationPatch::division_size(64.0, 32.0));

    assert_eq!(*seen.borrow(), vec![Some(64.0)]);
    let on_disk = load_calibration_from_path(&path).unwrap();
    assert_eq!(on_disk.x_division_pixels, Some(64.0));
    assert_eq!(on_disk.y_division_pixels, Some(32.0));

    // A fresh store picks up what was saved.
    let reopened = CalibrationStore::with_path(&path);
    assert_eq!(reopened.get(), store.get());
}

#[test]
fn patch_keeps_unrelated_fields() {
    let mut store = CalibrationStore::in_memory(sample_record());
    store.set(CalibrationPatch::division_size(10.0, 20.0));
    let r = store.get();
    assert_eq!(r.x_division_pixels, Some(10.0));
    assert_eq!(r.x_unit.as_deref(), Some("ms"));
    assert_eq!(r.y_division_scale, Some(0.5));
}

#[test]
fn unchanged_replace_does_not_notify() {
    let mut store = CalibrationStore::in_memory(sample_record());
    let count = Rc::new(RefCell::new(0));
    let c = Rc::clone(&count);
    store.subscribe(move |_| *c.borrow_mut() += 1);

    store.replace(sample_record());
    assert_eq!(*count.borrow(), 0);

    let mut edited = sample_record();
    edited.y_unit = Some("mV".into());
    store.replace(edited);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn in_memory_store_writes_nothing() {
    let mut store = CalibrationStore::default();
    store.set(CalibrationPatch::division_size(1.0, 1.0));
    assert!(store.path().is_none());
    store.save().unwrap();
}

#[test]
fn edits_are_saved_only_on_flush() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calibration.json");
    let mut store = CalibrationStore::with_path(&path);
    let seen = Rc::new(RefCell::new(0));
    let c = Rc::clone(&seen);
    store.subscribe(move |_| *c.borrow_mut() += 1);

    // A value being dragged produces one edit per frame.
    for px in [10.0, 11.0, 12.0] {
        let mut r = store.get().clone();
        r.x_division_pixels = Some(px);
        store.edit(r);
    }
    assert_eq!(*seen.borrow(), 3);
    assert!(store.is_dirty());
    assert!(!path.exists());

    store.flush();
    assert!(!store.is_dirty());
    assert_eq!(
        load_calibration_from_path(&path).unwrap().x_division_pixels,
        Some(12.0)
    );

    // Nothing pending: the file is left alone.
    std::fs::remove_file(&path).unwrap();
    store.flush();
    assert!(!path.exists());
}
