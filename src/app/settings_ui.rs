//! Side panel for editing the calibration record.

use eframe::egui;
use egui::Ui;

use crate::data::calibration::{CalibrationRecord, OverlayColor};

/// Which axis a row of widgets edits.
#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn title(self) -> &'static str {
        match self {
            Axis::X => "Horizontal (per division)",
            Axis::Y => "Vertical (per division)",
        }
    }

    fn fields(self, r: &mut CalibrationRecord) -> (&mut Option<f64>, &mut Option<f64>, &mut Option<String>) {
        match self {
            Axis::X => (&mut r.x_division_pixels, &mut r.x_division_scale, &mut r.x_unit),
            Axis::Y => (&mut r.y_division_pixels, &mut r.y_division_scale, &mut r.y_unit),
        }
    }
}

/// What the widgets did this frame.
#[derive(Debug, Clone, Copy, Default)]
struct Touched {
    changed: bool,
    /// The user let go of a widget; pending edits can be saved.
    settled: bool,
}

impl std::ops::BitOrAssign for Touched {
    fn bitor_assign(&mut self, rhs: Self) {
        self.changed |= rhs.changed;
        self.settled |= rhs.settled;
    }
}

/// Numeric editor for an optional value; `None` shows as `fallback`.
fn optional_number(ui: &mut Ui, value: &mut Option<f64>, fallback: f64, speed: f64) -> Touched {
    let mut v = value.unwrap_or(fallback);
    let resp = ui.add(egui::DragValue::new(&mut v).speed(speed).min_decimals(1));
    if resp.changed() {
        *value = Some(v);
    }
    Touched {
        changed: resp.changed(),
        settled: resp.drag_stopped()
            || resp.lost_focus()
            || (resp.changed() && !resp.dragged() && !resp.has_focus()),
    }
}

fn optional_text(ui: &mut Ui, value: &mut Option<String>) -> Touched {
    let mut buf = value.clone().unwrap_or_default();
    let resp = ui.add(egui::TextEdit::singleline(&mut buf).desired_width(60.0));
    if resp.changed() {
        let t = buf.trim();
        *value = if t.is_empty() { None } else { Some(t.to_string()) };
    }
    Touched {
        changed: resp.changed(),
        settled: resp.lost_focus(),
    }
}

fn axis_rows(ui: &mut Ui, record: &mut CalibrationRecord, axis: Axis) -> Touched {
    let mut touched = Touched::default();
    ui.label(egui::RichText::new(axis.title()).strong());
    let (pixels, scale, unit) = axis.fields(record);
    egui::Grid::new(("calibration_axis", axis.title()))
        .num_columns(2)
        .show(ui, |ui| {
            ui.label("Pixels");
            touched |= optional_number(ui, pixels, 0.0, 0.5);
            ui.end_row();

            ui.label("Scale");
            touched |= optional_number(ui, scale, 1.0, 0.01);
            ui.end_row();

            ui.label("Unit");
            touched |= optional_text(ui, unit);
            ui.end_row();
        });
    touched
}

fn color_picker(ui: &mut Ui, record: &mut CalibrationRecord, palette: &[OverlayColor]) -> Touched {
    let mut changed = false;
    let selected = record
        .overlay_color
        .as_ref()
        .map(|c| c.label.clone())
        .unwrap_or_else(|| "Default".to_string());
    egui::ComboBox::from_label("Overlay color")
        .selected_text(selected)
        .show_ui(ui, |ui| {
            for c in palette {
                let is_selected = record.overlay_color.as_ref() == Some(c);
                let text = egui::RichText::new(format!("\u{25a0} {}", c.label)).color(c.shade(1.0));
                if ui.selectable_label(is_selected, text).clicked() && !is_selected {
                    record.overlay_color = Some(c.clone());
                    changed = true;
                }
            }
        });
    Touched {
        changed,
        settled: changed,
    }
}

/// Result of one frame of the calibration editor.
pub(crate) struct PanelEdit {
    /// The edited copy, when anything changed this frame.
    pub record: Option<CalibrationRecord>,
    /// A widget was released; edits so far should be saved.
    pub settled: bool,
}

/// Draw the calibration editor for `record`.
pub(crate) fn calibration_panel(
    ui: &mut Ui,
    record: &CalibrationRecord,
    palette: &[OverlayColor],
) -> PanelEdit {
    let mut edited = record.clone();
    let mut touched = Touched::default();

    ui.heading("Calibration");
    ui.add_space(4.0);
    touched |= axis_rows(ui, &mut edited, Axis::X);
    ui.add_space(6.0);
    touched |= axis_rows(ui, &mut edited, Axis::Y);
    ui.separator();
    touched |= color_picker(ui, &mut edited, palette);

    if !edited.has_division_size() {
        ui.add_space(6.0);
        ui.weak("Use \"Define division size\" and drag over one grid square.");
    }

    PanelEdit {
        record: touched.changed.then_some(edited),
        settled: touched.settled,
    }
}
