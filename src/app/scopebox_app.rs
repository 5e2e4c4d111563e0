//! Standalone application wrapper for ScopeBox.
//!
//! [`ScopeBoxApp`] owns the interaction engine, the calibration store and the
//! in-flight image decode, and implements [`eframe::App`] so that ScopeBox can
//! run as a native window.

use eframe::egui;
use egui_phosphor::regular::{CAMERA, FOLDER_OPEN, RULER, X};

use crate::config::ScopeBoxConfig;
use crate::data::calibration::{CalibrationPatch, OverlayColor};
use crate::data::geometry::SurfacePoint;
use crate::interaction::{Effect, InteractionState, ScopeBox};
use crate::persistence::CalibrationStore;
use crate::surface::{EguiSurface, SurfaceSize};
use crate::tools::TOOL_PRESETS;

use super::image_loader::ImageLoader;
use super::{screenshot, settings_ui};

const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "bmp", "gif", "webp", "tiff"];

// ─────────────────────────────────────────────────────────────────────────────
// ScopeBoxApp
// ─────────────────────────────────────────────────────────────────────────────

pub struct ScopeBoxApp {
    pub scope_box: ScopeBox,
    pub store: CalibrationStore,
    palette: Vec<OverlayColor>,

    /// Decode running in the background, if any.
    loader: Option<ImageLoader>,
    /// Last message for the status line.
    status: Option<String>,
    request_screenshot: bool,

    // ── Pointer tracking ─────────────────────────────────────────────────────
    dragging: bool,
    last_pointer: Option<egui::Pos2>,
}

impl ScopeBoxApp {
    pub fn new(cfg: ScopeBoxConfig) -> Self {
        let mut store = match cfg.resolved_calibration_path() {
            Some(path) => CalibrationStore::with_path(path),
            None => CalibrationStore::default(),
        };
        store.subscribe(|r| log::debug!("calibration changed: {r:?}"));

        let mut scope_box = ScopeBox::new(SurfaceSize::default())
            .with_style(cfg.style.clone())
            .with_placeholder(cfg.placeholder.clone());
        scope_box.set_tool(cfg.initial_tool);

        Self {
            scope_box,
            store,
            palette: cfg.palette.clone(),
            loader: cfg.initial_image.clone().map(ImageLoader::spawn_from_path),
            status: None,
            request_screenshot: false,
            dragging: false,
            last_pointer: None,
        }
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    fn open_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .pick_file()
        {
            self.loader = Some(ImageLoader::spawn_from_path(path));
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };
        if let Some(path) = file.path {
            self.loader = Some(ImageLoader::spawn_from_path(path));
        } else if let Some(bytes) = file.bytes {
            self.loader = Some(ImageLoader::spawn_from_bytes(file.name, bytes.to_vec()));
        }
    }

    /// Hand a finished decode to the engine.
    fn poll_loader(&mut self, ctx: &egui::Context) {
        let Some(result) = self.loader.as_ref().and_then(|l| l.poll()) else {
            if self.loader.is_some() {
                ctx.request_repaint_after(std::time::Duration::from_millis(30));
            }
            return;
        };
        self.loader = None;

        match result {
            Ok(decoded) => {
                let name = decoded.name.clone();
                let loaded = decoded.into_loaded(ctx);
                match self.scope_box.image_ready(loaded) {
                    Ok(()) => {
                        log::info!("loaded image {name}");
                        self.set_status(format!("Loaded {name}"));
                    }
                    Err(e) => self.set_status(format!("Cannot show {name}: {e}")),
                }
            }
            Err(e) => {
                log::warn!("image load failed: {e}");
                self.set_status(format!("Failed to load image: {e}"));
            }
        }
    }

    fn apply_effects(&mut self, effects: Vec<Effect>, ctx: &egui::Context) {
        for effect in effects {
            match effect {
                Effect::ReportDivisionSize { x, y } => {
                    self.store.set(CalibrationPatch::division_size(x, y));
                    self.set_status(format!("Division size set to {x:.1} \u{00d7} {y:.1} px"));
                }
                Effect::Redraw => ctx.request_repaint(),
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Panels
    // ─────────────────────────────────────────────────────────────────────────

    fn render_menu(&mut self, ui: &mut egui::Ui) {
        egui::MenuBar::new().ui(ui, |ui| {
            if ui.button(format!("{FOLDER_OPEN} Open image")).clicked() {
                self.open_dialog();
            }
            ui.separator();

            let mut tool = self.scope_box.tool();
            egui::ComboBox::from_id_salt("tool_select")
                .selected_text(tool.label())
                .show_ui(ui, |ui| {
                    for (name, preset) in TOOL_PRESETS {
                        ui.selectable_value(&mut tool, preset, name);
                    }
                });
            if tool != self.scope_box.tool() {
                self.scope_box.set_tool(tool);
            }

            match self.scope_box.state() {
                InteractionState::CalibrateDivision(_) => {
                    if ui.button(format!("{X} Cancel")).clicked() {
                        self.scope_box.cancel_calibration();
                        self.set_status("Calibration cancelled");
                    }
                }
                state => {
                    let enabled = matches!(state, InteractionState::LiveMeasure(_));
                    if ui
                        .add_enabled(
                            enabled,
                            egui::Button::new(format!("{RULER} Define division size")),
                        )
                        .clicked()
                    {
                        self.scope_box.begin_calibration();
                        self.set_status("Drag across one grid division");
                    }
                }
            }
            ui.separator();

            if ui.button(format!("{CAMERA} Save PNG")).clicked() {
                self.request_screenshot = true;
            }
        });
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.weak(self.scope_box.state().name());
            if let Some(session) = self.scope_box.state().session() {
                ui.weak(format!("{:.0}%", session.zoom() * 100.0));
            }
            ui.separator();
            if let Some(loader) = &self.loader {
                ui.spinner();
                ui.label(format!("Decoding {}", loader.name()));
            } else if let Some(msg) = &self.status {
                ui.label(msg);
            }
        });
    }

    fn render_surface(&mut self, ui: &mut egui::Ui) {
        let ctx = ui.ctx().clone();
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        self.scope_box.resize(SurfaceSize::new(
            rect.width() as f64,
            rect.height() as f64,
            ctx.pixels_per_point() as f64,
        ));

        // Decoded images need a sized surface to fit into.
        self.poll_loader(&ctx);

        if response.clicked() && matches!(self.scope_box.state(), InteractionState::AwaitImage) {
            self.open_dialog();
        }

        let (pressed, released, latest) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.latest_pos(),
            )
        });
        let local = |p: egui::Pos2| SurfacePoint::from(p - rect.min.to_vec2());

        let mut effects = Vec::new();
        if let Some(pos) = latest {
            if pressed && response.hovered() {
                self.dragging = true;
                effects.extend(self.scope_box.pointer_down(local(pos)));
            }
            if self.last_pointer != Some(pos) && (self.dragging || response.hovered()) {
                effects.extend(self.scope_box.pointer_move(local(pos)));
            }
            if released && self.dragging {
                self.dragging = false;
                effects.extend(self.scope_box.pointer_up(local(pos)));
            }
        }
        self.last_pointer = latest;
        self.apply_effects(effects, &ctx);

        let mut surface = EguiSurface::new(&painter, rect.min);
        self.scope_box.render(Some(&mut surface), self.store.get());
    }

    fn handle_screenshot(&mut self, ctx: &egui::Context) {
        if self.request_screenshot {
            self.request_screenshot = false;
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
        }
        let shot = ctx.input(|i| {
            i.events.iter().rev().find_map(|e| {
                if let egui::Event::Screenshot { image, .. } = e {
                    Some(image.clone())
                } else {
                    None
                }
            })
        });
        if let Some(image) = shot {
            match screenshot::save_with_dialog(&image) {
                Some(Ok(())) => self.set_status("Screenshot saved"),
                Some(Err(e)) => {
                    log::warn!("failed to save screenshot: {e}");
                    self.set_status(format!("Failed to save screenshot: {e}"));
                }
                None => {}
            }
        }
    }
}

impl eframe::App for ScopeBoxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("scopebox_menu").show(ctx, |ui| {
            self.render_menu(ui);
        });

        egui::TopBottomPanel::bottom("scopebox_status").show(ctx, |ui| {
            self.render_status(ui);
        });

        egui::SidePanel::right("scopebox_calibration")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                let edit = settings_ui::calibration_panel(ui, self.store.get(), &self.palette);
                if let Some(record) = edit.record {
                    // Dragging a value edits every frame; save once it is released.
                    self.store.edit(record);
                }
                if edit.settled {
                    self.store.flush();
                }
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(ctx.style().visuals.extreme_bg_color))
            .show(ctx, |ui| {
                self.render_surface(ui);
            });

        self.handle_screenshot(ctx);
    }
}
