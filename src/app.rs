//! Main application state and UI.
//!
//! Owns the selection registry, the located encoder and the running job
//! handle. The worker publishes events over a channel and the UI drains
//! them each frame; while a batch runs the add/clear/start actions stay
//! disabled until the terminal event arrives.

use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, Vec2};

use crate::converter::dragdrop::parse_drop_payload;
use crate::converter::encoder::{self, FfmpegEncoder};
use crate::converter::formats::{BitratePreset, SUPPORTED_INPUT_EXTENSIONS};
use crate::converter::runner::{JobHandle, RunnerEvent};
use crate::converter::selection::SelectionSet;
use crate::settings::AppSettings;

/// Result banner shown after a batch ends.
#[derive(Debug, Clone, Copy)]
struct BatchSummary {
    succeeded: usize,
    total: usize,
}

/// Main application state.
pub struct Mp3BatchApp {
    selection: SelectionSet,
    /// Located encoder binary; `None` disables conversion entirely.
    encoder_path: Option<PathBuf>,
    settings: AppSettings,
    settings_path: PathBuf,
    /// Active batch, if any. At most one at a time.
    job: Option<JobHandle>,
    progress_percent: f32,
    status: String,
    summary: Option<BatchSummary>,
}

impl Mp3BatchApp {
    /// Create a new application instance.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = AppSettings::default_path();
        let settings = AppSettings::load(&settings_path);

        let encoder_path = settings
            .encoder_override
            .clone()
            .filter(|p| p.is_file())
            .or_else(encoder::locate);
        match &encoder_path {
            Some(path) => log::info!("encoder found: {}", path.display()),
            None => log::warn!("no encoder found, conversion disabled"),
        }

        Self {
            selection: SelectionSet::new(),
            encoder_path,
            settings,
            settings_path,
            job: None,
            progress_percent: 0.0,
            status: "Waiting for files...".to_string(),
            summary: None,
        }
    }

    fn save_settings(&self) {
        if let Err(e) = self.settings.save(&self.settings_path) {
            log::warn!("failed to save settings: {e:#}");
        }
    }

    /// Add paths to the selection and report the outcome in the status line.
    fn add_paths(&mut self, paths: Vec<PathBuf>) {
        if paths.is_empty() {
            return;
        }
        let added = self.selection.add_files(paths);
        if added > 0 {
            self.status = format!("Added {} file(s)", added);
            log::info!("added {} files, {} selected", added, self.selection.len());
        }
    }

    /// Open the native multi-file picker.
    fn open_file_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("Media files", SUPPORTED_INPUT_EXTENSIONS)
            .add_filter("All files", &["*"]);
        if let Some(dir) = &self.settings.last_open_dir {
            dialog = dialog.set_directory(dir);
        }

        if let Some(paths) = dialog.pick_files() {
            if let Some(parent) = paths.first().and_then(|p| p.parent()) {
                self.settings.last_open_dir = Some(parent.to_path_buf());
                self.save_settings();
            }
            self.add_paths(paths);
        }
    }

    /// Open the native folder picker and scan it recursively.
    fn open_folder_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new();
        if let Some(dir) = &self.settings.last_open_dir {
            dialog = dialog.set_directory(dir);
        }

        if let Some(dir) = dialog.pick_folder() {
            self.settings.last_open_dir = Some(dir.clone());
            self.save_settings();

            let added = self.selection.add_from_directory(&dir);
            self.status = if added > 0 {
                format!("Added {} file(s) from folder", added)
            } else {
                "No supported files found in folder".to_string()
            };
        }
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
        self.summary = None;
        self.progress_percent = 0.0;
        self.status = "Waiting for files...".to_string();
    }

    /// Spawn the background batch. The worker gets its own copy of the file
    /// list; the selection stays untouched until the batch ends.
    fn start_conversion(&mut self) {
        let Some(binary) = self.encoder_path.clone() else {
            return;
        };
        if self.selection.is_empty() || self.job.is_some() {
            return;
        }

        let files = self.selection.files().to_vec();
        log::info!("starting batch of {} files", files.len());
        self.summary = None;
        self.progress_percent = 0.0;
        self.job = Some(JobHandle::spawn(
            files,
            FfmpegEncoder::new(binary, self.settings.mp3),
        ));
    }

    /// Drain worker events and fold them into the UI state.
    fn poll_job(&mut self) {
        let events = match &self.job {
            Some(job) => job.poll_events(),
            None => return,
        };

        let mut finished = false;
        for event in events {
            match event {
                RunnerEvent::FileStarted { progress } => {
                    self.status = format!(
                        "Converting ({}/{}): {}",
                        progress.index + 1,
                        progress.total,
                        progress.filename
                    );
                }
                RunnerEvent::FileFinished { progress, result, percent } => {
                    self.progress_percent = percent as f32;
                    if let Some(error) = &result.error {
                        self.status = format!("Failed {}: {}", progress.filename, error);
                    }
                }
                RunnerEvent::BatchFinished { succeeded, total, .. } => {
                    self.status = format!("Conversion finished. {}/{} succeeded", succeeded, total);
                    self.summary = Some(BatchSummary { succeeded, total });
                    finished = true;
                }
            }
        }

        if finished {
            if let Some(job) = self.job.take() {
                job.finish();
            }
        }
    }

    /// Take in files dropped onto the window.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if self.job.is_some() {
            return;
        }

        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }

        let mut paths = Vec::new();
        for file in dropped {
            if let Some(path) = file.path {
                paths.push(path);
            } else if !file.name.is_empty() {
                // Textual payload; entries carrying spaces come brace-wrapped.
                paths.extend(parse_drop_payload(&file.name).into_iter().map(PathBuf::from));
            }
        }
        self.add_paths(paths);
    }

    /// Persistent encoder banner.
    fn show_encoder_banner(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| match &self.encoder_path {
            Some(path) => {
                ui.label(RichText::new("Encoder:").small());
                ui.label(
                    RichText::new(path.display().to_string())
                        .monospace()
                        .small()
                        .color(Color32::GREEN),
                );
            }
            None => {
                ui.label(RichText::new("⚠").color(Color32::YELLOW));
                ui.label(
                    RichText::new(
                        "No ffmpeg found. Install it or place the binary next to the \
                         program or under ffmpeg/, bin/ or tools/.",
                    )
                    .color(Color32::YELLOW)
                    .small(),
                );
            }
        });
    }

    /// Toolbar with add/clear buttons, disabled while a batch runs.
    fn show_toolbar(&mut self, ui: &mut egui::Ui) {
        let idle = self.job.is_none();
        ui.horizontal(|ui| {
            ui.add_enabled_ui(idle, |ui| {
                if ui.button("➕ Add Files").clicked() {
                    self.open_file_dialog();
                }
                if ui.button("📁 Add Folder").clicked() {
                    self.open_folder_dialog();
                }
                ui.separator();
                if ui.button("🗑 Clear").clicked() {
                    self.clear_selection();
                }
            });
        });
    }

    /// Scrollable list of selected files.
    fn show_file_list(&mut self, ui: &mut egui::Ui) {
        let available_height = (ui.available_height() - 180.0).max(120.0);

        egui::ScrollArea::vertical()
            .max_height(available_height)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if self.selection.is_empty() {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            RichText::new("Drop files here or click Add Files")
                                .italics()
                                .color(Color32::GRAY),
                        );
                    });
                } else {
                    for file in self.selection.files() {
                        ui.label(file.file_name());
                    }
                }
            });

        ui.label(
            RichText::new(format!("{} file(s) selected", self.selection.len()))
                .small()
                .color(Color32::GRAY),
        );

        // Visual feedback while dragging over the window
        let is_dragging = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
        if is_dragging {
            let painter = ui.painter();
            let rect = ui.max_rect();
            painter.rect_stroke(
                rect,
                4.0,
                egui::Stroke::new(2.0, Color32::from_rgb(100, 200, 255)),
            );
        }
    }

    /// Output settings: bitrate presets.
    fn show_settings(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Bitrate:");
            let idle = self.job.is_none();
            ui.add_enabled_ui(idle, |ui| {
                for preset in BitratePreset::all() {
                    let selected = self.settings.mp3.bitrate == *preset;
                    if ui.selectable_label(selected, preset.display_name()).clicked() {
                        self.settings.mp3.bitrate = *preset;
                        self.save_settings();
                    }
                }
            });
        });
        ui.label(
            RichText::new("MP3 files are written next to their source files.")
                .italics()
                .small()
                .color(Color32::GRAY),
        );
    }

    /// Progress bar, status line and the start button.
    fn show_progress(&mut self, ui: &mut egui::Ui) {
        let can_start =
            self.job.is_none() && !self.selection.is_empty() && self.encoder_path.is_some();

        ui.add_enabled_ui(can_start, |ui| {
            let button = egui::Button::new(RichText::new("▶ Start Conversion").strong());
            if ui.add_sized(Vec2::new(ui.available_width(), 28.0), button).clicked() {
                self.start_conversion();
            }
        });

        ui.add_space(6.0);

        let bar = egui::ProgressBar::new(self.progress_percent / 100.0)
            .show_percentage()
            .animate(self.job.is_some());
        ui.add(bar);

        ui.add_space(4.0);
        ui.label(RichText::new(self.status.as_str()).italics().color(Color32::LIGHT_BLUE));

        if let Some(summary) = self.summary {
            let color = if summary.succeeded == summary.total {
                Color32::GREEN
            } else {
                Color32::YELLOW
            };
            ui.label(
                RichText::new(format!(
                    "Done: {}/{} converted",
                    summary.succeeded, summary.total
                ))
                .color(color),
            );
        }
    }
}

impl eframe::App for Mp3BatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_job();
        self.handle_dropped_files(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("MP3 Batch Converter");
            });
            ui.add_space(8.0);

            self.show_encoder_banner(ui);
            ui.separator();

            self.show_toolbar(ui);
            ui.separator();

            self.show_file_list(ui);
            ui.separator();

            self.show_settings(ui);
            ui.separator();

            self.show_progress(ui);
        });

        // Keep draining worker events while a batch runs
        if self.job.is_some() {
            ctx.request_repaint();
        }
    }
}
