use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{Fps, StatusKind};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent, orchestration::dispatch_backend_command, reducer::FormState,
};

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm", "m4v"];

pub struct UploadFormApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    server_url: String,
    form: FormState,
}

impl UploadFormApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        server_url: String,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            server_url,
            form: FormState::default(),
        };
        app.dispatch(BackendCommand::CheckStatus);
        app
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.form.info);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.form.apply(event);
        }
    }

    fn pick_file(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("Video", VIDEO_EXTENSIONS)
            .pick_file();
        match picked {
            Some(path) => self.dispatch(BackendCommand::SelectFile { path }),
            None => self.dispatch(BackendCommand::ClearFile),
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        ui.heading("COLMAP Video Processor");
        ui.label(format!("Server: {}", self.server_url));
        ui.add_space(12.0);

        ui.horizontal(|ui| {
            ui.label("Video:");
            if ui.button(&self.form.file_label).clicked() {
                self.pick_file();
            }
        });
        if let Some(info) = &self.form.file_info {
            ui.label(info);
        }

        ui.horizontal(|ui| {
            ui.label("FPS:");
            ui.add(
                egui::TextEdit::singleline(&mut self.form.fps_input)
                    .desired_width(60.0)
                    .hint_text(format!("{}-{}", Fps::MIN, Fps::MAX)),
            );
        });
        ui.add_space(8.0);

        let loading = self.form.button_loading;
        let clicked = ui
            .horizontal(|ui| {
                if loading {
                    ui.spinner();
                }
                let label = if loading {
                    self.form.button_text().to_string()
                } else {
                    format!("▶ {}", self.form.button_text())
                };
                ui.add_enabled(self.form.can_submit(), egui::Button::new(label))
                    .clicked()
            })
            .inner;
        if clicked {
            let fps = self.form.fps_input.clone();
            self.dispatch(BackendCommand::Submit { fps });
        }

        if let Some(text) = &self.form.progress {
            ui.add_space(8.0);
            ui.add(egui::ProgressBar::new(1.0).text(text.as_str()));
        }

        if let Some((message, kind)) = &self.form.status {
            ui.add_space(8.0);
            let color = match kind {
                StatusKind::Success => egui::Color32::from_rgb(46, 160, 67),
                StatusKind::Error => egui::Color32::from_rgb(218, 54, 51),
            };
            ui.colored_label(color, message);
        }
    }
}

impl eframe::App for UploadFormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("info_line").show(ctx, |ui| {
            ui.small(&self.form.info);
        });
        egui::CentralPanel::default().show(ctx, |ui| self.show_form(ui));

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
