//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{
    select_video, ClientSettings, DirectorySink, ProcessingClient, SubmitOutcome,
    UploadController,
};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::{SelectedVideo, StatusKind};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{ChannelView, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    thread::spawn(move || {
        let view = ChannelView::new(ui_tx);
        view.send(UiEvent::Info("Backend worker starting...".to_string()));

        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                view.send(UiEvent::Info(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let client = match ProcessingClient::from_settings(&settings) {
            Ok(client) => client,
            Err(err) => {
                view.send(UiEvent::Info(format!(
                    "backend worker startup failure: {err:#}"
                )));
                tracing::error!("failed to build processing client: {err:#}");
                return;
            }
        };

        let controller = Arc::new(UploadController::new(
            Arc::new(client),
            Arc::new(view.clone()),
            Arc::new(DirectorySink::new(&settings.output_dir)),
        ));

        runtime.block_on(async move {
            view.send(UiEvent::Info(format!(
                "Connected to {} - archives are saved to {}",
                settings.server_url,
                settings.output_dir.display()
            )));

            let mut selected: Option<SelectedVideo> = None;
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::SelectFile { path } => match select_video(&path) {
                        Ok(video) => {
                            view.send(UiEvent::FileChosen {
                                filename: video.filename.clone(),
                            });
                            controller.on_file_selected(Some(&video));
                            selected = Some(video);
                        }
                        Err(err) => {
                            tracing::warn!("cannot use '{}': {err:#}", path.display());
                            selected = None;
                            controller.on_file_selected(None);
                            view.send(UiEvent::Status {
                                message: format!("❌ {err}"),
                                kind: StatusKind::Error,
                            });
                        }
                    },
                    BackendCommand::ClearFile => {
                        selected = None;
                        controller.on_file_selected(None);
                    }
                    BackendCommand::Submit { fps } => {
                        let controller = controller.clone();
                        let video = selected.clone();
                        tokio::spawn(async move {
                            let outcome = controller.submit(video.as_ref(), &fps).await;
                            if let SubmitOutcome::Busy = outcome {
                                tracing::debug!("submit ignored while a request is in flight");
                            }
                        });
                    }
                    BackendCommand::CheckStatus => {
                        let controller = controller.clone();
                        tokio::spawn(async move {
                            controller.check_status().await;
                        });
                    }
                }
            }
            tracing::info!("ui command channel closed; backend worker exiting");
        });
    });
}
