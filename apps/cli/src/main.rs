use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, select_video, DirectorySink, ProcessingBackend, ProcessingClient,
    SubmitOutcome, UploadController,
};
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::TerminalView;

#[derive(Parser, Debug)]
#[command(about = "Send videos to the COLMAP processing service")]
struct Cli {
    /// Base URL of the processing service, e.g. http://127.0.0.1:8000
    #[arg(long, global = true)]
    server_url: Option<String>,
    /// Directory the returned archive is saved into
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a video and download the resulting COLMAP project
    Process {
        #[arg(long)]
        video: PathBuf,
        /// Frames per second to extract (1-120)
        #[arg(long, allow_hyphen_values = true)]
        fps: String,
    },
    /// Show whether the backend pipeline is available
    Status,
    /// Show backend health information
    Health,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings();
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }
    if let Some(output_dir) = cli.output_dir {
        settings.output_dir = output_dir;
    }
    let client = Arc::new(ProcessingClient::from_settings(&settings)?);

    match cli.command {
        Command::Process { video, fps } => {
            let controller = UploadController::new(
                client,
                Arc::new(TerminalView::default()),
                Arc::new(DirectorySink::new(&settings.output_dir)),
            );
            controller.check_status().await;

            let selected = match select_video(&video) {
                Ok(selected) => Some(selected),
                Err(err) => {
                    tracing::error!("cannot use '{}': {err:#}", video.display());
                    None
                }
            };
            controller.on_file_selected(selected.as_ref());

            match controller.submit(selected.as_ref(), &fps).await {
                SubmitOutcome::Completed { saved_to, .. } => {
                    println!("Saved to {}", saved_to.display());
                    Ok(ExitCode::SUCCESS)
                }
                _ => Ok(ExitCode::FAILURE),
            }
        }
        Command::Status => {
            let status = client.pipeline_status().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
            Ok(if status.is_pipeline_available() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Health => {
            let health = client.health().await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn process_keeps_raw_fps_for_validation() {
        let cli = Cli::try_parse_from([
            "uploader_cli",
            "--server-url",
            "http://gpu-box:8000",
            "process",
            "--video",
            "scan.mp4",
            "--fps",
            "-3",
        ])
        .expect("parse");

        assert_eq!(cli.server_url.as_deref(), Some("http://gpu-box:8000"));
        match cli.command {
            Command::Process { video, fps } => {
                assert_eq!(video, PathBuf::from("scan.mp4"));
                assert_eq!(fps, "-3");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
