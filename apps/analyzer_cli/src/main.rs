use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    present, FsArtifactSink, HttpAnalysisTransport, Notification, NotificationLevel,
    SessionController, SubmitOutcome, UploadFile,
};
use tokio::{
    sync::broadcast::{self, error::RecvError},
    task::JoinHandle,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::load_settings;
use render::render_report;

/// Submit a test-case mind map for quality analysis.
#[derive(Parser, Debug)]
struct Args {
    /// Mind-map document to analyze.
    file: PathBuf,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Directory the optimization artifact is saved into.
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Download the optimization artifact after a successful analysis.
    #[arg(long)]
    download: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(v) = args.server_url {
        settings.server_url = v;
    }
    if let Some(v) = args.timeout_ms {
        settings.upload_timeout_ms = v;
    }
    if let Some(v) = args.out_dir {
        settings.download_dir = v;
    }
    info!(
        server_url = %settings.server_url,
        upload_timeout_ms = settings.upload_timeout_ms,
        "settings loaded"
    );

    let file = UploadFile::read(&args.file)
        .await
        .with_context(|| format!("failed to read '{}'", args.file.display()))?;
    if !file.has_extension(&settings.accepted_extension) {
        warn!(
            filename = %file.name,
            expected = %settings.accepted_extension,
            "file does not have the expected extension; submitting anyway"
        );
    }

    let controller = SessionController::new(
        Arc::new(HttpAnalysisTransport::with_upload_timeout(
            settings.server_url.clone(),
            settings.upload_timeout(),
        )),
        Arc::new(FsArtifactSink::new(settings.download_dir.clone())),
    );
    let banner = spawn_banner(controller.subscribe_notifications());

    let mut failed = matches!(controller.submit(file).await, SubmitOutcome::Failed(_));

    let session = controller.snapshot().await;
    if let Some(result) = session.result() {
        print!("{}", render_report(&present(result)));
    }

    if args.download && controller.retrieve_artifact().await.is_err() {
        failed = true;
    }

    // closes the notification channel so the banner task drains and exits
    drop(controller);
    let _ = banner.await;

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn spawn_banner(mut notifications: broadcast::Receiver<Notification>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match notifications.recv().await {
                Ok(notification) => print_notification(&notification),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "notification banner fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn print_notification(notification: &Notification) {
    let tag = match notification.level {
        NotificationLevel::Success => "ok",
        NotificationLevel::Error => "error",
    };
    eprintln!("[{tag}] {}", notification.text);
}
