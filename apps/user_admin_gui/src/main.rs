use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::{UserCollection, UserCollectionClient};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{StartupConfig, UserAdminApp};

const COMMAND_QUEUE_CAPACITY: usize = 256;
const EVENT_QUEUE_CAPACITY: usize = 1024;

#[derive(Parser, Debug)]
#[command(about = "Desktop user administration for a REST user collection")]
struct Args {
    /// Settings file; defaults to ./user_admin.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Base URL of the API, e.g. http://localhost:8080.
    #[arg(long)]
    api_url: Option<String>,
    /// Backend label used in the API path and for styling.
    #[arg(long)]
    backend: Option<String>,
    #[arg(long)]
    assets_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = config::load_settings(args.config.as_deref());
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    if let Some(backend) = args.backend {
        settings.backend = backend;
    }
    if let Some(assets_dir) = args.assets_dir {
        settings.assets_dir = assets_dir;
    }
    tracing::info!(
        api_url = %settings.api_url,
        backend = %settings.backend,
        "starting user admin"
    );

    let client_config = settings.client_config()?;
    let collection: Arc<dyn UserCollection> = Arc::new(
        UserCollectionClient::new(client_config).context("failed to build user collection client")?,
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(COMMAND_QUEUE_CAPACITY);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(EVENT_QUEUE_CAPACITY);
    backend_bridge::runtime::launch(collection, cmd_rx, ui_tx);

    let startup = StartupConfig::from_settings(&settings);
    let title = format!("User Admin - {}", startup.backend.display_title());
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size([560.0, 760.0])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(UserAdminApp::new(cmd_tx, ui_rx, startup)))
        }),
    )
    .map_err(|err| anyhow!("failed to run desktop window: {err}"))
}
