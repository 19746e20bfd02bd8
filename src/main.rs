use clap::Parser;
use color_eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::users::UserApi;

mod app;
mod cli;
mod command;
mod config;
mod screens;
mod theme;
pub mod tui;
mod ui;
mod users;

pub use theme::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = initialize_logging()?;
    info!("Starting userdeck");

    let args = cli::Args::parse();

    let mut config = config::load()?;
    if let Some(api_url) = args.api_url {
        config.api.base_url = api_url;
    }
    if let Some(theme_name) = args.theme {
        config.theme.name = theme_name;
    }

    let theme = theme::theme_from_name(&config.theme.name);
    let api = UserApi::new(&config.api.base_url)?;

    let mut app = App::new(api, theme);
    app.run().await?;

    Ok(())
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("userdeck").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "userdeck.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    Ok(guard)
}
