//! Parcel Desk - station console for parcel intake, delivery and payouts.

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use parcel_desk as app;

use app::config::{AppConfig, ConfigLoadResult};
use app::ui::App;
use app::{logging, services};

/// Station console for parcel intake, delivery and payouts.
#[derive(Parser)]
#[command(name = "parcel-desk")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = if cli.dev {
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };

    let mut startup_error = None;
    let config = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => config,
        ConfigLoadResult::Missing => AppConfig::default(),
        ConfigLoadResult::Invalid(e) => {
            startup_error = Some(format!("Config at {} is invalid, using defaults.\n\n{e}", config_path.display()));
            AppConfig::default()
        }
    };

    // Keep the guard alive so buffered log lines are flushed on exit
    let logging = logging::init_logging(&config.logging, cli.dev)?;

    tracing::info!("Parcel Desk {} starting...", env!("CARGO_PKG_VERSION"));
    tracing::info!("Config path: {:?}", config_path);
    if let Some(path) = &logging.log_file_path {
        tracing::info!("Logging to {:?}", path);
    }
    match &startup_error {
        Some(e) => tracing::warn!("{}", e),
        None if !config_path.exists() => {
            tracing::info!("Config missing, writing defaults");
            if let Err(e) = config.save(&config_path) {
                tracing::warn!("Could not write default config: {}", e);
            }
        }
        None => tracing::info!("Config loaded successfully"),
    }

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()?;
    let location_service = services::build_location_service(&config.service)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Parcel Desk")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Parcel Desk",
        options,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(App::new(config, rt, location_service, startup_error)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing::info!("Parcel Desk stopped");
    Ok(())
}
