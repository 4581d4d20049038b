//! COVID Tracker - Main Entry Point

use covid_tracker::{config::AppConfig, frontend::CovidTrackerApp};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,covid_tracker=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting COVID Tracker");

    let config = AppConfig::load_or_default();
    tracing::debug!("National feed: {}{}", config.api.base_url, config.api.national_path);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 720.0])
            .with_min_inner_size([360.0, 480.0])
            .with_title("COVID Tracker"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "COVID Tracker",
        native_options,
        Box::new(|cc| {
            let mut style = (*cc.egui_ctx.style()).clone();
            style.visuals.window_shadow.offset = [0, 0];

            if config.ui.dark_mode {
                cc.egui_ctx.set_visuals(egui::Visuals::dark());
            } else {
                cc.egui_ctx.set_visuals(egui::Visuals::light());
            }

            cc.egui_ctx.set_style(style);

            Ok(Box::new(CovidTrackerApp::new(cc, config)))
        }),
    );

    tracing::info!("Shutting down...");
    result
}
