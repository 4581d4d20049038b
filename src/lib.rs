//! # COVID Tracker
//!
//! A desktop viewer for the daily COVID-19 counts published by the COVID
//! Tracking Project. The national series and every state's series are
//! fetched once at startup and plotted as positive, negative or death
//! increases over the last week, the last month, or the whole record.
//!
//! ## Architecture
//!
//! - **Backend**: A worker thread fetches both JSON feeds with reqwest on a
//!   small tokio runtime and sends each result over a crossbeam channel
//! - **Store**: [`TimeSeriesStore`] holds the chronological national series
//!   and the per-state index
//! - **Chart**: [`ChartAdapter`] projects the active series onto plot points
//!   for the chosen metric and time window
//! - **Controller**: [`SelectionController`] turns fetch results and user
//!   selections into chart and label updates
//! - **Frontend**: Renders the screen with eframe/egui and egui_plot
//!
//! ## Configuration
//!
//! Settings are stored as JSON in the platform data directory under
//! `com.supercoolapps.covidtracker`:
//!
//! - **Linux**: `~/.local/share/com.supercoolapps.covidtracker/`
//! - **macOS**: `~/Library/Application Support/com.supercoolapps.covidtracker/`
//! - **Windows**: `%APPDATA%\com.supercoolapps.covidtracker\`
//!
//! ## Example
//!
//! ```ignore
//! use covid_tracker::{config::AppConfig, frontend::CovidTrackerApp};
//!
//! fn main() -> eframe::Result<()> {
//!     let config = AppConfig::load_or_default();
//!     eframe::run_native(
//!         "COVID Tracker",
//!         eframe::NativeOptions::default(),
//!         Box::new(|cc| Ok(Box::new(CovidTrackerApp::new(cc, config)))),
//!     )
//! }
//! ```

pub mod app;
pub mod backend;
pub mod chart;
pub mod config;
pub mod controller;
pub mod error;
pub mod frontend;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use app::CovidTrackerApp;
pub use backend::{CovidClient, FetchBridge, FetchMessage};
pub use chart::ChartAdapter;
pub use config::AppConfig;
pub use controller::{ScreenPhase, SelectionController, SummaryLabels};
pub use error::{FetchError, Result, TrackerError};
pub use store::{PerStateIndex, TimeSeries, TimeSeriesStore};
pub use types::{CovidDataPoint, Metric, SeriesKey, TimeScale};
