//! Frontend module for egui UI
//!
//! This module provides the tracker screen using eframe/egui. Fetch results
//! arrive from the backend worker through a crossbeam channel and are
//! applied to the [`SelectionController`] at the start of every frame.
//!
//! # Layout
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ COVID Tracker            [state picker ▾]│  top panel
//! ├──────────────────────────────────────────┤
//! │ 12,345                                   │
//! │ Jan 02, 2021                             │
//! │                                          │  central panel
//! │            ╱╲    ╱╲                      │
//! │  ─────────╱  ╲──╱  ╲───────              │
//! ├──────────────────────────────────────────┤
//! │ (•) Positive ( ) Negative ( ) Death      │  selectors
//! │ ( ) Week ( ) Month (•) Max               │
//! ├──────────────────────────────────────────┤
//! │ ● Ready | National: 420 days | ...       │  status bar
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Submodules
//!
//! - `plot` - Chart rendering with egui_plot
//! - `state` - [`AppAction`] emitted by the render code
//! - `status_bar` - Fetch status line
//! - `widgets` - Status indicator, summary labels, radio rows

mod plot;
pub mod state;
pub mod status_bar;
pub mod widgets;

pub use plot::PlotView;
pub use state::AppAction;
pub use widgets::*;

use crate::backend::{spawn_fetches, CovidClient, FetchBridge};
use crate::config::AppConfig;
use crate::controller::{ScreenPhase, SelectionController};
use crate::types::{Metric, SeriesKey, TimeScale};
use egui::{Color32, RichText};
use status_bar::{render_status_bar, StatusBarContext};
use std::thread::JoinHandle;

/// Main application state for the tracker
pub struct CovidTrackerApp {
    // === Communication ===
    fetches: Option<FetchBridge>,
    _worker: Option<JoinHandle<()>>,

    // === Shared State ===
    controller: SelectionController,
    config: AppConfig,
    plot: PlotView,
}

impl CovidTrackerApp {
    /// Create the app and start both fetches
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let fonts = egui::FontDefinitions::default();
        cc.egui_ctx.set_fonts(fonts);

        let mut style = (*cc.egui_ctx.style()).clone();
        style.text_styles.iter_mut().for_each(|(_, font_id)| {
            font_id.size *= config.ui.font_scale;
        });
        cc.egui_ctx.set_style(style);

        let mut controller = SelectionController::new();
        let repaint_ctx = cc.egui_ctx.clone();
        let started = CovidClient::new(&config.api)
            .and_then(|client| spawn_fetches(client, move || repaint_ctx.request_repaint()));

        let (fetches, worker) = match started {
            Ok((bridge, handle)) => (Some(bridge), Some(handle)),
            Err(e) => {
                tracing::error!("Could not start fetches: {}", e);
                let reason = e.to_string();
                controller.on_national_failed(reason.clone());
                controller.on_states_failed(reason);
                (None, None)
            }
        };

        Self {
            fetches,
            _worker: worker,
            plot: PlotView::from_config(&config.ui),
            controller,
            config,
        }
    }

    /// Build the app around an existing bridge without spawning a worker
    pub fn with_bridge(bridge: FetchBridge, config: AppConfig) -> Self {
        Self {
            fetches: Some(bridge),
            _worker: None,
            plot: PlotView::from_config(&config.ui),
            controller: SelectionController::new(),
            config,
        }
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    /// Apply every fetch completion waiting in the channel
    ///
    /// Returns `true` if anything arrived.
    pub fn process_fetch_messages(&mut self) -> bool {
        let Some(bridge) = self.fetches.as_ref() else {
            return false;
        };
        let messages = bridge.drain();
        let had_messages = !messages.is_empty();

        for msg in messages {
            tracing::trace!("Applying {} fetch result", msg.source());
            self.controller.handle_fetch(msg);
        }
        had_messages
    }

    pub fn handle_action(&mut self, action: AppAction) {
        let result = match action {
            AppAction::SelectMetric(metric) => self.controller.select_metric(metric),
            AppAction::SelectScale(scale) => self.controller.select_scale(scale),
            AppAction::SelectSeries(key) => self.controller.select_series(key),
            AppAction::Scrub(index) => self.controller.scrub(index).map(|_| ()),
        };

        if let Err(e) = result {
            tracing::warn!("Ignoring selection: {}", e);
        }
    }

    fn render_header(&self, ui: &mut egui::Ui, actions: &mut Vec<AppAction>) {
        ui.horizontal(|ui| {
            ui.heading("COVID Tracker");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let active = self.controller.active_series().clone();
                let names = self.controller.state_names();

                ui.add_enabled_ui(self.controller.can_select_state(), |ui| {
                    let mut picked = active.clone();
                    egui::ComboBox::from_id_salt("state_picker")
                        .selected_text(active.picker_label())
                        .show_ui(ui, |ui| {
                            for name in &names {
                                let key = SeriesKey::from_picker_entry(name);
                                ui.selectable_value(&mut picked, key, name.as_str());
                            }
                        });
                    if picked != active {
                        actions.push(AppAction::SelectSeries(picked));
                    }
                });
            });
        });
    }

    fn render_selectors(&self, ui: &mut egui::Ui, actions: &mut Vec<AppAction>) {
        let metrics: Vec<_> = Metric::ALL.iter().map(|m| (*m, m.label())).collect();
        let scales: Vec<_> = TimeScale::ALL.iter().map(|s| (*s, s.label())).collect();

        ui.add_enabled_ui(self.controller.chart_ready(), |ui| {
            if let Some(metric) = selector_row(ui, self.controller.metric(), &metrics) {
                actions.push(AppAction::SelectMetric(metric));
            }
            if let Some(scale) = selector_row(ui, self.controller.scale(), &scales) {
                actions.push(AppAction::SelectScale(scale));
            }
        });
    }

    fn render_chart(&self, ui: &mut egui::Ui, actions: &mut Vec<AppAction>) {
        if let Some(labels) = self.controller.labels() {
            ui.add(SummaryDisplay::new(labels).with_value_size(32.0 * self.config.ui.font_scale));
            ui.add_space(8.0);
        }

        match self.controller.chart() {
            Some(chart) => {
                let color = to_color32(self.controller.line_color());
                let hovered =
                    self.plot
                        .render(ui, chart, color, self.controller.shown_index());
                if let Some(index) = hovered {
                    if Some(index) != self.controller.shown_index() {
                        actions.push(AppAction::Scrub(index));
                    }
                }
            }
            None if self.controller.phase() == ScreenPhase::LoadError => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new("Could not load the national series")
                            .color(Color32::LIGHT_RED),
                    );
                });
            }
            None => {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
            }
        }
    }
}

impl eframe::App for CovidTrackerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.process_fetch_messages() {
            ctx.request_repaint();
        }

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.render_header(ui, &mut actions);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let active_label = self.controller.active_series().picker_label().to_string();
            render_status_bar(
                ui,
                &StatusBarContext {
                    phase: self.controller.phase(),
                    store: self.controller.store(),
                    active_label: &active_label,
                },
            );
        });

        egui::TopBottomPanel::bottom("selectors").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_selectors(ui, &mut actions);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_chart(ui, &mut actions);
        });

        for action in actions {
            self.handle_action(action);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.config.save() {
            tracing::warn!("Failed to save config: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::FetchMessage;
    use crate::store::{PerStateIndex, TimeSeries};
    use crate::types::CovidDataPoint;
    use chrono::NaiveDate;

    fn day(n: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, 1).unwrap() + chrono::Days::new(n)
    }

    #[test]
    fn test_fetch_messages_reach_controller() {
        let (bridge, tx) = FetchBridge::new();
        let mut app = CovidTrackerApp::with_bridge(bridge, AppConfig::default());
        assert!(!app.process_fetch_messages());

        tx.send(FetchMessage::National(Ok(TimeSeries::from_chronological(vec![
            CovidDataPoint::national(day(0), 5, 6, 7),
            CovidDataPoint::national(day(1), 8, 9, 10),
        ]))))
        .unwrap();
        tx.send(FetchMessage::States(Ok(PerStateIndex::from_api_order(vec![
            CovidDataPoint::for_state("WA", day(0), 1, 2, 3),
        ]))))
        .unwrap();

        assert!(app.process_fetch_messages());
        assert_eq!(app.controller().phase(), ScreenPhase::Ready);
        assert!(app.controller().can_select_state());
    }

    #[test]
    fn test_actions_drive_selection() {
        let (bridge, tx) = FetchBridge::new();
        let mut app = CovidTrackerApp::with_bridge(bridge, AppConfig::default());
        tx.send(FetchMessage::National(Ok(TimeSeries::from_chronological(
            (0..10)
                .map(|i| CovidDataPoint::national(day(i), 100 + i as i64, 0, i as i64))
                .collect(),
        ))))
        .unwrap();
        app.process_fetch_messages();

        app.handle_action(AppAction::SelectScale(TimeScale::Week));
        app.handle_action(AppAction::SelectMetric(Metric::Death));
        app.handle_action(AppAction::Scrub(0));
        let labels = app.controller().labels().unwrap();
        assert_eq!(labels.value, "3");
        assert_eq!(labels.date, "Jan 04, 2021");

        // rejected selections leave the screen as it was
        app.handle_action(AppAction::Scrub(99));
        app.handle_action(AppAction::SelectSeries(SeriesKey::State("WA".to_string())));
        assert_eq!(app.controller().labels().unwrap().value, "3");
        assert_eq!(app.controller().active_series(), &SeriesKey::National);
    }
}
