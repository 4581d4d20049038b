//! Status bar panel: bottom bar showing load phase and fetch results.

use egui::{Color32, RichText, Ui};

use crate::controller::ScreenPhase;
use crate::frontend::widgets::StatusIndicator;
use crate::store::{FetchSlot, TimeSeriesStore};

/// Context needed to render the status bar.
pub struct StatusBarContext<'a> {
    pub phase: ScreenPhase,
    pub store: &'a TimeSeriesStore,
    pub active_label: &'a str,
}

fn slot_text<T>(
    name: &str,
    slot: &FetchSlot<T>,
    describe: impl Fn(&T) -> String,
) -> (Color32, String) {
    match slot {
        FetchSlot::Pending => (Color32::GRAY, format!("{}: loading", name)),
        FetchSlot::Loaded(value) => (
            Color32::from_rgb(100, 255, 100),
            format!("{}: {}", name, describe(value)),
        ),
        FetchSlot::Failed(_) => (Color32::LIGHT_RED, format!("{}: failed", name)),
    }
}

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, ctx: &StatusBarContext<'_>) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let indicator = match ctx.phase {
            ScreenPhase::Loading => StatusIndicator::loading(),
            ScreenPhase::Ready => StatusIndicator::ready(),
            ScreenPhase::LoadError => StatusIndicator::error(),
        };
        ui.add(indicator.with_tooltip(format!("Showing {}", ctx.active_label)));

        ui.separator();

        let (color, text) = slot_text("National", ctx.store.national_slot(), |series| {
            format!("{} days", series.len())
        });
        ui.colored_label(color, RichText::new(text).small());

        ui.separator();

        let (color, text) = slot_text("States", ctx.store.states_slot(), |index| {
            format!("{} states", index.len())
        });
        ui.colored_label(color, RichText::new(text).small());

        // === Error message (right-aligned) ===
        let failure = ctx
            .store
            .national_slot()
            .failure()
            .or_else(|| ctx.store.states_slot().failure());
        if let Some(error) = failure {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.colored_label(Color32::RED, RichText::new(error).small());
            });
        }
    });
}
