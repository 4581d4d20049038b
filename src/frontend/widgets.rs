//! Custom widgets for the tracker UI
//!
//! # Widgets
//!
//! - [`StatusIndicator`] - Colored status dot with label (loading, ready, error)
//! - [`SummaryDisplay`] - The large value label and its date underneath
//! - [`selector_row`] - Horizontal radio group over a fixed set of options

use crate::controller::SummaryLabels;
use egui::{Color32, Response, RichText, Ui, Widget};

/// Convert an RGBA quadruple to an egui color
pub fn to_color32(rgba: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// A widget that displays a colored status indicator
pub struct StatusIndicator {
    color: Color32,
    label: String,
    tooltip: Option<String>,
}

impl StatusIndicator {
    /// Create a new status indicator with the given color and label
    pub fn new(color: Color32, label: impl Into<String>) -> Self {
        Self {
            color,
            label: label.into(),
            tooltip: None,
        }
    }

    pub fn loading() -> Self {
        Self::new(Color32::YELLOW, "Loading...")
    }

    pub fn ready() -> Self {
        Self::new(Color32::GREEN, "Ready")
    }

    pub fn error() -> Self {
        Self::new(Color32::RED, "Load error")
    }

    /// Add a tooltip to the indicator
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

impl Widget for StatusIndicator {
    fn ui(self, ui: &mut Ui) -> Response {
        let response = ui.horizontal(|ui| {
            ui.colored_label(self.color, "●");
            ui.label(RichText::new(&self.label).small());
        });

        let response = response.response;

        if let Some(tooltip) = self.tooltip {
            response.on_hover_text(tooltip)
        } else {
            response
        }
    }
}

/// Value and date of the inspected day
pub struct SummaryDisplay<'a> {
    labels: &'a SummaryLabels,
    value_size: f32,
}

impl<'a> SummaryDisplay<'a> {
    pub fn new(labels: &'a SummaryLabels) -> Self {
        Self {
            labels,
            value_size: 32.0,
        }
    }

    /// Font size of the value label
    pub fn with_value_size(mut self, size: f32) -> Self {
        self.value_size = size;
        self
    }
}

impl Widget for SummaryDisplay<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        ui.vertical(|ui| {
            ui.label(
                RichText::new(&self.labels.value)
                    .size(self.value_size)
                    .strong()
                    .color(to_color32(self.labels.color)),
            );
            ui.label(RichText::new(&self.labels.date).weak());
        })
        .response
    }
}

/// Radio buttons for each option; returns the newly picked option
pub fn selector_row<T>(ui: &mut Ui, current: T, options: &[(T, &str)]) -> Option<T>
where
    T: Copy + PartialEq,
{
    let mut picked = current;
    ui.horizontal(|ui| {
        for (value, text) in options {
            ui.radio_value(&mut picked, *value, *text);
        }
    });
    (picked != current).then_some(picked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_color32() {
        let color = to_color32([10, 20, 30, 255]);
        assert_eq!(color, Color32::from_rgb(10, 20, 30));
    }
}
