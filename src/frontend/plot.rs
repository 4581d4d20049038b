//! Plot rendering module using egui_plot
//!
//! Draws the active [`ChartAdapter`] projection as a single line and turns
//! pointer hover into scrub indices.
//!
//! The plot is fixed: zoom, drag and scroll are disabled and the bounds
//! always frame the visible window, so the x coordinate under the pointer
//! maps directly to a visible index.

use crate::chart::ChartAdapter;
use crate::config::UiPreferences;
use egui::{Color32, Ui};
use egui_plot::{GridMark, Line, Plot, PlotBounds, PlotPoints, VLine};

/// Plot view configuration
#[derive(Debug, Clone)]
pub struct PlotView {
    /// Whether to show grid lines
    pub show_grid: bool,
    /// Line width of the series
    pub line_width: f32,
    /// Whether to draw a marker at the scrubbed day
    pub show_scrub_line: bool,
}

impl Default for PlotView {
    fn default() -> Self {
        Self {
            show_grid: false,
            line_width: 2.0,
            show_scrub_line: true,
        }
    }
}

impl PlotView {
    /// Create a new PlotView from UI preferences
    pub fn from_config(prefs: &UiPreferences) -> Self {
        Self {
            show_grid: prefs.show_grid,
            line_width: prefs.line_width,
            show_scrub_line: prefs.show_scrub_line,
        }
    }

    /// Render the chart
    ///
    /// Returns the visible index under the pointer while the chart is hovered.
    pub fn render(
        &self,
        ui: &mut Ui,
        chart: &ChartAdapter,
        color: Color32,
        scrubbed: Option<usize>,
    ) -> Option<usize> {
        let (bounds_min, bounds_max) = chart_bounds(chart);
        let metric_label = chart.metric().label();

        let plot = Plot::new("covid_chart")
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show_axes(true)
            .show_grid(self.show_grid)
            .x_axis_label("Day")
            .y_axis_label(metric_label)
            .x_grid_spacer(|grid_input| {
                create_day_grid_marks(grid_input.bounds, grid_input.base_step_size)
            })
            .auto_bounds([false, false]);

        let response = plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(bounds_min, bounds_max));

            if chart.is_empty() {
                return;
            }

            let points = PlotPoints::from(chart.points().to_vec());
            let line = Line::new(metric_label, points)
                .color(color)
                .width(self.line_width);
            plot_ui.line(line);

            if self.show_scrub_line {
                if let Some(index) = scrubbed {
                    let vline = VLine::new("scrub", index as f64)
                        .color(Color32::from_rgba_unmultiplied(255, 255, 255, 64))
                        .width(1.0);
                    plot_ui.vline(vline);
                }
            }
        });

        let hover_pos = response.response.hover_pos()?;
        let plot_pos = response.transform.value_from_position(hover_pos);
        chart.nearest_index(plot_pos.x)
    }
}

/// Plot bounds framing every visible point with some headroom
fn chart_bounds(chart: &ChartAdapter) -> ([f64; 2], [f64; 2]) {
    let x_max = chart.len().saturating_sub(1) as f64;
    let (x_min, x_max) = if x_max > 0.0 {
        (0.0, x_max)
    } else {
        (-0.5, 0.5)
    };

    let (y_min, y_max) = match chart.y_range() {
        Some((lo, hi)) => {
            // keep zero on screen; corrections can dip below it
            let lo = lo.min(0.0);
            let range = hi - lo;
            let padding = if range > 0.0 { range * 0.1 } else { 1.0 };
            let floor = if lo < 0.0 { lo - padding } else { 0.0 };
            (floor, hi + padding)
        }
        None => (0.0, 1.0),
    };

    ([x_min, y_min], [x_max, y_max])
}

/// Whole-day grid marks for the X axis
fn create_day_grid_marks(bounds: (f64, f64), _base_step: f64) -> Vec<GridMark> {
    let (min, max) = bounds;
    let range = max - min;

    let step = if range <= 10.0 {
        1.0
    } else if range <= 40.0 {
        7.0
    } else if range <= 200.0 {
        30.0
    } else {
        90.0
    };

    let mut marks = Vec::new();
    let mut current = (min / step).ceil() * step;

    while current <= max {
        marks.push(GridMark {
            value: current,
            step_size: step,
        });
        current += step;
    }

    marks
}
