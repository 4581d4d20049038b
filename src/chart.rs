//! Chart projection of a time series
//!
//! [`ChartAdapter`] turns the active series into the `(x, y)` points the
//! plot widget draws: `x` is the index within the visible window and `y`
//! is the selected metric's value for that day. Scrub lookups go back
//! through the same window, so an index read off the chart always maps to
//! the record drawn there.

use crate::store::TimeSeries;
use crate::types::{CovidDataPoint, Metric, TimeScale};
use chrono::NaiveDate;
use std::sync::Arc;

/// Windowed, metric-selected view of a series
#[derive(Debug, Clone)]
pub struct ChartAdapter {
    series: Arc<TimeSeries>,
    metric: Metric,
    scale: TimeScale,
    points: Vec<[f64; 2]>,
    /// Bumped on every recompute so the view knows to redraw
    revision: u64,
}

impl ChartAdapter {
    pub fn new(series: Arc<TimeSeries>, metric: Metric, scale: TimeScale) -> Self {
        let mut adapter = Self {
            series,
            metric,
            scale,
            points: Vec::new(),
            revision: 0,
        };
        adapter.recompute();
        adapter
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn scale(&self) -> TimeScale {
        self.scale
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_metric(&mut self, metric: Metric) {
        self.metric = metric;
        self.recompute();
    }

    pub fn set_scale(&mut self, scale: TimeScale) {
        self.scale = scale;
        self.recompute();
    }

    fn recompute(&mut self) {
        let metric = self.metric;
        self.points = self
            .visible()
            .iter()
            .enumerate()
            .map(|(i, point)| [i as f64, point.value(metric) as f64])
            .collect();
        self.revision += 1;
    }

    /// Records currently drawn, oldest first
    pub fn visible(&self) -> &[CovidDataPoint] {
        self.series.window(self.scale)
    }

    /// Projected `[x, y]` pairs
    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Record drawn at a visible index
    pub fn item(&self, index: usize) -> Option<&CovidDataPoint> {
        self.visible().get(index)
    }

    /// Most recent visible record
    pub fn last_item(&self) -> Option<&CovidDataPoint> {
        self.visible().last()
    }

    /// Visible index of the record for a date
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.visible().binary_search_by_key(&date, |p| p.date).ok()
    }

    /// Closest visible index to a pointer x coordinate
    pub fn nearest_index(&self, x: f64) -> Option<usize> {
        if self.points.is_empty() || !x.is_finite() {
            return None;
        }
        let max = (self.points.len() - 1) as f64;
        Some(x.round().clamp(0.0, max) as usize)
    }

    /// Min and max projected value, `None` when nothing is visible
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |acc, [_, y]| match acc {
            None => Some((*y, *y)),
            Some((lo, hi)) => Some((lo.min(*y), hi.max(*y))),
        })
    }
}
