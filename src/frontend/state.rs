//! Action types emitted by the UI
//!
//! Render code never mutates the controller directly; it returns
//! `AppAction`s that the app applies after the frame's widgets are laid out.

use crate::types::{Metric, SeriesKey, TimeScale};

/// User interactions with the tracker screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// A metric radio button was picked
    SelectMetric(Metric),
    /// A time-scale radio button was picked
    SelectScale(TimeScale),
    /// A state picker entry was chosen
    SelectSeries(SeriesKey),
    /// The pointer is over the chart at a visible index
    Scrub(usize),
}
