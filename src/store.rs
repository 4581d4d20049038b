//! Time series storage
//!
//! Holds the national series and the per-state index once their fetches
//! complete. Both halves are written exactly once, from the UI thread, and
//! read by the chart and the selection handlers.

use crate::types::{CovidDataPoint, TimeScale, NATIONWIDE_LABEL};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Chronological daily records for one jurisdiction
///
/// Ascending by date with no duplicate dates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeSeries {
    points: Vec<CovidDataPoint>,
}

impl TimeSeries {
    /// Build from records in API order (newest first)
    pub fn from_api_order(mut records: Vec<CovidDataPoint>) -> Self {
        records.reverse();
        Self::from_chronological(records)
    }

    /// Build from records that should already be oldest first
    ///
    /// Out-of-order input is stably sorted, and for repeated dates the first
    /// record wins.
    pub fn from_chronological(mut records: Vec<CovidDataPoint>) -> Self {
        let ascending = records.windows(2).all(|w| w[0].date <= w[1].date);
        if !ascending {
            tracing::debug!("Series arrived out of order, sorting {} records", records.len());
            records.sort_by_key(|p| p.date);
        }

        let before = records.len();
        records.dedup_by_key(|p| p.date);
        if records.len() != before {
            tracing::warn!(
                "Dropped {} records with duplicate dates",
                before - records.len()
            );
        }

        Self { points: records }
    }

    /// Records back in API order (newest first)
    pub fn into_api_order(self) -> Vec<CovidDataPoint> {
        let mut points = self.points;
        points.reverse();
        points
    }

    pub fn points(&self) -> &[CovidDataPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent record
    pub fn last(&self) -> Option<&CovidDataPoint> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CovidDataPoint> {
        self.points.iter()
    }

    /// Trailing slice for a time scale, clamped to the series length
    pub fn window(&self, scale: TimeScale) -> &[CovidDataPoint] {
        match scale.day_count() {
            Some(days) => {
                let start = self.points.len().saturating_sub(days);
                &self.points[start..]
            }
            None => &self.points,
        }
    }
}

/// Per-state series keyed by state code
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PerStateIndex {
    series: BTreeMap<String, Arc<TimeSeries>>,
}

impl PerStateIndex {
    /// Group state records given in API order (newest first)
    ///
    /// Records without a state code are skipped.
    pub fn from_api_order(records: Vec<CovidDataPoint>) -> Self {
        let mut grouped: BTreeMap<String, Vec<CovidDataPoint>> = BTreeMap::new();
        let mut missing_state = 0usize;

        for record in records.into_iter().rev() {
            match record.state.clone() {
                Some(code) => grouped.entry(code).or_default().push(record),
                None => missing_state += 1,
            }
        }

        if missing_state > 0 {
            tracing::warn!("Skipped {} state records without a state code", missing_state);
        }

        let series = grouped
            .into_iter()
            .map(|(code, points)| (code, Arc::new(TimeSeries::from_chronological(points))))
            .collect();

        Self { series }
    }

    /// Series for one state
    pub fn get(&self, code: &str) -> Option<Arc<TimeSeries>> {
        self.series.get(code).cloned()
    }

    /// Distinct state codes in sorted order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Progress of one fetch's contribution to the store
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchSlot<T> {
    #[default]
    Pending,
    Loaded(T),
    Failed(String),
}

impl<T> FetchSlot<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchSlot::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FetchSlot::Pending)
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            FetchSlot::Failed(reason) => Some(reason.as_str()),
            _ => None,
        }
    }

    /// Fill a pending slot; returns false if it was already settled
    fn settle(&mut self, next: FetchSlot<T>, what: &str) -> bool {
        if !self.is_pending() {
            tracing::warn!("Ignoring second update of {} data", what);
            return false;
        }
        *self = next;
        true
    }
}

/// Fetched national and per-state data for the session
#[derive(Debug, Default)]
pub struct TimeSeriesStore {
    national: FetchSlot<Arc<TimeSeries>>,
    per_state: FetchSlot<PerStateIndex>,
}

impl TimeSeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the national series; returns false if it was already settled
    pub fn set_national(&mut self, series: TimeSeries) -> bool {
        self.national
            .settle(FetchSlot::Loaded(Arc::new(series)), "national")
    }

    /// Store the per-state index; returns false if it was already settled
    pub fn set_per_state(&mut self, index: PerStateIndex) -> bool {
        self.per_state.settle(FetchSlot::Loaded(index), "state")
    }

    pub fn mark_national_failed(&mut self, reason: impl Into<String>) -> bool {
        self.national
            .settle(FetchSlot::Failed(reason.into()), "national")
    }

    pub fn mark_states_failed(&mut self, reason: impl Into<String>) -> bool {
        self.per_state
            .settle(FetchSlot::Failed(reason.into()), "state")
    }

    pub fn national(&self) -> Option<Arc<TimeSeries>> {
        self.national.loaded().cloned()
    }

    pub fn per_state(&self) -> Option<&PerStateIndex> {
        self.per_state.loaded()
    }

    pub fn national_slot(&self) -> &FetchSlot<Arc<TimeSeries>> {
        &self.national
    }

    pub fn states_slot(&self) -> &FetchSlot<PerStateIndex> {
        &self.per_state
    }

    /// Owned copy of the trailing window of a series
    pub fn windowed(series: &TimeSeries, scale: TimeScale) -> TimeSeries {
        TimeSeries {
            points: series.window(scale).to_vec(),
        }
    }

    /// Picker entries: the nationwide entry followed by sorted state codes
    ///
    /// Only the nationwide entry is listed until state data arrives.
    pub fn list_state_names(&self) -> Vec<String> {
        let mut names = vec![NATIONWIDE_LABEL.to_string()];
        if let Some(index) = self.per_state.loaded() {
            names.extend(index.codes().map(str::to_string));
        }
        names
    }
}
