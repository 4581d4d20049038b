//! Selection handling for the tracker screen
//!
//! [`SelectionController`] owns the fetched data, the chart projection and
//! the two summary labels. Fetch completions and user selections are fed
//! in from the UI thread; every transition is a synchronous recompute.
//!
//! # Screen Lifecycle
//!
//! ```text
//! Loading ──(both fetches ok)──► Ready(series, metric, scale)
//!    └─────(either fetch fails)──► LoadError
//! ```
//!
//! The chart exists as soon as the national series arrives, independent of
//! the state fetch. State selection needs both halves.

use crate::backend::FetchMessage;
use crate::chart::ChartAdapter;
use crate::error::{Result, TrackerError};
use crate::store::{PerStateIndex, TimeSeries, TimeSeriesStore};
use crate::types::{CovidDataPoint, Metric, SeriesKey, TimeScale, LABEL_DATE_FORMAT};
use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

/// Overall load state of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenPhase {
    /// At least one fetch is outstanding and none has failed
    Loading,
    /// Both fetches succeeded
    Ready,
    /// At least one fetch failed
    LoadError,
}

/// Text of the value and date labels under the chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLabels {
    pub value: String,
    pub date: String,
    /// RGBA color of the value label
    pub color: [u8; 4],
}

impl SummaryLabels {
    fn for_point(point: &CovidDataPoint, metric: Metric) -> Self {
        Self {
            value: format_count(point.value(metric)),
            date: format_label_date(point.date),
            color: metric.color(),
        }
    }
}

/// Format a count with thousands separators (`1,234`)
pub fn format_count(value: i64) -> String {
    value.to_formatted_string(&Locale::en)
}

/// Format a date as `Jan 02, 2021`
pub fn format_label_date(date: NaiveDate) -> String {
    date.format(LABEL_DATE_FORMAT).to_string()
}

/// Translates fetch results and user selections into chart and label state
#[derive(Debug, Default)]
pub struct SelectionController {
    store: TimeSeriesStore,
    chart: Option<ChartAdapter>,
    active: SeriesKey,
    /// Record the summary labels currently describe
    shown: Option<CovidDataPoint>,
    labels: Option<SummaryLabels>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Fetch completions ====================

    /// Apply a fetch completion delivered by the worker
    pub fn handle_fetch(&mut self, msg: FetchMessage) {
        match msg {
            FetchMessage::National(Ok(series)) => self.on_national_loaded(series),
            FetchMessage::National(Err(e)) => self.on_national_failed(e.to_string()),
            FetchMessage::States(Ok(index)) => self.on_states_loaded(index),
            FetchMessage::States(Err(e)) => self.on_states_failed(e.to_string()),
        }
    }

    pub fn on_national_loaded(&mut self, series: TimeSeries) {
        if !self.store.set_national(series) {
            return;
        }
        let Some(national) = self.store.national() else {
            return;
        };
        tracing::debug!("Showing national series ({} days)", national.len());

        self.active = SeriesKey::National;
        self.chart = Some(ChartAdapter::new(
            national,
            Metric::default(),
            TimeScale::default(),
        ));
        self.show_latest();
    }

    pub fn on_national_failed(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        if self.store.mark_national_failed(reason.clone()) {
            tracing::warn!("Chart will stay empty: {}", reason);
        }
    }

    pub fn on_states_loaded(&mut self, index: PerStateIndex) {
        let count = index.len();
        if self.store.set_per_state(index) {
            tracing::debug!("State picker populated with {} states", count);
        }
    }

    pub fn on_states_failed(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        if self.store.mark_states_failed(reason.clone()) {
            tracing::warn!("State picker will stay empty: {}", reason);
        }
    }

    // ==================== Queries ====================

    pub fn phase(&self) -> ScreenPhase {
        let national = self.store.national_slot();
        let states = self.store.states_slot();

        if national.failure().is_some() || states.failure().is_some() {
            ScreenPhase::LoadError
        } else if national.loaded().is_some() && states.loaded().is_some() {
            ScreenPhase::Ready
        } else {
            ScreenPhase::Loading
        }
    }

    pub fn store(&self) -> &TimeSeriesStore {
        &self.store
    }

    /// Chart projection, `None` until the national series has arrived
    pub fn chart(&self) -> Option<&ChartAdapter> {
        self.chart.as_ref()
    }

    pub fn active_series(&self) -> &SeriesKey {
        &self.active
    }

    pub fn metric(&self) -> Metric {
        self.chart
            .as_ref()
            .map(ChartAdapter::metric)
            .unwrap_or_default()
    }

    pub fn scale(&self) -> TimeScale {
        self.chart
            .as_ref()
            .map(ChartAdapter::scale)
            .unwrap_or_default()
    }

    /// Chart line color for the active metric
    pub fn line_color(&self) -> [u8; 4] {
        self.metric().color()
    }

    pub fn labels(&self) -> Option<&SummaryLabels> {
        self.labels.as_ref()
    }

    /// Visible index of the record the labels describe
    pub fn shown_index(&self) -> Option<usize> {
        let chart = self.chart.as_ref()?;
        chart.index_of(self.shown.as_ref()?.date)
    }

    /// Metric, scale and scrub input is accepted
    pub fn chart_ready(&self) -> bool {
        self.chart.is_some()
    }

    /// The state picker can be used
    pub fn can_select_state(&self) -> bool {
        self.chart.is_some() && self.store.per_state().is_some()
    }

    /// Entries for the state picker
    pub fn state_names(&self) -> Vec<String> {
        self.store.list_state_names()
    }

    // ==================== Selections ====================

    /// Switch the plotted metric and show the latest visible day
    pub fn select_metric(&mut self, metric: Metric) -> Result<()> {
        let chart = self.chart_mut("metric")?;
        chart.set_metric(metric);
        self.show_latest();
        Ok(())
    }

    /// Switch the time window
    ///
    /// The labels keep describing the same day while it is still visible.
    pub fn select_scale(&mut self, scale: TimeScale) -> Result<()> {
        let chart = self.chart_mut("time scale")?;
        chart.set_scale(scale);

        if self.shown_index().is_none() {
            self.show_latest();
        }
        Ok(())
    }

    /// Switch between the national series and a state's series
    ///
    /// Resets the display to the positive metric over the whole series.
    pub fn select_series(&mut self, key: SeriesKey) -> Result<()> {
        if self.chart.is_none() {
            return Err(TrackerError::NotReady(
                "national series has not arrived".to_string(),
            ));
        }

        let series = match &key {
            SeriesKey::National => self.store.national(),
            SeriesKey::State(code) => {
                let index = self.store.per_state().ok_or_else(|| {
                    TrackerError::NotReady("state data has not arrived".to_string())
                })?;
                Some(
                    index
                        .get(code)
                        .ok_or_else(|| TrackerError::UnknownState(code.clone()))?,
                )
            }
        };
        let Some(series) = series else {
            return Err(TrackerError::NotReady(
                "national series has not arrived".to_string(),
            ));
        };

        tracing::debug!("Active series: {}", key.picker_label());
        self.chart = Some(ChartAdapter::new(
            series,
            Metric::default(),
            TimeScale::default(),
        ));
        self.active = key;
        self.show_latest();
        Ok(())
    }

    /// Point the labels at the record under the pointer
    ///
    /// The chart itself is left untouched.
    pub fn scrub(&mut self, index: usize) -> Result<&SummaryLabels> {
        let chart = self.chart.as_ref().ok_or_else(|| {
            TrackerError::NotReady("national series has not arrived".to_string())
        })?;
        let point = chart.item(index).cloned().ok_or(TrackerError::OutOfRange {
            index,
            len: chart.len(),
        })?;

        let labels = SummaryLabels::for_point(&point, chart.metric());
        self.shown = Some(point);
        Ok(self.labels.insert(labels))
    }

    fn chart_mut(&mut self, what: &str) -> Result<&mut ChartAdapter> {
        self.chart.as_mut().ok_or_else(|| {
            TrackerError::NotReady(format!("cannot change {} before data arrives", what))
        })
    }

    fn show_latest(&mut self) {
        let Some(chart) = self.chart.as_ref() else {
            return;
        };
        let metric = chart.metric();
        self.shown = chart.last_item().cloned();
        self.labels = self
            .shown
            .as_ref()
            .map(|point| SummaryLabels::for_point(point, metric));
    }
}
