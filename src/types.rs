//! Core data types for covid-tracker
//!
//! # Main Types
//!
//! - [`CovidDataPoint`] - One reporting day of daily increases
//! - [`Metric`] - Which daily increase is plotted, with its display style
//! - [`TimeScale`] - How many trailing days the chart shows
//! - [`SeriesKey`] - Which jurisdiction's series is active
//!
//! # Dates
//!
//! The API reports the as-of time of each record as `dateChecked` in the
//! form `yyyy-MM-ddTHH:mm:ss`, usually with a trailing `Z`. Some records
//! carry `T24:00:00`, meaning midnight at the end of that day; those roll
//! over to the next calendar day.

use chrono::{NaiveDate, NaiveDateTime};

/// chrono format for the `dateChecked` field
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// chrono format used by the summary date label (`Jan 02, 2021`)
pub const LABEL_DATE_FORMAT: &str = "%b %d, %Y";

/// Picker entry standing in for the national series
pub const NATIONWIDE_LABEL: &str = "All (Nationwide)";

/// Parse a `dateChecked` value
///
/// Only the leading `yyyy-MM-ddTHH:mm:ss` is considered; anything after the
/// seconds (a zone designator, fractional part) is ignored.
pub fn parse_date_checked(raw: &str) -> Option<NaiveDateTime> {
    let head = raw.get(..19)?;
    if let Ok(parsed) = NaiveDateTime::parse_from_str(head, DATE_TIME_FORMAT) {
        return Some(parsed);
    }

    let (day, time) = head.split_once('T')?;
    if time != "24:00:00" {
        return None;
    }
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .ok()?
        .succ_opt()?
        .and_hms_opt(0, 0, 0)
}

/// Parse the numeric `date` field (`20210307`)
pub fn parse_numeric_date(raw: u64) -> Option<NaiveDate> {
    let year = i32::try_from(raw / 10_000).ok()?;
    let month = u32::try_from((raw / 100) % 100).ok()?;
    let day = u32::try_from(raw % 100).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// One reporting day for a jurisdiction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CovidDataPoint {
    /// As-of date of the report
    pub date: NaiveDate,
    /// Two-letter state code, `None` for national records
    pub state: Option<String>,
    pub positive_increase: i64,
    pub negative_increase: i64,
    pub death_increase: i64,
}

impl CovidDataPoint {
    /// Create a national record
    pub fn national(date: NaiveDate, positive: i64, negative: i64, death: i64) -> Self {
        Self {
            date,
            state: None,
            positive_increase: positive,
            negative_increase: negative,
            death_increase: death,
        }
    }

    /// Create a record for a single state
    pub fn for_state(
        state: impl Into<String>,
        date: NaiveDate,
        positive: i64,
        negative: i64,
        death: i64,
    ) -> Self {
        Self {
            state: Some(state.into()),
            ..Self::national(date, positive, negative, death)
        }
    }

    /// Value of the given metric for this day
    pub fn value(&self, metric: Metric) -> i64 {
        (metric.style().value)(self)
    }
}

/// Daily increase shown on the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Metric {
    #[default]
    Positive,
    Negative,
    Death,
}

/// Display style and field accessor for a metric
#[derive(Debug)]
pub struct MetricStyle {
    pub label: &'static str,
    /// RGBA line and label color
    pub color: [u8; 4],
    pub value: fn(&CovidDataPoint) -> i64,
}

fn positive_of(point: &CovidDataPoint) -> i64 {
    point.positive_increase
}

fn negative_of(point: &CovidDataPoint) -> i64 {
    point.negative_increase
}

fn death_of(point: &CovidDataPoint) -> i64 {
    point.death_increase
}

static POSITIVE_STYLE: MetricStyle = MetricStyle {
    label: "Positive",
    color: [245, 166, 35, 255],
    value: positive_of,
};

static NEGATIVE_STYLE: MetricStyle = MetricStyle {
    label: "Negative",
    color: [76, 175, 80, 255],
    value: negative_of,
};

static DEATH_STYLE: MetricStyle = MetricStyle {
    label: "Death",
    color: [229, 57, 53, 255],
    value: death_of,
};

impl Metric {
    /// All metrics in selector order
    pub const ALL: [Metric; 3] = [Metric::Positive, Metric::Negative, Metric::Death];

    /// Lookup table entry for this metric
    pub fn style(self) -> &'static MetricStyle {
        match self {
            Metric::Positive => &POSITIVE_STYLE,
            Metric::Negative => &NEGATIVE_STYLE,
            Metric::Death => &DEATH_STYLE,
        }
    }

    pub fn label(self) -> &'static str {
        self.style().label
    }

    pub fn color(self) -> [u8; 4] {
        self.style().color
    }
}

/// Trailing window of days shown on the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeScale {
    Week,
    Month,
    #[default]
    Max,
}

impl TimeScale {
    /// All scales in selector order
    pub const ALL: [TimeScale; 3] = [TimeScale::Week, TimeScale::Month, TimeScale::Max];

    /// Number of trailing days, `None` for the whole series
    pub fn day_count(self) -> Option<usize> {
        match self {
            TimeScale::Week => Some(7),
            TimeScale::Month => Some(30),
            TimeScale::Max => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeScale::Week => "Week",
            TimeScale::Month => "Month",
            TimeScale::Max => "Max",
        }
    }
}

/// Identifies the active series
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SeriesKey {
    #[default]
    National,
    State(String),
}

impl SeriesKey {
    /// Map a state picker entry back to a key
    pub fn from_picker_entry(entry: &str) -> Self {
        if entry == NATIONWIDE_LABEL {
            SeriesKey::National
        } else {
            SeriesKey::State(entry.to_string())
        }
    }

    /// Text shown for this key in the state picker
    pub fn picker_label(&self) -> &str {
        match self {
            SeriesKey::National => NATIONWIDE_LABEL,
            SeriesKey::State(code) => code,
        }
    }
}
