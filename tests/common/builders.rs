//! Test data builders for creating test objects

use super::day;
use covid_tracker::{CovidDataPoint, PerStateIndex, TimeSeries};
use serde_json::{json, Value};

/// Builder for a single record
pub struct DataPointBuilder {
    offset: u64,
    state: Option<String>,
    positive: i64,
    negative: i64,
    death: i64,
}

impl DataPointBuilder {
    /// Record for `2021-01-01` plus `offset` days
    pub fn new(offset: u64) -> Self {
        Self {
            offset,
            state: None,
            positive: 0,
            negative: 0,
            death: 0,
        }
    }

    pub fn state(mut self, code: &str) -> Self {
        self.state = Some(code.to_string());
        self
    }

    pub fn positive(mut self, value: i64) -> Self {
        self.positive = value;
        self
    }

    pub fn negative(mut self, value: i64) -> Self {
        self.negative = value;
        self
    }

    pub fn death(mut self, value: i64) -> Self {
        self.death = value;
        self
    }

    pub fn build(self) -> CovidDataPoint {
        match self.state {
            Some(code) => CovidDataPoint::for_state(
                code,
                day(self.offset),
                self.positive,
                self.negative,
                self.death,
            ),
            None => CovidDataPoint::national(
                day(self.offset),
                self.positive,
                self.negative,
                self.death,
            ),
        }
    }
}

/// National series of `days` days with positive = 100 + day, negative =
/// 1000 + day and death = day
pub fn national_series(days: u64) -> TimeSeries {
    TimeSeries::from_chronological(
        (0..days)
            .map(|i| {
                let v = i as i64;
                DataPointBuilder::new(i)
                    .positive(100 + v)
                    .negative(1000 + v)
                    .death(v)
                    .build()
            })
            .collect(),
    )
}

/// Per-state index with `days` days for each code, in API order
pub fn state_index(codes: &[&str], days: u64) -> PerStateIndex {
    let mut records = Vec::new();
    for i in (0..days).rev() {
        for (n, code) in codes.iter().enumerate() {
            records.push(
                DataPointBuilder::new(i)
                    .state(code)
                    .positive((n as i64 + 1) * 10 + i as i64)
                    .build(),
            );
        }
    }
    PerStateIndex::from_api_order(records)
}

/// JSON body shaped like the API: newest first, with extra fields
pub fn api_body(records: &[CovidDataPoint]) -> String {
    let mut sorted: Vec<&CovidDataPoint> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let items: Vec<Value> = sorted
        .into_iter()
        .map(|p| {
            let mut item = json!({
                "date": p.date.format("%Y%m%d").to_string().parse::<u64>().unwrap_or(0),
                "dateChecked": format!("{}T20:00:00Z", p.date.format("%Y-%m-%d")),
                "positive": 123456,
                "positiveIncrease": p.positive_increase,
                "negativeIncrease": p.negative_increase,
                "deathIncrease": p.death_increase,
                "hash": "d0c5a8f8e5a5b1b2",
            });
            if let Some(state) = &p.state {
                item["state"] = json!(state);
            }
            item
        })
        .collect();

    Value::Array(items).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_point_builder() {
        let point = DataPointBuilder::new(3).state("NY").death(5).build();
        assert_eq!(point.date, day(3));
        assert_eq!(point.state.as_deref(), Some("NY"));
        assert_eq!(point.death_increase, 5);
        assert_eq!(point.positive_increase, 0);
    }
}
