//! Time-series filter callback
//!
//! Filters the daily table to the slider's date range and plots one column.

use serde_json::Value;

use super::error::{CallbackError, CallbackResult};
use super::{Callback, Dependency};
use crate::data::{SampleData, SliderRange, ValueColumn};
use crate::figure::Figure;

/// Line chart of one value column over a slider-selected date range
#[derive(Debug, Clone)]
pub struct TimeSeriesCallback {
    slider_id: String,
    graph_id: String,
    column: ValueColumn,
    title: String,
}

impl TimeSeriesCallback {
    pub fn new(
        slider_id: impl Into<String>,
        graph_id: impl Into<String>,
        column: ValueColumn,
        title: impl Into<String>,
    ) -> Self {
        Self {
            slider_id: slider_id.into(),
            graph_id: graph_id.into(),
            column,
            title: title.into(),
        }
    }

    /// Build the figure for a resolved range.
    ///
    /// An empty table has no index to resolve, so any range plots nothing.
    pub fn figure(&self, data: &SampleData, range: SliderRange) -> CallbackResult<Figure> {
        let table = &data.timeseries;
        if table.is_empty() {
            return Ok(Figure::line(&self.title, "Date", self.column.name(), Vec::new()));
        }

        let rows = table.select(range).ok_or(CallbackError::IndexOutOfRange {
            index: range.start.max(range.end),
            len: table.len(),
        })?;

        tracing::debug!(
            graph = %self.graph_id,
            start = range.start,
            end = range.end,
            rows = rows.len(),
            "Filtered time series"
        );

        Ok(Figure::line(
            &self.title,
            "Date",
            self.column.name(),
            rows.iter().map(|row| (row.date, self.column.get(row))),
        ))
    }
}

impl Callback for TimeSeriesCallback {
    fn name(&self) -> &str {
        &self.graph_id
    }

    fn outputs(&self) -> Vec<Dependency> {
        vec![Dependency::new(&self.graph_id, "figure")]
    }

    fn inputs(&self) -> Vec<Dependency> {
        vec![Dependency::new(&self.slider_id, "value")]
    }

    fn invoke(&self, data: &SampleData, inputs: &[Value]) -> CallbackResult<Vec<Figure>> {
        let [value] = inputs else {
            return Err(CallbackError::ArgumentCount {
                expected: 1,
                got: inputs.len(),
            });
        };

        let range: SliderRange =
            serde_json::from_value(value.clone()).map_err(|e| CallbackError::InvalidInput {
                input: format!("{}.value", self.slider_id),
                reason: e.to_string(),
            })?;

        Ok(vec![self.figure(data, range)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataConfig;
    use chrono::NaiveDate;
    use serde_json::json;

    fn setup() -> (SampleData, TimeSeriesCallback) {
        let data = SampleData::generate(&DataConfig::default());
        let cb = TimeSeriesCallback::new(
            "date-slider1",
            "timeseries-graph1",
            ValueColumn::Value1,
            "Time Series Graph 1",
        );
        (data, cb)
    }

    #[test]
    fn test_full_range() {
        let (data, cb) = setup();
        let figures = cb.invoke(&data, &[json!([0, 364])]).unwrap();

        assert_eq!(figures.len(), 1);
        let fig = &figures[0];
        assert_eq!(fig.title(), "Time Series Graph 1");
        assert_eq!(fig.point_count(), 365);
        assert_eq!(fig.layout.yaxis.title.text, "Value1");
        assert_eq!(fig.data[0].y()[10], data.timeseries.rows()[10].value1);
    }

    #[test]
    fn test_sub_range_within_dates() {
        let (data, cb) = setup();
        let fig = cb.figure(&data, SliderRange::new(31, 58)).unwrap();

        assert_eq!(fig.point_count(), 28);
        let x = fig.data[0].x();
        assert_eq!(x.first().unwrap(), "2023-02-01");
        assert_eq!(x.last().unwrap(), "2023-02-28");

        let lo = NaiveDate::from_ymd_opt(2023, 2, 1).unwrap();
        let hi = NaiveDate::from_ymd_opt(2023, 2, 28).unwrap();
        for label in x {
            let date = NaiveDate::parse_from_str(label, "%Y-%m-%d").unwrap();
            assert!(date >= lo && date <= hi);
        }
    }

    #[test]
    fn test_single_day() {
        let (data, cb) = setup();
        let fig = cb.figure(&data, SliderRange::new(100, 100)).unwrap();
        assert_eq!(fig.point_count(), 1);
    }

    #[test]
    fn test_reversed_range_is_empty_figure() {
        let (data, cb) = setup();
        let fig = cb.figure(&data, SliderRange::new(200, 100)).unwrap();
        assert_eq!(fig.point_count(), 0);
    }

    #[test]
    fn test_out_of_range() {
        let (data, cb) = setup();
        let err = cb.invoke(&data, &[json!([0, 365])]).unwrap_err();
        assert_eq!(err, CallbackError::IndexOutOfRange { index: 365, len: 365 });
    }

    #[test]
    fn test_empty_table_plots_nothing() {
        let data = SampleData::generate(&DataConfig {
            periods: 0,
            ..DataConfig::default()
        });
        let (_, cb) = setup();

        let figures = cb.invoke(&data, &[json!([0, 0])]).unwrap();
        assert_eq!(figures[0].point_count(), 0);
        assert_eq!(figures[0].title(), "Time Series Graph 1");
    }

    #[test]
    fn test_malformed_input() {
        let (data, cb) = setup();
        assert!(matches!(
            cb.invoke(&data, &[json!("nope")]),
            Err(CallbackError::InvalidInput { .. })
        ));
        assert!(matches!(
            cb.invoke(&data, &[json!([1, 2]), json!([3, 4])]),
            Err(CallbackError::ArgumentCount { expected: 1, got: 2 })
        ));
    }

    #[test]
    fn test_second_column() {
        let (data, _) = setup();
        let cb = TimeSeriesCallback::new(
            "date-slider2",
            "timeseries-graph2",
            ValueColumn::Value2,
            "Time Series Graph 2",
        );
        let fig = cb.figure(&data, SliderRange::new(0, 9)).unwrap();
        let expected: Vec<f64> = data.timeseries.rows()[..10].iter().map(|r| r.value2).collect();
        assert_eq!(fig.data[0].y(), expected.as_slice());
        assert_eq!(fig.layout.yaxis.title.text, "Value2");
    }
}
