//! Core table types for the dashboard's sample data
//!
//! - `TimeSeriesTable`: one row per day with two value columns
//! - `CategoryValueTable`: categorical samples feeding the box plots
//! - `BarTable`: a handful of categories with two integer columns
//! - `SliderRange`: inclusive index bounds coming from a range slider

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single day in the time-series table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimeSeriesRow {
    pub date: NaiveDate,
    pub value1: f64,
    pub value2: f64,
}

/// Which value column of the time-series table to plot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ValueColumn {
    Value1,
    Value2,
}

impl ValueColumn {
    /// Column name as shown on chart axes
    pub fn name(&self) -> &'static str {
        match self {
            ValueColumn::Value1 => "Value1",
            ValueColumn::Value2 => "Value2",
        }
    }

    /// Read this column from a row
    pub fn get(&self, row: &TimeSeriesRow) -> f64 {
        match self {
            ValueColumn::Value1 => row.value1,
            ValueColumn::Value2 => row.value2,
        }
    }
}

impl std::fmt::Display for ValueColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered daily series. Rows are sorted by date, ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesTable {
    rows: Vec<TimeSeriesRow>,
}

impl TimeSeriesTable {
    /// Build a table, sorting rows by date
    pub fn new(mut rows: Vec<TimeSeriesRow>) -> Self {
        rows.sort_by_key(|r| r.date);
        Self { rows }
    }

    pub fn rows(&self) -> &[TimeSeriesRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All dates in table order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    /// Positional date lookup
    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        self.rows.get(index).map(|r| r.date)
    }

    /// Rows whose date lies in `[start, end]`, inclusive on both ends.
    ///
    /// Returns an empty slice when `start > end`.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> &[TimeSeriesRow] {
        if start > end {
            return &[];
        }
        let lo = self.rows.partition_point(|r| r.date < start);
        let hi = self.rows.partition_point(|r| r.date <= end);
        &self.rows[lo..hi]
    }

    /// Resolve a slider range to dates by position, then select by date.
    ///
    /// Returns `None` if either index is past the end of the table.
    pub fn select(&self, range: SliderRange) -> Option<&[TimeSeriesRow]> {
        let start = self.date_at(range.start)?;
        let end = self.date_at(range.end)?;
        Some(self.between(start, end))
    }
}

/// One categorical observation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySample {
    pub category: String,
    pub value: f64,
}

/// Unordered (category, value) samples
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryValueTable {
    samples: Vec<CategorySample>,
}

impl CategoryValueTable {
    pub fn new(samples: Vec<CategorySample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[CategorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Distinct categories present, sorted
    pub fn categories(&self) -> Vec<String> {
        self.samples
            .iter()
            .map(|s| s.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Values observed for one category, in table order
    pub fn values_for(&self, category: &str) -> Vec<f64> {
        self.samples
            .iter()
            .filter(|s| s.category == category)
            .map(|s| s.value)
            .collect()
    }
}

/// A row of the bar table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BarRow {
    pub category: String,
    pub value1: i64,
    pub value2: i64,
}

/// Which integer column of the bar table to plot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BarColumn {
    Value1,
    Value2,
}

impl BarColumn {
    pub fn name(&self) -> &'static str {
        match self {
            BarColumn::Value1 => "Value1",
            BarColumn::Value2 => "Value2",
        }
    }

    pub fn get(&self, row: &BarRow) -> i64 {
        match self {
            BarColumn::Value1 => row.value1,
            BarColumn::Value2 => row.value2,
        }
    }
}

/// Small fixed table of categories with two integer columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarTable {
    rows: Vec<BarRow>,
}

impl BarTable {
    pub fn new(rows: Vec<BarRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[BarRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn categories(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.category.clone()).collect()
    }
}

/// Inclusive pair of indices selected on a range slider.
///
/// Travels over the wire as a two-element array, `[start, end]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct SliderRange {
    pub start: usize,
    pub end: usize,
}

impl SliderRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl From<[usize; 2]> for SliderRange {
    fn from([start, end]: [usize; 2]) -> Self {
        Self { start, end }
    }
}

impl From<SliderRange> for [usize; 2] {
    fn from(range: SliderRange) -> Self {
        [range.start, range.end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily_table(days: usize) -> TimeSeriesTable {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let rows = start
            .iter_days()
            .take(days)
            .enumerate()
            .map(|(i, date)| TimeSeriesRow {
                date,
                value1: i as f64,
                value2: -(i as f64),
            })
            .collect();
        TimeSeriesTable::new(rows)
    }

    #[test]
    fn test_between_is_inclusive() {
        let table = daily_table(30);
        let start = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 1, 10).unwrap();

        let rows = table.between(start, end);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows.first().unwrap().date, start);
        assert_eq!(rows.last().unwrap().date, end);
    }

    #[test]
    fn test_between_reversed_is_empty() {
        let table = daily_table(30);
        let start = NaiveDate::from_ymd_opt(2023, 1, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        assert!(table.between(start, end).is_empty());
    }

    #[test]
    fn test_select_every_valid_range() {
        let table = daily_table(40);

        for s in 0..table.len() {
            for e in s..table.len() {
                let rows = table.select(SliderRange::new(s, e)).unwrap();
                let lo = table.date_at(s).unwrap();
                let hi = table.date_at(e).unwrap();

                assert_eq!(rows.len(), e - s + 1);
                assert!(rows.iter().all(|r| r.date >= lo && r.date <= hi));
            }
        }
    }

    #[test]
    fn test_select_out_of_range() {
        let table = daily_table(10);
        assert!(table.select(SliderRange::new(0, 10)).is_none());
        assert!(table.select(SliderRange::new(11, 3)).is_none());
    }

    #[test]
    fn test_new_sorts_rows() {
        let mut rows = daily_table(5).rows().to_vec();
        rows.reverse();
        let table = TimeSeriesTable::new(rows);
        assert_eq!(table.rows()[0].date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    }

    #[test]
    fn test_value_column_lookup() {
        let row = TimeSeriesRow {
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            value1: 1.5,
            value2: -2.5,
        };
        assert_eq!(ValueColumn::Value1.get(&row), 1.5);
        assert_eq!(ValueColumn::Value2.get(&row), -2.5);
        assert_eq!(ValueColumn::Value2.to_string(), "Value2");
    }

    #[test]
    fn test_category_table_groups() {
        let table = CategoryValueTable::new(vec![
            CategorySample { category: "B".into(), value: 1.0 },
            CategorySample { category: "A".into(), value: 2.0 },
            CategorySample { category: "B".into(), value: 3.0 },
        ]);

        assert_eq!(table.categories(), vec!["A", "B"]);
        assert_eq!(table.values_for("B"), vec![1.0, 3.0]);
        assert!(table.values_for("Z").is_empty());
    }

    #[test]
    fn test_slider_range_wire_format() {
        let range: SliderRange = serde_json::from_str("[3, 42]").unwrap();
        assert_eq!(range, SliderRange::new(3, 42));
        assert_eq!(serde_json::to_string(&range).unwrap(), "[3,42]");

        assert!(serde_json::from_str::<SliderRange>("[1]").is_err());
        assert!(serde_json::from_str::<SliderRange>("[-1, 4]").is_err());
    }
}
