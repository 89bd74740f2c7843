//! Sample Data
//!
//! The three in-memory tables every chart is drawn from. Tables are built
//! once at startup and shared read-only by all request handlers.
//!
//! ## Tables
//!
//! - [`TimeSeriesTable`]: daily rows with two random-walk columns
//! - [`CategoryValueTable`]: normally distributed samples over categories `A..D`
//! - [`BarTable`]: categories `A..F` with two integer columns

mod generator;
mod types;

pub use generator::{SampleData, BAR_CATEGORIES, BOX_CATEGORIES};
pub use types::{
    BarColumn, BarRow, BarTable, CategorySample, CategoryValueTable, SliderRange, TimeSeriesRow,
    TimeSeriesTable, ValueColumn,
};
