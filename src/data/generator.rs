//! Sample data generation
//!
//! All three tables are drawn from a single seeded RNG so a given seed
//! always produces the same dashboard.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use super::types::{
    BarRow, BarTable, CategorySample, CategoryValueTable, TimeSeriesRow, TimeSeriesTable,
};
use crate::config::DataConfig;

/// Categories used by the box-plot table
pub const BOX_CATEGORIES: [&str; 4] = ["A", "B", "C", "D"];

/// Categories used by the bar table
pub const BAR_CATEGORIES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

/// Bar values are drawn from this half-open range
const BAR_VALUE_RANGE: std::ops::Range<i64> = 1..100;

/// The immutable tables behind every chart
#[derive(Debug, Clone, PartialEq)]
pub struct SampleData {
    pub timeseries: TimeSeriesTable,
    pub boxplot: CategoryValueTable,
    pub bar: BarTable,
    /// Seed the tables were generated from
    pub seed: u64,
}

impl SampleData {
    /// Generate all tables from the configured seed
    pub fn generate(config: &DataConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);

        let timeseries = generate_timeseries(&mut rng, config);
        let boxplot = generate_boxplot(&mut rng, config.box_samples);
        let bar = generate_bar(&mut rng);

        tracing::debug!(
            seed = config.seed,
            days = timeseries.len(),
            box_samples = boxplot.len(),
            bar_rows = bar.len(),
            "Generated sample data"
        );

        Self {
            timeseries,
            boxplot,
            bar,
            seed: config.seed,
        }
    }
}

/// Two independent random walks, one row per day
fn generate_timeseries(rng: &mut StdRng, config: &DataConfig) -> TimeSeriesTable {
    let value1 = random_walk(rng, config.periods);
    let value2 = random_walk(rng, config.periods);

    let rows = config
        .start_date
        .iter_days()
        .zip(value1)
        .zip(value2)
        .map(|((date, value1), value2)| TimeSeriesRow {
            date,
            value1,
            value2,
        })
        .collect();

    TimeSeriesTable::new(rows)
}

/// Cumulative sum of standard-normal steps
fn random_walk(rng: &mut StdRng, len: usize) -> Vec<f64> {
    let mut total = 0.0;
    (0..len)
        .map(|_| {
            let step: f64 = rng.sample(StandardNormal);
            total += step;
            total
        })
        .collect()
}

fn generate_boxplot(rng: &mut StdRng, samples: usize) -> CategoryValueTable {
    let categories: Vec<&str> = (0..samples)
        .map(|_| BOX_CATEGORIES[rng.gen_range(0..BOX_CATEGORIES.len())])
        .collect();

    let samples = categories
        .into_iter()
        .map(|category| CategorySample {
            category: category.to_string(),
            value: rng.sample(StandardNormal),
        })
        .collect();

    CategoryValueTable::new(samples)
}

fn generate_bar(rng: &mut StdRng) -> BarTable {
    let value1: Vec<i64> = BAR_CATEGORIES
        .iter()
        .map(|_| rng.gen_range(BAR_VALUE_RANGE))
        .collect();
    let value2: Vec<i64> = BAR_CATEGORIES
        .iter()
        .map(|_| rng.gen_range(BAR_VALUE_RANGE))
        .collect();

    let rows = BAR_CATEGORIES
        .iter()
        .zip(value1.into_iter().zip(value2))
        .map(|(category, (value1, value2))| BarRow {
            category: category.to_string(),
            value1,
            value2,
        })
        .collect();

    BarTable::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_default_shapes() {
        let data = SampleData::generate(&DataConfig::default());

        assert_eq!(data.timeseries.len(), 365);
        assert_eq!(data.boxplot.len(), 200);
        assert_eq!(data.bar.len(), 6);
    }

    #[test]
    fn test_timeseries_is_daily() {
        let data = SampleData::generate(&DataConfig::default());
        let dates = data.timeseries.dates();

        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(dates[364], NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert!(dates.windows(2).all(|w| (w[1] - w[0]).num_days() == 1));
    }

    #[test]
    fn test_same_seed_same_data() {
        let config = DataConfig {
            seed: 7,
            ..Default::default()
        };
        assert_eq!(SampleData::generate(&config), SampleData::generate(&config));
    }

    #[test]
    fn test_different_seed_different_data() {
        let a = SampleData::generate(&DataConfig {
            seed: 1,
            ..Default::default()
        });
        let b = SampleData::generate(&DataConfig {
            seed: 2,
            ..Default::default()
        });
        assert_ne!(a.timeseries, b.timeseries);
    }

    #[test]
    fn test_box_categories_from_fixed_set() {
        let data = SampleData::generate(&DataConfig::default());
        let categories = data.boxplot.categories();

        assert!(categories.iter().all(|c| BOX_CATEGORIES.contains(&c.as_str())));
        // 200 uniform draws over 4 labels hit every label
        assert_eq!(categories, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_bar_values_in_range() {
        let data = SampleData::generate(&DataConfig::default());

        assert_eq!(data.bar.categories(), vec!["A", "B", "C", "D", "E", "F"]);
        for row in data.bar.rows() {
            assert!((1..100).contains(&row.value1));
            assert!((1..100).contains(&row.value2));
        }
    }

    #[test]
    fn test_zero_periods() {
        let data = SampleData::generate(&DataConfig {
            periods: 0,
            box_samples: 0,
            ..Default::default()
        });
        assert!(data.timeseries.is_empty());
        assert!(data.boxplot.is_empty());
    }
}
