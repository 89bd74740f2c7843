//! Slider tick marks
//!
//! Evenly spaced month/year labels for a range slider over a date sequence.

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Maximum number of marks on one slider
pub const MARK_COUNT: usize = 12;

/// Label format, e.g. "Jan 2023"
const MARK_FORMAT: &str = "%b %Y";

/// Map evenly spaced indices into `dates` to short month/year labels.
///
/// The stride is `dates.len() / 12`. A trailing partial stride gets no mark,
/// so at most 12 marks are produced. Sequences shorter than 12 are marked at
/// every index.
pub fn create_marks(dates: &[NaiveDate]) -> BTreeMap<usize, String> {
    let stride = (dates.len() / MARK_COUNT).max(1);

    dates
        .iter()
        .enumerate()
        .step_by(stride)
        .take(MARK_COUNT)
        .map(|(i, date)| (i, date.format(MARK_FORMAT).to_string()))
        .collect()
}
