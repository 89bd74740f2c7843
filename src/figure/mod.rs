//! Chart Figures
//!
//! A `Figure` is a Plotly.js figure description: a list of traces plus a
//! layout. The server only describes charts; axis ranges, quartiles and all
//! drawing are computed by Plotly in the browser.
//!
//! Serialized form matches what `Plotly.react(div, figure.data, figure.layout)`
//! expects:
//!
//! ```json
//! {
//!   "data": [{"type": "scatter", "mode": "lines", "x": ["2023-01-01"], "y": [0.4]}],
//!   "layout": {"title": {"text": "Time Series Graph 1"}, "xaxis": {...}, "yaxis": {...}}
//! }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Plotly figure: traces and layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: FigureLayout,
}

/// A single Plotly trace
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    /// Line chart (Plotly `scatter` with `mode: "lines"`)
    Scatter(ScatterTrace),
    /// Box plot; Plotly groups `y` by `x` and computes quartiles
    Box(BoxTrace),
    /// Bar chart
    Bar(BarTrace),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScatterTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoxTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BarTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Figure-level layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FigureLayout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Axis settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Axis {
    pub title: Title,
    /// Plotly `categoryorder`; "array" pins the order to `categoryarray`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoryorder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoryarray: Option<Vec<String>>,
}

impl Axis {
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Title::new(text),
            categoryorder: None,
            categoryarray: None,
        }
    }

    /// Pin a categorical axis to an explicit order
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categoryorder = Some("array".to_string());
        self.categoryarray = Some(categories);
        self
    }
}

impl Figure {
    /// Line chart of `(date, value)` points, dates rendered as ISO `YYYY-MM-DD`
    pub fn line<I>(title: &str, x_label: &str, y_label: &str, points: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let (x, y): (Vec<String>, Vec<f64>) = points
            .into_iter()
            .map(|(date, value)| (date.format("%Y-%m-%d").to_string(), value))
            .unzip();

        Self {
            data: vec![Trace::Scatter(ScatterTrace {
                x,
                y,
                mode: "lines".to_string(),
                name: None,
            })],
            layout: FigureLayout {
                title: Title::new(title),
                xaxis: Axis::titled(x_label),
                yaxis: Axis::titled(y_label),
            },
        }
    }

    /// Box plot of `(category, value)` samples with a fixed category order
    pub fn box_plot<'a, I>(
        title: &str,
        x_label: &str,
        y_label: &str,
        samples: I,
        categories: Vec<String>,
    ) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let (x, y): (Vec<String>, Vec<f64>) = samples
            .into_iter()
            .map(|(category, value)| (category.to_string(), value))
            .unzip();

        Self {
            data: vec![Trace::Box(BoxTrace { x, y, name: None })],
            layout: FigureLayout {
                title: Title::new(title),
                xaxis: Axis::titled(x_label).with_categories(categories),
                yaxis: Axis::titled(y_label),
            },
        }
    }

    /// Bar chart, one bar per category
    pub fn bar<'a, I>(title: &str, x_label: &str, y_label: &str, bars: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let (x, y): (Vec<String>, Vec<f64>) = bars
            .into_iter()
            .map(|(category, value)| (category.to_string(), value))
            .unzip();

        Self {
            data: vec![Trace::Bar(BarTrace { x, y, name: None })],
            layout: FigureLayout {
                title: Title::new(title),
                xaxis: Axis::titled(x_label),
                yaxis: Axis::titled(y_label),
            },
        }
    }

    pub fn title(&self) -> &str {
        &self.layout.title.text
    }

    /// Total number of plotted points across all traces
    pub fn point_count(&self) -> usize {
        self.data.iter().map(Trace::len).sum()
    }
}

impl Trace {
    pub fn x(&self) -> &[String] {
        match self {
            Trace::Scatter(t) => &t.x,
            Trace::Box(t) => &t.x,
            Trace::Bar(t) => &t.x,
        }
    }

    pub fn y(&self) -> &[f64] {
        match self {
            Trace::Scatter(t) => &t.y,
            Trace::Box(t) => &t.y,
            Trace::Bar(t) => &t.y,
        }
    }

    pub fn len(&self) -> usize {
        self.y().len()
    }

    pub fn is_empty(&self) -> bool {
        self.y().is_empty()
    }
}
