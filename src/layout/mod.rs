//! Dashboard Layout
//!
//! The page is a static tree of components: a heading and two rows of three
//! titled cards. Each card holds either a range slider plus a graph, or a bare
//! graph placeholder that a callback fills in.
//!
//! The tree serializes to JSON for `/api/v1/layout` and renders to HTML for
//! the index page (see [`page`]).

pub mod marks;
pub mod page;

pub use marks::{create_marks, MARK_COUNT};
pub use page::render_page;

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::data::{SampleData, SliderRange};

/// Inline CSS properties, kept ordered for stable output
pub type Style = BTreeMap<String, String>;

/// A node in the layout tree
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum Component {
    Div {
        #[serde(skip_serializing_if = "Option::is_none")]
        class_name: Option<String>,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        style: Style,
        children: Vec<Component>,
    },
    H1 {
        text: String,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        style: Style,
    },
    H3 {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        class_name: Option<String>,
    },
    RangeSlider(RangeSlider),
    Graph {
        id: String,
    },
}

/// Two-handle slider over integer positions
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RangeSlider {
    pub id: String,
    pub min: usize,
    pub max: usize,
    pub step: usize,
    /// Current selection, `[start, end]`
    pub value: SliderRange,
    pub marks: BTreeMap<usize, String>,
    /// Highlight the track between the handles
    pub included: bool,
}

impl RangeSlider {
    /// Slider spanning every index of a sequence, fully selected
    pub fn spanning(id: impl Into<String>, len: usize, marks: BTreeMap<usize, String>) -> Self {
        let max = len.saturating_sub(1);
        Self {
            id: id.into(),
            min: 0,
            max,
            step: 1,
            value: SliderRange::new(0, max),
            marks,
            included: true,
        }
    }

    pub fn included(mut self, included: bool) -> Self {
        self.included = included;
        self
    }
}

impl Component {
    pub fn div(class_name: &str, children: Vec<Component>) -> Self {
        Component::Div {
            class_name: Some(class_name.to_string()),
            style: Style::new(),
            children,
        }
    }

    pub fn graph(id: &str) -> Self {
        Component::Graph { id: id.to_string() }
    }

    /// Titled card, one third of a row wide
    pub fn card(title: &str, body: Vec<Component>) -> Self {
        let mut children = vec![Component::H3 {
            text: title.to_string(),
            class_name: Some("card-header".to_string()),
        }];
        children.extend(body);

        Component::Div {
            class_name: Some("card".to_string()),
            style: style(&[("width", "32%"), ("display", "inline-block"), ("padding", "10px")]),
            children,
        }
    }

    /// Id of this node, if it has one
    pub fn id(&self) -> Option<&str> {
        match self {
            Component::RangeSlider(slider) => Some(slider.id.as_str()),
            Component::Graph { id } => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Component] {
        match self {
            Component::Div { children, .. } => children,
            _ => &[],
        }
    }

    /// Every id in the tree, depth-first
    pub fn ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids<'a>(&'a self, ids: &mut Vec<&'a str>) {
        if let Some(id) = self.id() {
            ids.push(id);
        }
        for child in self.children() {
            child.collect_ids(ids);
        }
    }

    /// Find a node by id
    pub fn find(&self, id: &str) -> Option<&Component> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(id))
    }

    /// Initial value of a component property, as the browser would report it
    pub fn property(&self, id: &str, property: &str) -> Option<Value> {
        let node = self.find(id)?;
        match (node, property) {
            (_, "id") => Some(Value::String(id.to_string())),
            (Component::RangeSlider(slider), "value") => serde_json::to_value(slider.value).ok(),
            _ => None,
        }
    }
}

fn style(pairs: &[(&str, &str)]) -> Style {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Component ids used by the dashboard
pub mod ids {
    pub const DATE_SLIDER_1: &str = "date-slider1";
    pub const DATE_SLIDER_2: &str = "date-slider2";
    pub const TIMESERIES_GRAPH_1: &str = "timeseries-graph1";
    pub const TIMESERIES_GRAPH_2: &str = "timeseries-graph2";
    pub const BOXPLOT_1: &str = "boxplot1";
    pub const BOXPLOT_2: &str = "boxplot2";
    pub const BARPLOT_1: &str = "barplot1";
    pub const BARPLOT_2: &str = "barplot2";

    /// Every graph on the page, in layout order
    pub const GRAPHS: [&str; 6] = [
        TIMESERIES_GRAPH_1,
        TIMESERIES_GRAPH_2,
        BOXPLOT_1,
        BOXPLOT_2,
        BARPLOT_1,
        BARPLOT_2,
    ];
}

pub const DASHBOARD_TITLE: &str = "Dashboard with Interactive Graphs";

/// Build the dashboard tree for the given data
pub fn build_layout(data: &SampleData) -> Component {
    let dates = data.timeseries.dates();
    let marks = create_marks(&dates);

    let slider1 = RangeSlider::spanning(ids::DATE_SLIDER_1, dates.len(), marks.clone());
    let slider2 = RangeSlider::spanning(ids::DATE_SLIDER_2, dates.len(), marks).included(false);

    let first_row = Component::div(
        "row",
        vec![
            Component::card(
                "Time Series Graph 1",
                vec![
                    Component::RangeSlider(slider1),
                    Component::graph(ids::TIMESERIES_GRAPH_1),
                ],
            ),
            Component::card(
                "Time Series Graph 2",
                vec![
                    Component::RangeSlider(slider2),
                    Component::graph(ids::TIMESERIES_GRAPH_2),
                ],
            ),
            Component::card("Box Plot 1", vec![Component::graph(ids::BOXPLOT_1)]),
        ],
    );

    let second_row = Component::div(
        "row",
        vec![
            Component::card("Box Plot 2", vec![Component::graph(ids::BOXPLOT_2)]),
            Component::card("Bar Plot 1", vec![Component::graph(ids::BARPLOT_1)]),
            Component::card("Bar Plot 2", vec![Component::graph(ids::BARPLOT_2)]),
        ],
    );

    Component::Div {
        class_name: None,
        style: Style::new(),
        children: vec![
            Component::H1 {
                text: DASHBOARD_TITLE.to_string(),
                style: style(&[("textAlign", "center")]),
            },
            first_row,
            second_row,
        ],
    }
}
