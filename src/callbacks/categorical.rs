//! Box-plot and bar-plot callbacks
//!
//! Both take their own graph ids as identity inputs, so they fire once when
//! the page loads and always return the same figures for a given dataset.

use serde_json::Value;

use super::error::{CallbackError, CallbackResult};
use super::{Callback, Dependency};
use crate::data::{BarColumn, SampleData};
use crate::figure::Figure;

fn check_arity(expected: usize, inputs: &[Value]) -> CallbackResult<()> {
    if inputs.len() != expected {
        return Err(CallbackError::ArgumentCount {
            expected,
            got: inputs.len(),
        });
    }
    Ok(())
}

fn identity_inputs(graph_ids: &[String]) -> Vec<Dependency> {
    graph_ids.iter().map(|id| Dependency::new(id, "id")).collect()
}

fn figure_outputs(graph_ids: &[String]) -> Vec<Dependency> {
    graph_ids.iter().map(|id| Dependency::new(id, "figure")).collect()
}

/// Value-by-category box plots, one per graph
#[derive(Debug, Clone)]
pub struct BoxPlotCallback {
    graphs: Vec<(String, String)>,
}

impl BoxPlotCallback {
    /// `graphs` pairs each graph id with its figure title
    pub fn new(graphs: &[(&str, &str)]) -> Self {
        Self {
            graphs: graphs
                .iter()
                .map(|(id, title)| (id.to_string(), title.to_string()))
                .collect(),
        }
    }

    fn graph_ids(&self) -> Vec<String> {
        self.graphs.iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn figure(data: &SampleData, title: &str) -> Figure {
        let table = &data.boxplot;
        Figure::box_plot(
            title,
            "Category",
            "Value",
            table.samples().iter().map(|s| (s.category.as_str(), s.value)),
            table.categories(),
        )
    }
}

impl Callback for BoxPlotCallback {
    fn name(&self) -> &str {
        "box_plots"
    }

    fn outputs(&self) -> Vec<Dependency> {
        figure_outputs(&self.graph_ids())
    }

    fn inputs(&self) -> Vec<Dependency> {
        identity_inputs(&self.graph_ids())
    }

    fn invoke(&self, data: &SampleData, inputs: &[Value]) -> CallbackResult<Vec<Figure>> {
        check_arity(self.graphs.len(), inputs)?;
        Ok(self
            .graphs
            .iter()
            .map(|(_, title)| Self::figure(data, title))
            .collect())
    }
}

/// Bar charts, each plotting one column of the bar table
#[derive(Debug, Clone)]
pub struct BarPlotCallback {
    graphs: Vec<(String, String, BarColumn)>,
}

impl BarPlotCallback {
    pub fn new(graphs: &[(&str, &str, BarColumn)]) -> Self {
        Self {
            graphs: graphs
                .iter()
                .map(|(id, title, column)| (id.to_string(), title.to_string(), *column))
                .collect(),
        }
    }

    fn graph_ids(&self) -> Vec<String> {
        self.graphs.iter().map(|(id, _, _)| id.clone()).collect()
    }

    pub fn figure(data: &SampleData, title: &str, column: BarColumn) -> Figure {
        Figure::bar(
            title,
            "Category",
            column.name(),
            data.bar
                .rows()
                .iter()
                .map(|row| (row.category.as_str(), column.get(row) as f64)),
        )
    }
}

impl Callback for BarPlotCallback {
    fn name(&self) -> &str {
        "bar_plots"
    }

    fn outputs(&self) -> Vec<Dependency> {
        figure_outputs(&self.graph_ids())
    }

    fn inputs(&self) -> Vec<Dependency> {
        identity_inputs(&self.graph_ids())
    }

    fn invoke(&self, data: &SampleData, inputs: &[Value]) -> CallbackResult<Vec<Figure>> {
        check_arity(self.graphs.len(), inputs)?;
        Ok(self
            .graphs
            .iter()
            .map(|(_, title, column)| Self::figure(data, title, *column))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataConfig;
    use crate::figure::Trace;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn data() -> SampleData {
        SampleData::generate(&DataConfig::default())
    }

    fn box_cb() -> BoxPlotCallback {
        BoxPlotCallback::new(&[("boxplot1", "Box Plot 1"), ("boxplot2", "Box Plot 2")])
    }

    fn bar_cb() -> BarPlotCallback {
        BarPlotCallback::new(&[
            ("barplot1", "Bar Plot 1", BarColumn::Value1),
            ("barplot2", "Bar Plot 2", BarColumn::Value2),
        ])
    }

    #[test]
    fn test_box_plots_cover_categories() {
        let data = data();
        let figures = box_cb()
            .invoke(&data, &[json!("boxplot1"), json!("boxplot2")])
            .unwrap();

        assert_eq!(figures.len(), 2);
        assert_eq!(figures[0].title(), "Box Plot 1");
        assert_eq!(figures[1].title(), "Box Plot 2");

        for fig in &figures {
            assert!(matches!(fig.data[0], Trace::Box(_)));
            let seen: BTreeSet<&str> = fig.data[0].x().iter().map(String::as_str).collect();
            assert_eq!(seen.into_iter().collect::<Vec<_>>(), vec!["A", "B", "C", "D"]);
            assert_eq!(
                fig.layout.xaxis.categoryarray.as_deref(),
                Some(&["A".to_string(), "B".to_string(), "C".to_string(), "D".to_string()][..])
            );
            assert_eq!(fig.point_count(), 200);
        }

        // Same data, same trace
        assert_eq!(figures[0].data, figures[1].data);
    }

    #[test]
    fn test_bar_plots_columns() {
        let data = data();
        let figures = bar_cb()
            .invoke(&data, &[json!("barplot1"), json!("barplot2")])
            .unwrap();

        assert_eq!(figures[0].data[0].x(), &["A", "B", "C", "D", "E", "F"]);
        let value1: Vec<f64> = data.bar.rows().iter().map(|r| r.value1 as f64).collect();
        let value2: Vec<f64> = data.bar.rows().iter().map(|r| r.value2 as f64).collect();
        assert_eq!(figures[0].data[0].y(), value1.as_slice());
        assert_eq!(figures[1].data[0].y(), value2.as_slice());
        assert_eq!(figures[1].layout.yaxis.title.text, "Value2");
    }

    #[test]
    fn test_deterministic_for_seed() {
        let a = data();
        let b = data();
        let inputs = [json!("barplot1"), json!("barplot2")];
        assert_eq!(bar_cb().invoke(&a, &inputs), bar_cb().invoke(&b, &inputs));

        let inputs = [json!("boxplot1"), json!("boxplot2")];
        assert_eq!(box_cb().invoke(&a, &inputs), box_cb().invoke(&b, &inputs));
    }

    #[test]
    fn test_identity_dependencies() {
        let cb = box_cb();
        let inputs: Vec<String> = cb.inputs().iter().map(|d| d.to_string()).collect();
        assert_eq!(inputs, vec!["boxplot1.id", "boxplot2.id"]);
        let outputs: Vec<String> = cb.outputs().iter().map(|d| d.to_string()).collect();
        assert_eq!(outputs, vec!["boxplot1.figure", "boxplot2.figure"]);
    }

    #[test]
    fn test_wrong_arity() {
        let err = bar_cb().invoke(&data(), &[json!("barplot1")]).unwrap_err();
        assert_eq!(err, CallbackError::ArgumentCount { expected: 2, got: 1 });
    }
}
