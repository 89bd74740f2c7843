//! Reactive Callbacks
//!
//! A callback subscribes to one or more `(component id, property)` inputs and
//! produces a figure for each of its outputs. The browser reports control
//! changes; the registry finds the listening callbacks and runs them.
//!
//! ## Dashboard callbacks
//!
//! | Inputs | Outputs |
//! |--------|---------|
//! | `date-slider1.value` | `timeseries-graph1.figure` |
//! | `date-slider2.value` | `timeseries-graph2.figure` |
//! | `boxplot1.id`, `boxplot2.id` | `boxplot1.figure`, `boxplot2.figure` |
//! | `barplot1.id`, `barplot2.id` | `barplot1.figure`, `barplot2.figure` |
//!
//! Every callback is a pure function of the sample data and its inputs.

mod categorical;
mod error;
mod timeseries;

pub use categorical::{BarPlotCallback, BoxPlotCallback};
pub use error::{CallbackError, CallbackResult};
pub use timeseries::TimeSeriesCallback;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::{BarColumn, SampleData, ValueColumn};
use crate::figure::Figure;
use crate::layout::{ids, Component};

/// A `(component id, property)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub id: String,
    pub property: String,
}

impl Dependency {
    pub fn new(id: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            property: property.into(),
        }
    }

    pub fn matches(&self, id: &str, property: &str) -> bool {
        self.id == id && self.property == property
    }
}

impl std::fmt::Display for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.id, self.property)
    }
}

/// Current value of one input, as reported by the browser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputValue {
    pub id: String,
    pub property: String,
    pub value: Value,
}

/// A server-side function from input values to figures
pub trait Callback: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Properties this callback writes, in the order `invoke` returns them
    fn outputs(&self) -> Vec<Dependency>;

    /// Properties this callback reads, in the order `invoke` receives them
    fn inputs(&self) -> Vec<Dependency>;

    /// Compute one figure per output
    fn invoke(&self, data: &SampleData, inputs: &[Value]) -> CallbackResult<Vec<Figure>>;

    /// Key identifying this callback's outputs.
    ///
    /// A single output is `id.property`; several are joined as
    /// `..a.figure...b.figure..`.
    fn output_key(&self) -> String {
        let outputs = self.outputs();
        match outputs.as_slice() {
            [single] => single.to_string(),
            many => {
                let joined: Vec<String> = many.iter().map(ToString::to_string).collect();
                format!("..{}..", joined.join("..."))
            }
        }
    }
}

/// One output and the figure computed for it
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub target: Dependency,
    pub figure: Figure,
}

/// Callback signature exposed to the browser
#[derive(Debug, Clone, Serialize)]
pub struct DependencySpec {
    pub output: String,
    pub outputs: Vec<Dependency>,
    pub inputs: Vec<Dependency>,
}

/// Ordered set of registered callbacks
#[derive(Default)]
pub struct CallbackRegistry {
    callbacks: Vec<Box<dyn Callback>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four callbacks behind the dashboard's six graphs
    pub fn dashboard() -> Self {
        let mut registry = Self::new();
        registry.register(TimeSeriesCallback::new(
            ids::DATE_SLIDER_1,
            ids::TIMESERIES_GRAPH_1,
            ValueColumn::Value1,
            "Time Series Graph 1",
        ));
        registry.register(TimeSeriesCallback::new(
            ids::DATE_SLIDER_2,
            ids::TIMESERIES_GRAPH_2,
            ValueColumn::Value2,
            "Time Series Graph 2",
        ));
        registry.register(BoxPlotCallback::new(&[
            (ids::BOXPLOT_1, "Box Plot 1"),
            (ids::BOXPLOT_2, "Box Plot 2"),
        ]));
        registry.register(BarPlotCallback::new(&[
            (ids::BARPLOT_1, "Bar Plot 1", BarColumn::Value1),
            (ids::BARPLOT_2, "Bar Plot 2", BarColumn::Value2),
        ]));
        registry
    }

    pub fn register(&mut self, callback: impl Callback + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Signatures of every callback, in registration order
    pub fn dependencies(&self) -> Vec<DependencySpec> {
        self.callbacks
            .iter()
            .map(|cb| DependencySpec {
                output: cb.output_key(),
                outputs: cb.outputs(),
                inputs: cb.inputs(),
            })
            .collect()
    }

    /// Run the callback registered for `output_key`.
    ///
    /// Inputs are matched by id and property; any input not supplied falls
    /// back to its initial value in `layout`.
    pub fn dispatch(
        &self,
        data: &SampleData,
        layout: &Component,
        output_key: &str,
        inputs: &[InputValue],
    ) -> CallbackResult<Vec<Output>> {
        let callback = self
            .callbacks
            .iter()
            .find(|cb| cb.output_key() == output_key)
            .ok_or_else(|| CallbackError::UnknownOutput(output_key.to_string()))?;

        run(callback.as_ref(), data, layout, inputs)
    }

    /// Run every callback that listens to `id.property`, with `value` as the
    /// new input and layout defaults for the rest.
    ///
    /// One result per listener, in registration order. A failing listener
    /// does not stop the others.
    pub fn on_change(
        &self,
        data: &SampleData,
        layout: &Component,
        id: &str,
        property: &str,
        value: Value,
    ) -> Vec<CallbackResult<Vec<Output>>> {
        let changed = [InputValue {
            id: id.to_string(),
            property: property.to_string(),
            value,
        }];

        self.listeners(id, property)
            .map(|callback| run(callback, data, layout, &changed))
            .collect()
    }

    /// Callbacks with `id.property` among their inputs
    pub fn listeners<'a>(
        &'a self,
        id: &'a str,
        property: &'a str,
    ) -> impl Iterator<Item = &'a (dyn Callback + 'static)> + 'a {
        self.callbacks
            .iter()
            .filter(move |cb| cb.inputs().iter().any(|d| d.matches(id, property)))
            .map(|cb| &**cb)
    }

    /// Figures for every output, computed from the layout's initial values.
    ///
    /// This is what the page shows before any interaction. Callbacks that
    /// fail are logged and skipped, so their graphs stay blank.
    pub fn initial_outputs(&self, data: &SampleData, layout: &Component) -> Vec<Output> {
        let mut outputs = Vec::new();
        for callback in &self.callbacks {
            match run(callback.as_ref(), data, layout, &[]) {
                Ok(figures) => outputs.extend(figures),
                Err(e) => {
                    tracing::warn!(callback = callback.name(), error = %e, "Initial render failed")
                }
            }
        }
        outputs
    }
}

fn run(
    callback: &dyn Callback,
    data: &SampleData,
    layout: &Component,
    supplied: &[InputValue],
) -> CallbackResult<Vec<Output>> {
    let values = callback
        .inputs()
        .iter()
        .map(|dep| {
            supplied
                .iter()
                .find(|input| dep.matches(&input.id, &input.property))
                .map(|input| input.value.clone())
                .or_else(|| layout.property(&dep.id, &dep.property))
                .ok_or_else(|| CallbackError::MissingInput(dep.to_string()))
        })
        .collect::<CallbackResult<Vec<Value>>>()?;

    let figures = callback.invoke(data, &values)?;
    let targets = callback.outputs();
    if figures.len() != targets.len() {
        return Err(CallbackError::ArgumentCount {
            expected: targets.len(),
            got: figures.len(),
        });
    }

    tracing::debug!(callback = callback.name(), outputs = targets.len(), "Callback ran");

    Ok(targets
        .into_iter()
        .zip(figures)
        .map(|(target, figure)| Output { target, figure })
        .collect())
}
