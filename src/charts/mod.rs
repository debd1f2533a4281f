//! Charts module - Chart bindings and rendering

pub mod bindings;
mod plotter;
mod renderer;

pub use bindings::{ChartSpec, DashboardCharts, SortSelection, TableSpec};
pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};
