//! Cleans World Bank wide-format indicator tables and assembles line-chart
//! specifications for a dashboard front end.

pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod figure;

pub use config::{Config, IndicatorSpec};
pub use data::clean::{clean, clean_with};
pub use data::model::Observation;
pub use error::{CleanError, Result};
pub use figure::{
    ChartSpec, FigureOutcome, LineSeries, build_figure, build_figures, build_figures_isolated,
    build_figures_with,
};
