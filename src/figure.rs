use std::collections::HashMap;

use log::{info, warn};
use serde::Serialize;

use crate::color::generate_palette;
use crate::config::{Config, IndicatorSpec};
use crate::data::clean::clean_with;
use crate::data::model::Observation;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Chart specification types
// ---------------------------------------------------------------------------

/// One country's line: years on x, indicator values on y (index-aligned).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub x: Vec<i32>,
    /// `None` serialises as `null`, which the renderer draws as a gap.
    pub y: Vec<Option<f64>>,
    pub mode: String,
    pub line: LineStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

/// A render-agnostic chart: the series plus title and axis labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "data")]
    pub series: Vec<LineSeries>,
    pub layout: Layout,
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        &self.layout.title
    }
}

/// Result of building one indicator's chart when failures are isolated.
/// The error is kept typed so callers can tell IO from schema failures.
#[derive(Debug)]
pub struct FigureOutcome {
    pub indicator: String,
    pub figure: Result<ChartSpec>,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Group observations into one line per country.  Countries keep the order
/// in which they first appear; each line keeps the observations' order.
pub fn build_figure(indicator: &IndicatorSpec, observations: &[Observation]) -> ChartSpec {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<i32>, Vec<Option<f64>>)> = Vec::new();

    for obs in observations {
        let slot = *index.entry(obs.country.as_str()).or_insert_with(|| {
            groups.push((obs.country.as_str(), Vec::new(), Vec::new()));
            groups.len() - 1
        });
        let (_, x, y) = &mut groups[slot];
        x.push(obs.year);
        y.push(obs.value);
    }

    let palette = generate_palette(groups.len());
    let series = groups
        .into_iter()
        .zip(palette)
        .map(|((name, x, y), color)| LineSeries {
            kind: "scatter".to_string(),
            name: name.to_string(),
            x,
            y,
            mode: "lines".to_string(),
            line: LineStyle { color },
        })
        .collect();

    ChartSpec {
        series,
        layout: Layout {
            title: indicator.title.clone(),
            xaxis: Axis {
                title: indicator.x_label.clone(),
            },
            yaxis: Axis {
                title: indicator.y_label.clone(),
            },
        },
    }
}

fn figure_for(config: &Config, indicator: &IndicatorSpec) -> Result<ChartSpec> {
    let observations = clean_with(config, config.dataset_for(indicator), &indicator.code)?;
    let figure = build_figure(indicator, &observations);
    info!(
        "{}: {} series, {} observations",
        indicator.code,
        figure.series.len(),
        observations.len()
    );
    Ok(figure)
}

/// Build the default chart collection: the three air transport indicators
/// for the top ten economies, read from the default dataset path.
pub fn build_figures() -> Result<Vec<ChartSpec>> {
    build_figures_with(&Config::default())
}

/// Build one chart per configured indicator, in configuration order.  The
/// first indicator that fails aborts the whole collection.
pub fn build_figures_with(config: &Config) -> Result<Vec<ChartSpec>> {
    config
        .indicators
        .iter()
        .map(|indicator| figure_for(config, indicator))
        .collect()
}

/// Like [`build_figures_with`], but every indicator is attempted and its
/// outcome reported separately.
pub fn build_figures_isolated(config: &Config) -> Vec<FigureOutcome> {
    config
        .indicators
        .iter()
        .map(|indicator| {
            let figure = figure_for(config, indicator);
            if let Err(e) = &figure {
                warn!("{}: {e}", indicator.code);
            }
            FigureOutcome {
                indicator: indicator.code.clone(),
                figure,
            }
        })
        .collect()
}
