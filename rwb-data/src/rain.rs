//! Rain forecast chart data.
//!
//! Precipitation bars are coloured by where they sit relative to the current
//! dekad; last year's rainfall and the 15-year average are drawn as lines.

use log::warn;
use rwb_core::payload::RainfallSeries;
use serde::{Deserialize, Serialize};

/// Bar colour for dekads before the current one
pub const OBSERVED_COLOR: &str = "#1f4e79";
/// Bar colour for the current dekad
pub const CURRENT_COLOR: &str = "#00b0f0";
/// Bar colour for dekads after the current one
pub const FORECAST_COLOR: &str = "#5b9bd5";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarKind {
    Observed,
    Current,
    Forecast,
}

impl BarKind {
    pub fn color(&self) -> &'static str {
        match self {
            BarKind::Observed => OBSERVED_COLOR,
            BarKind::Current => CURRENT_COLOR,
            BarKind::Forecast => FORECAST_COLOR,
        }
    }

    /// Kind of the bar at `index` given the current dekad's position.
    pub fn at(index: usize, current: Option<usize>) -> Self {
        match current {
            Some(c) if index < c => BarKind::Observed,
            Some(c) if index == c => BarKind::Current,
            _ => BarKind::Forecast,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainBar {
    pub label: String,
    pub precipitation: f64,
    pub kind: BarKind,
    pub color: String,
}

/// Everything the rain chart draws.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RainChart {
    pub bars: Vec<RainBar>,
    /// `None` entries are gaps in the line
    pub last_year: Vec<Option<f64>>,
    pub avg_15yrs: Vec<Option<f64>>,
    pub current_index: Option<usize>,
}

impl RainChart {
    pub fn from_series(series: &RainfallSeries, current_label: Option<&str>) -> Self {
        let current_index =
            current_label.and_then(|label| series.time_line.iter().position(|l| l == label));
        if let (Some(label), None) = (current_label, current_index) {
            warn!("rain chart: current dekad '{}' is not on the timeline", label);
        }

        let bars = series
            .time_line
            .iter()
            .zip(&series.precipitation)
            .enumerate()
            .map(|(i, (label, &precipitation))| {
                let kind = BarKind::at(i, current_index);
                RainBar {
                    label: label.clone(),
                    precipitation,
                    kind,
                    color: kind.color().to_string(),
                }
            })
            .collect();

        RainChart {
            bars,
            last_year: series.last_year.clone(),
            avg_15yrs: series.avg_15yrs.clone(),
            current_index,
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.bars.iter().map(|b| b.label.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
