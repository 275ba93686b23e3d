//! Planting scenario: KPI cards plus the water-compare and deficit charts.

use rwb_core::payload::PlantingScenario;
use serde::{Deserialize, Serialize};

use crate::series::ChartSeries;

/// Numbers shown on the KPI cards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub total_demand: f64,
    pub total_supply: f64,
    pub total_water_balance: f64,
    /// `"start - end"`, only when both ends are known
    pub planting_period: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioView {
    pub summary: ScenarioSummary,
    /// Supply bars and demand line
    pub water_compare: ChartSeries,
    /// `max(0, demand - supply)` per dekad
    pub deficit: Vec<f64>,
}

impl ScenarioView {
    pub fn from_scenario(scenario: PlantingScenario) -> Self {
        let planting_period = match (&scenario.date_start, &scenario.date_end) {
            (Some(start), Some(end)) => Some(format!("{} - {}", start, end)),
            _ => None,
        };
        let water_compare =
            ChartSeries::aligned(scenario.time_line, &scenario.demand, &scenario.supply);
        let deficit = water_compare.deficits();

        ScenarioView {
            summary: ScenarioSummary {
                total_demand: scenario.total_demand,
                total_supply: scenario.total_supply,
                total_water_balance: scenario.total_water_balance,
                planting_period,
            },
            water_compare,
            deficit,
        }
    }
}

/// Format a KPI value the way the cards show it: whole numbers with
/// thousands separators, one decimal otherwise.
pub fn format_kpi(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let whole = abs.trunc() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let frac = ((abs - abs.trunc()) * 10.0).round() as u64;
    let sign = if negative { "-" } else { "" };
    if frac == 0 {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}
