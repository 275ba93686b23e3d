//! What `combo-chart.js` draws, as plain serializable data.
//!
//! A combo chart has one label axis, at most one bar series and any number
//! of line series. `null` line values are gaps.

use rwb_data::rain::{RainChart, FORECAST_COLOR};
use rwb_data::scenario::ScenarioView;
use serde::Serialize;

const LAST_YEAR_COLOR: &str = "#f4a22b";
const AVG_15YRS_COLOR: &str = "#7f7f7f";
const SUPPLY_COLOR: &str = "rgba(91,155,213,0.7)";
const DEMAND_COLOR: &str = "#7030a0";
const DEFICIT_COLOR: &str = "#ff0000";

/// Y-axis unit of the water charts.
pub const WATER_UNIT: &str = "ลบ.ม./ไร่";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub label: String,
    pub values: Vec<f64>,
    /// One colour per bar
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub label: String,
    pub values: Vec<Option<f64>>,
    pub color: String,
    /// Join the line across gaps instead of breaking it
    pub span_gaps: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboChartSpec {
    pub labels: Vec<String>,
    pub bars: Option<BarSeries>,
    pub lines: Vec<LineSeries>,
    pub y_axis_label: String,
    /// Print each value above its point
    pub value_labels: bool,
}

impl ComboChartSpec {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn line(label: &str, values: Vec<Option<f64>>, color: &str, span_gaps: bool) -> LineSeries {
    LineSeries {
        label: label.to_string(),
        values,
        color: color.to_string(),
        span_gaps,
    }
}

/// Rain forecast: coloured precipitation bars, last year and the 15-year
/// average as lines. An empty chart becomes the "no data" fallback.
pub fn rain_chart(chart: &RainChart) -> ComboChartSpec {
    let y_axis_label = format!("ปริมาณน้ำฝน (หน่วย : {})", WATER_UNIT);
    if chart.is_empty() {
        return ComboChartSpec {
            labels: Vec::new(),
            bars: Some(BarSeries {
                label: "ปริมาณน้ำฝน (ไม่มีข้อมูล)".to_string(),
                values: Vec::new(),
                colors: vec![FORECAST_COLOR.to_string()],
            }),
            lines: Vec::new(),
            y_axis_label,
            value_labels: false,
        };
    }

    ComboChartSpec {
        labels: chart.labels().into_iter().map(str::to_string).collect(),
        bars: Some(BarSeries {
            label: "ปริมาณน้ำฝน (ค่าจริง / คาดการณ์ / ปัจจุบัน)".to_string(),
            values: chart.bars.iter().map(|b| b.precipitation).collect(),
            colors: chart.bars.iter().map(|b| b.color.clone()).collect(),
        }),
        lines: vec![
            line("ปริมาณน้ำฝนปีก่อน", chart.last_year.clone(), LAST_YEAR_COLOR, true),
            line("ค่าเฉลี่ยน้ำฝน 15 ปี", chart.avg_15yrs.clone(), AVG_15YRS_COLOR, false),
        ],
        y_axis_label,
        value_labels: false,
    }
}

/// Supply bars against the demand line.
pub fn water_compare_chart(scenario: &ScenarioView) -> ComboChartSpec {
    let series = &scenario.water_compare;
    ComboChartSpec {
        labels: series.labels.clone(),
        bars: Some(BarSeries {
            label: "ปริมาณน้ำที่ใช้ได้".to_string(),
            values: series.supply.clone(),
            colors: vec![SUPPLY_COLOR.to_string(); series.len()],
        }),
        lines: vec![line(
            "ความต้องการน้ำรวม",
            series.demand.iter().copied().map(Some).collect(),
            DEMAND_COLOR,
            false,
        )],
        y_axis_label: WATER_UNIT.to_string(),
        value_labels: true,
    }
}

/// Water deficit per dekad.
pub fn deficit_chart(scenario: &ScenarioView) -> ComboChartSpec {
    ComboChartSpec {
        labels: scenario.water_compare.labels.clone(),
        bars: None,
        lines: vec![line(
            "ปริมาณการขาดแคลนน้ำ",
            scenario.deficit.iter().copied().map(Some).collect(),
            DEFICIT_COLOR,
            false,
        )],
        y_axis_label: WATER_UNIT.to_string(),
        value_labels: true,
    }
}
