//! Chart panels. Each re-renders its D3 chart whenever its signal changes.

use dioxus::prelude::*;
use log::debug;

use super::{ChartContainer, ChartHeader};
use crate::chart_spec::{self, WATER_UNIT};
use crate::js_bridge;
use crate::state::AppState;

/// DOM id of the rain forecast chart.
pub const RAIN_CHART_ID: &str = "rainChart";
pub const WATER_COMPARE_CHART_ID: &str = "waterCompareChart";
pub const DEFICIT_CHART_ID: &str = "deficitChart";

#[component]
pub fn RainForecastChart() -> Element {
    let state = use_context::<AppState>();

    use_effect(move || {
        if let Some(chart) = state.rain_chart.read().as_ref() {
            let spec = chart_spec::rain_chart(chart);
            debug!("Rendering rain chart with {} bars", chart.bars.len());
            js_bridge::render_combo_chart(RAIN_CHART_ID, &spec.to_json());
        }
    });

    rsx! {
        ChartHeader {
            title: "ปริมาณน้ำฝน".to_string(),
            unit_description: WATER_UNIT.to_string(),
        }
        ChartContainer {
            id: RAIN_CHART_ID.to_string(),
            loading: (state.rain_loading)(),
            min_height: 320,
        }
    }
}

/// Water-compare and deficit charts side by side.
#[component]
pub fn ScenarioCharts() -> Element {
    let state = use_context::<AppState>();

    use_effect(move || {
        if let Some(scenario) = state.scenario.read().as_ref() {
            js_bridge::render_combo_chart(
                WATER_COMPARE_CHART_ID,
                &chart_spec::water_compare_chart(scenario).to_json(),
            );
            js_bridge::render_combo_chart(
                DEFICIT_CHART_ID,
                &chart_spec::deficit_chart(scenario).to_json(),
            );
        }
    });

    let loading = (state.scenario_loading)();

    rsx! {
        div {
            style: "display: flex; gap: 16px; flex-wrap: wrap;",
            div {
                style: "flex: 1; min-width: 320px;",
                ChartHeader {
                    title: "เปรียบเทียบความต้องการน้ำกับน้ำที่ใช้ได้".to_string(),
                    unit_description: WATER_UNIT.to_string(),
                }
                ChartContainer { id: WATER_COMPARE_CHART_ID.to_string(), loading, min_height: 280 }
            }
            div {
                style: "flex: 1; min-width: 320px;",
                ChartHeader {
                    title: "ปริมาณการขาดแคลนน้ำ".to_string(),
                    unit_description: WATER_UNIT.to_string(),
                }
                ChartContainer { id: DEFICIT_CHART_ID.to_string(), loading, min_height: 280 }
            }
        }
    }
}
