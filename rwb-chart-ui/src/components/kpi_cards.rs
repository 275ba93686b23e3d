//! Planting-scenario KPI cards.

use dioxus::prelude::*;
use rwb_data::scenario::format_kpi;

use crate::state::AppState;

#[component]
fn KpiCard(id: String, title: String, value: String) -> Element {
    rsx! {
        div {
            class: "kpi-card",
            style: "flex: 1; min-width: 140px; padding: 10px 12px; border: 1px solid #e0e0e0; border-radius: 6px;",
            div { style: "font-size: 12px; color: #666;", "{title}" }
            div { id: "{id}", style: "font-size: 20px; font-weight: bold;", "{value}" }
        }
    }
}

#[component]
pub fn KpiCards() -> Element {
    let state = use_context::<AppState>();
    let summary = state.scenario.read().as_ref().map(|s| s.summary.clone());
    let value = |v: Option<f64>| v.map(format_kpi).unwrap_or_else(|| "-".to_string());

    let balance = value(summary.as_ref().map(|s| s.total_water_balance));
    let demand = value(summary.as_ref().map(|s| s.total_demand));
    let supply = value(summary.as_ref().map(|s| s.total_supply));
    let period = summary.and_then(|s| s.planting_period);

    rsx! {
        div {
            class: "kpi-cards",
            style: "display: flex; gap: 8px; flex-wrap: wrap; margin: 8px 0;",
            KpiCard { id: "kpi-water-deficit".to_string(), title: "ปริมาณน้ำขาดแคลน".to_string(), value: balance }
            KpiCard { id: "kpi-water-demand".to_string(), title: "ความต้องการน้ำรวม".to_string(), value: demand }
            KpiCard { id: "kpi-water-supply".to_string(), title: "ปริมาณน้ำที่ใช้ได้".to_string(), value: supply }
        }
        if let Some(period) = period {
            p { id: "kpi-planting-period", style: "font-size: 12px; color: #555;", "กำลังปลูก {period}" }
        }
    }
}
