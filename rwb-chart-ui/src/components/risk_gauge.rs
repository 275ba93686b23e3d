//! Cost/risk gauge with the shared pointer.

use dioxus::prelude::*;

use crate::state::AppState;

#[component]
pub fn RiskGauge() -> Element {
    let state = use_context::<AppState>();
    let left = (state.risk_pointer)()
        .map(|p| p.css_left())
        .unwrap_or("15%");
    let pointer_style = format!(
        "position: absolute; top: -6px; left: {}; transform: translateX(-50%); transition: left 0.3s;",
        left
    );

    rsx! {
        div {
            class: "cost-gauge",
            style: "position: relative; margin: 16px 0 4px 0;",
            div {
                style: "display: flex; height: 14px; border-radius: 7px; overflow: hidden;",
                div { style: "flex: 1; background: #4caf50;" }
                div { style: "flex: 1; background: #ffeb3b;" }
                div { style: "flex: 1; background: #f44336;" }
            }
            div { class: "cost-pointer", style: "{pointer_style}", "▼" }
            div {
                style: "display: flex; justify-content: space-between; font-size: 11px; color: #555; margin-top: 4px;",
                span { "ตามเกณฑ์" }
                span { "ต่ำกว่าเกณฑ์" }
                span { "ต่ำกว่าเกณฑ์มาก" }
            }
        }
    }
}
