//! Month heat-map of daily yield-reduction risk.

use dioxus::prelude::*;
use rwb_core::calendar::{CalendarCell, MonthCalendar, WEEKDAY_LABELS};

use crate::state::AppState;

fn box_class(cell: &CalendarCell) -> String {
    if cell.has_data {
        format!("calendar-cell-box {}", cell.risk_tier.css_class())
    } else {
        "calendar-cell-box no-data".to_string()
    }
}

#[component]
pub fn YieldCalendar() -> Element {
    let state = use_context::<AppState>();
    let loading = (state.yield_loading)();
    let calendar = state.yield_calendar.read().clone();

    rsx! {
        div {
            class: "yield-calendar",
            style: "position: relative;",
            match calendar {
                Some(calendar) => rsx! { CalendarGrid { calendar } },
                None => rsx! {
                    p { style: "color: #888; font-size: 12px;", "ยังไม่มีข้อมูลปฏิทิน" }
                },
            }
            if loading {
                div {
                    class: "loading-overlay",
                    style: "position: absolute; inset: 0; background: rgba(255,255,255,0.7);",
                }
            }
        }
    }
}

#[component]
fn CalendarGrid(calendar: MonthCalendar) -> Element {
    rsx! {
        h4 { id: "yield-calendar-title", style: "margin: 0 0 6px 0;", "{calendar.title}" }
        div {
            id: "yield-calendar-grid",
            style: "display: grid; grid-template-columns: auto repeat(7, 1fr); gap: 2px; font-size: 11px;",
            div {}
            for name in WEEKDAY_LABELS {
                div { class: "calendar-day-header", "{name}" }
            }
            for (week_index, week) in calendar.weeks.iter().enumerate() {
                div { class: "calendar-week-label", {MonthCalendar::week_label(week_index)} }
                for cell in week.iter() {
                    div {
                        class: "calendar-cell",
                        div {
                            class: box_class(cell),
                            title: "{cell.description}",
                            if let Some(day) = cell.day_number { "{day}" }
                        }
                    }
                }
            }
        }
    }
}
