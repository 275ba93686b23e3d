//! One clickable cell per dekad, under the rain chart.

use dioxus::prelude::*;
use rwb_data::stage_bar::StageCell;
use rwb_session::SelectionEvent;

use super::area_selector::SelectionProps;
use crate::state::AppState;

fn cell_class(cell: &StageCell, active: Option<usize>) -> String {
    let mut classes = vec!["icon-cell"];
    if cell.is_planting {
        classes.push("planting");
    } else {
        classes.push("no-crop");
    }
    let tier = cell.tier.css_class();
    if !tier.is_empty() {
        classes.push(tier);
    }
    if active == Some(cell.dekad_index) {
        classes.push("active");
    }
    classes.join(" ")
}

#[component]
pub fn RiceStageBar(props: SelectionProps) -> Element {
    let state = use_context::<AppState>();
    let active = (state.active_dekad)();
    let cells: Vec<(usize, String, String, bool)> = state
        .stage_bar
        .read()
        .cells
        .iter()
        .map(|c| (c.dekad_index, cell_class(c, active), c.tooltip.clone(), c.is_planting))
        .collect();
    let columns = format!(
        "display: grid; grid-template-columns: repeat({}, 1fr); gap: 2px; padding-left: 48px; padding-right: 8px;",
        cells.len().max(1)
    );
    let on_select = props.on_select;

    rsx! {
        div {
            id: "riceStageBar",
            style: "{columns}",
            for (index, class, tooltip, planting) in cells {
                div {
                    key: "{index}",
                    class: "{class}",
                    title: "{tooltip}",
                    onclick: move |_| on_select.call(SelectionEvent::Dekad(index)),
                    if planting { "🌾" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rwb_core::risk::RiskTier;

    #[test]
    fn test_cell_class() {
        let cell = StageCell {
            dekad_index: 4,
            label: "ก.พ. 2".into(),
            tooltip: String::new(),
            is_planting: true,
            tier: RiskTier::High,
        };
        assert_eq!(cell_class(&cell, Some(4)), "icon-cell planting level-2 active");
        let idle = StageCell {
            is_planting: false,
            tier: RiskTier::None,
            ..cell
        };
        assert_eq!(cell_class(&idle, Some(1)), "icon-cell no-crop");
    }
}
