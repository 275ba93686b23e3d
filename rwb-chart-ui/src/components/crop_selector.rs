//! Rice variety and planting method dropdowns.

use dioxus::prelude::*;
use rwb_session::SelectionEvent;

use super::area_selector::SelectionProps;
use crate::state::AppState;

#[component]
pub fn CropSelector(props: SelectionProps) -> Element {
    let mut state = use_context::<AppState>();
    let varieties = state.config.read().rice_varieties.clone();
    let methods = state.config.read().planting_methods.clone();
    let current_variety = (state.rice_variety)();
    let current_method = (state.planting_method)();
    let on_select = props.on_select;

    let on_variety = move |evt: Event<FormData>| {
        let value = evt.value();
        state.rice_variety.set(value.clone());
        on_select.call(SelectionEvent::RiceVariety(value));
    };

    let on_method = move |evt: Event<FormData>| {
        let value = evt.value();
        state.planting_method.set(value.clone());
        on_select.call(SelectionEvent::PlantingMethod(value));
    };

    rsx! {
        div {
            class: "crop-selector",
            style: "display: flex; gap: 12px; flex-wrap: wrap; margin: 8px 0;",
            label {
                style: "font-weight: bold;",
                "พันธุ์ข้าว "
                select {
                    id: "riceVarietySelect",
                    onchange: on_variety,
                    for v in varieties {
                        option { value: "{v}", selected: v == current_variety, "{v}" }
                    }
                }
            }
            label {
                style: "font-weight: bold;",
                "วิธีการปลูก "
                select {
                    id: "plantingMethodSelect",
                    onchange: on_method,
                    for m in methods {
                        option { value: "{m}", selected: m == current_method, "{m}" }
                    }
                }
            }
        }
    }
}
