//! Province / district / sub-district dropdowns.

use dioxus::prelude::*;
use rwb_session::SelectionEvent;

use crate::state::AppState;

/// Props shared by every component that raises selection events.
#[derive(Props, Clone, PartialEq)]
pub struct SelectionProps {
    pub on_select: EventHandler<SelectionEvent>,
}

/// Cascading area dropdowns. Picking a level resets the levels below it;
/// option lists come from the session via AppState.
#[component]
pub fn AreaSelector(props: SelectionProps) -> Element {
    let mut state = use_context::<AppState>();
    let provinces = state.config.read().provinces.clone();
    let province = (state.selected_province)();
    let district = (state.selected_district)();
    let area_code = (state.selected_area_code)();
    let districts = state.district_options.read().clone();
    let subdistricts = state.subdistrict_options.read().clone();
    let on_select = props.on_select;

    let on_province = move |evt: Event<FormData>| {
        let value = evt.value();
        state.selected_province.set(value.clone());
        state.selected_district.set(String::new());
        state.selected_area_code.set(String::new());
        on_select.call(SelectionEvent::Province(value));
    };

    let on_district = move |evt: Event<FormData>| {
        let value = evt.value();
        state.selected_district.set(value.clone());
        state.selected_area_code.set(String::new());
        on_select.call(SelectionEvent::District(value));
    };

    let on_subdistrict = move |evt: Event<FormData>| {
        let value = evt.value();
        state.selected_area_code.set(value.clone());
        on_select.call(SelectionEvent::Subdistrict(value));
    };

    rsx! {
        div {
            class: "area-selector",
            style: "display: flex; gap: 12px; flex-wrap: wrap; margin: 8px 0;",
            label {
                style: "font-weight: bold;",
                "จังหวัด "
                select {
                    id: "provinceSelect",
                    onchange: on_province,
                    for name in provinces {
                        option {
                            value: "{name}",
                            selected: name == province,
                            "{name}"
                        }
                    }
                }
            }
            label {
                style: "font-weight: bold;",
                "อำเภอ "
                select {
                    id: "districtSelect",
                    onchange: on_district,
                    option { value: "", selected: district.is_empty(), "-- เลือกอำเภอ --" }
                    for name in districts {
                        option {
                            value: "{name}",
                            selected: name == district,
                            "{name}"
                        }
                    }
                }
            }
            label {
                style: "font-weight: bold;",
                "ตำบล "
                select {
                    id: "subdistrictSelect",
                    onchange: on_subdistrict,
                    option { value: "", selected: area_code.is_empty(), "-- เลือกตำบล --" }
                    for sub in subdistricts {
                        option {
                            value: "{sub.area_code}",
                            selected: sub.area_code == area_code,
                            "{sub.sub_district}"
                        }
                    }
                }
            }
        }
    }
}
