//! Leaflet map of the selected area.

use dioxus::prelude::*;
use rwb_data::map::MapMarker;

use crate::js_bridge;
use crate::state::AppState;

pub const MAP_ID: &str = "map";

#[component]
pub fn AreaMap() -> Element {
    let state = use_context::<AppState>();

    // Create the map once, centred on the configured default.
    use_effect(move || {
        let initial = MapMarker::initial(&state.config.peek().map);
        js_bridge::init_map(MAP_ID, &initial);
    });

    use_effect(move || {
        if let Some(marker) = state.map_marker.read().as_ref() {
            js_bridge::show_area_marker(MAP_ID, marker);
        }
    });

    rsx! {
        div {
            id: MAP_ID,
            style: "width: 100%; height: 320px; border-radius: 6px;",
        }
    }
}
