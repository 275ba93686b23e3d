//! Chart container component with loading state.

use dioxus::prelude::*;

/// Props for ChartContainer
#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// The DOM id for the chart container (D3 or Leaflet renders into this)
    pub id: String,
    /// Whether the view's data is being fetched
    #[props(default = false)]
    pub loading: bool,
    /// Minimum height in pixels
    #[props(default = 320)]
    pub min_height: u32,
}

/// A container div for charts with a loading overlay on top of the last render.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "min-height: {}px; position: relative; width: 100%;",
        props.min_height
    );
    let inner_style = format!("width: 100%; height: {}px;", props.min_height);

    rsx! {
        div {
            style: "{style}",
            div {
                id: "{props.id}",
                style: "{inner_style}",
            }
            if props.loading {
                div {
                    class: "loading-overlay",
                    style: "position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; background: rgba(255,255,255,0.7); color: #666;",
                    "กำลังโหลดข้อมูล..."
                }
            }
        }
    }
}
