//! Rice Water-Balance and Yield-Risk Dashboard
//!
//! Shows, for one sub-district and crop choice: the rain forecast against
//! last year and the 15-year average, the planting scenario's water demand,
//! supply and deficit, the crop calendar as a clickable stage bar, and a
//! month calendar of yield-reduction risk.
//!
//! Data flow:
//! 1. On mount: load the configuration and select the default province,
//!    which fills the district dropdown.
//! 2. Every dropdown change or stage-bar click becomes a `SelectionEvent`
//!    dispatched to the `DashboardController` on a spawned task.
//! 3. The controller fetches from the backend and renders into AppState
//!    through `SignalView`; chart components redraw via D3.js and Leaflet.

mod settings;

use std::rc::Rc;

use dioxus::prelude::*;
use rwb_chart_ui::components::{
    AreaMap, AreaSelector, CropSelector, ErrorDisplay, KpiCards, RainForecastChart, RiceStageBar,
    RiskGauge, ScenarioCharts, YieldCalendar,
};
use rwb_chart_ui::js_bridge;
use rwb_chart_ui::state::AppState;
use rwb_chart_ui::view::SignalView;
use rwb_core::api::HttpDashboardApi;
use rwb_session::{DashboardController, SelectionEvent};

type Controller = DashboardController<HttpDashboardApi, SignalView>;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("rice-water-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let (config, config_problem) = use_hook(settings::load_config);
    let mut state = use_context_provider(|| AppState::new(config.clone()));
    let controller: Rc<Controller> = use_hook(|| {
        let api = HttpDashboardApi::new(config.base_url());
        Rc::new(DashboardController::new(api, SignalView::new(state), &config))
    });

    let dispatch = use_callback(move |event: SelectionEvent| {
        let controller = controller.clone();
        spawn(async move {
            controller.dispatch(event).await;
        });
    });

    // ─── On mount: chart scripts and the default province ───
    use_effect(move || {
        js_bridge::init_charts();
        state.error_msg.set(config_problem.clone());
        if let Some(province) = state.config.peek().default_province.clone() {
            dispatch.call(SelectionEvent::Province(province));
        }
    });

    rsx! {
        div {
            style: "max-width: 1200px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay {
                    message: err.clone(),
                    on_dismiss: move |_| state.error_msg.set(None),
                }
            }

            div {
                class: "filters",
                AreaSelector { on_select: dispatch }
                CropSelector { on_select: dispatch }
            }

            KpiCards {}

            div {
                style: "display: flex; gap: 16px; flex-wrap: wrap;",
                div {
                    style: "flex: 2; min-width: 480px;",
                    RainForecastChart {}
                    RiceStageBar { on_select: dispatch }
                }
                div {
                    style: "flex: 1; min-width: 280px;",
                    AreaMap {}
                }
            }

            ScenarioCharts {}

            div {
                style: "display: flex; gap: 16px; flex-wrap: wrap; margin-top: 12px;",
                div {
                    style: "flex: 1; min-width: 320px;",
                    h3 { style: "margin: 0 0 4px 0; font-size: 16px;", "ระดับผลผลิตลดลง" }
                    YieldCalendar {}
                }
                div {
                    style: "flex: 1; min-width: 280px;",
                    h3 { style: "margin: 0 0 4px 0; font-size: 16px;", "ต้นทุนการผลิต" }
                    RiskGauge {}
                }
            }
        }
    }
}
