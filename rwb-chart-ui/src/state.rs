//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//! The session writes into it through [`crate::view::SignalView`].

use dioxus::prelude::*;
use rwb_core::area::SubdistrictOption;
use rwb_core::calendar::MonthCalendar;
use rwb_core::config::DashboardConfig;
use rwb_core::risk::PointerPosition;
use rwb_data::map::MapMarker;
use rwb_data::rain::RainChart;
use rwb_data::scenario::ScenarioView;
use rwb_data::stage_bar::StageBar;
use rwb_session::ViewKind;

/// Shared application state for the dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Settings the dashboard was started with
    pub config: Signal<DashboardConfig>,
    /// Error message if something went wrong at start-up
    pub error_msg: Signal<Option<String>>,

    pub rain_loading: Signal<bool>,
    pub scenario_loading: Signal<bool>,
    pub calendar_loading: Signal<bool>,
    pub yield_loading: Signal<bool>,

    /// Dropdown values as the user last picked them
    pub selected_province: Signal<String>,
    pub selected_district: Signal<String>,
    pub selected_area_code: Signal<String>,
    pub rice_variety: Signal<String>,
    pub planting_method: Signal<String>,

    pub district_options: Signal<Vec<String>>,
    pub subdistrict_options: Signal<Vec<SubdistrictOption>>,

    /// `Some(empty chart)` is the fallback; `None` until the first response
    pub rain_chart: Signal<Option<RainChart>>,
    pub map_marker: Signal<Option<MapMarker>>,
    pub scenario: Signal<Option<ScenarioView>>,
    pub stage_bar: Signal<StageBar>,
    /// The single highlighted stage-bar cell
    pub active_dekad: Signal<Option<usize>>,
    pub yield_calendar: Signal<Option<MonthCalendar>>,
    pub risk_pointer: Signal<Option<PointerPosition>>,
}

impl AppState {
    /// Create a new AppState seeded from the configuration.
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            selected_province: Signal::new(config.default_province.clone().unwrap_or_default()),
            rice_variety: Signal::new(config.default_rice_variety.clone()),
            planting_method: Signal::new(config.default_planting_method.clone()),
            config: Signal::new(config),
            error_msg: Signal::new(None),
            rain_loading: Signal::new(false),
            scenario_loading: Signal::new(false),
            calendar_loading: Signal::new(false),
            yield_loading: Signal::new(false),
            selected_district: Signal::new(String::new()),
            selected_area_code: Signal::new(String::new()),
            district_options: Signal::new(Vec::new()),
            subdistrict_options: Signal::new(Vec::new()),
            rain_chart: Signal::new(None),
            map_marker: Signal::new(None),
            scenario: Signal::new(None),
            stage_bar: Signal::new(StageBar::default()),
            active_dekad: Signal::new(None),
            yield_calendar: Signal::new(None),
            risk_pointer: Signal::new(None),
        }
    }

    /// Loading flag backing one data view.
    pub fn loading(&self, view: ViewKind) -> Signal<bool> {
        match view {
            ViewKind::RainForecast => self.rain_loading,
            ViewKind::PlantingScenario => self.scenario_loading,
            ViewKind::CropCalendar => self.calendar_loading,
            ViewKind::YieldReduction => self.yield_loading,
        }
    }
}
