use rwb_core::area::SubdistrictOption;
use rwb_core::calendar::MonthCalendar;
use rwb_core::risk::PointerPosition;
use rwb_data::map::MapMarker;
use rwb_data::rain::RainChart;
use rwb_data::scenario::ScenarioView;
use rwb_data::stage_bar::StageBar;

/// The four independently refreshed data views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    RainForecast,
    PlantingScenario,
    CropCalendar,
    YieldReduction,
}

impl ViewKind {
    pub const ALL: [ViewKind; 4] = [
        ViewKind::RainForecast,
        ViewKind::PlantingScenario,
        ViewKind::CropCalendar,
        ViewKind::YieldReduction,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ViewKind::RainForecast => "rain_forecast",
            ViewKind::PlantingScenario => "planting_scenario",
            ViewKind::CropCalendar => "crop_calendar",
            ViewKind::YieldReduction => "yield_reduction",
        }
    }
}

/// Where the session renders to.
///
/// Methods take `&self`; implementations hold their own interior state
/// (Dioxus signals in the app, a log of calls in tests).
pub trait DashboardView {
    fn set_loading(&self, view: ViewKind, loading: bool);

    fn render_rain_chart(&self, chart: RainChart);

    /// Empty rain chart shown when the forecast cannot be drawn.
    fn render_rain_fallback(&self);

    fn render_map_marker(&self, marker: MapMarker);

    fn render_planting_scenario(&self, scenario: ScenarioView);

    fn render_stage_bar(&self, bar: StageBar);

    fn render_yield_calendar(&self, calendar: MonthCalendar);

    fn move_risk_pointer(&self, position: PointerPosition);

    /// Make `dekad_index` the single highlighted stage-bar cell.
    fn set_active_dekad(&self, dekad_index: usize);

    fn render_district_options(&self, districts: &[String]);

    fn render_subdistrict_options(&self, options: &[SubdistrictOption]);
}
