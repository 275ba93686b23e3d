use dioxus::prelude::*;
use rwb_core::area::SubdistrictOption;
use rwb_core::calendar::MonthCalendar;
use rwb_core::risk::PointerPosition;
use rwb_data::map::MapMarker;
use rwb_data::rain::RainChart;
use rwb_data::scenario::ScenarioView;
use rwb_data::stage_bar::StageBar;
use rwb_session::{DashboardView, ViewKind};

use crate::state::AppState;

/// Renders session output by setting `AppState` signals; the chart
/// components pick the changes up in their effects.
#[derive(Clone, Copy)]
pub struct SignalView {
    state: AppState,
}

impl SignalView {
    pub fn new(state: AppState) -> Self {
        SignalView { state }
    }
}

impl DashboardView for SignalView {
    fn set_loading(&self, view: ViewKind, loading: bool) {
        let mut flag = self.state.loading(view);
        flag.set(loading);
    }

    fn render_rain_chart(&self, chart: RainChart) {
        let mut rain = self.state.rain_chart;
        rain.set(Some(chart));
    }

    fn render_rain_fallback(&self) {
        let mut rain = self.state.rain_chart;
        rain.set(Some(RainChart::default()));
    }

    fn render_map_marker(&self, marker: MapMarker) {
        let mut map = self.state.map_marker;
        map.set(Some(marker));
    }

    fn render_planting_scenario(&self, scenario: ScenarioView) {
        let mut current = self.state.scenario;
        current.set(Some(scenario));
    }

    fn render_stage_bar(&self, bar: StageBar) {
        let mut stage_bar = self.state.stage_bar;
        let mut active = self.state.active_dekad;
        active.set(None);
        stage_bar.set(bar);
    }

    fn render_yield_calendar(&self, calendar: MonthCalendar) {
        let mut current = self.state.yield_calendar;
        current.set(Some(calendar));
    }

    fn move_risk_pointer(&self, position: PointerPosition) {
        let mut pointer = self.state.risk_pointer;
        pointer.set(Some(position));
    }

    fn set_active_dekad(&self, dekad_index: usize) {
        let mut active = self.state.active_dekad;
        active.set(Some(dekad_index));
    }

    fn render_district_options(&self, districts: &[String]) {
        let mut options = self.state.district_options;
        options.set(districts.to_vec());
    }

    fn render_subdistrict_options(&self, subdistricts: &[SubdistrictOption]) {
        let mut options = self.state.subdistrict_options;
        options.set(subdistricts.to_vec());
    }
}
