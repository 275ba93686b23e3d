//! Fetch-and-render for the four data views.
//!
//! Each refresh turns its view's loading indicator on, fetches, normalizes
//! and renders. Failures are logged and leave the view as it was, except the
//! rain chart which falls back to an empty chart. A response that a newer
//! request for the same view has superseded is dropped without rendering.

use std::cell::RefCell;

use futures::join;
use log::{debug, error, info, warn};
use rwb_core::api::{AreaQuery, DashboardApi, RainForecastQuery, ScenarioQuery, YieldReductionQuery};
use rwb_core::calendar::{normalize_daily_risks, DekadCalendarBuilder};
use rwb_core::config::{DashboardConfig, MapConfig};
use rwb_core::dekad::{normalize_crop_calendar, DekadRecord};
use rwb_core::risk::{average_level, pointer_position};
use rwb_data::map::MapMarker;
use rwb_data::rain::RainChart;
use rwb_data::scenario::ScenarioView;
use rwb_data::stage_bar::StageBar;

use crate::tokens::{LoadingGuard, RequestTokens};
use crate::view::{DashboardView, ViewKind};

pub struct ViewRefreshOrchestrator<A, V> {
    api: A,
    view: V,
    tokens: RequestTokens,
    rain_forecast_date: String,
    map: MapConfig,
    /// Crop calendar as last rendered in the stage bar
    rendered_dekads: RefCell<Vec<DekadRecord>>,
}

impl<A: DashboardApi, V: DashboardView> ViewRefreshOrchestrator<A, V> {
    pub fn new(api: A, view: V, config: &DashboardConfig) -> Self {
        ViewRefreshOrchestrator {
            api,
            view,
            tokens: RequestTokens::default(),
            rain_forecast_date: config.rain_forecast_date.clone(),
            map: config.map.clone(),
            rendered_dekads: RefCell::new(Vec::new()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Refresh all four views concurrently.
    pub async fn refresh_all(&self, area: AreaQuery) {
        info!("Refreshing dashboard for area {}", area.area_code);
        join!(
            self.refresh_rain_forecast(area.clone()),
            self.refresh_planting_scenario(area.clone(), None),
            self.refresh_crop_calendar(area.clone()),
            self.refresh_yield_reduction(area, None),
        );
    }

    pub async fn refresh_rain_forecast(&self, area: AreaQuery) {
        let guard = LoadingGuard::begin(&self.view, ViewKind::RainForecast, &self.tokens);
        let query = RainForecastQuery {
            area,
            date: self.rain_forecast_date.clone(),
        };
        let result = self.api.rain_forecast(&query).await;
        if !guard.is_current() {
            warn!("rain_forecast: discarding superseded response");
            return;
        }

        let forecast = match result {
            Ok(payload) => payload.normalize(),
            Err(e) => {
                error!("Failed to load rain forecast: {}", e);
                self.view.render_rain_fallback();
                return;
            }
        };

        if let Some(point) = forecast.location {
            self.view.render_map_marker(MapMarker::at(point, &self.map));
        }
        match forecast.rainfall_series() {
            Ok(series) => {
                let chart = RainChart::from_series(series, forecast.current_dekad_label.as_deref());
                info!("Rain forecast: {} dekads", chart.bars.len());
                self.view.render_rain_chart(chart);
            }
            Err(e) => {
                warn!("{}, showing empty chart", e);
                self.view.render_rain_fallback();
            }
        }
    }

    pub async fn refresh_planting_scenario(&self, area: AreaQuery, date: Option<String>) {
        let guard = LoadingGuard::begin(&self.view, ViewKind::PlantingScenario, &self.tokens);
        let query = ScenarioQuery { area, date };
        let result = self.api.planting_scenario(&query).await;
        if !guard.is_current() {
            warn!("planting_scenario: discarding superseded response");
            return;
        }

        match result {
            Ok(payload) => {
                let scenario = ScenarioView::from_scenario(payload.normalize());
                info!(
                    "Planting scenario: demand {}, supply {}",
                    scenario.summary.total_demand, scenario.summary.total_supply
                );
                self.view.render_planting_scenario(scenario);
            }
            Err(e) => error!("Failed to load planting scenario: {}", e),
        }
    }

    pub async fn refresh_crop_calendar(&self, area: AreaQuery) {
        let guard = LoadingGuard::begin(&self.view, ViewKind::CropCalendar, &self.tokens);
        let result = self.api.crop_calendar(&area).await;
        if !guard.is_current() {
            warn!("crop_calendar: discarding superseded response");
            return;
        }

        let records = match result {
            Ok(payload) => normalize_crop_calendar(payload),
            Err(e) => {
                error!("Failed to load crop calendar: {}", e);
                return;
            }
        };

        let bar = StageBar::from_records(&records);
        let initial = bar.initial_active();
        info!(
            "Crop calendar: {} dekads, {} planting",
            bar.cells.len(),
            bar.planting_count()
        );
        self.view.render_stage_bar(bar);
        if let Some(index) = initial {
            self.view.set_active_dekad(index);
        }
        if !records.is_empty() {
            self.view
                .move_risk_pointer(pointer_position(average_level(&records)));
        }
        *self.rendered_dekads.borrow_mut() = records;
    }

    pub async fn refresh_yield_reduction(&self, area: AreaQuery, month_year: Option<String>) {
        let guard = LoadingGuard::begin(&self.view, ViewKind::YieldReduction, &self.tokens);
        let query = YieldReductionQuery { area, month_year };
        let result = self.api.yield_reduction(&query).await;
        if !guard.is_current() {
            warn!("yield_reduction: discarding superseded response");
            return;
        }

        let days = match result {
            Ok(payload) => normalize_daily_risks(payload),
            Err(e) => {
                error!("Failed to load yield reduction: {}", e);
                return;
            }
        };

        if let Some(calendar) = DekadCalendarBuilder::build(&days) {
            debug!("Yield calendar: {}", calendar.title);
            self.view.render_yield_calendar(calendar);
        }
        if !days.is_empty() {
            self.view
                .move_risk_pointer(pointer_position(average_level(&days)));
        }
    }

    /// Highlight a rendered dekad and point the gauge at its level alone.
    ///
    /// Returns the record, or `None` when no such dekad is on screen.
    pub fn select_dekad(&self, dekad_index: usize) -> Option<DekadRecord> {
        let record = self.rendered_dekads.borrow().get(dekad_index).cloned();
        let Some(record) = record else {
            warn!("Dekad {} is not in the rendered crop calendar", dekad_index);
            return None;
        };
        self.view.set_active_dekad(dekad_index);
        self.view
            .move_risk_pointer(pointer_position(average_level(std::slice::from_ref(&record))));
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{healthy_api, scenario_body, MockApi, RecordingView, Rendered};
    use rwb_core::api::Endpoint;
    use rwb_core::risk::PointerPosition;
    use rwb_data::rain::BarKind;

    fn area() -> AreaQuery {
        AreaQuery {
            area_code: "930606".to_string(),
            rice_variety: "ข้าวกลาง".to_string(),
            planting_method: "หว่านน้ำตม".to_string(),
        }
    }

    fn orchestrator(api: MockApi) -> ViewRefreshOrchestrator<MockApi, RecordingView> {
        ViewRefreshOrchestrator::new(api, RecordingView::default(), &DashboardConfig::default())
    }

    #[tokio::test]
    async fn test_refresh_all_renders_every_view() {
        let o = orchestrator(healthy_api());
        o.refresh_all(area()).await;

        assert_eq!(o.api().calls().len(), 4);
        let rain = &o.api().calls_to(Endpoint::RainForecast)[0];
        assert_eq!(rain["date"], "01-06-2025");
        assert_eq!(rain["area_code"], "930606");
        assert!(o.api().calls_to(Endpoint::PlantingScenario)[0].get("date").is_none());

        let events = o.view().events();
        let chart = events.iter().find_map(|e| match e {
            Rendered::RainChart(c) => Some(c.clone()),
            _ => None,
        });
        let chart = chart.unwrap();
        assert_eq!(chart.bars[0].kind, BarKind::Observed);
        assert_eq!(chart.bars[1].kind, BarKind::Current);
        assert!(events.iter().any(|e| matches!(e, Rendered::Marker(m) if m.zoom == 11)));
        assert!(events.iter().any(|e| matches!(e, Rendered::StageBar(b) if b.planting_count() == 9)));
        assert!(events.contains(&Rendered::ActiveDekad(9)));
        assert!(events.iter().any(|e| matches!(e, Rendered::Calendar(c) if c.month == 9)));
        assert_eq!(o.view().scenarios()[0].deficit, vec![3.0, 0.0]);
        for kind in ViewKind::ALL {
            assert!(!o.view().is_loading(kind));
        }
    }

    #[tokio::test]
    async fn test_pointer_follows_average_level() {
        let o = orchestrator(healthy_api());
        o.refresh_crop_calendar(area()).await;
        o.refresh_yield_reduction(area(), None).await;
        // Every dekad is level 1; the days average (0 + 0 + 2 + 2) / 4 = 1.
        assert_eq!(o.view().pointers(), vec![PointerPosition::Medium, PointerPosition::Medium]);
    }

    #[tokio::test]
    async fn test_empty_responses_leave_pointer_alone() {
        let api = MockApi::default();
        api.reply(Endpoint::CropCalendar, serde_json::json!([]))
            .reply(Endpoint::YieldReduction, serde_json::json!([]));
        let o = orchestrator(api);
        o.refresh_crop_calendar(area()).await;
        o.refresh_yield_reduction(area(), None).await;

        let events = o.view().events();
        assert!(o.view().pointers().is_empty());
        assert!(!events.iter().any(|e| matches!(e, Rendered::Calendar(_))));
        assert!(!events.iter().any(|e| matches!(e, Rendered::ActiveDekad(_))));
    }

    #[tokio::test]
    async fn test_failures_still_clear_loading() {
        let api = MockApi::default();
        api.fail(Endpoint::RainForecast, 500)
            .fail(Endpoint::PlantingScenario, 502)
            .fail(Endpoint::CropCalendar, 404)
            .reply(Endpoint::YieldReduction, serde_json::json!({ "not": "a list" }));
        let o = orchestrator(api);
        o.refresh_all(area()).await;

        let events = o.view().events();
        assert!(events.contains(&Rendered::RainFallback));
        assert!(o.view().scenarios().is_empty());
        assert!(!events.iter().any(|e| matches!(e, Rendered::StageBar(_))));
        for kind in ViewKind::ALL {
            assert!(!o.view().is_loading(kind), "{} still loading", kind.name());
        }
    }

    #[tokio::test]
    async fn test_missing_rainfall_shows_fallback_but_places_marker() {
        let api = MockApi::default();
        api.reply(Endpoint::RainForecast, serde_json::json!({ "lat": 7.5, "lon": 100.0 }));
        let o = orchestrator(api);
        o.refresh_rain_forecast(area()).await;

        let events = o.view().events();
        assert!(events.contains(&Rendered::RainFallback));
        assert!(events.iter().any(|e| matches!(e, Rendered::Marker(m) if m.lat == 7.5)));
    }

    #[tokio::test]
    async fn test_null_arrays_still_render() {
        let api = MockApi::default();
        api.reply(
            Endpoint::RainForecast,
            serde_json::json!({
                "lat": 7.5,
                "lon": 100.0,
                "rainfall_data": { "time_line": ["มิ.ย. 1", "มิ.ย. 2"], "rainfall": null }
            }),
        )
        .reply(
            Endpoint::PlantingScenario,
            serde_json::json!({
                "total_demand": 40,
                "total_supply": 10,
                "water_balance_data": { "time_line": ["มิ.ย. 1", "มิ.ย. 2"], "demand": null, "supply": [1, 2] }
            }),
        );
        let o = orchestrator(api);
        o.refresh_rain_forecast(area()).await;
        o.refresh_planting_scenario(area(), None).await;

        let events = o.view().events();
        assert!(events.iter().any(|e| matches!(e, Rendered::Marker(m) if m.lat == 7.5)));
        assert!(events
            .iter()
            .any(|e| matches!(e, Rendered::RainChart(c) if c.bars.iter().all(|b| b.precipitation == 0.0) && c.bars.len() == 2)));
        assert!(!events.contains(&Rendered::RainFallback));

        let scenarios = o.view().scenarios();
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].summary.total_demand, 40.0);
        assert_eq!(scenarios[0].water_compare.demand, vec![0.0, 0.0]);
        assert_eq!(scenarios[0].deficit, vec![0.0, 0.0]);
    }

    #[tokio::test]
    async fn test_slow_loading_view_does_not_hold_others() {
        let o = orchestrator(healthy_api());
        let release = o.api().gate(Endpoint::CropCalendar);

        join!(o.refresh_all(area()), async {
            assert!(o.view().is_loading(ViewKind::CropCalendar));
            assert!(!o.view().is_loading(ViewKind::RainForecast));
            assert!(!o.view().is_loading(ViewKind::PlantingScenario));
            assert!(!o.view().is_loading(ViewKind::YieldReduction));
            release.send(()).unwrap();
        });

        assert!(!o.view().is_loading(ViewKind::CropCalendar));
    }

    #[tokio::test]
    async fn test_superseded_response_is_discarded() {
        let api = MockApi::default();
        api.reply(Endpoint::PlantingScenario, scenario_body(100.0))
            .reply(Endpoint::PlantingScenario, scenario_body(200.0));
        let o = orchestrator(api);
        let first = o.api().gate(Endpoint::PlantingScenario);
        let second = o.api().gate(Endpoint::PlantingScenario);

        join!(
            o.refresh_planting_scenario(area(), None),
            o.refresh_planting_scenario(area(), Some("11-09-2025".to_string())),
            async {
                second.send(()).unwrap();
                tokio::task::yield_now().await;
                first.send(()).unwrap();
            }
        );

        let scenarios = o.view().scenarios();
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].summary.total_demand, 200.0);
        assert!(!o.view().is_loading(ViewKind::PlantingScenario));
        let offs = o
            .view()
            .events()
            .into_iter()
            .filter(|e| *e == Rendered::Loading(ViewKind::PlantingScenario, false))
            .count();
        assert_eq!(offs, 1);
    }

    #[tokio::test]
    async fn test_select_dekad_uses_single_record() {
        let o = orchestrator(healthy_api());
        assert!(o.select_dekad(3).is_none());

        o.refresh_crop_calendar(area()).await;
        o.view().clear();
        let record = o.select_dekad(12).unwrap();
        assert_eq!(record.date_start, "2025-05-01");
        assert_eq!(
            o.view().events(),
            vec![Rendered::ActiveDekad(12), Rendered::Pointer(PointerPosition::Medium)]
        );
    }
}
