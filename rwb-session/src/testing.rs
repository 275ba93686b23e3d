//! In-memory backend and a view that records what it is asked to draw.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use futures::channel::oneshot;
use rwb_core::api::{
    AreaQuery, DashboardApi, Endpoint, RainForecastQuery, ScenarioQuery, SubdistrictQuery,
    YieldReductionQuery,
};
use rwb_core::area::{SubdistrictOption, SubdistrictTree};
use rwb_core::calendar::{DailyRiskPayload, MonthCalendar};
use rwb_core::dekad::DekadRecordPayload;
use rwb_core::error::{ApiError, Result};
use rwb_core::payload::{PlantingScenarioPayload, RainForecastPayload};
use rwb_core::risk::PointerPosition;
use rwb_data::map::MapMarker;
use rwb_data::rain::RainChart;
use rwb_data::scenario::ScenarioView;
use rwb_data::stage_bar::StageBar;
use serde::Serialize;
use serde_json::{json, Value};

use crate::view::{DashboardView, ViewKind};

type Reply = std::result::Result<Value, u16>;

/// Scripted backend. Each endpoint answers from a queue of replies; the last
/// reply repeats once the queue is down to one. Calls can be held back with
/// a gate until the test releases them.
#[derive(Default)]
pub struct MockApi {
    replies: RefCell<HashMap<Endpoint, VecDeque<Reply>>>,
    gates: RefCell<HashMap<Endpoint, VecDeque<oneshot::Receiver<()>>>>,
    calls: RefCell<Vec<(Endpoint, Value)>>,
}

impl MockApi {
    pub fn reply(&self, endpoint: Endpoint, body: Value) -> &Self {
        self.replies
            .borrow_mut()
            .entry(endpoint)
            .or_default()
            .push_back(Ok(body));
        self
    }

    pub fn fail(&self, endpoint: Endpoint, status: u16) -> &Self {
        self.replies
            .borrow_mut()
            .entry(endpoint)
            .or_default()
            .push_back(Err(status));
        self
    }

    /// Hold the next call to `endpoint` until the returned sender fires.
    pub fn gate(&self, endpoint: Endpoint) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .borrow_mut()
            .entry(endpoint)
            .or_default()
            .push_back(rx);
        tx
    }

    pub fn calls(&self) -> Vec<(Endpoint, Value)> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, endpoint: Endpoint) -> Vec<Value> {
        self.calls
            .borrow()
            .iter()
            .filter(|(e, _)| *e == endpoint)
            .map(|(_, q)| q.clone())
            .collect()
    }

    fn next_reply(&self, endpoint: Endpoint) -> Reply {
        let mut replies = self.replies.borrow_mut();
        match replies.get_mut(&endpoint) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap_or(Err(404)),
            None => Err(404),
        }
    }

    async fn call<T, Q>(&self, endpoint: Endpoint, query: &Q) -> Result<T>
    where
        T: for<'de> serde::Deserialize<'de>,
        Q: Serialize,
    {
        self.calls
            .borrow_mut()
            .push((endpoint, serde_json::to_value(query).unwrap()));
        let reply = self.next_reply(endpoint);
        let gate = self
            .gates
            .borrow_mut()
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let path = endpoint.path();
        match reply {
            Ok(body) => serde_json::from_value(body)
                .map_err(|source| ApiError::Decode { endpoint: path, source }),
            Err(status) => Err(ApiError::Status { endpoint: path, status }),
        }
    }
}

impl DashboardApi for MockApi {
    async fn rain_forecast(&self, query: &RainForecastQuery) -> Result<RainForecastPayload> {
        self.call(Endpoint::RainForecast, query).await
    }

    async fn planting_scenario(&self, query: &ScenarioQuery) -> Result<PlantingScenarioPayload> {
        self.call(Endpoint::PlantingScenario, query).await
    }

    async fn crop_calendar(&self, query: &AreaQuery) -> Result<Vec<DekadRecordPayload>> {
        self.call(Endpoint::CropCalendar, query).await
    }

    async fn yield_reduction(&self, query: &YieldReductionQuery) -> Result<Vec<DailyRiskPayload>> {
        self.call(Endpoint::YieldReduction, query).await
    }

    async fn subdistricts(&self, query: &SubdistrictQuery) -> Result<SubdistrictTree> {
        self.call(Endpoint::Subdistricts, query).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Loading(ViewKind, bool),
    RainChart(RainChart),
    RainFallback,
    Marker(MapMarker),
    Scenario(ScenarioView),
    StageBar(StageBar),
    Calendar(MonthCalendar),
    Pointer(PointerPosition),
    ActiveDekad(usize),
    Districts(Vec<String>),
    Subdistricts(Vec<SubdistrictOption>),
}

#[derive(Default)]
pub struct RecordingView {
    events: RefCell<Vec<Rendered>>,
    loading: RefCell<HashMap<ViewKind, bool>>,
}

impl RecordingView {
    pub fn events(&self) -> Vec<Rendered> {
        self.events.borrow().clone()
    }

    pub fn is_loading(&self, view: ViewKind) -> bool {
        self.loading.borrow().get(&view).copied().unwrap_or(false)
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn scenarios(&self) -> Vec<ScenarioView> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Rendered::Scenario(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn pointers(&self) -> Vec<PointerPosition> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Rendered::Pointer(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Rendered) {
        self.events.borrow_mut().push(event);
    }
}

impl DashboardView for RecordingView {
    fn set_loading(&self, view: ViewKind, loading: bool) {
        self.loading.borrow_mut().insert(view, loading);
        self.push(Rendered::Loading(view, loading));
    }

    fn render_rain_chart(&self, chart: RainChart) {
        self.push(Rendered::RainChart(chart));
    }

    fn render_rain_fallback(&self) {
        self.push(Rendered::RainFallback);
    }

    fn render_map_marker(&self, marker: MapMarker) {
        self.push(Rendered::Marker(marker));
    }

    fn render_planting_scenario(&self, scenario: ScenarioView) {
        self.push(Rendered::Scenario(scenario));
    }

    fn render_stage_bar(&self, bar: StageBar) {
        self.push(Rendered::StageBar(bar));
    }

    fn render_yield_calendar(&self, calendar: MonthCalendar) {
        self.push(Rendered::Calendar(calendar));
    }

    fn move_risk_pointer(&self, position: PointerPosition) {
        self.push(Rendered::Pointer(position));
    }

    fn set_active_dekad(&self, dekad_index: usize) {
        self.push(Rendered::ActiveDekad(dekad_index));
    }

    fn render_district_options(&self, districts: &[String]) {
        self.push(Rendered::Districts(districts.to_vec()));
    }

    fn render_subdistrict_options(&self, options: &[SubdistrictOption]) {
        self.push(Rendered::Subdistricts(options.to_vec()));
    }
}

/// A full year of dekads; `planting` holds 1-based dekad numbers.
pub fn crop_calendar_body(planting: std::ops::RangeInclusive<usize>, level: u8) -> Value {
    let records: Vec<Value> = (1..=36)
        .map(|n| {
            let month = (n - 1) / 3 + 1;
            let start_day = [1, 11, 21][(n - 1) % 3];
            json!({
                "dekad": n,
                "date_start": format!("2025-{:02}-{:02}", month, start_day),
                "date_end": format!("2025-{:02}-{:02}", month, start_day + 9),
                "dekad_label": format!("D{}", n),
                "is_planting_period": planting.contains(&n),
                "yield_reduction_level": level,
                "yield_reduction_desc": ""
            })
        })
        .collect();
    Value::Array(records)
}

pub fn scenario_body(total_demand: f64) -> Value {
    json!({
        "total_demand": total_demand,
        "total_supply": 10.0,
        "date_start": "2025-06-01",
        "date_end": "2025-09-30",
        "water_balance_data": {
            "time_line": ["มิ.ย. 1", "มิ.ย. 2"],
            "demand": [5.0, 5.0],
            "supply": [2.0, 8.0]
        }
    })
}

pub fn rain_body() -> Value {
    json!({
        "lat": 7.61,
        "lon": 100.08,
        "current_dakad_label": "มิ.ย. 2",
        "rainfall_data": {
            "time_line": ["มิ.ย. 1", "มิ.ย. 2", "มิ.ย. 3"],
            "rainfall": [{ "precipitation": 10.0 }, { "precipitation": 20.0 }, { "precipitation": 5.0 }],
            "last_year_rainfall": [8.0, 12.0, 3.0],
            "avg_15yrs": [9.0, 15.0, 6.0]
        }
    })
}

pub fn yield_body(levels: &[u8]) -> Value {
    let days: Vec<Value> = levels
        .iter()
        .enumerate()
        .map(|(i, level)| {
            json!({
                "date": format!("2025-09-{:02}", i + 1),
                "yield_reduction_level": level,
                "yield_reduction_desc": ""
            })
        })
        .collect();
    Value::Array(days)
}

pub fn subdistricts_body() -> Value {
    json!({
        "พัทลุง": {
            "เมืองพัทลุง": [
                { "area_code": "930101", "sub_district": "คูหาสวรรค์" },
                { "area_code": "930606", "sub_district": "ท่ามิหรำ" }
            ],
            "ควนขนุน": [
                { "area_code": 930201, "sub_district": "ควนขนุน" }
            ]
        }
    })
}

/// Backend that answers every endpoint successfully.
pub fn healthy_api() -> MockApi {
    let api = MockApi::default();
    api.reply(Endpoint::RainForecast, rain_body())
        .reply(Endpoint::PlantingScenario, scenario_body(120.0))
        .reply(Endpoint::CropCalendar, crop_calendar_body(10..=18, 1))
        .reply(Endpoint::YieldReduction, yield_body(&[0, 0, 2, 2]))
        .reply(Endpoint::Subdistricts, subdistricts_body());
    api
}
