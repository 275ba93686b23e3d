//! Backend endpoints, their queries and the `DashboardApi` seam.
//!
//! All endpoints are `GET` with query parameters and answer JSON. The
//! `api` feature provides `HttpDashboardApi`, a reqwest client that works
//! natively and (through the browser's fetch) on wasm32.

use serde::Serialize;

use crate::area::{AreaSelection, SubdistrictTree};
use crate::calendar::DailyRiskPayload;
use crate::dekad::DekadRecordPayload;
use crate::error::Result;
use crate::payload::{PlantingScenarioPayload, RainForecastPayload};

#[cfg(feature = "api")]
use crate::error::ApiError;
#[cfg(feature = "api")]
use crate::payload::decode;
#[cfg(feature = "api")]
use log::{debug, warn};

/// The five backend endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    RainForecast,
    PlantingScenario,
    CropCalendar,
    YieldReduction,
    Subdistricts,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::RainForecast => "/api/rain_forecast",
            Endpoint::PlantingScenario => "/api/planting_scenario",
            Endpoint::CropCalendar => "/api/crop_calendar",
            Endpoint::YieldReduction => "/api/yield_reduction",
            Endpoint::Subdistricts => "/api/subdistricts",
        }
    }
}

/// Parameters every area-scoped endpoint takes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaQuery {
    pub area_code: String,
    pub rice_variety: String,
    pub planting_method: String,
}

impl From<&AreaSelection> for AreaQuery {
    fn from(selection: &AreaSelection) -> Self {
        AreaQuery {
            area_code: selection.area_code.clone(),
            rice_variety: selection.rice_variety.clone(),
            planting_method: selection.planting_method.clone(),
        }
    }
}

/// `/api/rain_forecast` query; `date` is DD-MM-YYYY.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RainForecastQuery {
    #[serde(flatten)]
    pub area: AreaQuery,
    pub date: String,
}

/// `/api/planting_scenario` query; `date` (DD-MM-YYYY) is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioQuery {
    #[serde(flatten)]
    pub area: AreaQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// `/api/yield_reduction` query; `month_year` (MM-YYYY) is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YieldReductionQuery {
    #[serde(flatten)]
    pub area: AreaQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_year: Option<String>,
}

/// `/api/subdistricts` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubdistrictQuery {
    pub province_name: String,
}

/// The backend as the dashboard sees it.
///
/// Futures are not required to be `Send`: the dashboard runs on a single
/// event-loop thread.
#[allow(async_fn_in_trait)]
pub trait DashboardApi {
    async fn rain_forecast(&self, query: &RainForecastQuery) -> Result<RainForecastPayload>;

    async fn planting_scenario(&self, query: &ScenarioQuery) -> Result<PlantingScenarioPayload>;

    async fn crop_calendar(&self, query: &AreaQuery) -> Result<Vec<DekadRecordPayload>>;

    async fn yield_reduction(&self, query: &YieldReductionQuery) -> Result<Vec<DailyRiskPayload>>;

    async fn subdistricts(&self, query: &SubdistrictQuery) -> Result<SubdistrictTree>;
}

/// reqwest-backed client for the dashboard backend.
#[cfg(feature = "api")]
#[derive(Debug, Clone)]
pub struct HttpDashboardApi {
    client: reqwest::Client,
    base_url: String,
}

#[cfg(feature = "api")]
impl HttpDashboardApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        HttpDashboardApi {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    async fn get_json<T, Q>(&self, endpoint: Endpoint, query: &Q) -> Result<T>
    where
        T: for<'de> serde::Deserialize<'de>,
        Q: Serialize + ?Sized,
    {
        let path = endpoint.path();
        let url = self.url(endpoint);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| ApiError::HttpRequest {
                endpoint: path,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("GET {} - HTTP {}", path, status);
            return Err(ApiError::Status {
                endpoint: path,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| ApiError::HttpRequest {
                endpoint: path,
                source,
            })?;
        decode(path, &body)
    }
}

#[cfg(feature = "api")]
impl DashboardApi for HttpDashboardApi {
    async fn rain_forecast(&self, query: &RainForecastQuery) -> Result<RainForecastPayload> {
        self.get_json(Endpoint::RainForecast, query).await
    }

    async fn planting_scenario(&self, query: &ScenarioQuery) -> Result<PlantingScenarioPayload> {
        self.get_json(Endpoint::PlantingScenario, query).await
    }

    async fn crop_calendar(&self, query: &AreaQuery) -> Result<Vec<DekadRecordPayload>> {
        self.get_json(Endpoint::CropCalendar, query).await
    }

    async fn yield_reduction(&self, query: &YieldReductionQuery) -> Result<Vec<DailyRiskPayload>> {
        self.get_json(Endpoint::YieldReduction, query).await
    }

    async fn subdistricts(&self, query: &SubdistrictQuery) -> Result<SubdistrictTree> {
        self.get_json(Endpoint::Subdistricts, query).await
    }
}
