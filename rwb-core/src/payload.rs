//! Raw backend payloads and their normalization into canonical shapes.
//!
//! The backend is loosely typed: numbers sometimes arrive as strings, labels
//! as objects, and the current-dekad label under two spellings at two depths.
//! Everything here decodes leniently and is normalized once, so rendering
//! code only ever sees one shape.

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};

use crate::api::Endpoint;
use crate::error::{ApiError, Result};

/// A JSON scalar of unknown type.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Loose {
    Bool(bool),
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Loose {
    /// Finite number, accepting numeric strings.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Loose::Number(n) if n.is_finite() => Some(*n),
            Loose::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Level 0..=255 when the value is a whole number.
    pub fn as_level(&self) -> Option<u8> {
        self.as_number()
            .filter(|n| n.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(n))
            .map(|n| n as u8)
    }

    /// Text form; whole numbers print without a fraction.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Loose::Text(s) => Some(s.clone()),
            Loose::Number(n) if n.fract() == 0.0 && n.is_finite() => Some(format!("{}", *n as i64)),
            Loose::Number(n) => Some(n.to_string()),
            Loose::Bool(b) => Some(b.to_string()),
            Loose::Other(_) => None,
        }
    }

    /// JavaScript-style truthiness.
    pub fn truthy(&self) -> bool {
        match self {
            Loose::Bool(b) => *b,
            Loose::Number(n) => *n != 0.0 && !n.is_nan(),
            Loose::Text(s) => !s.is_empty(),
            Loose::Other(v) => !v.is_null(),
        }
    }
}

fn number_or_zero(value: Option<&Loose>) -> f64 {
    value.and_then(Loose::as_number).unwrap_or(0.0)
}

/// Deserialize a string field that the backend sometimes sends as a number.
pub fn loose_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Loose>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_text()).unwrap_or_default())
}

/// Deserialize a field whose explicit `null` means the same as a missing key.
pub fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A timeline entry: a bare label, or an object carrying one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TimelineLabel {
    Text(String),
    Object {
        #[serde(default)]
        dekad_label: Option<String>,
        #[serde(default)]
        label: Option<String>,
    },
    Other(serde_json::Value),
}

impl TimelineLabel {
    pub fn into_label(self) -> String {
        match self {
            TimelineLabel::Text(s) => s,
            TimelineLabel::Object { dekad_label, label } => dekad_label
                .filter(|s| !s.is_empty())
                .or(label.filter(|s| !s.is_empty()))
                .unwrap_or_default(),
            TimelineLabel::Other(_) => String::new(),
        }
    }
}

fn labels(time_line: Vec<TimelineLabel>) -> Vec<String> {
    time_line.into_iter().map(TimelineLabel::into_label).collect()
}

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Raw `/api/rain_forecast` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RainForecastPayload {
    #[serde(default)]
    pub lat: Option<Loose>,
    #[serde(default)]
    pub lon: Option<Loose>,
    #[serde(default)]
    pub current_dakad_label: Option<Loose>,
    #[serde(default)]
    pub current_dekad_label: Option<Loose>,
    #[serde(default)]
    pub rainfall_data: Option<RainfallPayload>,
}

/// Raw `rainfall_data` block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RainfallPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_line: Vec<TimelineLabel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rainfall: Vec<RainfallEntry>,
    #[serde(default)]
    pub last_year_rainfall: Option<Vec<Loose>>,
    #[serde(default)]
    pub avg_15yrs: Option<Vec<Loose>>,
    #[serde(default)]
    pub current_dakad_label: Option<Loose>,
    #[serde(default)]
    pub current_dekad_label: Option<Loose>,
}

/// One `rainfall[i]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RainfallEntry {
    Reading {
        #[serde(default)]
        precipitation: Option<Loose>,
    },
    Other(serde_json::Value),
}

impl RainfallEntry {
    fn precipitation(&self) -> f64 {
        match self {
            RainfallEntry::Reading { precipitation } => number_or_zero(precipitation.as_ref()),
            RainfallEntry::Other(_) => 0.0,
        }
    }
}

/// Rainfall series aligned to the timeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RainfallSeries {
    pub time_line: Vec<String>,
    pub precipitation: Vec<f64>,
    /// `None` marks a gap the chart must skip.
    pub last_year: Vec<Option<f64>>,
    pub avg_15yrs: Vec<Option<f64>>,
}

/// Canonical rain forecast.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RainForecast {
    pub location: Option<GeoPoint>,
    pub current_dekad_label: Option<String>,
    /// `None` when the payload had no usable rainfall block.
    pub rainfall: Option<RainfallSeries>,
}

/// Align a comparison series to `n` entries. A missing array becomes zeros;
/// entries past its end are zero; explicit non-numeric entries are gaps.
fn comparison_series(values: Option<Vec<Loose>>, n: usize) -> Vec<Option<f64>> {
    let Some(values) = values else {
        return vec![Some(0.0); n];
    };
    (0..n)
        .map(|i| match values.get(i) {
            Some(v) => v.as_number(),
            None => Some(0.0),
        })
        .collect()
}

fn first_label(candidates: [Option<&Loose>; 4]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .filter_map(Loose::as_text)
        .find(|s| !s.is_empty())
}

impl RainForecast {
    /// The rainfall series, or `MissingField` when the payload had none.
    pub fn rainfall_series(&self) -> Result<&RainfallSeries> {
        self.rainfall.as_ref().ok_or(ApiError::MissingField {
            endpoint: Endpoint::RainForecast.path(),
            field: "rainfall_data",
        })
    }
}

impl RainForecastPayload {
    pub fn normalize(self) -> RainForecast {
        let location = match (
            self.lat.as_ref().and_then(Loose::as_number),
            self.lon.as_ref().and_then(Loose::as_number),
        ) {
            (Some(lat), Some(lon)) => Some(GeoPoint { lat, lon }),
            _ => {
                warn!("rain_forecast: lat/lon missing or not numeric: {:?} {:?}", self.lat, self.lon);
                None
            }
        };

        let rf = self.rainfall_data.as_ref();
        let current_dekad_label = first_label([
            self.current_dakad_label.as_ref(),
            self.current_dekad_label.as_ref(),
            rf.and_then(|r| r.current_dakad_label.as_ref()),
            rf.and_then(|r| r.current_dekad_label.as_ref()),
        ]);
        if current_dekad_label.is_none() {
            warn!("rain_forecast: no current dekad label under any known field name");
        }

        let rainfall = self.rainfall_data.and_then(|rf| {
            let time_line = labels(rf.time_line);
            if time_line.is_empty() {
                warn!("rain_forecast: rainfall_data.time_line is empty");
                return None;
            }
            let n = time_line.len();
            let precipitation = (0..n)
                .map(|i| rf.rainfall.get(i).map(RainfallEntry::precipitation).unwrap_or(0.0))
                .collect();
            Some(RainfallSeries {
                time_line,
                precipitation,
                last_year: comparison_series(rf.last_year_rainfall, n),
                avg_15yrs: comparison_series(rf.avg_15yrs, n),
            })
        });

        RainForecast {
            location,
            current_dekad_label,
            rainfall,
        }
    }
}

/// Raw `/api/planting_scenario` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlantingScenarioPayload {
    #[serde(default)]
    pub total_demand: Option<Loose>,
    #[serde(default)]
    pub total_supply: Option<Loose>,
    #[serde(default)]
    pub total_water_balance: Option<Loose>,
    #[serde(default)]
    pub date_start: Option<String>,
    #[serde(default)]
    pub date_end: Option<String>,
    #[serde(default)]
    pub water_balance_data: Option<WaterBalancePayload>,
}

/// Raw `water_balance_data` block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaterBalancePayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_line: Vec<TimelineLabel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub demand: Vec<Loose>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub supply: Vec<Loose>,
}

/// Canonical planting scenario; per-dekad values are not yet aligned.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlantingScenario {
    pub total_demand: f64,
    pub total_supply: f64,
    pub total_water_balance: f64,
    pub date_start: Option<String>,
    pub date_end: Option<String>,
    pub time_line: Vec<String>,
    pub demand: Vec<f64>,
    pub supply: Vec<f64>,
}

impl PlantingScenarioPayload {
    pub fn normalize(self) -> PlantingScenario {
        let total_demand = number_or_zero(self.total_demand.as_ref());
        let total_supply = number_or_zero(self.total_supply.as_ref());
        let total_water_balance = self
            .total_water_balance
            .as_ref()
            .and_then(Loose::as_number)
            .unwrap_or(total_demand - total_supply);
        let wb = self.water_balance_data.unwrap_or_default();
        let values = |v: Vec<Loose>| -> Vec<f64> { v.iter().map(|x| number_or_zero(Some(x))).collect() };

        PlantingScenario {
            total_demand,
            total_supply,
            total_water_balance,
            date_start: self.date_start.filter(|s| !s.is_empty()),
            date_end: self.date_end.filter(|s| !s.is_empty()),
            time_line: labels(wb.time_line),
            demand: values(wb.demand),
            supply: values(wb.supply),
        }
    }
}

/// Decode a JSON body, tagging failures with the endpoint.
pub fn decode<T: for<'de> Deserialize<'de>>(endpoint: &'static str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode { endpoint, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rain(value: serde_json::Value) -> RainForecast {
        serde_json::from_value::<RainForecastPayload>(value)
            .unwrap()
            .normalize()
    }

    #[test]
    fn test_loose_conversions() {
        let n: Loose = serde_json::from_value(json!("12.5")).unwrap();
        assert_eq!(n.as_number(), Some(12.5));
        let code: Loose = serde_json::from_value(json!(930606)).unwrap();
        assert_eq!(code.as_text().as_deref(), Some("930606"));
        let null: Loose = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(null.as_number(), None);
        assert!(!null.truthy());
        let one: Loose = serde_json::from_value(json!(1)).unwrap();
        assert!(one.truthy());
        assert_eq!(one.as_level(), Some(1));
        let half: Loose = serde_json::from_value(json!(1.5)).unwrap();
        assert_eq!(half.as_level(), None);
    }

    #[test]
    fn test_rain_forecast_label_variants() {
        let top = rain(json!({ "current_dakad_label": "ก.ย. 2", "current_dekad_label": "x" }));
        assert_eq!(top.current_dekad_label.as_deref(), Some("ก.ย. 2"));

        let nested = rain(json!({
            "current_dekad_label": "",
            "rainfall_data": { "time_line": ["a"], "current_dekad_label": "a" }
        }));
        assert_eq!(nested.current_dekad_label.as_deref(), Some("a"));

        let none = rain(json!({}));
        assert_eq!(none.current_dekad_label, None);
        assert_eq!(none.rainfall, None);
    }

    #[test]
    fn test_rain_forecast_location() {
        let ok = rain(json!({ "lat": 7.6, "lon": 100.1 }));
        assert_eq!(ok.location, Some(GeoPoint { lat: 7.6, lon: 100.1 }));
        let bad = rain(json!({ "lat": null, "lon": 100.1 }));
        assert_eq!(bad.location, None);
    }

    #[test]
    fn test_rainfall_series_alignment() {
        let forecast = rain(json!({
            "rainfall_data": {
                "time_line": ["d1", "d2", "d3"],
                "rainfall": [{ "precipitation": 4.0 }, { "precipitation": "bad" }],
                "last_year_rainfall": [1.0, null],
                "avg_15yrs": null
            }
        }));
        let series = forecast.rainfall.unwrap();
        assert_eq!(series.precipitation, vec![4.0, 0.0, 0.0]);
        assert_eq!(series.last_year, vec![Some(1.0), None, Some(0.0)]);
        assert_eq!(series.avg_15yrs, vec![Some(0.0); 3]);
    }

    #[test]
    fn test_empty_time_line_has_no_rainfall() {
        let forecast = rain(json!({ "rainfall_data": { "time_line": [] } }));
        assert!(forecast.rainfall.is_none());
    }

    #[test]
    fn test_missing_rainfall_is_reported() {
        let forecast = rain(json!({ "lat": 7.6, "lon": 100.1, "rainfall_data": null }));
        assert!(forecast.location.is_some());
        match forecast.rainfall_series() {
            Err(ApiError::MissingField { endpoint, field }) => {
                assert_eq!(endpoint, "/api/rain_forecast");
                assert_eq!(field, "rainfall_data");
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_null_rainfall_array_is_zero_filled() {
        let forecast = rain(json!({
            "lat": 7.6,
            "lon": 100.1,
            "rainfall_data": { "time_line": ["d1", "d2"], "rainfall": null }
        }));
        assert_eq!(forecast.location, Some(GeoPoint { lat: 7.6, lon: 100.1 }));
        let series = forecast.rainfall_series().unwrap();
        assert_eq!(series.precipitation, vec![0.0, 0.0]);

        let no_timeline = rain(json!({ "rainfall_data": { "time_line": null } }));
        assert!(no_timeline.rainfall.is_none());
    }

    #[test]
    fn test_null_scenario_arrays_decode_empty() {
        let payload: PlantingScenarioPayload = serde_json::from_value(json!({
            "total_demand": 50,
            "water_balance_data": { "time_line": ["a", "b"], "demand": null, "supply": [1, 2] }
        }))
        .unwrap();
        let scenario = payload.normalize();
        assert_eq!(scenario.total_demand, 50.0);
        assert_eq!(scenario.time_line, vec!["a", "b"]);
        assert!(scenario.demand.is_empty());
        assert_eq!(scenario.supply, vec![1.0, 2.0]);

        let payload: PlantingScenarioPayload = serde_json::from_value(json!({
            "water_balance_data": { "time_line": null, "demand": null, "supply": null }
        }))
        .unwrap();
        assert!(payload.normalize().time_line.is_empty());
    }

    #[test]
    fn test_planting_scenario_defaults() {
        let payload: PlantingScenarioPayload = serde_json::from_value(json!({
            "total_demand": 120,
            "total_supply": "20",
            "date_start": "2025-06-01",
            "water_balance_data": {
                "time_line": ["a", { "dekad_label": "b" }, { "label": "c" }, 5],
                "demand": [1, null, 3],
                "supply": [1, 2]
            }
        }))
        .unwrap();
        let scenario = payload.normalize();
        assert_eq!(scenario.total_demand, 120.0);
        assert_eq!(scenario.total_supply, 20.0);
        assert_eq!(scenario.total_water_balance, 100.0);
        assert_eq!(scenario.date_end, None);
        assert_eq!(scenario.time_line, vec!["a", "b", "c", ""]);
        assert_eq!(scenario.demand, vec![1.0, 0.0, 3.0]);
    }

    #[test]
    fn test_decode_error_names_endpoint() {
        let err = decode::<PlantingScenarioPayload>("/api/planting_scenario", "not json").unwrap_err();
        assert_eq!(err.endpoint(), "/api/planting_scenario");
    }
}
