//! Dashboard configuration.
//!
//! Every field has a default, so an override only needs the keys it changes:
//!
//! ```json
//! { "api_base_url": "https://example.org", "default_province": "สงขลา" }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Map widget settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
    /// Radius of the rice-area circle drawn around the marker, in metres
    pub rice_area_radius_m: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            center_lat: 7.617,
            center_lon: 100.077,
            zoom: 11,
            rice_area_radius_m: 800.0,
        }
    }
}

/// Top-level dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Origin the `/api/*` paths are appended to; empty means "same origin"
    pub api_base_url: String,
    /// Province whose districts are loaded on start-up
    pub default_province: Option<String>,
    pub provinces: Vec<String>,
    pub rice_varieties: Vec<String>,
    pub planting_methods: Vec<String>,
    pub default_rice_variety: String,
    pub default_planting_method: String,
    /// `date` sent to `/api/rain_forecast` (DD-MM-YYYY)
    pub rain_forecast_date: String,
    pub map: MapConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            api_base_url: String::new(),
            default_province: Some("พัทลุง".to_string()),
            provinces: vec!["พัทลุง".to_string()],
            rice_varieties: vec![
                "ข้าวเบา".to_string(),
                "ข้าวกลาง".to_string(),
                "ข้าวหนัก".to_string(),
            ],
            planting_methods: vec![
                "หว่านน้ำตม".to_string(),
                "หว่านข้าวแห้ง".to_string(),
                "ปักดำ".to_string(),
            ],
            default_rice_variety: "ข้าวกลาง".to_string(),
            default_planting_method: "หว่านน้ำตม".to_string(),
            rain_forecast_date: "01-06-2025".to_string(),
            map: MapConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_rice_variety.is_empty() || self.default_planting_method.is_empty() {
            return Err(ConfigError::Invalid(
                "default rice variety and planting method must not be empty".to_string(),
            ));
        }
        if self.map.rice_area_radius_m < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "rice_area_radius_m must be positive, got {}",
                self.map.rice_area_radius_m
            )));
        }
        Ok(())
    }

    /// `api_base_url` without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}
