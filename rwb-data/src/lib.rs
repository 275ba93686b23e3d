//! Data shaping for the dashboard widgets.
//!
//! This crate turns normalized backend data into exactly what each widget
//! draws: aligned chart series, coloured rain bars, KPI numbers, the
//! rice-stage bar and the map marker.

pub mod rain;
pub mod scenario;
pub mod stage_bar;

/// Positionally aligned chart series
pub mod series {
    use serde::{Deserialize, Serialize};

    /// Resize `values` to `len`, padding with zeros.
    pub fn align(values: &[f64], len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| values.get(i).copied().unwrap_or(0.0))
            .collect()
    }

    /// Demand and supply per timeline label.
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    pub struct ChartSeries {
        pub labels: Vec<String>,
        pub demand: Vec<f64>,
        pub supply: Vec<f64>,
    }

    impl ChartSeries {
        /// Build a series whose values match the label count.
        pub fn aligned(labels: Vec<String>, demand: &[f64], supply: &[f64]) -> Self {
            let len = labels.len();
            ChartSeries {
                demand: align(demand, len),
                supply: align(supply, len),
                labels,
            }
        }

        pub fn len(&self) -> usize {
            self.labels.len()
        }

        pub fn is_empty(&self) -> bool {
            self.labels.is_empty()
        }

        /// Unmet demand per label: `max(0, demand - supply)`.
        pub fn deficits(&self) -> Vec<f64> {
            self.demand
                .iter()
                .zip(&self.supply)
                .map(|(d, s)| (d - s).max(0.0))
                .collect()
        }
    }

}

/// Map marker for the selected area
pub mod map {
    use rwb_core::config::MapConfig;
    use rwb_core::payload::GeoPoint;
    use serde::{Deserialize, Serialize};

    /// Marker plus the rice-area circle drawn around it.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct MapMarker {
        pub lat: f64,
        pub lon: f64,
        pub zoom: u8,
        pub radius_m: f64,
    }

    impl MapMarker {
        pub fn at(point: GeoPoint, config: &MapConfig) -> Self {
            MapMarker {
                lat: point.lat,
                lon: point.lon,
                zoom: config.zoom,
                radius_m: config.rice_area_radius_m,
            }
        }

        /// Where the map sits before any area is picked.
        pub fn initial(config: &MapConfig) -> Self {
            Self::at(
                GeoPoint {
                    lat: config.center_lat,
                    lon: config.center_lon,
                },
                config,
            )
        }
    }

}
