//! Dioxus RSX components for the dashboard.

mod area_map;
mod area_selector;
mod chart_container;
mod chart_header;
mod charts;
mod crop_selector;
mod error_display;
mod kpi_cards;
mod rice_stage_bar;
mod risk_gauge;
mod yield_calendar;

pub use area_map::AreaMap;
pub use area_selector::{AreaSelector, SelectionProps};
pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use charts::{RainForecastChart, ScenarioCharts};
pub use crop_selector::CropSelector;
pub use error_display::ErrorDisplay;
pub use kpi_cards::KpiCards;
pub use rice_stage_bar::RiceStageBar;
pub use risk_gauge::RiskGauge;
pub use yield_calendar::YieldCalendar;
