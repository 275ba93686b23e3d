//! Dioxus components and chart bridge for the rice water-balance dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the D3.js chart and Leaflet map functions via `js_sys::eval()`
//! - `chart_spec`: serializable descriptions of each chart handed to the bridge
//! - `state`: Reactive AppState with Dioxus Signals
//! - `view`: `SignalView`, the `DashboardView` that writes into AppState
//! - `components`: RSX components (selectors, charts, stage bar, calendar, gauge)

pub mod chart_spec;
pub mod components;
pub mod js_bridge;
pub mod state;
pub mod view;
