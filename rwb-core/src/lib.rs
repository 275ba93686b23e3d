//! Core types for the rice water-balance dashboard.
//!
//! - `date_codec`: reformatting of backend dates for each endpoint
//! - `risk`: yield-reduction level to tier / pointer mapping
//! - `calendar`: month grid of daily yield-reduction risk
//! - `dekad`: the 36-dekad crop calendar records
//! - `payload` / `api`: backend payloads, queries and the `DashboardApi` seam

pub mod api;
pub mod area;
pub mod calendar;
pub mod config;
pub mod date_codec;
pub mod dekad;
pub mod error;
pub mod payload;
pub mod risk;
