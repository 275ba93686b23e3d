//! Dekads and the crop calendar.
//!
//! A dekad is a 10-day agricultural period. Each month holds three, the
//! last one running to the end of the month, so a year always has 36.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::payload::Loose;
use crate::risk::YieldLevel;

/// Number of dekads in a year.
pub const DEKADS_PER_YEAR: usize = 36;

/// Raw crop-calendar entry as sent by `/api/crop_calendar`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DekadRecordPayload {
    #[serde(default)]
    pub dekad: Option<Loose>,
    #[serde(default)]
    pub date_start: Option<String>,
    #[serde(default)]
    pub date_end: Option<String>,
    #[serde(default)]
    pub dekad_label: Option<String>,
    #[serde(default)]
    pub is_planting_period: Option<Loose>,
    #[serde(default)]
    pub yield_reduction_level: Option<Loose>,
    #[serde(default)]
    pub yield_reduction_desc: Option<String>,
}

/// One dekad of the crop calendar, immutable once rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DekadRecord {
    /// Position in the calendar, 0..36
    pub dekad_index: usize,
    /// Dekad number as the backend labels it
    pub dekad_number: Option<String>,
    pub date_start: String,
    pub date_end: String,
    pub dekad_label: String,
    pub is_planting_period: bool,
    pub yield_reduction_level: Option<u8>,
    pub yield_reduction_desc: String,
}

impl YieldLevel for DekadRecord {
    fn yield_level(&self) -> Option<u8> {
        self.yield_reduction_level
    }
}

impl DekadRecord {
    pub fn from_payload(dekad_index: usize, payload: DekadRecordPayload) -> Self {
        DekadRecord {
            dekad_index,
            dekad_number: payload.dekad.as_ref().and_then(Loose::as_text),
            date_start: payload.date_start.unwrap_or_default(),
            date_end: payload.date_end.unwrap_or_default(),
            dekad_label: payload.dekad_label.unwrap_or_default(),
            is_planting_period: payload
                .is_planting_period
                .as_ref()
                .is_some_and(Loose::truthy),
            yield_reduction_level: payload.yield_reduction_level.as_ref().and_then(Loose::as_level),
            yield_reduction_desc: payload.yield_reduction_desc.unwrap_or_default(),
        }
    }

    /// Tooltip text: label, date range and description, one per line.
    pub fn tooltip(&self) -> String {
        let range = if !self.date_start.is_empty() && !self.date_end.is_empty() {
            format!("{} - {}", self.date_start, self.date_end)
        } else {
            String::new()
        };
        format!("{}\n{}\n{}", self.dekad_label, range, self.yield_reduction_desc)
            .trim()
            .to_string()
    }
}

/// Normalize a crop-calendar response, keeping the backend's order.
pub fn normalize_crop_calendar(payload: Vec<DekadRecordPayload>) -> Vec<DekadRecord> {
    if !payload.is_empty() && payload.len() != DEKADS_PER_YEAR {
        warn!(
            "crop_calendar: expected {} dekads, got {}",
            DEKADS_PER_YEAR,
            payload.len()
        );
    }
    payload
        .into_iter()
        .enumerate()
        .map(|(i, p)| DekadRecord::from_payload(i, p))
        .collect()
}
