//! Yield-reduction risk levels and how they are displayed.
//!
//! The backend reports a discrete level per day or dekad:
//! 0 = low, 1 = medium, 2 = high expected yield loss.

use serde::{Deserialize, Serialize};

/// Averages below this sit in the low tier.
pub const MEDIUM_THRESHOLD: f64 = 0.5;

/// Averages at or above this sit in the high tier.
pub const HIGH_THRESHOLD: f64 = 1.5;

/// Display tier of a single calendar or stage-bar cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// CSS class the dashboard stylesheet colours (green / yellow / red).
    pub fn css_class(&self) -> &'static str {
        match self {
            RiskTier::None => "",
            RiskTier::Low => "level-0",
            RiskTier::Medium => "level-1",
            RiskTier::High => "level-2",
        }
    }
}

/// Position of the shared cost/risk pointer along the gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPosition {
    Low,
    Medium,
    High,
}

impl PointerPosition {
    /// The `left` offset of the pointer element.
    pub fn css_left(&self) -> &'static str {
        match self {
            PointerPosition::Low => "15%",
            PointerPosition::Medium => "50%",
            PointerPosition::High => "85%",
        }
    }
}

/// Anything that carries an (optional) yield-reduction level.
pub trait YieldLevel {
    fn yield_level(&self) -> Option<u8>;
}

impl YieldLevel for Option<u8> {
    fn yield_level(&self) -> Option<u8> {
        *self
    }
}

impl YieldLevel for u8 {
    fn yield_level(&self) -> Option<u8> {
        Some(*self)
    }
}

/// Arithmetic mean of the levels, a missing level counting as 0.
/// An empty slice averages to 0.
pub fn average_level<T: YieldLevel>(records: &[T]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let sum: f64 = records
        .iter()
        .map(|r| f64::from(r.yield_level().unwrap_or(0)))
        .sum();
    sum / records.len() as f64
}

/// Map an average level onto the three pointer positions.
pub fn pointer_position(avg: f64) -> PointerPosition {
    if avg < MEDIUM_THRESHOLD {
        PointerPosition::Low
    } else if avg < HIGH_THRESHOLD {
        PointerPosition::Medium
    } else {
        PointerPosition::High
    }
}

/// Tier of a single cell; unknown levels get no colour.
pub fn cell_tier(level: Option<u8>) -> RiskTier {
    match level {
        Some(0) => RiskTier::Low,
        Some(1) => RiskTier::Medium,
        Some(2) => RiskTier::High,
        _ => RiskTier::None,
    }
}
