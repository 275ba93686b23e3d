//! Rice growth-stage bar: one clickable cell per dekad of the crop calendar.

use rwb_core::dekad::DekadRecord;
use rwb_core::risk::{cell_tier, RiskTier};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageCell {
    pub dekad_index: usize,
    pub label: String,
    pub tooltip: String,
    /// Draws the planting marker
    pub is_planting: bool,
    pub tier: RiskTier,
}

impl From<&DekadRecord> for StageCell {
    fn from(record: &DekadRecord) -> Self {
        StageCell {
            dekad_index: record.dekad_index,
            label: record.dekad_label.clone(),
            tooltip: record.tooltip(),
            is_planting: record.is_planting_period,
            tier: cell_tier(record.yield_reduction_level),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StageBar {
    pub cells: Vec<StageCell>,
}

impl StageBar {
    pub fn from_records(records: &[DekadRecord]) -> Self {
        StageBar {
            cells: records.iter().map(StageCell::from).collect(),
        }
    }

    /// Cell to highlight first: the first planting dekad, else the first
    /// cell; `None` for an empty bar.
    pub fn initial_active(&self) -> Option<usize> {
        self.cells
            .iter()
            .find(|c| c.is_planting)
            .or(self.cells.first())
            .map(|c| c.dekad_index)
    }

    pub fn planting_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_planting).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
