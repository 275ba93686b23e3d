//! Month grid of daily yield-reduction risk.
//!
//! `DekadCalendarBuilder` folds the sparse daily entries returned by
//! `/api/yield_reduction` onto a Monday-first 7-column grid covering every
//! day of the month of the first entry.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::date_codec::parse_iso_date;
use crate::risk::{RiskTier, YieldLevel};

/// Buddhist-era years are Gregorian years plus this offset.
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Abbreviated Thai month names, January first.
pub const THAI_MONTH_ABBREVIATIONS: [&str; 12] = [
    "ม.ค.", "ก.พ.", "มี.ค.", "เม.ย.", "พ.ค.", "มิ.ย.", "ก.ค.", "ส.ค.", "ก.ย.", "ต.ค.", "พ.ย.", "ธ.ค.",
];

/// Column headers, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Raw `/api/yield_reduction` entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyRiskPayload {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub yield_reduction_level: Option<crate::payload::Loose>,
    #[serde(default)]
    pub yield_reduction_desc: Option<String>,
}

/// Yield-reduction risk for one day. A missing level counts as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRisk {
    pub date: String,
    pub level: u8,
    pub description: String,
}

impl From<DailyRiskPayload> for DailyRisk {
    fn from(payload: DailyRiskPayload) -> Self {
        DailyRisk {
            date: payload.date.unwrap_or_default(),
            level: payload
                .yield_reduction_level
                .as_ref()
                .and_then(|l| l.as_level())
                .unwrap_or(0),
            description: payload.yield_reduction_desc.unwrap_or_default(),
        }
    }
}

impl YieldLevel for DailyRisk {
    fn yield_level(&self) -> Option<u8> {
        Some(self.level)
    }
}

impl DailyRisk {
    /// Heat-map tier: 0 low, 1 medium, anything higher is high.
    pub fn tier(&self) -> RiskTier {
        match self.level {
            0 => RiskTier::Low,
            1 => RiskTier::Medium,
            _ => RiskTier::High,
        }
    }
}

/// One square of the month grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarCell {
    /// Day of month, `None` for the blanks around the month
    pub day_number: Option<u32>,
    /// Zero-based row
    pub week_index: usize,
    /// 0 = Monday .. 6 = Sunday
    pub weekday_index: usize,
    pub risk_tier: RiskTier,
    pub has_data: bool,
    pub description: String,
}

impl CalendarCell {
    fn blank(week_index: usize, weekday_index: usize) -> Self {
        CalendarCell {
            day_number: None,
            week_index,
            weekday_index,
            risk_tier: RiskTier::None,
            has_data: false,
            description: String::new(),
        }
    }
}

/// A rendered month: title plus rows of exactly seven cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub weeks: Vec<Vec<CalendarCell>>,
}

impl MonthCalendar {
    /// Row label, e.g. "Week 1".
    pub fn week_label(week_index: usize) -> String {
        format!("Week {}", week_index + 1)
    }
}

/// Title in Thai with a Buddhist-era year, e.g. "ปฏิทิน ก.ย. 2568".
pub fn calendar_title(year: i32, month: u32) -> String {
    let name = THAI_MONTH_ABBREVIATIONS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or_default();
    format!("ปฏิทิน {} {}", name, year + BUDDHIST_ERA_OFFSET)
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Builds the month grid for a list of daily risk entries.
pub struct DekadCalendarBuilder;

impl DekadCalendarBuilder {
    /// Returns `None` for an empty input or when the first entry's date is
    /// unreadable; the caller shows its empty state.
    pub fn build(entries: &[DailyRisk]) -> Option<MonthCalendar> {
        let first = entries.first()?;
        let first_date = match parse_iso_date(&first.date) {
            Ok(date) => date,
            Err(e) => {
                warn!("yield_reduction: unreadable first date {:?}: {}", first.date, e);
                return None;
            }
        };
        let (year, month) = (first_date.year(), first_date.month());
        let last_day = days_in_month(year, month);
        let start_weekday = NaiveDate::from_ymd_opt(year, month, 1)?
            .weekday()
            .num_days_from_monday() as usize;

        // Later entries for the same day overwrite earlier ones.
        let mut by_day: HashMap<u32, &DailyRisk> = HashMap::new();
        for entry in entries {
            match parse_iso_date(&entry.date) {
                Ok(date) if date.year() == year && date.month() == month => {
                    by_day.insert(date.day(), entry);
                }
                Ok(date) => warn!("yield_reduction: {} is outside {}-{:02}", date, year, month),
                Err(_) => warn!("yield_reduction: skipping unreadable date {:?}", entry.date),
            }
        }

        let mut weeks = Vec::new();
        let mut day = 1;
        let mut week_index = 0;
        while day <= last_day {
            let mut row = Vec::with_capacity(7);
            for weekday in 0..7 {
                if (week_index == 0 && weekday < start_weekday) || day > last_day {
                    row.push(CalendarCell::blank(week_index, weekday));
                    continue;
                }
                let cell = match by_day.get(&day) {
                    Some(info) => CalendarCell {
                        day_number: Some(day),
                        week_index,
                        weekday_index: weekday,
                        risk_tier: info.tier(),
                        has_data: true,
                        description: info.description.clone(),
                    },
                    None => CalendarCell {
                        day_number: Some(day),
                        ..CalendarCell::blank(week_index, weekday)
                    },
                };
                row.push(cell);
                day += 1;
            }
            weeks.push(row);
            week_index += 1;
        }

        Some(MonthCalendar {
            year,
            month,
            title: calendar_title(year, month),
            weeks,
        })
    }
}

/// Normalize a yield-reduction response.
pub fn normalize_daily_risks(payload: Vec<DailyRiskPayload>) -> Vec<DailyRisk> {
    payload.into_iter().map(DailyRisk::from).collect()
}
