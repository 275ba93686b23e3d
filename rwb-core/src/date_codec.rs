//! Date reformatting between the backend's ISO dates and the formats
//! individual endpoints expect.
//!
//! The codec is purely textual: it splits on `-` and reorders the parts.
//! Anything that does not split into exactly three parts yields `""`.

use chrono::NaiveDate;

/// Date format of every date the backend sends: "YYYY-MM-DD"
pub const ISO_FORMAT: &str = "%Y-%m-%d";

fn split_three(date: &str) -> Option<[&str; 3]> {
    let mut parts = date.split('-');
    let first = parts.next()?;
    let second = parts.next()?;
    let third = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some([first, second, third])
}

/// "2025-09-11" -> "11-09-2025"
pub fn to_scenario_date(iso_date: &str) -> String {
    match split_three(iso_date) {
        Some([y, m, d]) => format!("{d}-{m}-{y}"),
        None => String::new(),
    }
}

/// "2025-09-11" -> "09-2025"
pub fn to_month_year(iso_date: &str) -> String {
    match split_three(iso_date) {
        Some([y, m, _]) => format!("{m}-{y}"),
        None => String::new(),
    }
}

/// "11-09-2025" -> "2025-09-11"
pub fn from_scenario_date(scenario_date: &str) -> String {
    match split_three(scenario_date) {
        Some([d, m, y]) => format!("{y}-{m}-{d}"),
        None => String::new(),
    }
}

/// Parse a backend "YYYY-MM-DD" date.
pub fn parse_iso_date(s: &str) -> anyhow::Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s.trim(), ISO_FORMAT)?)
}

/// `None` for the empty string, so optional query parameters get omitted.
pub fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_scenario_date() {
        assert_eq!(to_scenario_date("2025-09-11"), "11-09-2025");
        assert_eq!(to_scenario_date("2024-01-01"), "01-01-2024");
    }

    #[test]
    fn test_to_month_year() {
        assert_eq!(to_month_year("2025-09-11"), "09-2025");
        assert_eq!(to_month_year("2024-12-31"), "12-2024");
    }

    #[test]
    fn test_malformed_dates_are_empty() {
        for bad in ["", "2025", "2025-09", "2025/09/11", "2025-09-11-01"] {
            assert_eq!(to_scenario_date(bad), "", "input {bad:?}");
            assert_eq!(to_month_year(bad), "", "input {bad:?}");
            assert_eq!(from_scenario_date(bad), "", "input {bad:?}");
        }
        let missing: Option<&str> = None;
        assert_eq!(missing.map(to_scenario_date).unwrap_or_default(), "");
    }

    #[test]
    fn test_scenario_round_trip_is_stable() {
        for iso in ["2025-09-11", "2024-02-29", "1999-12-01", "x-y-z"] {
            let once = to_scenario_date(iso);
            let again = to_scenario_date(&from_scenario_date(&once));
            assert_eq!(again, once);
        }
    }

    #[test]
    fn test_parse_iso_date() {
        let date = parse_iso_date("2025-06-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert!(parse_iso_date("01-06-2025").is_err());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(String::new()), None);
        assert_eq!(non_empty("09-2025".to_string()), Some("09-2025".to_string()));
    }
}
