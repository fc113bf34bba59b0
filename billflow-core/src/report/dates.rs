use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Parses a date string from the record store into a UTC calendar date.
///
/// Upstream rows carry dates in several formats depending on which client
/// wrote them. Strategies are attempted in order:
///
/// 1. RFC 3339 / ISO 8601 datetime (time-of-day is stripped after
///    converting to UTC, so day/month/year comparisons never drift
///    across timezones)
/// 2. `DD-MM-YYYY` or `DD/MM/YYYY`
/// 3. `YYYY-MM-DD` or `YYYY/MM/DD`
///
/// Returns `None` when no strategy matches. Callers exclude such records
/// from aggregation rather than failing the report.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    const DAY_FIRST: [&str; 2] = ["%d-%m-%Y", "%d/%m/%Y"];
    const YEAR_FIRST: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

    for pattern in DAY_FIRST.iter().chain(YEAR_FIRST.iter()) {
        if let Ok(date) = NaiveDate::parse_from_str(raw, pattern) {
            return Some(date);
        }
    }

    None
}

/// Number of calendar days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next_month
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}
