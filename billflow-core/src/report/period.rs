use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::report::dates::days_in_month;

/// Comparison window selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Monthly,
    Yearly,
    All,
}

impl PeriodKind {
    /// Parses the `period` query parameter. Absent defaults to monthly.
    pub fn parse(raw: Option<&str>) -> Result<Self, ReportError> {
        match raw {
            None => Ok(PeriodKind::Monthly),
            Some("monthly") => Ok(PeriodKind::Monthly),
            Some("yearly") => Ok(PeriodKind::Yearly),
            Some("all") => Ok(PeriodKind::All),
            Some(other) => Err(ReportError::InvalidPeriod(other.to_string())),
        }
    }
}

/// Immutable request parameters for one report.
///
/// `month` is 0-based (0 = January) to match the upstream clients.
#[derive(Debug, Clone, Copy)]
pub struct PeriodRequest {
    pub kind: PeriodKind,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Resolved comparison window: the current reference date and the
/// previous-period reference date, both UTC calendar dates.
#[derive(Debug, Clone, Copy)]
pub struct Period {
    pub kind: PeriodKind,
    pub reference: NaiveDate,
    pub previous: NaiveDate,
}

/// Which bucket a record's date falls into, relative to a `Period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Current,
    Previous,
    Outside,
}

impl PeriodRequest {
    /// Resolves the request against the supplied "now" into a `Period`.
    ///
    /// The reference date starts as `now`, overridden by `year`/`month`
    /// when supplied (day-of-month clamped to the target month). For
    /// yearly reports the month component is forced to January. The
    /// previous reference is one month back (monthly and all-time) or
    /// one year back (yearly).
    pub fn resolve(&self, now: NaiveDate) -> Result<Period, ReportError> {
        if let Some(month) = self.month {
            if month > 11 {
                return Err(ReportError::InvalidMonth(month));
            }
        }

        let year = self.year.unwrap_or_else(|| now.year());
        let month = match self.kind {
            PeriodKind::Yearly => 1,
            _ => self.month.map(|m| m + 1).unwrap_or_else(|| now.month()),
        };

        let day_cap = NaiveDate::from_ymd_opt(year, month, 1)
            .map(days_in_month)
            .ok_or(ReportError::InvalidYear(year))?;
        let reference = NaiveDate::from_ymd_opt(year, month, now.day().min(day_cap))
            .ok_or(ReportError::InvalidYear(year))?;

        let step_back = match self.kind {
            PeriodKind::Yearly => Months::new(12),
            _ => Months::new(1),
        };
        let previous = reference
            .checked_sub_months(step_back)
            .ok_or(ReportError::InvalidYear(year))?;

        Ok(Period {
            kind: self.kind,
            reference,
            previous,
        })
    }
}

impl Period {
    /// Classifies a record date as current-period, previous-period, or
    /// outside both.
    ///
    /// Monthly compares year and month; yearly compares year only;
    /// all-time treats every date as current and nothing as previous.
    pub fn membership(&self, date: NaiveDate) -> Membership {
        match self.kind {
            PeriodKind::Monthly => {
                if same_month(date, self.reference) {
                    Membership::Current
                } else if same_month(date, self.previous) {
                    Membership::Previous
                } else {
                    Membership::Outside
                }
            }
            PeriodKind::Yearly => {
                if date.year() == self.reference.year() {
                    Membership::Current
                } else if date.year() == self.previous.year() {
                    Membership::Previous
                } else {
                    Membership::Outside
                }
            }
            PeriodKind::All => Membership::Current,
        }
    }
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_defaults_to_now_and_previous_month() {
        let request = PeriodRequest {
            kind: PeriodKind::Monthly,
            year: None,
            month: None,
        };
        let period = request.resolve(date(2024, 3, 15)).unwrap();
        assert_eq!(period.reference, date(2024, 3, 15));
        assert_eq!(period.previous, date(2024, 2, 15));
    }

    #[test]
    fn month_override_is_zero_based_and_clamps_the_day() {
        let request = PeriodRequest {
            kind: PeriodKind::Monthly,
            year: Some(2024),
            month: Some(1), // February
        };
        let period = request.resolve(date(2024, 3, 31)).unwrap();
        assert_eq!(period.reference, date(2024, 2, 29));
    }

    #[test]
    fn yearly_forces_january_and_steps_back_one_year() {
        let request = PeriodRequest {
            kind: PeriodKind::Yearly,
            year: Some(2024),
            month: Some(6),
        };
        let period = request.resolve(date(2024, 8, 10)).unwrap();
        assert_eq!(period.reference, date(2024, 1, 10));
        assert_eq!(period.previous, date(2023, 1, 10));
    }

    #[test]
    fn month_out_of_range_is_rejected() {
        let request = PeriodRequest {
            kind: PeriodKind::Monthly,
            year: None,
            month: Some(12),
        };
        assert!(matches!(
            request.resolve(date(2024, 3, 15)),
            Err(ReportError::InvalidMonth(12))
        ));
    }

    #[test]
    fn monthly_membership() {
        let period = Period {
            kind: PeriodKind::Monthly,
            reference: date(2024, 3, 15),
            previous: date(2024, 2, 15),
        };
        assert_eq!(period.membership(date(2024, 3, 1)), Membership::Current);
        assert_eq!(period.membership(date(2024, 2, 28)), Membership::Previous);
        assert_eq!(period.membership(date(2024, 1, 31)), Membership::Outside);
        assert_eq!(period.membership(date(2023, 3, 15)), Membership::Outside);
    }

    #[test]
    fn yearly_membership_ignores_month() {
        let period = Period {
            kind: PeriodKind::Yearly,
            reference: date(2024, 1, 10),
            previous: date(2023, 1, 10),
        };
        assert_eq!(period.membership(date(2024, 11, 2)), Membership::Current);
        assert_eq!(period.membership(date(2023, 2, 2)), Membership::Previous);
        assert_eq!(period.membership(date(2022, 12, 31)), Membership::Outside);
    }

    #[test]
    fn all_time_is_always_current_never_previous() {
        let period = Period {
            kind: PeriodKind::All,
            reference: date(2024, 3, 15),
            previous: date(2024, 2, 15),
        };
        assert_eq!(period.membership(date(1999, 1, 1)), Membership::Current);
        assert_eq!(period.membership(date(2024, 2, 15)), Membership::Current);
    }
}
