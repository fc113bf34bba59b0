use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::report::accumulate::StatusBreakdown;
use crate::report::dates::days_in_month;
use crate::report::period::{Period, PeriodKind};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One point in the time-bucketed revenue series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub revenue: Decimal,
}

/// One slice of the status distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieSlice {
    pub name: &'static str,
    pub value: u64,
    pub color: &'static str,
}

/// Builds the revenue chart series from the paid-revenue-by-date map
/// (current-period paid invoices only; unpaid and overdue are excluded
/// from the chart by design).
///
/// - monthly: one entry per calendar day of the reference month,
///   zero-filled, ascending
/// - yearly: 12 entries named `Jan..Dec`, zero-filled
/// - all: one entry per distinct year present in the data, ascending,
///   no zero-fill
pub fn revenue_series(
    period: &Period,
    by_date: &BTreeMap<NaiveDate, Decimal>,
) -> Vec<ChartPoint> {
    match period.kind {
        PeriodKind::Monthly => {
            let (year, month) = (period.reference.year(), period.reference.month());
            (1..=days_in_month(period.reference))
                .map(|day| {
                    let revenue = NaiveDate::from_ymd_opt(year, month, day)
                        .and_then(|d| by_date.get(&d).copied())
                        .unwrap_or(Decimal::ZERO);
                    ChartPoint {
                        name: day.to_string(),
                        revenue,
                    }
                })
                .collect()
        }
        PeriodKind::Yearly => {
            let mut by_month = [Decimal::ZERO; 12];
            for (date, revenue) in by_date {
                by_month[date.month0() as usize] += *revenue;
            }
            MONTH_NAMES
                .iter()
                .zip(by_month)
                .map(|(name, revenue)| ChartPoint {
                    name: (*name).to_string(),
                    revenue,
                })
                .collect()
        }
        PeriodKind::All => {
            let mut by_year: BTreeMap<i32, Decimal> = BTreeMap::new();
            for (date, revenue) in by_date {
                *by_year.entry(date.year()).or_default() += *revenue;
            }
            by_year
                .into_iter()
                .map(|(year, revenue)| ChartPoint {
                    name: year.to_string(),
                    revenue,
                })
                .collect()
        }
    }
}

/// Paid / Pending / Overdue distribution of current-period invoices,
/// using the effective (read-time reclassified) status.
pub fn status_pie(breakdown: &StatusBreakdown) -> Vec<PieSlice> {
    vec![
        PieSlice {
            name: "Paid",
            value: breakdown.paid,
            color: "#10b981",
        },
        PieSlice {
            name: "Pending",
            value: breakdown.pending,
            color: "#f59e0b",
        },
        PieSlice {
            name: "Overdue",
            value: breakdown.overdue,
            color: "#ef4444",
        },
    ]
}
