use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ReportError;
use crate::models::{DocumentFields, DocumentKind};
use crate::report::accumulate::{Aggregates, ParsedInvoice, ParsedQuotation};
use crate::report::charts::{revenue_series, status_pie, ChartPoint, PieSlice};
use crate::report::classify::{classify_invoice, is_accepted, quotation_is_overdue};
use crate::report::dates::normalize_date;
use crate::report::growth::{count_growth, growth};
use crate::report::money::extract_money;
use crate::report::period::PeriodRequest;
use crate::store::RecordSource;

/// Monetary metric compared against the previous period.
#[derive(Debug, Clone, Serialize)]
pub struct Metric {
    pub value: Decimal,
    pub growth: Decimal,
}

/// Count-only metric compared against the previous period.
#[derive(Debug, Clone, Serialize)]
pub struct CountMetric {
    pub value: u64,
    pub growth: Decimal,
}

/// Monetary metric that also carries a document count.
#[derive(Debug, Clone, Serialize)]
pub struct ValueCountMetric {
    pub value: Decimal,
    pub count: u64,
    pub growth: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountValueMetric {
    pub count: u64,
    pub value: Decimal,
    pub growth: Decimal,
}

/// All-time overdue totals; no growth, by definition.
#[derive(Debug, Clone, Serialize)]
pub struct OverdueMetric {
    pub count: u64,
    pub value: Decimal,
}

/// The complete statistics report returned to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub revenue: Metric,
    pub invoices: CountMetric,
    pub vat: Metric,
    pub outstanding: ValueCountMetric,
    pub paid_invoices: CountValueMetric,
    pub overdue: OverdueMetric,
    pub quotations: CountValueMetric,
    pub accepted_quotations: CountValueMetric,
    pub overdue_quotations: OverdueMetric,
    pub chart_data: Vec<ChartPoint>,
    pub pie_data: Vec<PieSlice>,
}

/// Generates the full statistics report.
///
/// Fetches both document collections concurrently, runs every record
/// through the normalize → extract → classify → accumulate pipeline,
/// then derives growth figures and chart series from the finished
/// buckets. The report is a pure function of the record data, the
/// request parameters and the supplied `now`; any failure aborts the
/// whole report with no partial results.
///
/// # Arguments
///
/// * `source` - Read-only record source for both collections
/// * `request` - Period kind plus optional year/month overrides
/// * `now` - The "current" UTC calendar date (injected for determinism)
pub async fn generate_report<S: RecordSource>(
    source: &S,
    request: PeriodRequest,
    now: NaiveDate,
) -> Result<StatsReport, ReportError> {
    let period = request.resolve(now)?;

    let (invoice_rows, quotation_rows) = tokio::try_join!(
        source.fetch_rows(DocumentKind::Invoice),
        source.fetch_rows(DocumentKind::Quotation),
    )?;

    info!(
        invoices = invoice_rows.len(),
        quotations = quotation_rows.len(),
        period = ?period.kind,
        "generating statistics report"
    );

    let mut agg = Aggregates::default();

    for row in &invoice_rows {
        let fields = DocumentFields::from_cells(row);
        let Some(issued) = fields.date.as_deref().and_then(normalize_date) else {
            agg.skipped_records += 1;
            continue;
        };
        let money = extract_money(fields.payload.as_deref(), fields.total.as_deref());
        let status = classify_invoice(fields.status_text(), issued, period.reference);
        agg.add_invoice(
            &period,
            ParsedInvoice {
                issued,
                subtotal: money.subtotal,
                total: money.total,
                status,
            },
        );
    }

    for row in &quotation_rows {
        let fields = DocumentFields::from_cells(row);
        let Some(issued) = fields.date.as_deref().and_then(normalize_date) else {
            agg.skipped_records += 1;
            continue;
        };
        let money = extract_money(fields.payload.as_deref(), fields.total.as_deref());
        let accepted = is_accepted(fields.status_text());
        let validity = fields.validity.as_deref().and_then(normalize_date);
        agg.add_quotation(
            &period,
            ParsedQuotation {
                issued,
                total: money.total,
                accepted,
                overdue: quotation_is_overdue(accepted, validity, now),
            },
        );
    }

    if agg.skipped_records > 0 {
        // Tolerated by design, but operators should see it.
        warn!(
            skipped = agg.skipped_records,
            "excluded records with unparseable dates from the report"
        );
    }

    let kind = period.kind;
    let (cur, prev) = (&agg.current, &agg.previous);

    Ok(StatsReport {
        revenue: Metric {
            value: cur.revenue,
            growth: growth(kind, cur.revenue, prev.revenue),
        },
        invoices: CountMetric {
            value: cur.invoice_count,
            growth: count_growth(kind, cur.invoice_count, prev.invoice_count),
        },
        vat: Metric {
            value: cur.vat,
            growth: growth(kind, cur.vat, prev.vat),
        },
        outstanding: ValueCountMetric {
            value: cur.outstanding,
            count: cur.outstanding_count,
            growth: growth(kind, cur.outstanding, prev.outstanding),
        },
        paid_invoices: CountValueMetric {
            count: cur.paid_count,
            value: cur.revenue,
            growth: count_growth(kind, cur.paid_count, prev.paid_count),
        },
        overdue: OverdueMetric {
            count: agg.overdue_invoices.count,
            value: agg.overdue_invoices.value,
        },
        quotations: CountValueMetric {
            count: cur.quotation_count,
            value: cur.quotation_value,
            growth: growth(kind, cur.quotation_value, prev.quotation_value),
        },
        accepted_quotations: CountValueMetric {
            count: cur.accepted_quotation_count,
            value: cur.accepted_quotation_value,
            growth: growth(
                kind,
                cur.accepted_quotation_value,
                prev.accepted_quotation_value,
            ),
        },
        overdue_quotations: OverdueMetric {
            count: agg.overdue_quotations.count,
            value: agg.overdue_quotations.value,
        },
        chart_data: revenue_series(&period, &agg.paid_revenue_by_date),
        pie_data: status_pie(&agg.status_breakdown),
    })
}
