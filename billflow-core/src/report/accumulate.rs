use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::report::classify::EffectiveStatus;
use crate::report::period::{Membership, Period};

/// One fully normalized invoice, ready to fold.
#[derive(Debug, Clone, Copy)]
pub struct ParsedInvoice {
    pub issued: NaiveDate,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub status: EffectiveStatus,
}

/// One fully normalized quotation, ready to fold.
#[derive(Debug, Clone, Copy)]
pub struct ParsedQuotation {
    pub issued: NaiveDate,
    pub total: Decimal,
    pub accepted: bool,
    pub overdue: bool,
}

/// Per-period statistics, one instance each for the current and the
/// previous window. Request-scoped, mutated only during the single
/// accumulation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsBucket {
    pub revenue: Decimal,
    pub invoice_count: u64,
    pub vat: Decimal,
    pub outstanding: Decimal,
    pub outstanding_count: u64,
    pub paid_count: u64,
    pub quotation_count: u64,
    pub quotation_value: Decimal,
    pub accepted_quotation_count: u64,
    pub accepted_quotation_value: Decimal,
}

impl StatsBucket {
    fn fold_invoice(&mut self, invoice: &ParsedInvoice) {
        self.invoice_count += 1;
        if invoice.status == EffectiveStatus::Paid {
            self.revenue += invoice.total;
            self.paid_count += 1;
            self.vat += invoice.total - invoice.subtotal;
        } else {
            self.outstanding += invoice.total;
            self.outstanding_count += 1;
        }
    }

    fn fold_quotation(&mut self, quotation: &ParsedQuotation) {
        self.quotation_count += 1;
        self.quotation_value += quotation.total;
        if quotation.accepted {
            self.accepted_quotation_count += 1;
            self.accepted_quotation_value += quotation.total;
        }
    }
}

/// All-time running totals for overdue documents. "How much is overdue
/// right now" is always all-time, never period-scoped, so these are
/// kept outside the period buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverdueTotals {
    pub count: u64,
    pub value: Decimal,
}

impl OverdueTotals {
    fn add(&mut self, value: Decimal) {
        self.count += 1;
        self.value += value;
    }
}

/// Effective-status counts of current-period invoices, feeding the
/// pie distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusBreakdown {
    pub paid: u64,
    pub pending: u64,
    pub overdue: u64,
}

/// Everything one accumulation pass produces.
#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    pub current: StatsBucket,
    pub previous: StatsBucket,
    pub overdue_invoices: OverdueTotals,
    pub overdue_quotations: OverdueTotals,
    pub status_breakdown: StatusBreakdown,
    /// Paid revenue of current-period invoices keyed by issue date,
    /// consumed by the chart series builder.
    pub paid_revenue_by_date: BTreeMap<NaiveDate, Decimal>,
    /// Records dropped because their date would not parse.
    pub skipped_records: u64,
}

impl Aggregates {
    /// Folds one invoice into the period buckets and the all-time
    /// overdue totals.
    pub fn add_invoice(&mut self, period: &Period, invoice: ParsedInvoice) {
        // All-time overdue totals are updated regardless of period
        // membership.
        if invoice.status == EffectiveStatus::Overdue {
            self.overdue_invoices.add(invoice.total);
        }

        match period.membership(invoice.issued) {
            Membership::Current => {
                self.current.fold_invoice(&invoice);
                match invoice.status {
                    EffectiveStatus::Paid => {
                        self.status_breakdown.paid += 1;
                        *self
                            .paid_revenue_by_date
                            .entry(invoice.issued)
                            .or_default() += invoice.total;
                    }
                    EffectiveStatus::Unpaid => self.status_breakdown.pending += 1,
                    EffectiveStatus::Overdue => self.status_breakdown.overdue += 1,
                }
            }
            Membership::Previous => self.previous.fold_invoice(&invoice),
            Membership::Outside => {}
        }
    }

    /// Folds one quotation into the period buckets and the all-time
    /// overdue totals.
    pub fn add_quotation(&mut self, period: &Period, quotation: ParsedQuotation) {
        if quotation.overdue {
            self.overdue_quotations.add(quotation.total);
        }

        match period.membership(quotation.issued) {
            Membership::Current => self.current.fold_quotation(&quotation),
            Membership::Previous => self.previous.fold_quotation(&quotation),
            Membership::Outside => {}
        }
    }
}
