use chrono::NaiveDate;

/// Days after which an unpaid invoice is reported as overdue.
const OVERDUE_AFTER_DAYS: i64 = 30;

/// Effective invoice status used for reporting.
///
/// This is re-derived on every report and may disagree with the status
/// persisted in the store: a separate background job writes "Overdue"
/// back on its own schedule, while the report always reclassifies at
/// read time. The read-time view is authoritative for what the report
/// shows; the store is never rewritten here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveStatus {
    Paid,
    Unpaid,
    Overdue,
}

/// Derives the effective status of an invoice.
///
/// The stored status is trimmed and lowercased, with the legacy
/// `"pending"` spelling mapped to unpaid. Regardless of what was
/// stored, an invoice that is neither paid nor already overdue is
/// promoted to overdue once it is more than 30 days older than the
/// reference date.
pub fn classify_invoice(
    status_raw: &str,
    issued: NaiveDate,
    reference: NaiveDate,
) -> EffectiveStatus {
    let status = match normalize_status(status_raw).as_str() {
        "paid" => EffectiveStatus::Paid,
        "overdue" => EffectiveStatus::Overdue,
        _ => EffectiveStatus::Unpaid,
    };

    if status == EffectiveStatus::Unpaid {
        let age = reference.signed_duration_since(issued).num_days();
        if age > OVERDUE_AFTER_DAYS {
            return EffectiveStatus::Overdue;
        }
    }

    status
}

/// True when a quotation's stored status marks it accepted.
pub fn is_accepted(status_raw: &str) -> bool {
    normalize_status(status_raw) == "accepted"
}

/// True when a quotation counts toward the all-time overdue totals:
/// not accepted and strictly past its validity date.
///
/// Evaluated against "now", never the period reference — how much is
/// overdue right now is always an all-time question.
pub fn quotation_is_overdue(accepted: bool, validity: Option<NaiveDate>, now: NaiveDate) -> bool {
    !accepted && validity.is_some_and(|v| v < now)
}

fn normalize_status(raw: &str) -> String {
    let status = raw.trim().to_lowercase();
    if status == "pending" {
        "unpaid".to_string()
    } else {
        status
    }
}
