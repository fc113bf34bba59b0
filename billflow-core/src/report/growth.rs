use rust_decimal::Decimal;

use crate::report::period::PeriodKind;

/// Percentage change of a metric between the current and previous
/// period buckets.
///
/// All-time reports always return 0, since there is no previous window
/// to compare against. Zero-division is special-cased so the result is
/// never NaN: a previous value of zero yields 100 when the current
/// value is positive and 0 otherwise.
pub fn growth(kind: PeriodKind, current: Decimal, previous: Decimal) -> Decimal {
    if kind == PeriodKind::All {
        return Decimal::ZERO;
    }
    if previous.is_zero() {
        return if current > Decimal::ZERO {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
    }
    ((current - previous) / previous * Decimal::ONE_HUNDRED).round_dp(2)
}

/// Growth over integer counts.
pub fn count_growth(kind: PeriodKind, current: u64, previous: u64) -> Decimal {
    growth(kind, Decimal::from(current), Decimal::from(previous))
}
