use rust_decimal::Decimal;
use serde_json::Value;

/// Tax-inclusive multiplier: totals are subtotal * 1.05 (5% VAT).
fn tax_factor() -> Decimal {
    Decimal::new(105, 2)
}

/// Resolved monetary amounts for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoneyParts {
    pub subtotal: Decimal,
    pub total: Decimal,
}

/// Resolves `(subtotal, total)` for one record through an ordered
/// first-match-wins fallback chain. Upstream payload blobs are frequently
/// missing or corrupt, so each strategy is only consulted when the
/// previous one produced nothing:
///
/// 1. Payload `overrideTotal` — total taken verbatim, subtotal
///    back-computed as `total / 1.05`.
/// 2. Payload `items` — subtotal is `Σ(unitPrice × quantity)`, total is
///    `subtotal × 1.05`.
/// 3. Raw total column (non-numeric characters stripped), plus the
///    payload's raw `subtotal` field when present.
/// 4. If subtotal is still zero but total is positive, derive
///    `subtotal = total / 1.05`.
///
/// The exact precedence is load-bearing for financial parity with the
/// rest of the application; do not reorder.
pub fn extract_money(payload_raw: Option<&str>, total_column: Option<&str>) -> MoneyParts {
    let payload: Option<Value> = payload_raw.and_then(|raw| serde_json::from_str(raw).ok());

    let mut parts = payload
        .as_ref()
        .map(|p| from_payload(p))
        .unwrap_or_default();

    if parts.total.is_zero() {
        if let Some(raw) = total_column {
            parts.total = parse_loose(raw);
        }
        if parts.subtotal.is_zero() {
            if let Some(sub) = payload.as_ref().and_then(|p| numeric_field(p, "subtotal")) {
                parts.subtotal = sub;
            }
        }
    }

    if parts.subtotal.is_zero() && parts.total > Decimal::ZERO {
        parts.subtotal = (parts.total / tax_factor()).round_dp(2);
    }

    parts
}

/// Strategies 1 and 2: explicit override total, then line items.
fn from_payload(payload: &Value) -> MoneyParts {
    if let Some(total) = numeric_field(payload, "overrideTotal").filter(|t| *t > Decimal::ZERO) {
        return MoneyParts {
            subtotal: (total / tax_factor()).round_dp(2),
            total,
        };
    }

    if let Some(items) = payload.get("items").and_then(Value::as_array) {
        let subtotal: Decimal = items
            .iter()
            .map(|item| {
                let price = numeric_field(item, "unitPrice").unwrap_or_default();
                let quantity = numeric_field(item, "quantity").unwrap_or_default();
                price * quantity
            })
            .sum();
        if subtotal > Decimal::ZERO {
            return MoneyParts {
                subtotal,
                total: (subtotal * tax_factor()).round_dp(2),
            };
        }
    }

    MoneyParts::default()
}

fn numeric_field(value: &Value, key: &str) -> Option<Decimal> {
    match value.get(key)? {
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => {
            let parsed = parse_loose(s);
            (!parsed.is_zero()).then_some(parsed)
        }
        _ => None,
    }
}

/// Parses a monetary amount from free-form text, stripping currency
/// symbols, spaces and separators the upstream clients leave behind.
fn parse_loose(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn override_total_wins_and_back_computes_subtotal() {
        let payload = r#"{"overrideTotal": "210.00", "items": [{"unitPrice": 999, "quantity": 1}]}"#;
        let parts = extract_money(Some(payload), Some("55.00"));
        assert_eq!(parts.total, dec("210.00"));
        assert_eq!(parts.subtotal, dec("200.00"));
    }

    #[test]
    fn line_items_sum_when_no_override() {
        let payload = r#"{"items": [{"unitPrice": "40.00", "quantity": 2}, {"unitPrice": 20, "quantity": 1}]}"#;
        let parts = extract_money(Some(payload), Some("999"));
        assert_eq!(parts.subtotal, dec("100.00"));
        assert_eq!(parts.total, dec("105.00"));
    }

    #[test]
    fn corrupt_payload_falls_back_to_raw_column() {
        let parts = extract_money(Some("{not json"), Some("$1,234.50"));
        assert_eq!(parts.total, dec("1234.50"));
        // subtotal derived from the raw total
        assert_eq!(parts.subtotal, dec("1175.71"));
    }

    #[test]
    fn missing_payload_falls_back_to_raw_column() {
        let parts = extract_money(None, Some("52.50"));
        assert_eq!(parts.total, dec("52.50"));
        assert_eq!(parts.subtotal, dec("50.00"));
    }

    #[test]
    fn raw_subtotal_field_survives_a_zero_payload_total() {
        let payload = r#"{"subtotal": "80.00"}"#;
        let parts = extract_money(Some(payload), Some("84.00"));
        assert_eq!(parts.total, dec("84.00"));
        assert_eq!(parts.subtotal, dec("80.00"));
    }

    #[test]
    fn everything_missing_yields_zero() {
        let parts = extract_money(None, None);
        assert_eq!(parts, MoneyParts::default());
        let parts = extract_money(Some("{}"), Some("n/a"));
        assert_eq!(parts.total, Decimal::ZERO);
        assert_eq!(parts.subtotal, Decimal::ZERO);
    }
}
