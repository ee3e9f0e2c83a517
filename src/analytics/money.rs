//! Monetary amount normalization and sign conventions.
//!
//! The platform stores amounts as locale-formatted text with a decimal
//! comma (`"10,50"`). One malformed record must not block a whole
//! dashboard, so parsing never fails: anything unparseable is `0.0`.
//!
//! Sign convention is uniform everywhere: credit ⇒ `+amount`, debit ⇒
//! `-amount`. There is no zero-multiplier path.

/// Parses a decimal-comma amount into a numeric value.
///
/// Whitespace is tolerated; an empty or malformed string yields `0.0`.
#[must_use]
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim().replace(',', ".").parse().unwrap_or(0.0)
}

/// Applies the credit/debit sign convention to a normalized amount.
#[must_use]
pub fn signed_amount(amount: f64, credit: bool) -> f64 {
    if credit { amount } else { -amount }
}

/// Rounds to 2 decimal places. Applied only at externalization, never
/// mid-computation.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to 1 decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_comma() {
        assert_eq!(parse_amount("10,50"), 10.5);
        assert_eq!(parse_amount("2,00"), 2.0);
        assert_eq!(parse_amount(" 150,75 "), 150.75);
    }

    #[test]
    fn parses_plain_integers() {
        assert_eq!(parse_amount("120"), 120.0);
    }

    #[test]
    fn malformed_input_is_zero_not_an_error() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("10,5,0"), 0.0);
    }

    #[test]
    fn credit_is_positive_debit_is_negative() {
        assert_eq!(signed_amount(10.5, true), 10.5);
        assert_eq!(signed_amount(10.5, false), -10.5);
    }

    #[test]
    fn rounding_is_externalization_only_granularity() {
        assert_eq!(round2(8.499_999_999), 8.5);
        assert_eq!(round1(3.333), 3.3);
    }
}
