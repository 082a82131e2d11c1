//! Lenient parsing of form values
//!
//! Values arrive as free text from form fields and query strings. Parsing
//! never fails: anything that is not a usable number becomes 0 (amounts) or
//! `None` (prices).

use road_core::UsdPrice;

use crate::calculator::sanitize;

/// Parse a BTC or USD amount. Unparseable, negative, or non-finite text yields 0.
///
/// Like a browser's `parseFloat`, a valid numeric prefix is accepted, so
/// `"300 USD"` parses as 300.
pub fn parse_amount(text: &str) -> f64 {
    parse_leading_number(text).map(sanitize).unwrap_or(0.0)
}

/// Parse a USD/BTC price. Returns `None` unless the text holds a finite,
/// strictly positive number.
pub fn parse_price(text: &str) -> Option<f64> {
    parse_leading_number(text)
        .and_then(UsdPrice::new)
        .map(|p| p.value())
}

/// Longest prefix of `text` (after trimming) that reads as a decimal number
fn parse_leading_number(text: &str) -> Option<f64> {
    let s = text.trim();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_plain() {
        assert_eq!(parse_amount("0.01"), 0.01);
        assert_eq!(parse_amount("300"), 300.0);
        assert_eq!(parse_amount("  42.5  "), 42.5);
        assert_eq!(parse_amount(".5"), 0.5);
        assert_eq!(parse_amount("5."), 5.0);
        assert_eq!(parse_amount("1e3"), 1_000.0);
    }

    #[test]
    fn test_parse_amount_prefix() {
        assert_eq!(parse_amount("300 USD"), 300.0);
        assert_eq!(parse_amount("0.5btc"), 0.5);
        assert_eq!(parse_amount("2e"), 2.0);
        assert_eq!(parse_amount("7e+"), 7.0);
    }

    #[test]
    fn test_parse_amount_garbage_is_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("."), 0.0);
        assert_eq!(parse_amount("-"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
        assert_eq!(parse_amount("1e400"), 0.0);
    }

    #[test]
    fn test_parse_amount_negative_is_zero() {
        assert_eq!(parse_amount("-0.3"), 0.0);
        assert_eq!(parse_amount("-100"), 0.0);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("60000"), Some(60_000.0));
        assert_eq!(parse_price("64123.457"), Some(64_123.457));
        assert_eq!(parse_price("+1.5e4"), Some(15_000.0));
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("0"), None);
        assert_eq!(parse_price("-60000"), None);
        assert_eq!(parse_price("price"), None);
    }
}
