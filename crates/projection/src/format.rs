//! Display formatting for projection values

/// Placeholder shown when no projection is available
pub const NO_VALUE: &str = "—";

/// USD amount with thousands separators and two decimals, e.g. `$1,234.56`
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return NO_VALUE.to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

/// BTC amount with satoshi precision, e.g. `0.00500000`
pub fn format_btc(value: f64) -> String {
    format!("{:.8}", value)
}

/// Percentage with two decimals, without the `%` sign
pub fn format_pct(value: f64) -> String {
    format!("{:.2}", value)
}

/// Price with thousands separators and up to three fractional digits
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return NO_VALUE.to_string();
    }
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');
    let sign = if value < 0.0 && fixed != "0.000" { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}", sign, group_thousands(int_part))
    } else {
        format!("{}{}.{}", sign, group_thousands(int_part), frac_part)
    }
}

/// Months to goal for display; 0 means no projection
pub fn format_months(months: u32) -> String {
    match months {
        0 => NO_VALUE.to_string(),
        1 => "1 month".to_string(),
        n => format!("{} months", n),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
