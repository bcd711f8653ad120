//! Plain-text rendering of currency amounts.

const EOK: f64 = 100_000_000.0;

/// Whole won with thousands separators, e.g. `1,234,567원`.
pub fn krw(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{sign}{grouped}원")
}

/// Amount in 억 with one decimal, e.g. `160.0억원`.
pub fn eok(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    format!("{:.1}억원", value / EOK)
}

pub fn percent(value: Option<f64>) -> String {
    value
        .filter(|v| v.is_finite())
        .map(|v| format!("{v:.2}%"))
        .unwrap_or_else(|| "-".to_string())
}
