/// Format a value in fixed point with `precision` fractional digits.
///
/// Non-finite values are spelled out as `NaN`, `Infinity` and `-Infinity`.
pub fn format_number(n: f64, precision: usize) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        format!("{:.*}", precision, n)
    }
}
