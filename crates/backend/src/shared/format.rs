/// Compact money/quantity formatting for metric cards
///
/// Divides by 1000 while the value is at least 1000, at most twice, and
/// appends the unit label ("", "mil", "milhões"). Two decimal places.
///
/// # Примеры
/// ```
/// use sales_backend::shared::format::format_compact;
/// assert_eq!(format_compact(1500.0, ""), "1.50 mil");
/// assert_eq!(format_compact(2_500_000.0, "R$"), "R$ 2.50 milhões");
/// ```
pub fn format_compact(value: f64, prefix: &str) -> String {
    let mut value = value;
    for unit in ["", "mil"] {
        if value < 1000.0 {
            return with_prefix(prefix, value, unit);
        }
        value /= 1000.0;
    }
    with_prefix(prefix, value, "milhões")
}

fn with_prefix(prefix: &str, value: f64, unit: &str) -> String {
    if prefix.is_empty() {
        format!("{:.2} {}", value, unit)
    } else {
        format!("{} {:.2} {}", prefix, value, unit)
    }
}
