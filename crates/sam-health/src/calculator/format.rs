//! Display formatting for KPI values, following the site's German locale.

pub(crate) const NO_DATA: &str = "-";

/// Percentage with a fixed number of decimals, e.g. `95.0%`.
///
/// Halves round away from zero so `12.5` with no decimals reads `13%`.
pub fn percent(value: f64, decimals: u32) -> String {
    let rounded = round_to(value, decimals);
    format!("{:.*}%", decimals as usize, rounded)
}

/// Whole-euro amount in de-DE style: `.` groups thousands and a non-breaking
/// space separates the currency sign, e.g. `1.200 €`.
pub fn euro(value: f64) -> String {
    let whole = if value.is_finite() {
        value.round().clamp(i64::MIN as f64, i64::MAX as f64) as i64
    } else {
        0
    };

    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if whole < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    grouped.push('\u{a0}');
    grouped.push('€');
    grouped
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_keeps_trailing_zero() {
        assert_eq!(percent(95.0, 1), "95.0%");
        assert_eq!(percent(4.96, 1), "5.0%");
        assert_eq!(percent(100.0, 0), "100%");
    }

    #[test]
    fn percent_rounds_halves_up() {
        assert_eq!(percent(12.5, 0), "13%");
        assert_eq!(percent(66.666, 0), "67%");
    }

    #[test]
    fn euro_groups_thousands() {
        assert_eq!(euro(700.0), "700\u{a0}€");
        assert_eq!(euro(1200.4), "1.200\u{a0}€");
        assert_eq!(euro(1_234_567.5), "1.234.568\u{a0}€");
        assert_eq!(euro(0.0), "0\u{a0}€");
    }
}
