//! Progress text formatting.
//!
//! A total counts as present only when it is non-zero; a zero total renders
//! the same as no total at all.

/// Format a progress value, e.g. `"3/10 (30%)"` or `"3"` without a total.
pub fn format_progress_text(current: f64, total: Option<f64>) -> String {
    match percentage(current, total) {
        Some((total, pct)) => format!(
            "{}/{} ({}%)",
            format_number(current),
            format_number(total),
            pct
        ),
        None => format_number(current),
    }
}

/// Format the percentage suffix, e.g. `" (30%)"`, or an empty string.
pub fn format_percentage_string(current: f64, total: Option<f64>) -> String {
    match percentage(current, total) {
        Some((_, pct)) => format!(" ({}%)", pct),
        None => String::new(),
    }
}

/// Returns the total when it should be displayed.
pub fn effective_total(total: Option<f64>) -> Option<f64> {
    total.filter(|t| *t != 0.0 && !t.is_nan())
}

/// Render a number the way a JavaScript client would print it.
///
/// Plain decimals between `1e-7` and `1e21` (`5`, `2.5`, `0.000001`),
/// exponent form outside that range (`1e-7`, `1.5e+21`), and `Infinity`,
/// `-Infinity` or `NaN` for non-finite values.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{}Infinity", sign);
    }
    if value == 0.0 {
        // Covers -0
        return "0".to_string();
    }

    // Shortest round-trip digits, e.g. "-1.2345e3"
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return format!("{}", value),
    };
    let exponent: i32 = match exponent.parse() {
        Ok(exponent) => exponent,
        Err(_) => return format!("{}", value),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}", sign, layout_digits(&digits, exponent))
}

/// Place significant digits around the decimal point.
///
/// `exponent` is the power of ten of the first digit.
fn layout_digits(digits: &str, exponent: i32) -> String {
    let k = digits.len() as i32;
    // Position of the decimal point relative to the first digit
    let n = exponent + 1;

    if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{}.{}", int_part, frac_part)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let exp_sign = if exponent < 0 { "-" } else { "+" };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, exp_sign, exponent.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, exp_sign, exponent.abs())
        }
    }
}

fn percentage(current: f64, total: Option<f64>) -> Option<(f64, String)> {
    let total = effective_total(total)?;
    let pct = round_half_up(current / total * 100.0);
    Some((total, format_number(pct)))
}

/// Round to the nearest integer, ties toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_text_with_total() {
        assert_eq!(format_progress_text(0.0, Some(10.0)), "0/10 (0%)");
        assert_eq!(format_progress_text(5.0, Some(10.0)), "5/10 (50%)");
        assert_eq!(format_progress_text(1.0, Some(3.0)), "1/3 (33%)");
        assert_eq!(format_progress_text(2.0, Some(3.0)), "2/3 (67%)");
    }

    #[test]
    fn test_progress_text_without_total() {
        assert_eq!(format_progress_text(0.0, None), "0");
        assert_eq!(format_progress_text(7.0, None), "7");
        assert_eq!(format_progress_text(2.5, None), "2.5");
    }

    #[test]
    fn test_zero_total_is_treated_as_absent() {
        assert_eq!(format_progress_text(4.0, Some(0.0)), "4");
        assert_eq!(format_percentage_string(4.0, Some(0.0)), "");
        assert_eq!(effective_total(Some(0.0)), None);
        assert_eq!(effective_total(Some(f64::NAN)), None);
    }

    #[test]
    fn test_current_may_exceed_total() {
        assert_eq!(format_progress_text(15.0, Some(10.0)), "15/10 (150%)");
    }

    #[test]
    fn test_percentage_string() {
        assert_eq!(format_percentage_string(3.0, Some(10.0)), " (30%)");
        assert_eq!(format_percentage_string(1.0, Some(8.0)), " (13%)");
        assert_eq!(format_percentage_string(3.0, None), "");
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(12.5), 13.0);
        assert_eq!(round_half_up(12.49), 12.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_number_exponent_thresholds() {
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(0.00012345), "0.00012345");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.23e22), "1.23e+22");
        assert_eq!(format_number(-2e-300), "-2e-300");
        assert_eq!(format_number(123456.789), "123456.789");
    }

    #[test]
    fn test_format_number_non_finite() {
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_extreme_progress_values() {
        assert_eq!(
            format_progress_text(1e21, Some(1e-300)),
            "1e+21/1e-300 (Infinity%)"
        );
        assert_eq!(
            format_percentage_string(-1e21, Some(1e-300)),
            " (-Infinity%)"
        );
        assert_eq!(format_progress_text(1e-7, None), "1e-7");
    }

    #[test]
    fn test_negative_percentage_rounds_to_zero() {
        assert_eq!(format_progress_text(-0.001, Some(10.0)), "-0.001/10 (0%)");
    }
}
