//! Display formatting for ticker figures
//!
//! Pure, total functions: missing inputs render as a zero-equivalent
//! default instead of failing, and truncation always floors, never rounds.

/// Truncates a number to `digits` decimal places without rounding
///
/// 1.999 at 2 digits becomes 1.99, not 2.00.
pub fn truncate_decimals(num: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (num * scale).floor() / scale
}

/// Formats a number with thousands grouping after floor-truncating to
/// `digits` decimal places
///
/// Trailing fractional zeros are dropped, so 1.50 renders as "1.5" and
/// 163200000.0 as "163,200,000". `None` renders as "0".
pub fn format_decimals_with_commas(num: Option<f64>, digits: u32) -> String {
    let num = match num {
        Some(n) => n,
        None => return "0".to_string(),
    };

    let truncated = truncate_decimals(num, digits);
    group_thousands(&render_plain(truncated, digits))
}

/// Formats a ratio as a percentage: multiplied by 100, floor-truncated to
/// `digits` decimal places, with a trailing `%`
///
/// `None` renders as "0%".
pub fn format_percent_with_decimals(value: Option<f64>, digits: u32) -> String {
    let value = match value {
        Some(v) => v,
        None => return "0%".to_string(),
    };

    let truncated = truncate_decimals(value * 100.0, digits);
    format!("{}%", render_plain(truncated, digits))
}

/// Formats a number in millions once it crosses the million threshold
///
/// Values with `|num| >= 1_000_000` are divided by 1,000,000 before
/// truncation and grouping; smaller values pass through unchanged to
/// [`format_decimals_with_commas`]. `None` renders as "0".
pub fn format_millions_with_commas(num: Option<f64>, digits: u32) -> String {
    let num = match num {
        Some(n) => n,
        None => return "0".to_string(),
    };

    if num.abs() >= 1_000_000.0 {
        let truncated = truncate_decimals(num / 1_000_000.0, digits);
        group_thousands(&render_plain(truncated, digits))
    } else {
        format_decimals_with_commas(Some(num), digits)
    }
}

/// Renders a pre-truncated value with up to `digits` decimals, dropping
/// trailing fractional zeros
fn render_plain(truncated: f64, digits: u32) -> String {
    let rendered = format!("{:.*}", digits as usize, truncated);
    if rendered.contains('.') {
        rendered
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        rendered
    }
}

/// Inserts thousands separators into the integer part of a plain decimal
/// string, preserving sign and fraction
fn group_thousands(plain: &str) -> String {
    let (sign, rest) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };

    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_never_rounds_up() {
        assert_eq!(truncate_decimals(1.999, 2), 1.99);
        assert_eq!(truncate_decimals(0.129, 2), 0.12);
        assert_eq!(truncate_decimals(54.4, 2), 54.4);
        assert_eq!(truncate_decimals(99.999, 0), 99.0);
    }

    #[test]
    fn missing_input_yields_defaults() {
        assert_eq!(format_decimals_with_commas(None, 2), "0");
        assert_eq!(format_percent_with_decimals(None, 2), "0%");
        assert_eq!(format_millions_with_commas(None, 0), "0");
    }

    #[test]
    fn commas_group_every_three_digits() {
        assert_eq!(format_decimals_with_commas(Some(163_200_000.0), 2), "163,200,000");
        assert_eq!(format_decimals_with_commas(Some(1234.5), 2), "1,234.5");
        assert_eq!(format_decimals_with_commas(Some(-9876543.21), 2), "-9,876,543.21");
        assert_eq!(format_decimals_with_commas(Some(999.0), 2), "999");
    }

    #[test]
    fn trailing_fraction_zeros_are_dropped() {
        assert_eq!(format_decimals_with_commas(Some(1.5), 2), "1.5");
        assert_eq!(format_decimals_with_commas(Some(1.999), 2), "1.99");
        assert_eq!(format_decimals_with_commas(Some(2.0), 2), "2");
    }

    #[test]
    fn percent_multiplies_and_truncates() {
        assert_eq!(format_percent_with_decimals(Some(0.5), 2), "50%");
        assert_eq!(format_percent_with_decimals(Some(0.12999), 2), "12.99%");
        assert_eq!(format_percent_with_decimals(Some(1.0), 2), "100%");
    }

    #[test]
    fn millions_divide_only_above_threshold() {
        assert_eq!(format_millions_with_commas(Some(9_876_543.0), 0), "9");
        assert_eq!(format_millions_with_commas(Some(1_000_000.0), 0), "1");
        assert_eq!(format_millions_with_commas(Some(999_999.0), 0), "999,999");
        assert_eq!(format_millions_with_commas(Some(2_500_000_000.0), 1), "2,500");
    }
}
