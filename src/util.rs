// Numeric helpers shared by the metrics, aggregation, and output modules.
//
// Everything here is total: empty inputs and zero denominators produce 0.0
// rather than NaN so callers never have to special-case an empty selection.
use num_format::{Locale, ToFormattedString};

/// Round to one decimal place, the precision every derived column is held at.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Divide, returning 0.0 when the denominator is zero.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

pub fn average(v: &[f64]) -> f64 {
    // Standard arithmetic mean; returns 0 for an empty slice to avoid NaNs.
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v.iter().copied().sum();
    sum / v.len() as f64
}

/// Smallest and largest value, or `None` for an empty input.
pub fn min_max<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Format a floating-point value with:
    // - a fixed number of decimal places, and
    // - locale-aware thousands separators (e.g., `1,234,567.89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let abs_n = n.abs();
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for counts in console messages
    // (e.g., `1,204 tasks`).
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round1_keeps_one_decimal() {
        assert_eq!(round1(84.96), 85.0);
        assert_eq!(round1(66.666), 66.7);
        assert_eq!(round1(0.0), 0.0);
    }

    #[test]
    fn ratio_and_average_are_total() {
        assert_eq!(ratio(5.0, 0.0), 0.0);
        assert_eq!(ratio(5.0, 10.0), 0.5);
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[70.0, 80.0, 90.0]), 80.0);
    }

    #[test]
    fn min_max_over_values() {
        assert_eq!(min_max(Vec::<f64>::new()), None);
        assert_eq!(min_max(vec![3.0, -1.0, 7.5]), Some((-1.0, 7.5)));
    }

    #[test]
    fn formats_with_separators() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-12.5, 1), "-12.5");
        assert_eq!(format_number(85.0, 1), "85.0");
        assert_eq!(format_number(42.0, 0), "42");
        assert_eq!(format_int(9855u32), "9,855");
    }
}
