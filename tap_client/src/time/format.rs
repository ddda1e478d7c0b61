use std::time::Duration;

const UNITS: [&str; 4] = ["s", "ms", "µs", "ns"];
const SCALING: [f64; 4] = [1.0, 1e3, 1e6, 1e9];

/// Format a duration in seconds with an automatically chosen unit.
///
/// Durations in `(0, 1000)` seconds are scaled to the power-of-1000 bucket
/// that keeps the displayed number at or above one (capped at nanoseconds).
/// Durations of 1000 s or more stay in seconds; zero falls back to
/// nanoseconds. The number is rendered with three significant digits.
///
/// # Arguments
/// * `t` - Duration in seconds, must not be negative
///
/// # Example
/// ```
/// use tap_client::time::pretty_print_time;
/// assert_eq!(pretty_print_time(0.5), "500 ms");
/// assert_eq!(pretty_print_time(1500.0), "1.5e+03 s");
/// ```
pub fn pretty_print_time(t: f64) -> String {
    let order = if t > 0.0 && t < 1000.0 {
        let decade = t.log10().floor() as i64;
        (-decade.div_euclid(3)).min(3) as usize
    } else if t >= 1000.0 {
        0
    } else {
        3
    };

    format!("{} {}", format_significant(t * SCALING[order], 3), UNITS[order])
}

/// Format a [`Duration`] with [`pretty_print_time`].
pub fn format_duration(duration: Duration) -> String {
    pretty_print_time(duration.as_secs_f64())
}

/// Render `value` with `digits` significant digits, like C's `%.<digits>g`.
///
/// Fixed notation is used when the decimal exponent lies in
/// `[-4, digits)`, exponent notation (`1.5e+03`) otherwise. Trailing zeros
/// are removed in both forms.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let digits = digits.max(1);
    // Exponent after rounding to the requested precision
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exponent.abs()
        )
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_trailing_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
