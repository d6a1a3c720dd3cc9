use chrono::{DateTime, Utc};

/// Axis labels above this are shown without cents
pub const WHOLE_DOLLAR_THRESHOLD: f64 = 10_000.0;

/// X axis label, e.g. `Oct 18`, in UTC.
pub fn format_date_label(timestamp_ms: u64) -> String {
    i64::try_from(timestamp_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|date| date.format("%b %-d").to_string())
        .unwrap_or_default()
}

/// Tooltip date, e.g. `Oct 18, 14:00 UTC`
pub fn format_date_time(timestamp_ms: u64) -> String {
    i64::try_from(timestamp_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|date| date.format("%b %-d, %H:%M UTC").to_string())
        .unwrap_or_default()
}

/// Axis label in USD with thousands separators: `$68,000` above the threshold, `$9.50` below.
pub fn format_usd(value: f64) -> String {
    let decimals = if value.abs() > WHOLE_DOLLAR_THRESHOLD { 0 } else { 2 };
    format_usd_with(value, decimals)
}

/// Price readout, always to the cent: `$68,123.46`
pub fn format_price(value: f64) -> String {
    format_usd_with(value, 2)
}

fn format_usd_with(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("${value}");
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    match fraction {
        Some(fraction) => format!("{sign}${grouped}.{fraction}"),
        None => format!("{sign}${grouped}"),
    }
}

pub fn format_percent(percent_change: f64) -> String {
    format!("{:.2}%", percent_change)
}
