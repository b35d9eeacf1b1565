//! Formatting helpers for presenting dashboard figures.

use crate::stats::{Trend, TrendDirection};

/// Loss in millions, one decimal: `$12.3M`.
pub fn format_millions(value: f64) -> String {
    if !value.is_finite() {
        return "—".into();
    }
    format!("${}M", group_thousands(&format!("{value:.1}")))
}

/// Whole number with thousands separators: `12,345`.
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return "—".into();
    }
    group_thousands(&format!("{:.0}", value.round()))
}

/// Fraction as a percentage with one decimal: `0.125` -> `12.5%`.
pub fn format_fraction(value: f64) -> String {
    if !value.is_finite() {
        return "—".into();
    }
    format!("{:.1}%", value * 100.0)
}

/// Resolution times, in hours with one decimal.
pub fn format_hours(value: f64) -> String {
    format!("{value:.1} h")
}

/// Arrow + magnitude for a trend, or "flat".
pub fn format_trend(trend: Option<&Trend>) -> String {
    match trend {
        None => "—".into(),
        Some(trend) => match trend.direction {
            TrendDirection::Rising => format!("↑ {:.1}%", trend.percent),
            TrendDirection::Falling => format!("↓ {:.1}%", trend.percent.abs()),
            TrendDirection::Flat => "→ flat".into(),
        },
    }
}

/// CSS modifier for a trend badge. Rising incidents or losses read as bad news.
pub fn trend_class(trend: Option<&Trend>) -> &'static str {
    match trend.map(|t| t.direction) {
        Some(TrendDirection::Rising) => "trend trend--bad",
        Some(TrendDirection::Falling) => "trend trend--good",
        Some(TrendDirection::Flat) | None => "trend trend--neutral",
    }
}

fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millions_keep_one_decimal() {
        assert_eq!(format_millions(12.345), "$12.3M");
        assert_eq!(format_millions(1234.56), "$1,234.6M");
    }

    #[test]
    fn counts_are_grouped() {
        assert_eq!(format_count(3000.0), "3,000");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(-1234567.0), "-1,234,567");
    }

    #[test]
    fn hours_carry_their_unit() {
        assert_eq!(format_hours(24.0), "24.0 h");
        assert_eq!(format_hours(12.04), "12.0 h");
    }

    #[test]
    fn trend_text_uses_magnitude() {
        let falling = Trend::between(200.0, 150.0).unwrap();
        assert_eq!(format_trend(Some(&falling)), "↓ 25.0%");
        assert_eq!(trend_class(Some(&falling)), "trend trend--good");
        assert_eq!(format_trend(None), "—");
    }
}
