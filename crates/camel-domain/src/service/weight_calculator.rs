//! Net weight and price derivation, plus number display helpers

use crate::model::Rate;

/// Parse a weight typed by the operator; `None` when empty or not a finite number
pub fn parse_weight(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn recompute_net(gross_weight: f64, tare_weight: f64) -> f64 {
    gross_weight - tare_weight
}

pub fn recompute_price(net_weight: f64, rate: Rate) -> f64 {
    net_weight * f64::from(rate.per_kg())
}

/// Net weight from raw form text; unparsable input counts as 0
pub fn net_from_input(gross_text: &str, tare_text: &str) -> f64 {
    recompute_net(
        parse_weight(gross_text).unwrap_or(0.0),
        parse_weight(tare_text).unwrap_or(0.0),
    )
}

/// Shortest text form of a number (`30000`, `-0.5`), never `-0`
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Thousands-grouped display (`900,000,000`), at most three fraction digits
pub fn format_grouped(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let text = format_number(rounded);
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3);
    grouped.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("42000"), Some(42000.0));
        assert_eq!(parse_weight(" 12000 "), Some(12000.0));
        assert_eq!(parse_weight("-5.5"), Some(-5.5));
        assert_eq!(parse_weight(""), None);
        assert_eq!(parse_weight("   "), None);
        assert_eq!(parse_weight("12 000"), None);
        assert_eq!(parse_weight("inf"), None);
        assert_eq!(parse_weight("NaN"), None);
    }

    #[test]
    fn test_net_allows_negative() {
        assert_eq!(recompute_net(42000.0, 12000.0), 30000.0);
        assert_eq!(recompute_net(12000.0, 42000.0), -30000.0);
    }

    #[test]
    fn test_price_for_each_rate() {
        assert_eq!(recompute_price(30000.0, Rate::Standard), 900_000_000.0);
        assert_eq!(recompute_price(30000.0, Rate::Premium), 1_200_000_000.0);
        assert_eq!(recompute_price(-30000.0, Rate::Standard), -900_000_000.0);
    }

    #[test]
    fn test_net_from_input_treats_garbage_as_zero() {
        assert_eq!(net_from_input("", ""), 0.0);
        assert_eq!(net_from_input("100", "x"), 100.0);
        assert_eq!(net_from_input("x", "100"), -100.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(30000.0), "30000");
        assert_eq!(format_number(-30000.0), "-30000");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(900_000_000.0), "900000000");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(900_000_000.0), "900,000,000");
        assert_eq!(format_grouped(-900_000_000.0), "-900,000,000");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(1000.0), "1,000");
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(1234.5678), "1,234.568");
    }
}
