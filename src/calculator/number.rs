//! Numeric text handling for calculator inputs.
//!
//! Raw field text is read the way a browser's `parseFloat` reads it, and
//! numbers are written back the way `Number#toString` writes them, so that
//! values and substituted expression literals look exactly like they do in
//! the web form this engine backs.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Longest numeric prefix accepted by `parseFloat`.
    /// `[0-9]` rather than `\d`: only ASCII digits count.
    static ref DECIMAL_PREFIX: Regex = Regex::new(
        r"^[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)"
    ).unwrap();
}

/// Parse the numeric prefix of `text`.
///
/// Returns `None` when no number can be read, which covers the empty
/// string, whitespace-only text and text starting with a non-numeric
/// character. Trailing characters after a valid prefix are ignored.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_start_matches(is_js_whitespace);
    let prefix = DECIMAL_PREFIX.find(trimmed)?.as_str();

    let (negative, unsigned) = match prefix.as_bytes().first() {
        Some(b'-') => (true, &prefix[1..]),
        Some(b'+') => (false, &prefix[1..]),
        _ => (false, prefix),
    };

    let magnitude = if unsigned == "Infinity" {
        f64::INFINITY
    } else {
        unsigned.parse::<f64>().ok()?
    };

    Some(if negative { -magnitude } else { magnitude })
}

/// White space as the browser defines it for `parseFloat`, `trim` and
/// source text: Unicode white space except NEL, plus the byte order mark.
pub(crate) fn is_js_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Format a number the way `Number#toString` does.
///
/// Uses the shortest digit string that round-trips, plain notation for
/// decimal exponents in `[-7, 21)` and exponent notation (`1e+21`,
/// `1.5e-7`) outside of it.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return text.to_string();
    }
    if value == 0.0 {
        // Covers negative zero as well.
        return "0".to_string();
    }

    // `{:e}` yields the shortest round-trip mantissa, e.g. "1.2345e3".
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    // value = 0.d1d2...dk * 10^n
    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{int_part}.{frac_part}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let e = n - 1;
        let sign = if e < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{}", e.abs())
        } else {
            format!("{first}.{rest}e{sign}{}", e.abs())
        }
    };

    if value < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("-123.7"), Some(-123.7));
        assert_eq!(parse_number("+5"), Some(5.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("-.5"), Some(-0.5));
        assert_eq!(parse_number("5."), Some(5.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("2.5E-3"), Some(0.0025));
    }

    #[test]
    fn test_invalid_input_rejected() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("e5"), None);
        assert_eq!(parse_number("NaN"), None);
        // Full-width digits are not ASCII digits.
        assert_eq!(parse_number("\u{ff11}"), None);
    }

    #[test]
    fn test_prefix_and_whitespace() {
        assert_eq!(parse_number("  7"), Some(7.0));
        assert_eq!(parse_number("\u{feff}7"), Some(7.0));
        assert_eq!(parse_number("12px"), Some(12.0));
        assert_eq!(parse_number("3.14.15"), Some(3.14));
        assert_eq!(parse_number("1e"), Some(1.0));
        assert_eq!(parse_number("1e+"), Some(1.0));
        assert_eq!(parse_number("7 8"), Some(7.0));
    }

    #[test]
    fn test_infinities() {
        assert_eq!(parse_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_number("1e400"), Some(f64::INFINITY));
        assert_eq!(parse_number("infinity"), None);
    }

    #[test]
    fn test_negative_zero_parses() {
        let zero = parse_number("-0").unwrap();
        assert_eq!(zero, 0.0);
        assert!(zero.is_sign_negative());
    }

    #[test]
    fn test_format_integers_and_decimals() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(-5.0), "-5");
        assert_eq!(format_number(123.7), "123.7");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333333333");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_exponent_boundaries() {
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e21), "1.5e+21");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(0.0000015), "0.0000015");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(-2.5e-8), "-2.5e-8");
        assert_eq!(format_number(f64::MAX), "1.7976931348623157e+308");
    }

    #[test]
    fn test_format_special_values() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_formatted_values_parse_back() {
        for value in [0.1, -42.5, 1e21, 3.4e-9, 123456789.125, f64::MIN_POSITIVE] {
            assert_eq!(parse_number(&format_number(value)), Some(value));
        }
    }
}
