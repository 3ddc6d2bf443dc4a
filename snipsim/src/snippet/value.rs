//! Numeric values as the simulator sees them.
//!
//! Snippet values are text at heart; arithmetic coerces operands to `f64` and
//! prints the result back the way the JVM / JavaScript runtimes would for the
//! common cases: whole numbers without a fractional part, everything else in
//! its shortest natural decimal form.

use std::fmt;

/// A number parsed from a snippet literal or computed by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number(pub f64);

impl Number {
    /// Parse a plain numeric literal: optional `-`, digits, optional `.digits`.
    ///
    /// Anything else (exponents, hex, suffixes like `10L`, surrounding spaces)
    /// is rejected so that only what the declaration scans accept as a number
    /// is treated as one.
    pub fn parse_literal(s: &str) -> Option<Number> {
        if !is_numeric_literal(s) {
            return None;
        }
        s.parse().ok().map(Number)
    }

    /// Returns `true` if the value has no fractional part.
    pub fn is_whole(self) -> bool {
        self.0.is_finite() && self.0 == self.0.trunc()
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = self.0;
        if x.is_infinite() {
            return f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" });
        }
        if x.is_nan() {
            return f.write_str("NaN");
        }
        if self.is_whole() {
            if x.abs() < 9.0e15 {
                write!(f, "{}", x as i64)
            } else {
                write!(f, "{x:.0}")
            }
        } else {
            write!(f, "{x}")
        }
    }
}

/// Returns `true` if `s` is `-?\d+(\.\d+)?`.
pub fn is_numeric_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.map_or(true, all_digits)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_forms() {
        assert!(is_numeric_literal("42"));
        assert!(is_numeric_literal("-7"));
        assert!(is_numeric_literal("3.25"));
        assert!(is_numeric_literal("-0.5"));
        assert!(!is_numeric_literal(""));
        assert!(!is_numeric_literal("-"));
        assert!(!is_numeric_literal("1."));
        assert!(!is_numeric_literal(".5"));
        assert!(!is_numeric_literal("1e3"));
        assert!(!is_numeric_literal("10L"));
        assert!(!is_numeric_literal(" 1"));
    }

    #[test]
    fn parse_literal() {
        assert_eq!(Number::parse_literal("12"), Some(Number(12.0)));
        assert_eq!(Number::parse_literal("-2.5"), Some(Number(-2.5)));
        assert_eq!(Number::parse_literal("abc"), None);
    }

    #[test]
    fn whole_numbers_print_without_fraction() {
        assert_eq!(Number(5.0).to_string(), "5");
        assert_eq!(Number(-3.0).to_string(), "-3");
        assert_eq!(Number(0.0).to_string(), "0");
    }

    #[test]
    fn fractions_print_naturally() {
        assert_eq!(Number(5.5).to_string(), "5.5");
        assert_eq!(Number(0.1 + 0.2).to_string(), "0.30000000000000004");
        assert_eq!(Number(10.0 / 4.0).to_string(), "2.5");
    }

    #[test]
    fn huge_whole_numbers() {
        assert_eq!(Number(1e20).to_string(), "100000000000000000000");
    }

    #[test]
    fn non_finite() {
        assert_eq!(Number(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Number(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Number(f64::NAN).to_string(), "NaN");
    }
}
