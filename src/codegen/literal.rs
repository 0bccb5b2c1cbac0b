//! C++ literal formatting.

use std::fmt::Write;

/// Significant digits kept per sample.
pub const SIGNIFICANT_DIGITS: usize = 7;

/// Values per line inside an emitted array.
pub const VALUES_PER_LINE: usize = 12;

/// Formats `value` like C's `%.{precision}g`.
///
/// Scientific notation is used when the decimal exponent is below -4 or at
/// least `precision`; trailing zeros (and a bare trailing `.`) are removed.
pub fn format_general(value: f64, precision: usize) -> String {
    let precision = precision.max(1);
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    // Rounding to `precision` digits first decides the exponent, as printf does.
    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let mut out = trim_fraction(mantissa).to_string();
        let sign = if exponent < 0 { '-' } else { '+' };
        let _ = write!(out, "e{}{:02}", sign, exponent.unsigned_abs());
        out
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Formats one sample as a `float` literal, e.g. `0.475f`, `1.0f`, `1e-05f`.
pub fn float_literal(value: f32) -> String {
    let mut base = format_general(f64::from(value), SIGNIFICANT_DIGITS);
    let digits = base.strip_prefix('-').unwrap_or(&base);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        // "0f" is not a valid literal.
        base.push_str(".0");
    }
    base.push('f');
    base
}

/// Escapes `text` as the body of a C string literal.
pub fn escape_c_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_format_matches_printf() {
        assert_eq!(format_general(0.0, 7), "0");
        assert_eq!(format_general(-0.0, 7), "-0");
        assert_eq!(format_general(1.0, 7), "1");
        assert_eq!(format_general(0.5, 7), "0.5");
        assert_eq!(format_general(-0.475, 7), "-0.475");
        assert_eq!(format_general(0.999969482421875, 7), "0.9999695");
        assert_eq!(format_general(0.0001, 7), "0.0001");
        assert_eq!(format_general(0.00001, 7), "1e-05");
        assert_eq!(format_general(-0.000012345678, 7), "-1.234568e-05");
        assert_eq!(format_general(1234567.0, 7), "1234567");
        assert_eq!(format_general(12345678.0, 7), "1.234568e+07");
        assert_eq!(format_general(9999999.5, 7), "1e+07");
        assert_eq!(format_general(123.456, 3), "123");
    }

    #[test]
    fn float_literals_are_valid_cpp() {
        assert_eq!(float_literal(0.0), "0.0f");
        assert_eq!(float_literal(-0.0), "-0.0f");
        assert_eq!(float_literal(1.0), "1.0f");
        assert_eq!(float_literal(-1.0), "-1.0f");
        assert_eq!(float_literal(0.5), "0.5f");
        assert_eq!(float_literal(0.95), "0.95f");
        assert_eq!(float_literal(1e-5), "1e-05f");
    }

    #[test]
    fn escapes_string_literals() {
        assert_eq!(escape_c_string("Large Hall"), "Large Hall");
        assert_eq!(escape_c_string("a\"b\\c"), "a\\\"b\\\\c");
        assert_eq!(escape_c_string("tab\there"), "tab\\there");
        assert_eq!(escape_c_string("\u{1}"), "\\001");
    }
}
