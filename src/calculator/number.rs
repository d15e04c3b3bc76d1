//! Conversions between the calculator's text operands and `f64`.
//!
//! Operands are kept as text while they are being typed, so every
//! computation parses them first and prints the result back.

/// Display strings longer than this switch to exponential notation.
pub const MAX_DISPLAY_LEN: usize = 12;

/// Fraction digits used by the exponential display.
const EXPONENT_DIGITS: usize = 6;

/// Results are rounded to this many decimal places.
const ROUNDING_SCALE: f64 = 1e8;

/// Parse the longest numeric prefix of `input`.
///
/// Accepts an optional sign followed by `Infinity` or a decimal with an
/// optional exponent. Trailing garbage is ignored, so `"1e-"` reads as 1
/// and `"5."` as 5. Returns `None` when no prefix is a number.
pub fn parse_number(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        let value = f64::INFINITY;
        return Some(if bytes[0] == b'-' { -value } else { value });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        // A lone "." only counts when digits came before it.
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let literal = s[..end].trim_end_matches('.');
    literal.parse::<f64>().ok()
}

/// Print a number the way the display shows computed values.
///
/// Uses the shortest round-trip form, switching to exponent notation
/// (`1e+21`, `5e-7`) outside `1e-6..1e21`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        format!("{value}")
    } else {
        signed_exponent(&format!("{value:e}"))
    }
}

/// Significant digits needed to print any `f64` exactly.
const EXACT_DIGITS: usize = 767;

/// Exponential notation with six fraction digits, e.g. `1.234568e+12`.
///
/// Ties round away from zero, so `1234568500000` shows as `1.234569e+12`.
pub fn format_exponential(value: f64) -> String {
    if !value.is_finite() {
        return format_number(value);
    }

    let exact = format!("{:.prec$e}", value.abs(), prec = EXACT_DIGITS);
    let Some((mantissa, exp)) = exact.split_once('e') else {
        return signed_exponent(&format!("{value:.prec$e}", prec = EXPONENT_DIGITS));
    };
    let mut exp: i32 = exp.parse().unwrap_or(0);
    let digits: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    let mut kept = digits[..=EXPONENT_DIGITS].to_vec();
    if digits[EXPONENT_DIGITS + 1] >= 5 {
        let mut i = kept.len();
        loop {
            if i == 0 {
                // 9.999999|5 carries into a new leading digit.
                kept.insert(0, 1);
                kept.pop();
                exp += 1;
                break;
            }
            i -= 1;
            if kept[i] == 9 {
                kept[i] = 0;
            } else {
                kept[i] += 1;
                break;
            }
        }
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let fraction: String = kept[1..].iter().map(|d| char::from(b'0' + d)).collect();
    let exp_sign = if exp < 0 { "-" } else { "+" };
    format!("{sign}{}.{fraction}e{exp_sign}{}", kept[0], exp.abs())
}

/// Rust prints `1e21`; the display wants `1e+21`.
fn signed_exponent(formatted: &str) -> String {
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => formatted.to_string(),
    }
}

/// Round to eight decimal places, ties toward positive infinity.
pub fn round_result(value: f64) -> f64 {
    round_half_up(value * ROUNDING_SCALE) / ROUNDING_SCALE
}

fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Text shown for an operand: verbatim, or exponential when too long.
pub fn display_text(value: &str) -> String {
    if value.chars().count() > MAX_DISPLAY_LEN {
        format_exponential(parse_number(value).unwrap_or(f64::NAN))
    } else {
        value.to_string()
    }
}
