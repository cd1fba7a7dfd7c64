//! Numeric literal recognition.
//!
//! Turns the raw text of a numeric literal into an abstract-typed snippet.
//! Accepted forms: decimal integers and floats (with optional exponent),
//! hexadecimal integers and floats, binary integers, each with an optional
//! width suffix (`f`/`h` for floats, `i`/`u` for integers). The suffix only
//! decides integer vs float; binding to a concrete width happens later in
//! the resolver. Anything else is not a literal and yields `None`.

use crate::snippet::Snippet;
use crate::types::Ty;

/// Classify raw literal text. Returns `None` if `text` is not a well-formed
/// numeric literal.
pub fn classify_literal(text: &str) -> Option<Snippet> {
    if let Some(rest) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return classify_hex(rest);
    }
    if let Some(rest) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        return classify_binary(rest);
    }
    classify_decimal(text)
}

fn strip_int_suffix(s: &str) -> &str {
    s.strip_suffix('i')
        .or_else(|| s.strip_suffix('u'))
        .unwrap_or(s)
}

fn int_snippet(value: u64) -> Snippet {
    Snippet::new(value.to_string(), Ty::AbstractInt)
}

fn classify_binary(rest: &str) -> Option<Snippet> {
    let digits = strip_int_suffix(rest);
    if digits.is_empty() || !digits.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }
    u64::from_str_radix(digits, 2).ok().map(int_snippet)
}

fn classify_hex(rest: &str) -> Option<Snippet> {
    if rest.contains(['.', 'p', 'P']) {
        return classify_hex_float(rest);
    }
    let digits = strip_int_suffix(rest);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(digits, 16).ok().map(int_snippet)
}

/// `1.8p3`, `1p-2`, `.8`, `a.`; a trailing `f`/`h` is only a suffix after
/// an exponent, since both are hex digits otherwise.
fn classify_hex_float(rest: &str) -> Option<Snippet> {
    let (mantissa, exponent) = match rest.find(['p', 'P']) {
        Some(i) => {
            let exp = &rest[i + 1..];
            let exp = exp
                .strip_suffix('f')
                .or_else(|| exp.strip_suffix('h'))
                .unwrap_or(exp);
            (&rest[..i], Some(exp))
        }
        None => (rest, None),
    };
    if exponent.is_none() && !mantissa.contains('.') {
        return None;
    }

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut value = 0f64;
    for ch in int_part.chars().chain(frac_part.chars()) {
        value = value * 16.0 + f64::from(ch.to_digit(16)?);
    }
    let exp = match exponent {
        Some(exp) => parse_exponent(exp)?,
        None => 0,
    };
    let scale = exp.checked_sub(4 * frac_part.len() as i32)?;
    let value = value * 2f64.powi(scale);
    if !value.is_finite() {
        return None;
    }
    Some(Snippet::new(float_text(value), Ty::AbstractFloat))
}

fn parse_exponent(exp: &str) -> Option<i32> {
    let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    exp.parse().ok()
}

fn classify_decimal(text: &str) -> Option<Snippet> {
    let (body, suffix) = match text.char_indices().last() {
        Some((i, ch @ ('f' | 'h' | 'i' | 'u'))) => (&text[..i], Some(ch)),
        _ => (text, None),
    };

    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (mantissa, None),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !frac_part.map_or(true, all_digits) {
        return None;
    }
    if int_part.is_empty() && frac_part.map_or(true, str::is_empty) {
        return None;
    }
    if let Some(exp) = exponent {
        parse_exponent(exp)?;
    }

    let is_float = frac_part.is_some() || exponent.is_some() || matches!(suffix, Some('f' | 'h'));
    if !is_float {
        return body.parse::<u64>().ok().map(int_snippet);
    }
    if matches!(suffix, Some('i' | 'u')) {
        return None;
    }
    let value: f64 = body.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let text = if frac_part.is_some() || exponent.is_some() {
        body.to_string()
    } else {
        format!("{}.0", body)
    };
    Some(Snippet::new(text, Ty::AbstractFloat))
}

/// Decimal rendering of a float that still reads as a float.
pub(crate) fn float_text(value: f64) -> String {
    let text = value.to_string();
    if text.contains(['.', 'e', 'E']) {
        text
    } else {
        format!("{}.0", text)
    }
}
