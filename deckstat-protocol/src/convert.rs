//! Lenient numeric conversions
//!
//! Values on the wire are produced by a script, not a person, but a value
//! can still arrive garbled. Conversion never fails: the longest numeric
//! prefix is used and anything without one becomes zero.

/// Parse the leading decimal number of `text`
///
/// Accepts optional leading whitespace, an optional sign, digits, an
/// optional fraction and an optional exponent. The exponent is only taken
/// when digits follow it, so `"3e"` is `3.0`. Returns `0.0` when there is no
/// numeric prefix or the result is not finite.
pub fn lenient_f32(text: &str) -> f32 {
    let text = text.trim_start();
    let len = float_prefix_len(text.as_bytes());
    if len == 0 {
        return 0.0;
    }

    match text[..len].parse::<f32>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parse the leading decimal integer of `text`
///
/// Accepts optional leading whitespace, an optional sign and digits. Stops
/// at the first other character, so `"1024.7"` is `1024`. Saturates at the
/// `i32` bounds instead of wrapping.
pub fn lenient_i32(text: &str) -> i32 {
    let bytes = text.trim_start().as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let mut value: i32 = 0;
    for &byte in digits.iter().take_while(|b| b.is_ascii_digit()) {
        let digit = i32::from(byte - b'0');
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
    }
    value
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Length of the `[sign] digits [. digits] [e [sign] digits]` prefix
fn float_prefix_len(bytes: &[u8]) -> usize {
    let mut i = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = count_digits(&bytes[i + 1..]);
        if frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    i
}
