//! Tenge amounts in the `ru-KZ` style: `1 234 567,5 ₸`.

/// Group separator between thousands.
const GROUP_SEPARATOR: char = '\u{a0}';

/// Symbol appended after the amount.
pub const TENGE_SIGN: &str = "₸";

/// Format `amount` as tenge with up to two fraction digits.
///
/// Trailing fractional zeros are dropped (`1500.50` → `1 500,5 ₸`). Returns
/// `None` for NaN and infinities.
#[must_use]
pub fn format_currency(amount: f64) -> Option<String> {
    if !amount.is_finite() {
        return None;
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + 8);
    let is_zero = whole.bytes().all(|b| b == b'0') && fraction.is_empty();
    if amount.is_sign_negative() && !is_zero {
        out.push('-');
    }
    push_grouped(&mut out, whole);
    if !fraction.is_empty() {
        out.push(',');
        out.push_str(fraction);
    }
    out.push(GROUP_SEPARATOR);
    out.push_str(TENGE_SIGN);
    Some(out)
}

fn push_grouped(out: &mut String, digits: &str) {
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
}
