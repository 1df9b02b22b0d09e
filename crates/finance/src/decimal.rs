//! Exact parsing of decimal strings into scaled integers.

/// Parses a non-negative decimal string into an integer scaled by `10^scale`.
///
/// Thousands separators (`,`) and surrounding whitespace are ignored. Digits beyond
/// `scale` are rounded half-up on the first dropped digit. Returns `None` for
/// anything that is not a plain non-negative decimal.
pub(crate) fn parse_scaled(input: &str, scale: u32) -> Option<i64> {
    let owned: String = input.trim().chars().filter(|c| *c != ',').collect();
    let cleaned = owned.strip_prefix('+').unwrap_or(owned.as_str());
    if cleaned.is_empty() {
        return None;
    }

    let (int_part, frac_part) = match cleaned.split_once('.') {
        Some((i, f)) => (i, f),
        None => (cleaned, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit()) || !frac_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let factor = 10i128.pow(scale);
    let int_value: i128 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().ok()?
    };

    let mut frac_value: i128 = 0;
    let mut digits = frac_part.bytes();
    for _ in 0..scale {
        let d = digits.next().map(|b| (b - b'0') as i128).unwrap_or(0);
        frac_value = frac_value * 10 + d;
    }
    if let Some(next) = digits.next() {
        if next >= b'5' {
            frac_value += 1;
        }
    }

    let total = int_value.checked_mul(factor)?.checked_add(frac_value)?;
    i64::try_from(total).ok()
}

/// Divides a non-negative scaled product by `divisor`, rounding half-up.
pub(crate) fn div_half_up(value: i128, divisor: i128) -> i128 {
    (value + divisor / 2) / divisor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_rounding() {
        assert_eq!(parse_scaled("310.5", 2), Some(31050));
        assert_eq!(parse_scaled("1,234.567", 2), Some(123457));
        assert_eq!(parse_scaled("2.675", 2), Some(268));
        assert_eq!(parse_scaled("2.674", 2), Some(267));
        assert_eq!(parse_scaled("0.999", 2), Some(100));
        assert_eq!(parse_scaled("7", 3), Some(7000));
        assert_eq!(parse_scaled(".5", 2), Some(50));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_scaled("", 2), None);
        assert_eq!(parse_scaled("-1", 2), None);
        assert_eq!(parse_scaled("12a", 2), None);
        assert_eq!(parse_scaled(".", 2), None);
        assert_eq!(parse_scaled("1e5", 2), None);
    }

    #[test]
    fn half_up_division() {
        assert_eq!(div_half_up(4050, 100), 41);
        assert_eq!(div_half_up(4049, 100), 40);
        assert_eq!(div_half_up(0, 100), 0);
    }
}
