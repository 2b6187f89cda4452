/// Fixed two-decimal rendering used for every seconds/percentage value shown
/// to the operator or stored in a transcript.
pub fn two_decimals(value: f64) -> String {
    format!("{:.2}", value)
}

/// Lenient integer parsing: leading whitespace, optional sign, then the
/// longest run of ASCII digits. `"42abc"` is 42, `"abc"` is `None`.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let value: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -value } else { value })
}
