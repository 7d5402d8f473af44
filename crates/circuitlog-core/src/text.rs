//! Keystroke validation and numeric string helpers.
//!
//! Row inputs are validated per keystroke: reps accept integers only,
//! weight accepts a decimal numeric string. Invalid input is dropped
//! silently by the caller.

/// True when `value` is a non-empty run of ASCII digits.
pub fn validate_number(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// True when `value` is digits with at most one decimal point and at
/// least one digit.
pub fn validate_decimal_number(value: &str) -> bool {
    let mut seen_dot = false;
    let mut seen_digit = false;
    for b in value.bytes() {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}

/// Re-interpret a digit string as a two-decimal value: "2" -> "0.02",
/// "705" -> "7.05". Non-digit characters are stripped first.
pub fn decimal_from_digits(value: &str) -> String {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    let cents: u64 = digits.parse().unwrap_or(0);
    format!("{}.{:02}", cents / 100, cents % 100)
}
