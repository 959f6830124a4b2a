//! Time values with unit suffixes (`30`, `5m`, `1w`)

use crate::error::{CoreError, Result};

const SEC_PER_MIN: u64 = 60;
const SEC_PER_HOUR: u64 = 3_600;
const SEC_PER_DAY: u64 = 86_400;
const SEC_PER_WEEK: u64 = 604_800;

/// Convert `<digits>[smhdw]` into seconds.
pub fn parse_time_suffix(value: &str) -> Result<u64> {
    let invalid = || CoreError::InvalidTime(value.to_string());

    let (digits, multiplier) = match value.as_bytes().last() {
        Some(b's') => (&value[..value.len() - 1], 1),
        Some(b'm') => (&value[..value.len() - 1], SEC_PER_MIN),
        Some(b'h') => (&value[..value.len() - 1], SEC_PER_HOUR),
        Some(b'd') => (&value[..value.len() - 1], SEC_PER_DAY),
        Some(b'w') => (&value[..value.len() - 1], SEC_PER_WEEK),
        Some(_) => (value, 1),
        None => return Err(invalid()),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    digits
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or_else(invalid)
}
