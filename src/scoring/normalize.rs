//! Input normalization for free-text vital signs.
//!
//! Nothing here fails: unreadable readings fall back to defaults (0, or 15
//! for GCS) so that scoring always has a complete record to work with.

use tracing::debug;

use crate::models::{NormalizedVitals, VitalSigns};

/// GCS assumed when none was recorded (fully alert).
pub const DEFAULT_GCS: i32 = 15;

/// Turn a loosely typed vitals record into numbers.
pub fn normalize(vitals: &VitalSigns) -> NormalizedVitals {
    let reading = vitals
        .blood_pressure
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let normalized = NormalizedVitals {
        heart_rate: int_or_zero(vitals.heart_rate.as_deref()),
        systolic_bp: systolic(&reading),
        blood_pressure_reading: reading,
        sp_o2: int_or_zero(vitals.sp_o2.as_deref()),
        resp_rate: int_or_zero(vitals.resp_rate.as_deref()),
        gcs: match vitals.gcs.as_deref().and_then(parse_leading_int) {
            Some(gcs) if gcs != 0 => gcs,
            _ => DEFAULT_GCS,
        },
        temperature: vitals
            .temperature
            .as_deref()
            .and_then(|t| t.trim().parse::<f64>().ok())
            .filter(|t| t.is_finite()),
    };

    debug!(?normalized, "normalized vital signs");
    normalized
}

/// Systolic component of a "systolic/diastolic" reading. Readings without a
/// slash are rejected.
pub fn systolic(reading: &str) -> i32 {
    match reading.split_once('/') {
        Some((systolic, _)) => parse_leading_int(systolic).unwrap_or(0),
        None => 0,
    }
}

/// Read the integer at the start of `text`.
///
/// Leading whitespace and a single sign are accepted, then digits up to the
/// first non-digit ("98.6" reads as 98, "120abc" as 120). Returns `None` when
/// there are no digits at all. Values beyond `i32` saturate.
pub fn parse_leading_int(text: &str) -> Option<i32> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits: &str = {
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        &digits[..end]
    };
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    let value = if negative { -magnitude } else { magnitude };
    Some(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

fn int_or_zero(text: Option<&str>) -> i32 {
    text.and_then(parse_leading_int).unwrap_or(0)
}
