//! Vital-sign risk scoring.
//!
//! Each vital is checked against fixed clinical thresholds. Contributions
//! are summed and the total is capped at 100. Every triggered threshold adds
//! one human-readable line to `concerning_values`, in the order heart rate,
//! blood pressure, SpO2, respiratory rate, GCS.

use tracing::debug;

use crate::models::{NormalizedVitals, RiskAssessment};

pub const MAX_RISK_SCORE: u8 = 100;

/// Score a normalized vitals record.
pub fn score(vitals: &NormalizedVitals) -> RiskAssessment {
    let mut total: i64 = 0;
    let mut concerning_values = Vec::new();

    // Check heart rate
    let hr = vitals.heart_rate;
    if hr > 120 || hr < 50 {
        total += if hr > 140 { 25 } else { 15 };
        let label = if hr > 120 { "tachycardic" } else { "bradycardic" };
        concerning_values.push(format!("Heart rate: {} BPM ({})", hr, label));
    }

    // Check blood pressure (systolic only)
    let systolic = vitals.systolic_bp;
    if systolic < 90 || systolic > 180 {
        total += if systolic < 80 { 30 } else { 20 };
        let label = if systolic < 90 { "hypotensive" } else { "hypertensive" };
        let reading = if vitals.blood_pressure_reading.is_empty() {
            systolic.to_string()
        } else {
            vitals.blood_pressure_reading.clone()
        };
        concerning_values.push(format!("Blood pressure: {} ({})", reading, label));
    }

    // Check oxygen saturation
    let spo2 = vitals.sp_o2;
    if spo2 < 95 {
        total += if spo2 < 85 { 35 } else { 25 };
        concerning_values.push(format!("Oxygen saturation: {}% (hypoxemic)", spo2));
    }

    // Check respiratory rate
    let rr = vitals.resp_rate;
    if rr > 24 || rr < 12 {
        total += if rr > 30 { 20 } else { 10 };
        let label = if rr > 24 { "tachypneic" } else { "bradypneic" };
        concerning_values.push(format!("Respiratory rate: {} ({})", rr, label));
    }

    // Check level of consciousness
    let gcs = vitals.gcs;
    if gcs < 15 {
        total += if gcs < 8 { 40 } else { i64::from(15 - gcs) * 5 };
        concerning_values.push(format!(
            "Glasgow Coma Scale: {}/15 (altered consciousness)",
            gcs
        ));
    }

    let risk_score = total.clamp(0, i64::from(MAX_RISK_SCORE)) as u8;
    debug!(total, risk_score, triggered = concerning_values.len(), "scored vital signs");

    RiskAssessment {
        risk_score,
        concerning_values,
        stability_index: MAX_RISK_SCORE - risk_score,
    }
}
