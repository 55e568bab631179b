use serde::{Deserialize, Deserializer, Serialize};

/// Vital signs as entered on the assessment form.
///
/// Every field is kept as free text. Numbers sent by API clients are
/// accepted as well and converted to their textual form, so the same lenient
/// parsing applies no matter how the value arrived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSigns {
    #[serde(default, deserialize_with = "lenient_text")]
    pub heart_rate: Option<String>,
    /// "systolic/diastolic", e.g. "120/80"
    #[serde(default, deserialize_with = "lenient_text")]
    pub blood_pressure: Option<String>,
    #[serde(default, rename = "spO2", deserialize_with = "lenient_text")]
    pub sp_o2: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub resp_rate: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub temperature: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub gcs: Option<String>,
}

impl VitalSigns {
    /// Convenience constructor used by tests and benchmarks.
    pub fn from_text(
        heart_rate: &str,
        blood_pressure: &str,
        sp_o2: &str,
        resp_rate: &str,
        gcs: &str,
    ) -> Self {
        Self {
            heart_rate: Some(heart_rate.to_string()),
            blood_pressure: Some(blood_pressure.to_string()),
            sp_o2: Some(sp_o2.to_string()),
            resp_rate: Some(resp_rate.to_string()),
            temperature: None,
            gcs: Some(gcs.to_string()),
        }
    }
}

/// Numeric vitals after normalization. Unparseable readings are already
/// replaced by their defaults here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedVitals {
    pub heart_rate: i32,
    pub systolic_bp: i32,
    /// Blood pressure exactly as entered (trimmed), used in messages.
    pub blood_pressure_reading: String,
    pub sp_o2: i32,
    pub resp_rate: i32,
    pub gcs: i32,
    /// Informational only, never scored.
    pub temperature: Option<f64>,
}

impl Default for NormalizedVitals {
    fn default() -> Self {
        Self {
            heart_rate: 0,
            systolic_bp: 0,
            blood_pressure_reading: String::new(),
            sp_o2: 0,
            resp_rate: 0,
            gcs: 15,
            temperature: None,
        }
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
