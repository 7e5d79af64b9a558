use serde::Deserialize;

/// Raw progress as submitted by a client: the slider math sends fractional
/// numbers, the input field sends whatever was typed.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProgressInput {
    Number(f64),
    Text(String),
}

impl From<f64> for ProgressInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for ProgressInput {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for ProgressInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Clamp raw progress input to an integer percentage in 0..=100.
///
/// Out-of-range and unparsable values are corrected rather than rejected:
/// numbers round to the nearest integer, non-numeric text counts as 0.
pub fn clamp_progress(raw: &ProgressInput) -> i32 {
    let value = match raw {
        ProgressInput::Number(value) => *value,
        ProgressInput::Text(raw) => raw.trim().parse::<f64>().unwrap_or(0.0),
    };
    if !value.is_finite() {
        return 0;
    }
    (value.round() as i64).clamp(0, 100) as i32
}
