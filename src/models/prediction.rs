use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::marks::MarksMap;

/// Body of `POST /predict`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Omitted for the single-catalog questionnaire
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Feature vector, ordered like `ML_FEATURES`
    pub marks: Vec<i64>,
    pub all_marks: MarksMap,
}

impl PredictionRequest {
    pub fn new(branch: Option<String>, all_marks: MarksMap) -> Self {
        Self {
            branch,
            marks: all_marks.feature_vector(),
            all_marks,
        }
    }
}

/// Probability in percent as sent by the service
///
/// The service may send whole numbers or values rounded to two decimals;
/// whole numbers display without a fraction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(transparent)]
pub struct Probability(pub f64);

impl Serialize for Probability {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl Probability {
    pub fn value(self) -> f64 {
        self.0
    }

    fn is_whole(self) -> bool {
        self.0.fract() == 0.0 && self.0.abs() < 1e15
    }

    /// Width for the probability bar, limited to 0..=100
    pub fn bar_width(self) -> f64 {
        self.0.clamp(0.0, 100.0)
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_whole() {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// One ranked entry of the `/predict` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPrediction {
    pub role: String,
    pub prob: Probability,
    /// Which model or heuristic produced the score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algo: Option<String>,
}
