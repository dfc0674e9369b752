//! Deterministic screening score over BRFSS-style health indicators.
//!
//! Stands in for the model service when it is unavailable; the response has
//! the same shape and category thresholds.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::GatewayError;

pub const MEDIUM_THRESHOLD: f64 = 0.5;
pub const HIGH_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    pub fn from_probability(p: f64) -> Self {
        if p > HIGH_THRESHOLD {
            Self::High
        } else if p > MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::Low => "Low risk. Keep up your current habits.",
            Self::Medium => "Moderate risk. Consider a check-up with your doctor.",
            Self::High => "High risk. Please consult a doctor soon.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    #[serde(rename = "RiskPercent")]
    pub risk_percent: f64,
    #[serde(rename = "Category")]
    pub category: RiskCategory,
    #[serde(rename = "Message")]
    pub message: String,
}

/// Scores a `/api/risk` payload. Features are read from its `features`
/// object when present, otherwise from the top level.
pub fn assess(payload: &Map<String, Value>) -> Result<RiskAssessment, GatewayError> {
    let features = match payload.get("features") {
        Some(Value::Object(inner)) => inner,
        Some(_) => {
            return Err(GatewayError::InvalidBody(
                "'features' must be a JSON object".to_string(),
            ));
        }
        None => payload,
    };

    let value = |name: &str| feature(features, name);

    let mut points = 0u32;
    if value("HighBP")? >= 1.0 {
        points += 15;
    }
    if value("HighChol")? >= 1.0 {
        points += 10;
    }

    let bmi = value("BMI")?;
    if bmi >= 30.0 {
        points += 20;
    } else if bmi >= 25.0 {
        points += 10;
    }

    // BRFSS age bucket: 7 is 50-54, 9 is 60-64.
    let age = value("Age")?;
    if age >= 9.0 {
        points += 15;
    } else if age >= 7.0 {
        points += 8;
    }

    // 1 (excellent) to 5 (poor)
    let general_health = value("GenHlth")?;
    if general_health >= 4.0 {
        points += 15;
    } else if (general_health - 3.0).abs() < f64::EPSILON {
        points += 5;
    }

    if value("HeartDiseaseorAttack")? >= 1.0 {
        points += 8;
    }
    if value("DiffWalk")? >= 1.0 {
        points += 7;
    }
    if value("Stroke")? >= 1.0 {
        points += 5;
    }

    let risk = (f64::from(points) / 100.0).min(1.0);
    let category = RiskCategory::from_probability(risk);

    Ok(RiskAssessment {
        risk_percent: risk,
        category,
        message: category.message().to_string(),
    })
}

/// Missing features count as zero. Numbers, booleans and numeric strings
/// are accepted.
fn feature(features: &Map<String, Value>, name: &str) -> Result<f64, GatewayError> {
    match features.get(name) {
        None => Ok(0.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| GatewayError::InvalidFeature(name.to_string())),
        Some(Value::Bool(b)) => Ok(if *b { 1.0 } else { 0.0 }),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| GatewayError::InvalidFeature(name.to_string())),
        Some(_) => Err(GatewayError::InvalidFeature(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn empty_payload_is_low_risk() {
        let result = assess(&Map::new()).unwrap();
        assert!(result.risk_percent.abs() < f64::EPSILON);
        assert_eq!(result.category, RiskCategory::Low);
    }

    #[test]
    fn reads_nested_features_object() {
        let nested = assess(&object(json!({
            "features": { "HighBP": 1, "HighChol": 1, "BMI": 31, "Age": 10 }
        })))
        .unwrap();
        let flat = assess(&object(json!({ "HighBP": 1, "HighChol": 1, "BMI": 31, "Age": 10 })))
            .unwrap();

        assert_eq!(nested, flat);
        assert!((nested.risk_percent - 0.60).abs() < 1e-9);
        assert_eq!(nested.category, RiskCategory::Medium);
    }

    #[test]
    fn worst_case_is_high_and_capped() {
        let result = assess(&object(json!({
            "HighBP": 1, "HighChol": 1, "BMI": 40, "Age": 13, "GenHlth": 5,
            "HeartDiseaseorAttack": 1, "DiffWalk": 1, "Stroke": 1
        })))
        .unwrap();

        assert!((result.risk_percent - 0.95).abs() < 1e-9);
        assert!(result.risk_percent <= 1.0);
        assert_eq!(result.category, RiskCategory::High);
    }

    #[test]
    fn categories_use_strict_thresholds() {
        assert_eq!(RiskCategory::from_probability(0.5), RiskCategory::Low);
        assert_eq!(RiskCategory::from_probability(0.51), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_probability(0.8), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_probability(0.81), RiskCategory::High);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let result = assess(&object(json!({ "BMI": "27.5" }))).unwrap();
        assert!((result.risk_percent - 0.10).abs() < 1e-9);
    }

    #[test]
    fn non_numeric_feature_is_rejected() {
        let err = assess(&object(json!({ "BMI": "tall" }))).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidFeature(name) if name == "BMI"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let result = assess(&object(json!({ "Nickname": "bob", "HighBP": 1 }))).unwrap();
        assert!((result.risk_percent - 0.15).abs() < 1e-9);
    }

    #[test]
    fn serializes_in_model_service_shape() {
        let json = serde_json::to_value(assess(&Map::new()).unwrap()).unwrap();
        assert_eq!(json["Category"], "low");
        assert!(json.get("RiskPercent").is_some());
        assert!(json.get("Message").is_some());
    }
}
