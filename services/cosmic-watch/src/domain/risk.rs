use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::NeoError;

const LARGE_DIAMETER_KM: f64 = 0.5;
const CLOSE_APPROACH_KM: f64 = 750_000.0;

const DIAMETER_POINTS: u8 = 40;
const HAZARD_POINTS: u8 = 40;
const PROXIMITY_POINTS: u8 = 20;

const HIGH_THRESHOLD: u8 = 70;
const MEDIUM_THRESHOLD: u8 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_THRESHOLD {
            RiskLevel::High
        } else if score >= MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskAssessment {
    pub score: u8,
    pub level: RiskLevel,
}

/// Additive risk heuristic, 0..=100.
///
/// Both thresholds are strict: a 0.5 km body or a 750 000 km pass earns nothing.
pub fn score(diameter_km: f64, miss_distance_km: f64, hazardous: bool) -> RiskAssessment {
    let mut score = 0;

    if diameter_km > LARGE_DIAMETER_KM {
        score += DIAMETER_POINTS;
    }
    if hazardous {
        score += HAZARD_POINTS;
    }
    if miss_distance_km < CLOSE_APPROACH_KM {
        score += PROXIMITY_POINTS;
    }

    RiskAssessment {
        score,
        level: RiskLevel::from_score(score),
    }
}

/// Parse a decimal string as NeoWs delivers it, rejecting NaN and infinities.
pub fn parse_km(field: &'static str, raw: &str) -> Result<f64, NeoError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(NeoError::validation(field, raw)),
    }
}
