use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::risk::{self, RiskLevel};
use crate::errors::NeoError;

/// One scored object as served by `/api/asteroids/feed`. Built per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearEarthObject {
    pub id: String,
    pub name: String,
    pub date: String,
    pub velocity_km_s: Option<f64>,
    pub miss_distance_km: f64,
    pub diameter_km: f64,
    pub hazardous: bool,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
}

// NeoWs sends most measurements as decimal strings but a few as plain numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Decimal {
    Number(f64),
    Text(String),
}

impl Decimal {
    fn to_f64(&self, field: &'static str) -> Result<f64, NeoError> {
        match self {
            Decimal::Number(v) => Ok(*v),
            Decimal::Text(s) => risk::parse_km(field, s),
        }
    }

    // Informational fields: an unreadable value is dropped, not an error.
    fn lenient(&self) -> Option<f64> {
        match self {
            Decimal::Number(v) => Some(*v),
            Decimal::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawObject {
    id: String,
    name: String,
    estimated_diameter: RawDiameter,
    is_potentially_hazardous_asteroid: bool,
    close_approach_data: Vec<RawApproach>,
}

#[derive(Debug, Deserialize)]
struct RawDiameter {
    kilometers: RawDiameterRange,
}

#[derive(Debug, Deserialize)]
struct RawDiameterRange {
    estimated_diameter_max: f64,
}

#[derive(Debug, Deserialize)]
struct RawApproach {
    close_approach_date: String,
    relative_velocity: RawVelocity,
    miss_distance: RawDistance,
}

#[derive(Debug, Deserialize)]
struct RawVelocity {
    kilometers_per_second: Decimal,
}

#[derive(Debug, Deserialize)]
struct RawDistance {
    kilometers: Decimal,
}

/// Flatten a NeoWs feed payload into scored records.
///
/// Output follows the payload's own order: date keys as they appear, then each
/// date's list. Any malformed object fails the whole feed.
pub fn assemble_feed(payload: &Value) -> Result<Vec<NearEarthObject>, NeoError> {
    let by_date = payload
        .get("near_earth_objects")
        .and_then(Value::as_object)
        .ok_or_else(|| NeoError::decode("feed is missing the near_earth_objects map"))?;

    let mut objects = Vec::new();

    for (date, records) in by_date {
        let records = Vec::<RawObject>::deserialize(records)
            .map_err(|e| NeoError::decode(format!("objects for {}: {}", date, e)))?;

        for raw in records {
            objects.push(flatten(raw)?);
        }
    }

    Ok(objects)
}

fn flatten(raw: RawObject) -> Result<NearEarthObject, NeoError> {
    let approach = raw.close_approach_data.into_iter().next().ok_or_else(|| {
        NeoError::decode(format!("object {} has no close_approach_data", raw.id))
    })?;

    let diameter_km = raw.estimated_diameter.kilometers.estimated_diameter_max;
    let miss_distance_km = approach.miss_distance.kilometers.to_f64("miss_distance_km")?;
    let velocity_km_s = approach.relative_velocity.kilometers_per_second.lenient();
    let hazardous = raw.is_potentially_hazardous_asteroid;

    let assessment = risk::score(diameter_km, miss_distance_km, hazardous);

    Ok(NearEarthObject {
        id: raw.id,
        name: raw.name,
        date: approach.close_approach_date,
        velocity_km_s,
        miss_distance_km,
        diameter_km,
        hazardous,
        risk_score: assessment.score,
        risk_level: assessment.level,
    })
}
