use serde::Deserialize;
use serde_json::Value;

use crate::{
    domain::{Coordinates, OptionId, SelectOption},
    error::ShapeError,
};

/// Wire shape of a country or country-state entry: `{ "id": number, "value": string }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRecord {
    pub id: i64,
    pub value: String,
}

impl From<OptionRecord> for SelectOption {
    fn from(value: OptionRecord) -> Self {
        Self {
            id: OptionId(value.id),
            label: value.value,
        }
    }
}

/// Walks `body` and checks it is an array of `{id: integer, value: string}` objects.
///
/// Extra fields are ignored. The first mismatch wins, reported with a
/// `$[index].field` path.
pub fn validate_option_records(body: &Value) -> Result<Vec<OptionRecord>, ShapeError> {
    let Some(items) = body.as_array() else {
        return Err(ShapeError::new("$", "array"));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| validate_option_record(index, item))
        .collect()
}

fn validate_option_record(index: usize, item: &Value) -> Result<OptionRecord, ShapeError> {
    let Some(fields) = item.as_object() else {
        return Err(ShapeError::new(format!("$[{index}]"), "object"));
    };

    let id = match fields.get("id") {
        Some(Value::Number(number)) => integral_id(number)
            .ok_or_else(|| ShapeError::new(format!("$[{index}].id"), "integer"))?,
        _ => return Err(ShapeError::new(format!("$[{index}].id"), "number")),
    };

    let value = match fields.get("value") {
        Some(Value::String(value)) => value.clone(),
        _ => return Err(ShapeError::new(format!("$[{index}].value"), "string")),
    };

    Ok(OptionRecord { id, value })
}

fn integral_id(number: &serde_json::Number) -> Option<i64> {
    if let Some(id) = number.as_i64() {
        return Some(id);
    }
    let float = number.as_f64()?;
    if float.fract() == 0.0 && float >= i64::MIN as f64 && float <= i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}

/// Subset of a Google-Geocoding-compatible response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub geometry: GeocodeGeometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeGeometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for Coordinates {
    fn from(value: LatLng) -> Self {
        Coordinates::new(value.lat, value.lng)
    }
}

impl GeocodeResponse {
    pub fn first_location(&self) -> Option<Coordinates> {
        self.results
            .first()
            .map(|result| result.geometry.location.into())
    }
}
