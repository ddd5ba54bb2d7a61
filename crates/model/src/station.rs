use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    id::{HasId, Id},
    operator::Operator,
};

/// A single flattened charging-point row (one EVSE), ready for
/// persistence. `operator_id` always references an operator persisted in
/// the same run, original or derived.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub evse_id: Id<Station>,
    pub operator_id: Id<Operator>,
    pub name: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub entrance_latitude: Option<f64>,
    pub entrance_longitude: Option<f64>,
    pub capacity: Option<i32>,
    pub accessibility_id: Option<i32>,
    pub additional_info: Option<String>,
    pub open_24_hours: bool,
    pub dynamic_info_available: bool,
    pub last_update: Option<DateTime<Utc>>,
    pub hotline: Option<String>,
    pub hub_operator_id: Option<String>,
    pub clearinghouse_id: Option<String>,
}

impl HasId for Station {
    type IdType = String;
}
