//! In-memory shape of the hierarchical operator/station feed. Parsing
//! the upstream transport into these records is the job of an external
//! collaborator; the importer only consumes them.

use serde::{Deserialize, Serialize};

/// One top-level operator as declared by the feed, with its full
/// station list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeedOperator {
    pub operator_id: String,
    pub operator_name: Option<String>,
    #[serde(default)]
    pub evse_data_records: Vec<EvseDataRecord>,
}

/// One charging-point record exactly as the feed delivers it. Boolean
/// flags arrive as strings, the multi-language additional info as one
/// packed delimited field.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EvseDataRecord {
    #[serde(rename = "EvseID")]
    pub evse_id: String,
    pub charging_station_name: Option<String>,
    pub en_charging_station_name: Option<String>,
    pub additional_info: Option<String>,
    #[serde(default)]
    pub address: Address,
    pub geo_coordinates: Option<GeoPoint>,
    pub geo_charging_point_entrance: Option<GeoPoint>,
    pub max_capacity: Option<i32>,
    pub accessibility: Option<String>,
    #[serde(default)]
    pub plugs: Vec<String>,
    #[serde(default)]
    pub charging_facilities: Vec<ChargingFacilityOption>,
    #[serde(default)]
    pub charging_modes: Vec<String>,
    #[serde(default)]
    pub authentication_modes: Vec<String>,
    #[serde(default)]
    pub payment_options: Vec<String>,
    #[serde(default)]
    pub value_added_services: Vec<String>,
    pub is_open_24_hours: Option<String>,
    pub dynamic_info_available: Option<String>,
    pub last_update: Option<String>,
    pub hotline_phone_num: Option<String>,
    #[serde(rename = "HubOperatorID")]
    pub hub_operator_id: Option<String>,
    #[serde(rename = "ClearinghouseID")]
    pub clearinghouse_id: Option<String>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    pub street: Option<String>,
    pub house_num: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// A charging-facility option names a facility class plus an optional
/// nominal power in kW; both attributes together identify the catalog
/// entry.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChargingFacilityOption {
    pub name: String,
    pub power: Option<i32>,
}
