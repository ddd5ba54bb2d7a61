use chrono::{DateTime, Utc};
use model::station::Station;
use sqlx::prelude::FromRow;

/// Wire shape of the `stations` table. The two flag columns are stored
/// as INT, so they convert from the model's bools on the way in.
#[derive(Debug, Clone, FromRow)]
pub struct StationRow {
    pub evse_id: String,
    pub operator_id: String,
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
    pub open_24_hours: i32,
    pub dynamic_info_available: i32,
    pub last_update: Option<DateTime<Utc>>,
    pub hotline: Option<String>,
    pub hub_operator_id: Option<String>,
    pub clearinghouse_id: Option<String>,
}

impl StationRow {
    pub fn from_model(station: &Station) -> Self {
        Self {
            evse_id: station.evse_id.raw(),
            operator_id: station.operator_id.raw(),
            name: station.name.clone(),
            street: station.street.clone(),
            house_number: station.house_number.clone(),
            zip_code: station.zip_code.clone(),
            city: station.city.clone(),
            country: station.country.clone(),
            latitude: station.latitude,
            longitude: station.longitude,
            entrance_latitude: station.entrance_latitude,
            entrance_longitude: station.entrance_longitude,
            capacity: station.capacity,
            accessibility_id: station.accessibility_id,
            additional_info: station.additional_info.clone(),
            open_24_hours: station.open_24_hours as i32,
            dynamic_info_available: station.dynamic_info_available as i32,
            last_update: station.last_update,
            hotline: station.hotline.clone(),
            hub_operator_id: station.hub_operator_id.clone(),
            clearinghouse_id: station.clearinghouse_id.clone(),
        }
    }
}
