//! Maps a resolved feed record onto the flat station row.

use chrono::{DateTime, Utc};
use model::{catalog::CatalogSnapshot, id::Id, station::Station};

use crate::{links, operators::StationRecord};

pub fn flatten(
    station: &StationRecord,
    catalogs: &CatalogSnapshot,
    unresolved: &mut usize,
) -> Station {
    let evse = &station.evse;
    let position = evse.geo_coordinates;
    let entrance = evse.geo_charging_point_entrance;

    Station {
        evse_id: Id::new(evse.evse_id.clone()),
        operator_id: Id::new(station.operator_id.clone()),
        name: evse.charging_station_name.clone(),
        street: evse.address.street.clone(),
        house_number: evse.address.house_num.clone(),
        zip_code: evse.address.zip_code.clone(),
        city: evse.address.city.clone(),
        country: evse.address.country.clone(),
        latitude: position.map(|p| p.latitude),
        longitude: position.map(|p| p.longitude),
        entrance_latitude: entrance.map(|p| p.latitude),
        entrance_longitude: entrance.map(|p| p.longitude),
        capacity: evse.max_capacity,
        accessibility_id: links::resolve_accessibility(evse, catalogs, unresolved),
        additional_info: evse.additional_info.clone(),
        open_24_hours: parse_flag(evse.is_open_24_hours.as_deref()),
        dynamic_info_available: parse_flag(evse.dynamic_info_available.as_deref()),
        last_update: parse_timestamp(evse.last_update.as_deref()),
        hotline: evse.hotline_phone_num.clone(),
        hub_operator_id: evse.hub_operator_id.clone(),
        clearinghouse_id: evse.clearinghouse_id.clone(),
    }
}

/// The feed encodes booleans as strings; anything but an affirmative
/// value counts as false.
fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(str::trim),
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1"
    )
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(value?.trim()).ok()?;
    Some(parsed.with_timezone(&Utc))
}
