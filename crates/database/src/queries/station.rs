use std::collections::HashMap;

use emobility::database::Result;
use model::station::Station;
use sqlx::{Executor, Postgres};

use crate::data_model::station::StationRow;

use super::convert_error;

const COLUMNS: &[&str] = &[
    "evse_id",
    "operator_id",
    "name",
    "street",
    "house_number",
    "zip_code",
    "city",
    "country",
    "latitude",
    "longitude",
    "entrance_latitude",
    "entrance_longitude",
    "capacity",
    "accessibility_id",
    "additional_info",
    "open_24_hours",
    "dynamic_info_available",
    "last_update",
    "hotline",
    "hub_operator_id",
    "clearinghouse_id",
];

pub async fn clear<'c, E>(executor: E) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    super::delete_all(executor, "stations")
        .await
        .map_err(convert_error)
}

pub async fn put_all<'c, E>(executor: E, stations: &[Station]) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let rows: Vec<StationRow> = stations
        .iter()
        .map(|station| (station.evse_id.raw(), StationRow::from_model(station)))
        .collect::<HashMap<_, _>>()
        .into_values()
        .collect();

    super::insert_all(
        executor,
        "stations",
        COLUMNS,
        &rows,
        |query, row| {
            query
                .bind(row.evse_id.clone())
                .bind(row.operator_id.clone())
                .bind(row.name.clone())
                .bind(row.street.clone())
                .bind(row.house_number.clone())
                .bind(row.zip_code.clone())
                .bind(row.city.clone())
                .bind(row.country.clone())
                .bind(row.latitude)
                .bind(row.longitude)
                .bind(row.entrance_latitude)
                .bind(row.entrance_longitude)
                .bind(row.capacity)
                .bind(row.accessibility_id)
                .bind(row.additional_info.clone())
                .bind(row.open_24_hours)
                .bind(row.dynamic_info_available)
                .bind(row.last_update)
                .bind(row.hotline.clone())
                .bind(row.hub_operator_id.clone())
                .bind(row.clearinghouse_id.clone())
        },
        &["evse_id"],
    )
    .await
    .map_err(convert_error)
}
