use std::collections::HashMap;

use emobility::database::Result;
use model::translation::StationTranslation;
use sqlx::{Executor, Postgres};

use super::convert_error;

pub async fn clear<'c, E>(executor: E) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    super::delete_all(executor, "station_translations")
        .await
        .map_err(convert_error)
}

pub async fn put_all<'c, E>(
    executor: E,
    translations: &[StationTranslation],
) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let deduplicated: Vec<&StationTranslation> = translations
        .iter()
        .map(|row| ((row.evse_id.raw(), row.language.clone()), row))
        .collect::<HashMap<_, _>>()
        .into_values()
        .collect();

    super::insert_all(
        executor,
        "station_translations",
        &["evse_id", "language", "charging_station_name", "additional_info"],
        &deduplicated,
        |query, row| {
            query
                .bind(row.evse_id.raw())
                .bind(row.language.clone())
                .bind(row.charging_station_name.clone())
                .bind(row.additional_info.clone())
        },
        &["evse_id", "language"],
    )
    .await
    .map_err(convert_error)
}
