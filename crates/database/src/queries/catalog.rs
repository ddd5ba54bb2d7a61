use emobility::database::Result;
use model::catalog::{CatalogEntry, Catalogs, ChargingFacilityEntry};
use sqlx::{Executor, Postgres};

use crate::data_model::catalog::{CatalogRow, ChargingFacilityRow};

use super::convert_error;

async fn get_entries<'c, E>(executor: E, table: &str) -> Result<Vec<CatalogEntry>>
where
    E: Executor<'c, Database = Postgres>,
{
    let query = format!("SELECT id, name FROM {} ORDER BY id;", table);
    let rows: Vec<CatalogRow> = sqlx::query_as(&query)
        .fetch_all(executor)
        .await
        .map_err(convert_error)?;
    Ok(rows.into_iter().map(CatalogRow::to_model).collect())
}

async fn get_charging_facilities<'c, E>(
    executor: E,
) -> Result<Vec<ChargingFacilityEntry>>
where
    E: Executor<'c, Database = Postgres>,
{
    let rows: Vec<ChargingFacilityRow> =
        sqlx::query_as("SELECT id, name, power FROM charging_facilities ORDER BY id;")
            .fetch_all(executor)
            .await
            .map_err(convert_error)?;
    Ok(rows
        .into_iter()
        .map(ChargingFacilityRow::to_model)
        .collect())
}

/// Reads all seven reference catalogs. Reference data is small and
/// changes out of band, so one load per import run is enough.
pub async fn get_all(pool: &sqlx::PgPool) -> Result<Catalogs> {
    Ok(Catalogs {
        accessibility: get_entries(pool, "accessibility_types").await?,
        plugs: get_entries(pool, "plug_types").await?,
        charging_facilities: get_charging_facilities(pool).await?,
        charging_modes: get_entries(pool, "charging_modes").await?,
        authentication_modes: get_entries(pool, "authentication_modes").await?,
        payment_options: get_entries(pool, "payment_options").await?,
        value_added_services: get_entries(pool, "value_added_services").await?,
    })
}
