use std::collections::HashMap;

use emobility::database::Result;
use model::catalog::{LinkCategory, StationLink};
use sqlx::{Executor, Postgres};

use super::convert_error;

pub(crate) fn table(category: LinkCategory) -> &'static str {
    match category {
        LinkCategory::Plug => "station_plugs",
        LinkCategory::ChargingFacility => "station_charging_facilities",
        LinkCategory::ChargingMode => "station_charging_modes",
        LinkCategory::AuthenticationMode => "station_authentication_modes",
        LinkCategory::PaymentOption => "station_payment_options",
        LinkCategory::ValueAddedService => "station_value_added_services",
    }
}

pub async fn clear<'c, E>(executor: E, category: LinkCategory) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    super::delete_all(executor, table(category))
        .await
        .map_err(convert_error)
}

pub async fn put_all<'c, E>(
    executor: E,
    category: LinkCategory,
    links: &[StationLink],
) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let deduplicated: Vec<&StationLink> = links
        .iter()
        .map(|link| ((link.evse_id.raw(), link.catalog_id), link))
        .collect::<HashMap<_, _>>()
        .into_values()
        .collect();

    super::insert_all(
        executor,
        table(category),
        &["evse_id", "catalog_id"],
        &deduplicated,
        |query, link| query.bind(link.evse_id.raw()).bind(link.catalog_id),
        &["evse_id", "catalog_id"],
    )
    .await
    .map_err(convert_error)
}
