use std::collections::HashMap;

use emobility::database::Result;
use model::operator::Operator;
use sqlx::{Executor, Postgres};

use super::convert_error;

pub async fn clear<'c, E>(executor: E) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    super::delete_all(executor, "operators")
        .await
        .map_err(convert_error)
}

pub async fn put_all<'c, E>(executor: E, operators: &[Operator]) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    // the resolver emits one row per deriving station; collapse to the
    // primary key here, as one upsert batch may touch a key only once
    let deduplicated: Vec<&Operator> = operators
        .iter()
        .map(|operator| (operator.id.raw(), operator))
        .collect::<HashMap<_, _>>()
        .into_values()
        .collect();

    super::insert_all(
        executor,
        "operators",
        &["id", "name", "parent_id"],
        &deduplicated,
        |query, operator| {
            query
                .bind(operator.id.raw())
                .bind(operator.name.clone())
                .bind(operator.parent_id.as_ref().map(|id| id.raw()))
        },
        &["id"],
    )
    .await
    .map_err(convert_error)
}
