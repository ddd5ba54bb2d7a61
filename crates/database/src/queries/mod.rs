use std::fmt::Write as _;

use emobility::database::DatabaseError;
use sqlx::{
    postgres::PgArguments, query::Query, Executor, Postgres,
};

pub mod catalog;
pub mod link;
pub mod operator;
pub mod station;
pub mod translation;

pub(crate) fn convert_error(why: sqlx::Error) -> DatabaseError {
    match why {
        sqlx::Error::RowNotFound => DatabaseError::NotFound,
        _ => DatabaseError::Other(Box::new(why)),
    }
}

pub async fn delete_all<'c, E>(executor: E, table: &str) -> Result<(), sqlx::Error>
where
    E: Executor<'c, Database = Postgres>,
{
    let query = format!("DELETE FROM {};", table);
    sqlx::query(&query).execute(executor).await?;
    Ok(())
}

/// Multi-row insert updating on primary-key conflict. The caller must
/// not pass two rows with the same primary key in one batch; Postgres
/// rejects an upsert that touches a row twice.
pub async fn insert_all<'c, E, T, B>(
    executor: E,
    table: &str,
    columns: &[&str],
    values: &[T],
    bind: B,
    conflict_set: &[&str],
) -> Result<(), sqlx::Error>
where
    E: Executor<'c, Database = Postgres>,
    for<'a> B:
        Fn(Query<'a, Postgres, PgArguments>, &T) -> Query<'a, Postgres, PgArguments>,
{
    if values.is_empty() {
        return Ok(());
    }

    let query_str = build_insert(table, columns, values.len(), conflict_set);
    let mut query = sqlx::query::<Postgres>(&query_str);
    for value in values {
        query = bind(query, value);
    }
    query.execute(executor).await?;
    Ok(())
}

fn build_insert(
    table: &str,
    columns: &[&str],
    rows: usize,
    conflict_set: &[&str],
) -> String {
    let mut query_str =
        format!("INSERT INTO {} ({}) VALUES ", table, columns.join(", "));
    let mut placeholder_index = 1;
    for i in 0..rows {
        if i > 0 {
            query_str.push_str(", ");
        }
        query_str.push('(');
        for j in 0..columns.len() {
            if j > 0 {
                query_str.push_str(", ");
            }
            write!(&mut query_str, "${}", placeholder_index).unwrap();
            placeholder_index += 1;
        }
        query_str.push(')');
    }

    let update_set = columns
        .iter()
        .filter(|column| !conflict_set.contains(column))
        .map(|column| format!("{} = EXCLUDED.{}", column, column))
        .collect::<Vec<_>>()
        .join(", ");
    if update_set.is_empty() {
        // pure join rows carry nothing updatable besides their key
        write!(
            &mut query_str,
            " ON CONFLICT ({}) DO NOTHING",
            conflict_set.join(", ")
        )
        .unwrap();
    } else {
        write!(
            &mut query_str,
            " ON CONFLICT ({}) DO UPDATE SET {}",
            conflict_set.join(", "),
            update_set
        )
        .unwrap();
    }
    query_str.push(';');
    query_str
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_statement_shape() {
        assert_eq!(
            build_insert("operators", &["id", "name", "parent_id"], 2, &["id"]),
            "INSERT INTO operators (id, name, parent_id) VALUES \
             ($1, $2, $3), ($4, $5, $6) \
             ON CONFLICT (id) DO UPDATE SET \
             name = EXCLUDED.name, parent_id = EXCLUDED.parent_id;"
        );
    }

    #[test]
    fn key_only_rows_insert_do_nothing() {
        assert_eq!(
            build_insert(
                "station_plugs",
                &["evse_id", "catalog_id"],
                1,
                &["evse_id", "catalog_id"]
            ),
            "INSERT INTO station_plugs (evse_id, catalog_id) VALUES ($1, $2) \
             ON CONFLICT (evse_id, catalog_id) DO NOTHING;"
        );
    }
}
