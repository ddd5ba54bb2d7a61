use std::{env, error::Error};

use async_trait::async_trait;
use emobility::{
    catalog::CatalogSource,
    database::{Database, DatabaseOperations, DatabaseTransaction},
};
use model::{
    catalog::{Catalogs, LinkCategory, StationLink},
    operator::Operator,
    station::Station,
    translation::StationTranslation,
};
use queries::convert_error;
use sqlx::Transaction;

pub mod data_model;
pub mod queries;

pub struct DatabaseConnectionInfo {
    pub username: String,
    pub password: String,
    pub hostname: String,
    pub port: u16,
    pub database: String,
}

impl DatabaseConnectionInfo {
    pub fn from_env() -> Option<Self> {
        let username = env::var("DATABASE_USER").ok()?;
        let password = env::var("DATABASE_PASSWORD").ok()?;
        let hostname = env::var("DATABASE_HOST").ok()?;
        let port: u16 = env::var("DATABASE_PORT").ok()?.parse().ok()?;
        let database = env::var("DATABASE_NAME").ok()?;
        Some(Self {
            username,
            password,
            hostname,
            port,
            database,
        })
    }

    pub(self) fn postgres_url(self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.hostname, self.port, self.database
        )
    }
}

#[derive(Clone)]
pub struct PgDatabase {
    connection: sqlx::PgPool,
}

impl PgDatabase {
    pub async fn connect(
        database_connection_info: DatabaseConnectionInfo,
    ) -> Result<Self, Box<dyn Error>> {
        let url = database_connection_info.postgres_url();
        let pool = sqlx::postgres::PgPool::connect(&url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { connection: pool })
    }
}

pub struct PgDatabaseTransaction<'a> {
    tx: Transaction<'a, sqlx::Postgres>,
}

#[async_trait]
impl<'a> DatabaseTransaction for PgDatabaseTransaction<'a> {
    async fn commit(self) -> emobility::database::Result<()> {
        self.tx.commit().await.map_err(convert_error)
    }
}

#[async_trait]
impl Database for PgDatabase {
    type Transaction = PgDatabaseTransaction<'static>;

    const BULK_INSERT_MAX: usize = 999;

    async fn transaction(&self) -> emobility::database::Result<Self::Transaction> {
        let tx: Transaction<'static, sqlx::Postgres> =
            self.connection.begin().await.map_err(convert_error)?;

        Ok(PgDatabaseTransaction { tx })
    }
}

#[async_trait]
impl CatalogSource for PgDatabase {
    async fn load_catalogs(&self) -> emobility::database::Result<Catalogs> {
        queries::catalog::get_all(&self.connection).await
    }
}

#[async_trait]
impl<'a> DatabaseOperations for PgDatabaseTransaction<'a> {
    async fn clear_operators(&mut self) -> emobility::database::Result<()> {
        queries::operator::clear(&mut *self.tx).await
    }

    async fn put_operators(
        &mut self,
        operators: &[Operator],
    ) -> emobility::database::Result<()> {
        for chunk in operators.chunks(PgDatabase::BULK_INSERT_MAX) {
            queries::operator::put_all(&mut *self.tx, chunk).await?;
        }
        Ok(())
    }

    async fn clear_stations(&mut self) -> emobility::database::Result<()> {
        queries::station::clear(&mut *self.tx).await
    }

    async fn put_stations(
        &mut self,
        stations: &[Station],
    ) -> emobility::database::Result<()> {
        for chunk in stations.chunks(PgDatabase::BULK_INSERT_MAX) {
            queries::station::put_all(&mut *self.tx, chunk).await?;
        }
        Ok(())
    }

    async fn clear_translations(&mut self) -> emobility::database::Result<()> {
        queries::translation::clear(&mut *self.tx).await
    }

    async fn put_translations(
        &mut self,
        translations: &[StationTranslation],
    ) -> emobility::database::Result<()> {
        for chunk in translations.chunks(PgDatabase::BULK_INSERT_MAX) {
            queries::translation::put_all(&mut *self.tx, chunk).await?;
        }
        Ok(())
    }

    async fn clear_links(
        &mut self,
        category: LinkCategory,
    ) -> emobility::database::Result<()> {
        queries::link::clear(&mut *self.tx, category).await
    }

    async fn put_links(
        &mut self,
        category: LinkCategory,
        links: &[StationLink],
    ) -> emobility::database::Result<()> {
        for chunk in links.chunks(PgDatabase::BULK_INSERT_MAX) {
            queries::link::put_all(&mut *self.tx, category, chunk).await?;
        }
        Ok(())
    }
}
