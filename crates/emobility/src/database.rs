//! Contract of the destination store. Per table it exposes exactly the
//! two operations the clear-and-replace import needs, plus whole-phase
//! transactions. Bulk inserts update on primary-key conflict, which is
//! where duplicate rows produced by the resolvers collapse.

use std::{error, result};

use async_trait::async_trait;
use model::{
    catalog::{LinkCategory, StationLink},
    operator::Operator,
    station::Station,
    translation::StationTranslation,
};

#[derive(Debug)]
pub enum DatabaseError {
    NotFound,
    Other(Box<dyn error::Error + Send + Sync>),
}

impl DatabaseError {
    pub fn other<E: error::Error + Send + Sync + 'static>(why: E) -> Self {
        Self::Other(Box::new(why))
    }
}

pub type Result<T> = result::Result<T, DatabaseError>;

#[async_trait]
pub trait DatabaseOperations {
    async fn clear_operators(&mut self) -> Result<()>;
    async fn put_operators(&mut self, operators: &[Operator]) -> Result<()>;

    async fn clear_stations(&mut self) -> Result<()>;
    async fn put_stations(&mut self, stations: &[Station]) -> Result<()>;

    async fn clear_translations(&mut self) -> Result<()>;
    async fn put_translations(
        &mut self,
        translations: &[StationTranslation],
    ) -> Result<()>;

    async fn clear_links(&mut self, category: LinkCategory) -> Result<()>;
    async fn put_links(
        &mut self,
        category: LinkCategory,
        links: &[StationLink],
    ) -> Result<()>;
}

/// Dropping a transaction without committing rolls every operation
/// issued through it back.
#[async_trait]
pub trait DatabaseTransaction: DatabaseOperations {
    async fn commit(self) -> Result<()>;
}

/// A destination store for the import. Concurrent access is possible by
/// cloning the store handle, but a single run owns the full
/// clear-and-replace cycle exclusively. Every write goes through a
/// transaction; each import phase is atomic.
#[async_trait]
pub trait Database: Clone + Send + Sync + Sized {
    type Transaction: DatabaseTransaction + Send;

    const BULK_INSERT_MAX: usize;

    async fn transaction(&self) -> Result<Self::Transaction>;
}
