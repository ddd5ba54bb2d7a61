//! Catalog collaborator: supplies the full reference data of all seven
//! enumerated categories once per run. The loaded [`Catalogs`] are
//! turned into a [`CatalogSnapshot`] and passed around read-only from
//! there on.

use async_trait::async_trait;
pub use model::catalog::{Catalogs, CatalogSnapshot};

use crate::database::Result;

#[async_trait]
pub trait CatalogSource {
    async fn load_catalogs(&self) -> Result<Catalogs>;
}
