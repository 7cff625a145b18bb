use crate::model::{CatalogItem, Id, Matrix, MatrixFields, NewCatalogItem};
use crate::store::error::StoreResult;

#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// All catalog items ordered by `nombre` ascending
    async fn list_catalog(&self) -> StoreResult<Vec<CatalogItem>>;
    /// Insert a catalog item and return the stored row with its new id
    async fn create_catalog_item(&self, item: NewCatalogItem) -> StoreResult<CatalogItem>;
    /// Delete by id, returning whether a row was removed
    async fn delete_catalog_item(&self, id: Id) -> StoreResult<bool>;
}

#[async_trait::async_trait]
pub trait MatrixStore: Send + Sync {
    /// All matrices ordered by `nombre` ascending
    async fn list_matrices(&self) -> StoreResult<Vec<Matrix>>;
    async fn create_matrix(&self, fields: MatrixFields) -> StoreResult<Matrix>;
    /// Replace `nombre`, `unidad` and `insumos` of an existing matrix.
    /// `None` when no row has the id.
    async fn update_matrix(&self, id: Id, fields: MatrixFields) -> StoreResult<Option<Matrix>>;
    async fn delete_matrix(&self, id: Id) -> StoreResult<bool>;
}

#[async_trait::async_trait]
pub trait Store: CatalogStore + MatrixStore + Send + Sync {
    /// Ensure the tables exist. Safe to call on every start.
    async fn migrate(&self) -> StoreResult<()>;

    /// Release held resources on shutdown
    async fn close(&self) {}
}
