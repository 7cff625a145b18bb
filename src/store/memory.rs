use parking_lot::Mutex;

use crate::model::{CatalogItem, Id, Matrix, MatrixFields, NewCatalogItem};
use crate::store::error::{StoreError, StoreResult};
use crate::store::traits::{CatalogStore, MatrixStore, Store};

/// Process-local store with the same observable behaviour as the Postgres
/// tables. Test double for the router; the server always runs on Postgres.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    catalogo: Vec<CatalogItem>,
    catalogo_seq: Id,
    matrices: Vec<StoredMatrix>,
    matrices_seq: Id,
}

/// `insumos` is kept serialized, as the JSONB column would hold it.
#[derive(Debug, Clone)]
struct StoredMatrix {
    id: Id,
    nombre: String,
    unidad: String,
    insumos: Option<String>,
}

impl StoredMatrix {
    fn encode(id: Id, fields: MatrixFields) -> StoreResult<Self> {
        let nombre = not_null("matrices", "nombre", fields.nombre)?;
        let unidad = not_null("matrices", "unidad", fields.unidad)?;
        let insumos = fields
            .insumos
            .map(|value| serde_json::to_string(&value))
            .transpose()?;

        Ok(Self {
            id,
            nombre,
            unidad,
            insumos,
        })
    }

    fn decode(&self) -> StoreResult<Matrix> {
        let insumos = self
            .insumos
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(Matrix {
            id: self.id,
            nombre: self.nombre.clone(),
            unidad: self.unidad.clone(),
            insumos,
        })
    }
}

fn not_null(table: &'static str, column: &'static str, value: Option<String>) -> StoreResult<String> {
    value.ok_or(StoreError::NotNull { table, column })
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CatalogStore for MemoryStore {
    async fn list_catalog(&self) -> StoreResult<Vec<CatalogItem>> {
        let mut items = self.tables.lock().catalogo.clone();
        items.sort_by(|a, b| a.nombre.cmp(&b.nombre));
        Ok(items)
    }

    async fn create_catalog_item(&self, item: NewCatalogItem) -> StoreResult<CatalogItem> {
        let nombre = not_null("catalogo", "nombre", item.nombre)?;
        let unidad = not_null("catalogo", "unidad", item.unidad)?;

        let mut tables = self.tables.lock();
        tables.catalogo_seq += 1;
        let created = CatalogItem {
            id: tables.catalogo_seq,
            nombre,
            unidad,
        };
        tables.catalogo.push(created.clone());
        Ok(created)
    }

    async fn delete_catalog_item(&self, id: Id) -> StoreResult<bool> {
        let mut tables = self.tables.lock();
        let before = tables.catalogo.len();
        tables.catalogo.retain(|item| item.id != id);
        Ok(tables.catalogo.len() < before)
    }
}

#[async_trait::async_trait]
impl MatrixStore for MemoryStore {
    async fn list_matrices(&self) -> StoreResult<Vec<Matrix>> {
        let mut rows = self.tables.lock().matrices.clone();
        rows.sort_by(|a, b| a.nombre.cmp(&b.nombre));
        rows.iter().map(StoredMatrix::decode).collect()
    }

    async fn create_matrix(&self, fields: MatrixFields) -> StoreResult<Matrix> {
        let mut tables = self.tables.lock();
        let stored = StoredMatrix::encode(tables.matrices_seq + 1, fields)?;
        tables.matrices_seq = stored.id;
        tables.matrices.push(stored.clone());
        stored.decode()
    }

    async fn update_matrix(&self, id: Id, fields: MatrixFields) -> StoreResult<Option<Matrix>> {
        let mut tables = self.tables.lock();
        let Some(slot) = tables.matrices.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };

        *slot = StoredMatrix::encode(id, fields)?;
        slot.decode().map(Some)
    }

    async fn delete_matrix(&self, id: Id) -> StoreResult<bool> {
        let mut tables = self.tables.lock();
        let before = tables.matrices.len();
        tables.matrices.retain(|row| row.id != id);
        Ok(tables.matrices.len() < before)
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn migrate(&self) -> StoreResult<()> {
        Ok(())
    }
}
