use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool, Row,
};

use crate::model::{CatalogItem, Id, Matrix, MatrixFields, NewCatalogItem};
use crate::store::error::StoreResult;
use crate::store::traits::{CatalogStore, MatrixStore, Store};

const CREATE_CATALOGO: &str = r#"
    CREATE TABLE IF NOT EXISTS catalogo (
        id SERIAL PRIMARY KEY,
        nombre TEXT NOT NULL,
        unidad TEXT NOT NULL
    )
"#;

const CREATE_MATRICES: &str = r#"
    CREATE TABLE IF NOT EXISTS matrices (
        id SERIAL PRIMARY KEY,
        nombre TEXT NOT NULL,
        unidad TEXT NOT NULL,
        insumos JSONB
    )
"#;

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL, or from
    /// the `PG*` environment variables when there is none.
    ///
    /// Connections are opened on first use, so an unreachable server does
    /// not stop the process from starting.
    pub fn new(database_url: Option<&str>, max_connections: u32) -> StoreResult<Self> {
        let options = match database_url {
            Some(url) => url.parse::<PgConnectOptions>()?,
            None => PgConnectOptions::new(),
        };

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy_with(options);

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn matrix_from_row(row: sqlx::postgres::PgRow) -> StoreResult<Matrix> {
    Ok(Matrix {
        id: row.try_get("id")?,
        nombre: row.try_get("nombre")?,
        unidad: row.try_get("unidad")?,
        insumos: row.try_get("insumos")?,
    })
}

#[async_trait::async_trait]
impl CatalogStore for PostgresStore {
    async fn list_catalog(&self) -> StoreResult<Vec<CatalogItem>> {
        let items = sqlx::query_as::<_, CatalogItem>(
            "SELECT id, nombre, unidad FROM catalogo ORDER BY nombre ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn create_catalog_item(&self, item: NewCatalogItem) -> StoreResult<CatalogItem> {
        let created = sqlx::query_as::<_, CatalogItem>(
            "INSERT INTO catalogo (nombre, unidad) VALUES ($1, $2) RETURNING id, nombre, unidad",
        )
        .bind(item.nombre)
        .bind(item.unidad)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn delete_catalog_item(&self, id: Id) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM catalogo WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl MatrixStore for PostgresStore {
    async fn list_matrices(&self) -> StoreResult<Vec<Matrix>> {
        let rows = sqlx::query("SELECT id, nombre, unidad, insumos FROM matrices ORDER BY nombre ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(matrix_from_row).collect()
    }

    async fn create_matrix(&self, fields: MatrixFields) -> StoreResult<Matrix> {
        let row = sqlx::query(
            r#"
            INSERT INTO matrices (nombre, unidad, insumos)
            VALUES ($1, $2, $3)
            RETURNING id, nombre, unidad, insumos
            "#,
        )
        .bind(fields.nombre)
        .bind(fields.unidad)
        .bind(fields.insumos)
        .fetch_one(&self.pool)
        .await?;

        matrix_from_row(row)
    }

    async fn update_matrix(&self, id: Id, fields: MatrixFields) -> StoreResult<Option<Matrix>> {
        let row = sqlx::query(
            r#"
            UPDATE matrices SET nombre = $1, unidad = $2, insumos = $3
            WHERE id = $4
            RETURNING id, nombre, unidad, insumos
            "#,
        )
        .bind(fields.nombre)
        .bind(fields.unidad)
        .bind(fields.insumos)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(matrix_from_row).transpose()
    }

    async fn delete_matrix(&self, id: Id) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM matrices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl Store for PostgresStore {
    async fn migrate(&self) -> StoreResult<()> {
        // Prepared statements carry one command each
        sqlx::query(CREATE_CATALOGO).execute(&self.pool).await?;
        sqlx::query(CREATE_MATRICES).execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
