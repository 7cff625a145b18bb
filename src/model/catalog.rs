use serde::{Deserialize, Serialize};

use crate::model::{lenient_text, Id};

/// A row of the `catalogo` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CatalogItem {
    pub id: Id,
    pub nombre: String,
    pub unidad: String,
}

/// Body of `POST /api/catalogo`.
///
/// Both fields are optional: a missing value is sent to the database as
/// NULL and rejected there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewCatalogItem {
    #[serde(default, deserialize_with = "lenient_text")]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub unidad: Option<String>,
}

impl NewCatalogItem {
    pub fn new(nombre: impl Into<String>, unidad: impl Into<String>) -> Self {
        Self {
            nombre: Some(nombre.into()),
            unidad: Some(unidad.into()),
        }
    }
}
