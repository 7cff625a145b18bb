use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{lenient_text, Id};

/// A row of the `matrices` table.
///
/// `insumos` is an opaque document. The expected shape is a list of
/// `{ catalog id, quantity }` entries but nothing checks it, and entries
/// may point at catalog rows that were deleted since.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub id: Id,
    pub nombre: String,
    pub unidad: String,
    pub insumos: Option<Value>,
}

/// Body of `POST /api/matrices` and `PUT /api/matrices/:id`.
///
/// An update replaces all three fields, so an omitted `insumos` clears the
/// stored document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MatrixFields {
    #[serde(default, deserialize_with = "lenient_text")]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub unidad: Option<String>,
    #[serde(default)]
    pub insumos: Option<Value>,
}

impl MatrixFields {
    pub fn new(nombre: impl Into<String>, unidad: impl Into<String>, insumos: Value) -> Self {
        Self {
            nombre: Some(nombre.into()),
            unidad: Some(unidad.into()),
            insumos: Some(insumos),
        }
    }
}
