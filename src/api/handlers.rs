use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::model::{CatalogItem, Id, Matrix, MatrixFields, NewCatalogItem};
use crate::store::traits::Store;

pub type AppState<S> = Arc<S>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Body of every DELETE answer, whether or not a row existed
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

impl DeleteResponse {
    fn ok() -> Self {
        Self { success: true }
    }
}

// Catalog

pub async fn list_catalog<S: Store>(
    State(store): State<AppState<S>>,
) -> Result<Json<Vec<CatalogItem>>, ApiError> {
    Ok(Json(store.list_catalog().await?))
}

pub async fn create_catalog_item<S: Store>(
    State(store): State<AppState<S>>,
    body: Result<Json<NewCatalogItem>, JsonRejection>,
) -> Result<Json<CatalogItem>, ApiError> {
    let Json(item) = body?;
    Ok(Json(store.create_catalog_item(item).await?))
}

pub async fn delete_catalog_item<S: Store>(
    State(store): State<AppState<S>>,
    id: Result<Path<Id>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(id) = id?;
    store.delete_catalog_item(id).await?;
    Ok(Json(DeleteResponse::ok()))
}

// Matrices

pub async fn list_matrices<S: Store>(
    State(store): State<AppState<S>>,
) -> Result<Json<Vec<Matrix>>, ApiError> {
    Ok(Json(store.list_matrices().await?))
}

pub async fn create_matrix<S: Store>(
    State(store): State<AppState<S>>,
    body: Result<Json<MatrixFields>, JsonRejection>,
) -> Result<Json<Matrix>, ApiError> {
    let Json(fields) = body?;
    Ok(Json(store.create_matrix(fields).await?))
}

/// Full replace. An unknown id still answers 200, with an empty JSON-typed body.
pub async fn update_matrix<S: Store>(
    State(store): State<AppState<S>>,
    id: Result<Path<Id>, PathRejection>,
    body: Result<Json<MatrixFields>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    let Json(fields) = body?;

    match store.update_matrix(id, fields).await? {
        Some(matrix) => Ok(Json(matrix).into_response()),
        None => {
            log::debug!("update of matrix {} matched no row", id);
            Ok((StatusCode::OK, [(header::CONTENT_TYPE, "application/json")]).into_response())
        }
    }
}

pub async fn delete_matrix<S: Store>(
    State(store): State<AppState<S>>,
    id: Result<Path<Id>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(id) = id?;
    store.delete_matrix(id).await?;
    Ok(Json(DeleteResponse::ok()))
}
