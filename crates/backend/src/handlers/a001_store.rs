use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a001_store::aggregate::{Store, StoreDto};
use serde::Deserialize;
use serde_json::json;

use super::{error_status, parse_id};
use crate::domain::a001_store;

#[derive(Deserialize)]
pub struct StoreListParams {
    pub search: Option<String>,
}

/// GET /api/stores
pub async fn list(Query(params): Query<StoreListParams>) -> Result<Json<Vec<Store>>, StatusCode> {
    match a001_store::service::list_stores(params.search.as_deref()).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list stores: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/stores/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Store>, StatusCode> {
    let uuid = parse_id(&id)?;
    match a001_store::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/stores
pub async fn upsert(Json(dto): Json<StoreDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = if dto.id.is_some() {
        a001_store::service::update(dto).await
    } else {
        a001_store::service::create(dto).await
    };

    match result {
        Ok(id) => Ok(Json(json!({"id": id.to_string()}))),
        Err(e) => {
            tracing::error!("Failed to save store: {}", e);
            Err(error_status(&e))
        }
    }
}
