use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a002_campaign::aggregate::{Campaign, CampaignDto, CampaignStatusDto};
use serde::Deserialize;
use serde_json::json;

use super::{error_status, parse_id};
use crate::domain::a002_campaign;

#[derive(Deserialize)]
pub struct CampaignListParams {
    #[serde(default)]
    pub include_inactive: bool,
}

/// GET /api/campaigns
pub async fn list(
    Query(params): Query<CampaignListParams>,
) -> Result<Json<Vec<Campaign>>, StatusCode> {
    match a002_campaign::service::list(params.include_inactive).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list campaigns: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/campaigns/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Campaign>, StatusCode> {
    let uuid = parse_id(&id)?;
    match a002_campaign::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/campaigns
pub async fn create(Json(dto): Json<CampaignDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    match a002_campaign::service::create(dto).await {
        Ok(id) => Ok(Json(json!({"id": id.to_string()}))),
        Err(e) => {
            tracing::error!("Failed to create campaign: {}", e);
            Err(error_status(&e))
        }
    }
}

/// POST /api/campaigns/:id/status
pub async fn update_status(
    Path(id): Path<String>,
    Json(dto): Json<CampaignStatusDto>,
) -> Result<(), StatusCode> {
    let uuid = parse_id(&id)?;
    match a002_campaign::service::update_status(uuid, dto.status).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to update campaign status: {}", e);
            Err(error_status(&e))
        }
    }
}
