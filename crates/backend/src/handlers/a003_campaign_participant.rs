use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a003_campaign_participant::aggregate::{Participant, ParticipantDto};
use serde_json::json;

use super::{error_status, parse_id};
use crate::domain::a003_campaign_participant;

/// GET /api/campaigns/:id/participants
pub async fn list_by_campaign(
    Path(id): Path<String>,
) -> Result<Json<Vec<Participant>>, StatusCode> {
    let uuid = parse_id(&id)?;
    match a003_campaign_participant::service::list_by_campaign(uuid).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list participants: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/campaigns/:id/participants
pub async fn upsert(
    Path(id): Path<String>,
    Json(dto): Json<ParticipantDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let uuid = parse_id(&id)?;
    match a003_campaign_participant::service::upsert(uuid, dto).await {
        Ok(Some(id)) => Ok(Json(json!({"id": id.to_string()}))),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to save participant: {}", e);
            Err(error_status(&e))
        }
    }
}
