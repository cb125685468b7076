use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::dashboards::d400_campaign_ranking::dto::{
    CampaignListRequest, CampaignRankingRequest, CampaignRankingResponse, CampaignSummaryResponse,
};

use super::parse_id;
use crate::dashboards::d400_campaign_ranking::service;

/// GET /api/campaigns/:id/ranking
pub async fn get_ranking(
    Path(id): Path<String>,
    Query(req): Query<CampaignRankingRequest>,
) -> Result<Json<CampaignRankingResponse>, StatusCode> {
    let uuid = parse_id(&id)?;
    match service::get_campaign_ranking(uuid, req).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to build campaign ranking: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/campaigns/summary
pub async fn get_summaries(
    Query(req): Query<CampaignListRequest>,
) -> Result<Json<CampaignSummaryResponse>, StatusCode> {
    match service::get_campaign_summaries(req).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to build campaign summaries: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
