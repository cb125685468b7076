use axum::{extract::Query, http::StatusCode, Json};
use chrono::NaiveDate;
use contracts::domain::a004_goal_period::aggregate::{GoalPeriodDto, GoalPeriodOption};
use serde::Deserialize;
use serde_json::json;

use super::error_status;
use crate::domain::a004_goal_period;

#[derive(Deserialize)]
pub struct PeriodParams {
    pub as_of: Option<NaiveDate>,
}

fn reference_day(params: &PeriodParams) -> NaiveDate {
    params
        .as_of
        .unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// GET /api/goal_periods
pub async fn list(
    Query(params): Query<PeriodParams>,
) -> Result<Json<Vec<GoalPeriodOption>>, StatusCode> {
    match a004_goal_period::service::list_active(reference_day(&params)).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list goal periods: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/goal_periods/current
pub async fn current(
    Query(params): Query<PeriodParams>,
) -> Result<Json<GoalPeriodOption>, StatusCode> {
    match a004_goal_period::service::current(reference_day(&params)).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/goal_periods
pub async fn upsert(Json(dto): Json<GoalPeriodDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    match a004_goal_period::service::upsert(dto).await {
        Ok(Some(id)) => Ok(Json(json!({"id": id.to_string()}))),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to save goal period: {}", e);
            Err(error_status(&e))
        }
    }
}
