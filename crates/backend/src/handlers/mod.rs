pub mod a001_store;
pub mod a002_campaign;
pub mod a003_campaign_participant;
pub mod a004_goal_period;
pub mod d400_campaign_ranking;
pub mod d401_employee_sales;

use axum::http::StatusCode;

/// Services report rejected input as "Validation failed: ..."
pub(crate) fn error_status(e: &anyhow::Error) -> StatusCode {
    if e.to_string().starts_with("Validation failed") {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

pub(crate) fn parse_id(id: &str) -> Result<uuid::Uuid, StatusCode> {
    uuid::Uuid::parse_str(id).map_err(|_| StatusCode::BAD_REQUEST)
}
