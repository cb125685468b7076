use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use contracts::dashboards::d401_employee_sales::dto::{EmployeeSalesRequest, EmployeeSalesResponse};

use super::error_status;
use crate::dashboards::d401_employee_sales::service;

/// GET /api/employee_sales
pub async fn list(
    Query(req): Query<EmployeeSalesRequest>,
) -> Result<Json<EmployeeSalesResponse>, StatusCode> {
    match service::get_employee_sales(req).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to load employee sales: {}", e);
            Err(error_status(&e))
        }
    }
}

/// GET /api/employee_sales/csv
pub async fn export_csv(
    Query(req): Query<EmployeeSalesRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let filename = format!(
        "attachment; filename=\"employee_sales_{}_{}.csv\"",
        req.date_from, req.date_to
    );
    match service::export_csv(req).await {
        Ok(body) => Ok((
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (header::CONTENT_DISPOSITION, filename),
            ],
            body,
        )),
        Err(e) => {
            tracing::error!("Failed to export employee sales: {}", e);
            Err(error_status(&e))
        }
    }
}
