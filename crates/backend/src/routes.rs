use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::shared::request_log::request_logger;

/// All routes of the application
pub fn configure_routes() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Store
        .route(
            "/api/stores",
            get(handlers::a001_store::list).post(handlers::a001_store::upsert),
        )
        .route("/api/stores/:id", get(handlers::a001_store::get_by_id))
        // A002 Campaign
        .route(
            "/api/campaigns",
            get(handlers::a002_campaign::list).post(handlers::a002_campaign::create),
        )
        .route(
            "/api/campaigns/summary",
            get(handlers::d400_campaign_ranking::get_summaries),
        )
        .route("/api/campaigns/:id", get(handlers::a002_campaign::get_by_id))
        .route(
            "/api/campaigns/:id/status",
            post(handlers::a002_campaign::update_status),
        )
        // A003 Campaign participants
        .route(
            "/api/campaigns/:id/participants",
            get(handlers::a003_campaign_participant::list_by_campaign)
                .post(handlers::a003_campaign_participant::upsert),
        )
        // D400 Campaign ranking
        .route(
            "/api/campaigns/:id/ranking",
            get(handlers::d400_campaign_ranking::get_ranking),
        )
        // D401 Employee sales
        .route(
            "/api/employee_sales",
            get(handlers::d401_employee_sales::list),
        )
        .route(
            "/api/employee_sales/csv",
            get(handlers::d401_employee_sales::export_csv),
        )
        // A004 Goal periods
        .route(
            "/api/goal_periods",
            get(handlers::a004_goal_period::list).post(handlers::a004_goal_period::upsert),
        )
        .route(
            "/api/goal_periods/current",
            get(handlers::a004_goal_period::current),
        )
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
}
