//! Report and dashboard routes (admin).

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::Utc;
use domain::models::dashboard::DashboardStats;
use domain::models::report::{AttendanceReport, ReportQuery};
use serde::Serialize;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: AttendanceReport,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub success: bool,
    pub dashboard: DashboardStats,
}

/// Daily, weekly or monthly attendance report around an anchor date.
///
/// GET /api/v1/reports?type=weekly&date=2024-03-14&course=&year=&section=
///
/// An unknown or missing `type` means daily; a missing `date` means today (UTC).
pub async fn get_report(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Json<ReportResponse>, ApiError> {
    let Query(query) = query?;
    let today = Utc::now().date_naive();

    let report = state.reports.generate(&query, today).await?;

    Ok(Json(ReportResponse {
        success: true,
        report,
    }))
}

/// Headline numbers for the admin dashboard.
///
/// GET /api/v1/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let today = Utc::now().date_naive();
    let dashboard = state.dashboard.get_stats(today).await?;

    Ok(Json(DashboardResponse {
        success: true,
        dashboard,
    }))
}
