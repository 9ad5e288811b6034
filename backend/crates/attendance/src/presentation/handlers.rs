//! HTTP Handlers

use std::sync::Arc;

use auth::AuthenticatedPrincipal;
use axum::extract::State;
use kernel::extract::AppJson;
use kernel::response::ApiResponse;

use crate::application::{ListAttendanceUseCase, MarkAttendanceUseCase};
use crate::domain::repository::AttendanceRepository;
use crate::error::AttendanceResult;
use crate::presentation::dto::{AttendanceResponse, MarkAttendanceRequest};

#[derive(Clone)]
pub struct AttendanceAppState<R>
where
    R: AttendanceRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// POST /api/attendance
pub async fn mark<R>(
    State(state): State<AttendanceAppState<R>>,
    principal: AuthenticatedPrincipal,
    AppJson(req): AppJson<MarkAttendanceRequest>,
) -> AttendanceResult<ApiResponse<AttendanceResponse>>
where
    R: AttendanceRepository + Clone + Send + Sync + 'static,
{
    let use_case = MarkAttendanceUseCase::new(state.repo.clone());
    let record = use_case.execute(principal.principal_id, req.into()).await?;

    Ok(ApiResponse::created(
        "Attendance marked successfully",
        AttendanceResponse::from(&record),
    ))
}

/// GET /api/attendance
pub async fn list<R>(
    State(state): State<AttendanceAppState<R>>,
    principal: AuthenticatedPrincipal,
) -> AttendanceResult<ApiResponse<Vec<AttendanceResponse>>>
where
    R: AttendanceRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListAttendanceUseCase::new(state.repo.clone());
    let records = use_case.execute(principal.principal_id).await?;

    Ok(ApiResponse::ok(
        "Attendance retrieved successfully",
        records.iter().map(AttendanceResponse::from).collect(),
    ))
}
