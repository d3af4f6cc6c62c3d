//! Class management routes (admin).

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use domain::models::class::{
    non_empty, Class, ClassWithCount, CreateClassRequest, ListClassesQuery, UpdateClassRequest,
};
use serde::Serialize;
use shared::class_code::generate_class_code;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::Caller;
use crate::routes::MessageResponse;

/// Attempts at drawing an unused join code before giving up.
const MAX_CODE_ATTEMPTS: usize = 10;

#[derive(Debug, Serialize)]
pub struct ListClassesResponse {
    pub success: bool,
    pub classes: Vec<ClassWithCount>,
}

#[derive(Debug, Serialize)]
pub struct ClassResponse {
    pub success: bool,
    pub class: Class,
}

#[derive(Debug, Serialize)]
pub struct ClassDetailResponse {
    pub success: bool,
    pub class: ClassWithCount,
}

/// List classes, newest first, each with its enrolled student count.
///
/// GET /api/v1/classes?active=true
pub async fn list_classes(
    State(state): State<AppState>,
    query: Result<Query<ListClassesQuery>, QueryRejection>,
) -> Result<Json<ListClassesResponse>, ApiError> {
    let Query(query) = query?;
    let classes = state
        .classes
        .list(query.active.unwrap_or(false))
        .await?
        .into_iter()
        .map(ClassWithCount::from)
        .collect();

    Ok(Json(ListClassesResponse {
        success: true,
        classes,
    }))
}

/// Create a class with a freshly generated join code.
///
/// POST /api/v1/classes
pub async fn create_class(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<CreateClassRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ClassResponse>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let request = CreateClassRequest {
        name: request.name,
        description: non_empty(request.description),
        subject: non_empty(request.subject),
        schedule: non_empty(request.schedule),
    };

    let code = unused_class_code(&state).await?;
    let class: Class = state
        .classes
        .create(&request, &code, Some(caller.id))
        .await?
        .into();

    info!(
        class_id = %class.id,
        code = %class.code,
        admin_id = %caller.id,
        "Class created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ClassResponse {
            success: true,
            class,
        }),
    ))
}

async fn unused_class_code(state: &AppState) -> Result<String, ApiError> {
    for attempt in 1..=MAX_CODE_ATTEMPTS {
        let code = generate_class_code();
        if !state.classes.code_exists(&code).await? {
            return Ok(code);
        }
        warn!(attempt, "Class code collision, retrying");
    }
    Err(ApiError::Internal(
        "Could not generate a unique class code".to_string(),
    ))
}

/// GET /api/v1/classes/:id
pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClassDetailResponse>, ApiError> {
    let class = state
        .classes
        .find_with_count(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Class not found".to_string()))?;

    Ok(Json(ClassDetailResponse {
        success: true,
        class: class.into(),
    }))
}

/// Partially update a class, including toggling `isActive`.
///
/// PUT /api/v1/classes/:id
pub async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateClassRequest>, JsonRejection>,
) -> Result<Json<ClassResponse>, ApiError> {
    let Json(request) = payload?;
    if request.is_empty() {
        return Err(ApiError::Validation("No fields to update".to_string()));
    }
    request.validate()?;

    let class = state
        .classes
        .update(id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Class not found".to_string()))?;

    info!(class_id = %id, is_active = class.is_active, "Class updated");

    Ok(Json(ClassResponse {
        success: true,
        class: class.into(),
    }))
}

/// DELETE /api/v1/classes/:id
pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if state.classes.delete(id).await? == 0 {
        return Err(ApiError::NotFound("Class not found".to_string()));
    }

    info!(class_id = %id, "Class deleted");
    Ok(Json(MessageResponse::new("Class deleted")))
}
