//! Bearer token authentication middleware.
//!
//! Tokens are issued by the external identity service. These middlewares
//! only validate them, check the role and expose the caller to handlers as a
//! [`Caller`] request extension.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shared::jwt::{extract_subject_id, JwtConfig, JwtError, Role};
use uuid::Uuid;

use crate::app::AppState;

/// Authenticated caller, inserted into request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Rejection produced while resolving a caller.
#[derive(Debug, PartialEq, Eq)]
enum AuthRejection {
    Missing,
    Invalid(&'static str),
    WrongRole(Role),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Missing => unauthorized_response("Missing bearer token"),
            AuthRejection::Invalid(message) => unauthorized_response(message),
            AuthRejection::WrongRole(Role::Admin) => forbidden_response("Admin access required"),
            AuthRejection::WrongRole(Role::Student) => {
                forbidden_response("Student access required")
            }
        }
    }
}

/// Middleware for admin-only routes.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    authorize(&state.jwt, Role::Admin, req, next).await
}

/// Middleware for routes that act on the calling student's own data.
pub async fn require_student(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    authorize(&state.jwt, Role::Student, req, next).await
}

async fn authorize(jwt: &JwtConfig, role: Role, mut req: Request<Body>, next: Next) -> Response {
    let caller = match bearer_token(&req).ok_or(AuthRejection::Missing).and_then(|token| {
        resolve_caller(jwt, token, role)
    }) {
        Ok(caller) => caller,
        Err(rejection) => return rejection.into_response(),
    };

    req.extensions_mut().insert(caller);
    next.run(req).await
}

fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn resolve_caller(jwt: &JwtConfig, token: &str, required: Role) -> Result<Caller, AuthRejection> {
    let claims = jwt.validate_token(token).map_err(|e| match e {
        JwtError::TokenExpired => AuthRejection::Invalid("Token has expired"),
        other => {
            tracing::debug!(error = %other, "Rejected bearer token");
            AuthRejection::Invalid("Invalid token")
        }
    })?;

    if claims.role != required {
        return Err(AuthRejection::WrongRole(required));
    }

    let id = extract_subject_id(&claims).map_err(|_| AuthRejection::Invalid("Invalid token"))?;

    Ok(Caller {
        id,
        email: claims.email,
        role: claims.role,
    })
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}

fn forbidden_response(message: &str) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "forbidden",
            "message": message
        })),
    )
        .into_response()
}
