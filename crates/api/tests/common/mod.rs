//! Common test utilities for integration tests.
//!
//! These helpers drive the real router against PostgreSQL 15+. Tests return
//! early when `TEST_DATABASE_URL` is not set.

#![allow(dead_code)]

use attendance_api::{
    app::create_app,
    config::{
        AuthConfig, Config, DatabaseConfig, LimitsConfig, LoggingConfig, NotificationsConfig,
        SecurityConfig, ServerConfig,
    },
};
use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::{json, Value};
use shared::jwt::{JwtConfig, Role};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Connects to `TEST_DATABASE_URL` and applies migrations, or returns `None`
/// when the variable is unset.
pub async fn setup_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set; skipping database test");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    // The migrator holds an advisory lock, so parallel tests are safe.
    persistence::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        },
        database: DatabaseConfig {
            url: std::env::var("TEST_DATABASE_URL").unwrap_or_default(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        },
        logging: LoggingConfig {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig::default(),
        auth: AuthConfig {
            jwt_secret: TEST_JWT_SECRET.to_string(),
            leeway_secs: 0,
        },
        limits: LimitsConfig::default(),
        notifications: NotificationsConfig { enabled: true },
    }
}

pub fn create_test_app(config: Config, pool: PgPool) -> Router {
    create_app(config, pool).expect("Failed to build app")
}

fn token_for(id: Uuid, email: &str, role: Role) -> String {
    JwtConfig::new(TEST_JWT_SECRET)
        .unwrap()
        .generate_token(id, email, role, 3600)
        .unwrap()
}

/// Bearer token for a fresh admin identity.
pub fn admin_token() -> String {
    admin_token_for(Uuid::new_v4())
}

/// Bearer token for the given admin.
pub fn admin_token_for(admin_id: Uuid) -> String {
    token_for(admin_id, "admin@school.test", Role::Admin)
}

/// Inserts an `admins` row directly; admins are provisioned outside the API.
pub async fn insert_admin(pool: &PgPool, name: &str) -> Uuid {
    let email = format!("{}@admin.test", unique_tag().to_lowercase());
    let (id,): (Uuid,) =
        sqlx::query_as("INSERT INTO admins (email, name) VALUES ($1, $2) RETURNING id")
            .bind(&email)
            .bind(name)
            .fetch_one(pool)
            .await
            .expect("Failed to insert admin");
    id
}

/// Bearer token for the given student.
pub fn student_token(student_id: Uuid) -> String {
    token_for(student_id, "student@school.test", Role::Student)
}

/// A short tag unique to one test, used to keep parallel tests apart.
pub fn unique_tag() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

pub fn json_request(method: Method, uri: &str, body: Value, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn empty_request(method: Method, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub async fn parse_response_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

/// Sends a request and returns status plus parsed JSON body.
pub async fn send(app: &Router, request: Request<Body>) -> (axum::http::StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, parse_response_body(response).await)
}

/// Creates a student through the API and returns its JSON.
pub async fn create_student(
    app: &Router,
    token: &str,
    course: &str,
    year: i32,
    section: &str,
) -> Value {
    let tag = unique_tag();
    let name: String = Name().fake();
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/v1/students",
            json!({
                "studentId": format!("STU-{}", tag),
                "name": name,
                "email": format!("{}@student.test", tag.to_lowercase()),
                "course": course,
                "year": year,
                "section": section,
            }),
            token,
        ),
    )
    .await;
    assert_eq!(status, axum::http::StatusCode::CREATED, "{}", body);
    body["student"].clone()
}

/// Creates a class through the API and returns its JSON.
pub async fn create_class(app: &Router, token: &str, name: &str) -> Value {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/v1/classes",
            json!({ "name": name, "subject": "CS101" }),
            token,
        ),
    )
    .await;
    assert_eq!(status, axum::http::StatusCode::CREATED, "{}", body);
    body["class"].clone()
}

pub fn id_of(value: &Value) -> Uuid {
    value["id"].as_str().unwrap().parse().unwrap()
}
