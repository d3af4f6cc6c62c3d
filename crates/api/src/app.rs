use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use domain::services::{AttendanceRecorder, NotificationDispatcher, ReportAggregator};
use persistence::repositories::{
    AdminRepository, AttendanceRepository, ClassRepository, DashboardRepository,
    EnrollmentRepository, NotificationRepository, StudentRepository,
};
use shared::jwt::{JwtConfig, JwtError};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_admin, require_student,
    security_headers_middleware, trace_id,
};
use crate::routes::{
    attendance, classes, enrollments, health, profile, reports, student_portal, students,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    pub admins: AdminRepository,
    pub students: StudentRepository,
    pub classes: ClassRepository,
    pub enrollments: EnrollmentRepository,
    pub attendance: AttendanceRepository,
    pub notifications: NotificationRepository,
    pub dashboard: DashboardRepository,
    pub recorder: AttendanceRecorder,
    pub dispatcher: NotificationDispatcher,
    pub reports: ReportAggregator,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Result<Self, JwtError> {
        let jwt = JwtConfig::with_leeway(&config.auth.jwt_secret, config.auth.leeway_secs)?;

        let students = StudentRepository::new(pool.clone());
        let attendance = AttendanceRepository::new(pool.clone());
        let notifications = NotificationRepository::new(pool.clone());

        let recorder = AttendanceRecorder::new(Arc::new(attendance.clone()))
            .with_max_bulk_records(config.limits.max_bulk_records);
        let dispatcher = NotificationDispatcher::with_enabled(
            Arc::new(notifications.clone()),
            config.notifications.enabled,
        );
        let reports =
            ReportAggregator::new(Arc::new(students.clone()), Arc::new(attendance.clone()));

        Ok(Self {
            admins: AdminRepository::new(pool.clone()),
            classes: ClassRepository::new(pool.clone()),
            enrollments: EnrollmentRepository::new(pool.clone()),
            dashboard: DashboardRepository::new(pool.clone()),
            students,
            attendance,
            notifications,
            recorder,
            dispatcher,
            reports,
            jwt: Arc::new(jwt),
            config: Arc::new(config),
            pool,
        })
    }
}

pub fn create_app(config: Config, pool: PgPool) -> Result<Router, JwtError> {
    let state = AppState::new(config, pool)?;
    let config = state.config.clone();

    // An empty origin list allows any origin (development).
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let admin_routes = Router::new()
        .route("/api/v1/admin/me", get(profile::admin_profile))
        // Students
        .route(
            "/api/v1/students",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/api/v1/students/:id",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
        // Classes and rosters
        .route(
            "/api/v1/classes",
            get(classes::list_classes).post(classes::create_class),
        )
        .route(
            "/api/v1/classes/:id",
            get(classes::get_class)
                .put(classes::update_class)
                .delete(classes::delete_class),
        )
        .route(
            "/api/v1/classes/:id/students",
            get(enrollments::list_class_students)
                .post(enrollments::enroll_student)
                .delete(enrollments::remove_student),
        )
        // Attendance
        .route(
            "/api/v1/attendance",
            get(attendance::list_attendance).post(attendance::record_attendance),
        )
        .route("/api/v1/attendance/bulk", post(attendance::record_bulk))
        // Reports
        .route("/api/v1/reports", get(reports::get_report))
        .route("/api/v1/dashboard", get(reports::get_dashboard))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let student_routes = Router::new()
        .route("/api/v1/me", get(profile::student_profile))
        .route("/api/v1/me/attendance", get(student_portal::my_attendance))
        .route("/api/v1/me/classes", get(enrollments::my_classes))
        .route("/api/v1/me/classes/join", post(enrollments::join_class))
        .route(
            "/api/v1/me/notifications",
            get(student_portal::my_notifications),
        )
        .route(
            "/api/v1/me/notifications/:id/read",
            patch(student_portal::mark_notification_read),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_student,
        ));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Ok(Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(student_routes)
        // Global middleware (bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state))
}
