//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use rollcall_auth::jwt::decoder::JwtDecoder;
use rollcall_auth::jwt::encoder::JwtEncoder;
use rollcall_auth::password::hasher::PasswordHasher;
use rollcall_core::config::AppConfig;

use rollcall_database::repositories::{
    AttendanceRepository, EventRepository, StatsRepository, UserRepository,
};

use rollcall_service::attendance::AttendanceService;
use rollcall_service::event::{EventService, NoticeService};
use rollcall_service::qr::QrService;
use rollcall_service::report::PdfReportRenderer;
use rollcall_service::stats::StatsService;
use rollcall_service::user::{UserAdminService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,

    // ── Repositories ─────────────────────────────────────────
    /// User repository
    pub user_repo: Arc<UserRepository>,
    /// Event repository
    pub event_repo: Arc<EventRepository>,
    /// Attendance repository
    pub attendance_repo: Arc<AttendanceRepository>,
    /// Stats repository
    pub stats_repo: Arc<StatsRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Registration/login/profile service
    pub user_service: Arc<UserService>,
    /// Admin user management service
    pub user_admin_service: Arc<UserAdminService>,
    /// Event scheduling service
    pub event_service: Arc<EventService>,
    /// Public notice views
    pub notice_service: Arc<NoticeService>,
    /// Attendance marking and listing service
    pub attendance_service: Arc<AttendanceService>,
    /// Aggregation service
    pub stats_service: Arc<StatsService>,
    /// QR code service
    pub qr_service: Arc<QrService>,
    /// PDF report renderer
    pub report_renderer: Arc<PdfReportRenderer>,
}
