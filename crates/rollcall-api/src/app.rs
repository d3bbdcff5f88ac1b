//! Application builder that wires repositories, services, and state into a
//! runnable Axum app.

use std::sync::Arc;

use sqlx::PgPool;

use rollcall_auth::jwt::decoder::JwtDecoder;
use rollcall_auth::jwt::encoder::JwtEncoder;
use rollcall_auth::password::hasher::PasswordHasher;
use rollcall_core::config::AppConfig;
use rollcall_core::error::AppError;

use rollcall_database::repositories::{
    AttendanceRepository, EventRepository, StatsRepository, UserRepository,
};

use rollcall_service::attendance::AttendanceService;
use rollcall_service::event::{EventService, NoticeService};
use rollcall_service::qr::QrService;
use rollcall_service::report::PdfReportRenderer;
use rollcall_service::stats::StatsService;
use rollcall_service::user::{UserAdminService, UserService};

use crate::router::build_router;
use crate::state::AppState;

/// Wires all repositories and services into an `AppState`.
pub fn build_state(config: AppConfig, db_pool: PgPool) -> AppState {
    // ── Repositories ─────────────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let event_repo = Arc::new(EventRepository::new(db_pool.clone()));
    let attendance_repo = Arc::new(AttendanceRepository::new(db_pool.clone()));
    let stats_repo = Arc::new(StatsRepository::new(db_pool.clone()));

    // ── Auth primitives ──────────────────────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    // ── Services ─────────────────────────────────────────────────
    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        config.auth.clone(),
    ));
    let user_admin_service = Arc::new(UserAdminService::new(
        Arc::clone(&user_repo),
        Arc::clone(&attendance_repo),
    ));
    let event_service = Arc::new(EventService::new(Arc::clone(&event_repo)));
    let notice_service = Arc::new(NoticeService::new(Arc::clone(&event_repo)));
    let attendance_service = Arc::new(AttendanceService::new(
        Arc::clone(&attendance_repo),
        Arc::clone(&user_repo),
        Arc::clone(&event_repo),
    ));
    let stats_service = Arc::new(StatsService::new(
        Arc::clone(&stats_repo),
        Arc::clone(&user_repo),
        Arc::clone(&event_repo),
    ));
    let qr_service = Arc::new(QrService::new(
        Arc::clone(&user_repo),
        Arc::clone(&attendance_service),
    ));
    let report_renderer = Arc::new(PdfReportRenderer::new());

    AppState {
        config: Arc::new(config),
        db_pool,
        jwt_encoder,
        jwt_decoder,
        password_hasher,
        user_repo,
        event_repo,
        attendance_repo,
        stats_repo,
        user_service,
        user_admin_service,
        event_service,
        notice_service,
        attendance_service,
        stats_service,
        qr_service,
        report_renderer,
    }
}

/// Runs the RollCall server with the given configuration and pool.
///
/// Binds to `server.host:server.port` and serves until ctrl-c.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = build_state(config, db_pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(address = %addr, "RollCall server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}

/// Resolves when ctrl-c (or SIGTERM on Unix) is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::error!("Failed to install ctrl-c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
