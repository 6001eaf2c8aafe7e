//! Warden Auth API
//!
//! Identity microservice exposing the `warden.v1.UserService` gRPC surface.
//!
//! ## gRPC Service
//!
//! `Register`, `Login`, `FindByEmail`, `FindById`, `GetMe`, `Logout`.
//! Authenticated calls carry the session token in the `session_id` metadata
//! key. Reflection is served outside production mode.
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe (Postgres, plus Redis when configured)

mod config;
mod error;
mod grpc;
mod handlers;
mod metadata;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::signal;
use tonic::transport::Server as TonicServer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use warden_core::AuthService;
use warden_db::PgUserRepository;
use warden_kv::{
    create_redis_pool, MemorySessionStore, MemoryUserCache, RedisSessionStore, RedisUserCache,
    SessionStore, UserCache,
};
use warden_proto::user_service::user_service_server::UserServiceServer;

use crate::config::{Config, LogFormat};
use crate::grpc::GrpcUserService;
use crate::handlers::{health, ready};
use crate::state::{AppState, AuthServiceImpl};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.log_format)?;

    tracing::info!("Starting Warden Auth API");
    tracing::info!(
        http_port = config.http_port,
        grpc_port = config.grpc_port,
        mode = ?config.mode,
        redis = config.redis_url.is_some(),
        "Configuration loaded"
    );
    describe_metrics();

    // Create database pool and apply migrations
    let pool =
        warden_db::create_pool_with_options(&config.database_url, config.pool.clone()).await?;
    warden_db::run_migrations(&pool).await?;
    tracing::info!("Database pool created");

    let users = Arc::new(PgUserRepository::new(pool.clone()));

    match config.redis_url.clone() {
        Some(url) => {
            let redis = create_redis_pool(&url, config.pool.max_connections as usize)?;
            let auth = AuthService::new(
                config.auth.clone(),
                users,
                Arc::new(RedisUserCache::new(redis.clone())),
                Arc::new(RedisSessionStore::new(redis.clone())),
            );
            tracing::info!("Redis pool created");
            serve(auth, AppState::new(pool, Some(redis), config)).await
        }
        None => {
            tracing::warn!("REDIS_URL not set, sessions and cache are process-local");
            let auth = AuthService::new(
                config.auth.clone(),
                users,
                Arc::new(MemoryUserCache::new()),
                Arc::new(MemorySessionStore::new()),
            );
            serve(auth, AppState::new(pool, None, config)).await
        }
    }
}

fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("info").add_directive("auth_api=debug".parse()?),
    };
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
    Ok(())
}

async fn serve<C, S>(auth: AuthServiceImpl<C, S>, state: AppState) -> anyhow::Result<()>
where
    C: UserCache + 'static,
    S: SessionStore + 'static,
{
    let http_addr = SocketAddr::from(([0, 0, 0, 0], state.config.http_port));
    let grpc_addr = SocketAddr::from(([0, 0, 0, 0], state.config.grpc_port));

    let app = build_router(state.clone());

    // Run both servers concurrently
    tokio::select! {
        result = run_http_server(app, http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = ?e, "HTTP server error");
            }
        }
        result = run_grpc_server(Arc::new(auth), state, grpc_addr) => {
            if let Err(e) = result {
                tracing::error!(error = ?e, "gRPC server error");
            }
        }
        () = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn run_http_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!("HTTP server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn run_grpc_server<C, S>(
    auth: Arc<AuthServiceImpl<C, S>>,
    state: AppState,
    addr: SocketAddr,
) -> anyhow::Result<()>
where
    C: UserCache + 'static,
    S: SessionStore + 'static,
{
    tracing::info!("gRPC server listening on {}", addr);

    let grpc_service = GrpcUserService::new(auth, state.request_timeout());
    let reflection = if state.config.reflection_enabled() {
        Some(
            tonic_reflection::server::Builder::configure()
                .register_encoded_file_descriptor_set(warden_proto::warden::v1::FILE_DESCRIPTOR_SET)
                .build_v1()?,
        )
    } else {
        tracing::info!("gRPC reflection disabled in production mode");
        None
    };

    TonicServer::builder()
        .timeout(state.request_timeout())
        .layer(TraceLayer::new_for_grpc())
        .add_optional_service(reflection)
        .add_service(UserServiceServer::new(grpc_service))
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;

    Ok(())
}

fn describe_metrics() {
    metrics::describe_histogram!(
        "grpc_request_duration_seconds",
        "gRPC request latency in seconds by method"
    );
    metrics::describe_counter!("auth_logins_total", "Login attempts by result");
    metrics::describe_counter!("auth_sessions_created_total", "Sessions issued at login");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
