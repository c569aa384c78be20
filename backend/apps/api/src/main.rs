//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are rendered
//! by the domain crates through `kernel::error::AppError`.

use anyhow::Context;
use auth::{AuthConfig, AuthGate};
use axum::{
    Router, http,
    http::{Method, header},
};
use benchmark::{
    BenchmarkAppState, BenchmarkRepository, InMemoryBenchmarkRepository, IngestConfig,
    PgBenchmarkRepository, benchmark_router, spawn_maintenance,
};
use platform::envelope;
use pow::{LoadCounter, LoadResetTask, PowConfig, pow_router};
use rsa::RsaPrivateKey;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,benchmark=info,pow=info,auth=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Secrets
    let private_key = Arc::new(load_private_key()?);
    let auth_config = Arc::new(load_auth_config()?);
    let gate = Arc::new(AuthGate::new(auth_config));

    // PoW load tracking, shared by the challenge issuer and the submit pipeline
    let shutdown = CancellationToken::new();
    let pow_config = Arc::new(PowConfig::default());
    let load = Arc::new(LoadCounter::new());
    let load_reset = LoadResetTask::spawn(
        load.clone(),
        pow_config.load_reset_period,
        shutdown.clone(),
    );

    let ingest_config =
        IngestConfig::default().with_trust_forwarded_for(env_flag("TRUST_FORWARDED_FOR"));
    let deps = BenchmarkDeps {
        gate,
        private_key,
        pow_config: pow_config.clone(),
        load: load.clone(),
        config: ingest_config,
        shutdown: shutdown.clone(),
    };

    // Storage
    let (benchmarks, maintenance) = match env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await
                .context("Failed to connect to database")?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            tracing::info!("Migrations completed");

            deps.into_router(PgBenchmarkRepository::new(pool))
        }
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("DATABASE_URL not set, storing benchmarks in memory");
            deps.into_router(InMemoryBenchmarkRepository::new())
        }
        Err(_) => anyhow::bail!("DATABASE_URL must be set in environment"),
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            http::HeaderName::from_static("x-submission-id"),
            http::HeaderName::from_static("x-signature"),
        ]));

    // Build router
    let app = Router::new()
        .nest("/api", pow_router(load, pow_config).merge(benchmarks))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3333".to_string())
        .parse()
        .context("BIND_ADDR must be a socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
    .await?;

    shutdown.cancel();
    let (load_reset, maintenance) = tokio::join!(load_reset, maintenance);
    for (task, joined) in [("load reset", load_reset), ("maintenance", maintenance)] {
        if let Err(e) = joined {
            tracing::error!(task, error = %e, "Background task failed");
        }
    }
    tracing::info!("Server stopped");

    Ok(())
}

/// Everything the benchmark router needs besides its repository
struct BenchmarkDeps {
    gate: Arc<AuthGate>,
    private_key: Arc<RsaPrivateKey>,
    pow_config: Arc<PowConfig>,
    load: Arc<LoadCounter>,
    config: IngestConfig,
    shutdown: CancellationToken,
}

impl BenchmarkDeps {
    /// Router plus the handle of its maintenance task
    fn into_router<R>(self, repo: R) -> (Router, JoinHandle<()>)
    where
        R: BenchmarkRepository + Send + Sync + 'static,
    {
        let maintenance_interval = self.config.maintenance_interval;
        let state = BenchmarkAppState::new(
            Arc::new(repo),
            self.gate,
            self.private_key,
            self.pow_config,
            self.load,
            self.config,
        );

        let maintenance = spawn_maintenance(
            state.throttle.clone(),
            state.cache.clone(),
            maintenance_interval,
            self.shutdown,
        );

        (benchmark_router(state), maintenance)
    }
}

/// RSA key the submission envelopes are sealed for
fn load_private_key() -> anyhow::Result<RsaPrivateKey> {
    match env::var("PRIVATE_KEY") {
        // allow the PEM to be stored on a single line with escaped newlines
        Ok(pem) => envelope::load_private_key_pem(&pem.replace("\\n", "\n"))
            .context("PRIVATE_KEY is not a valid RSA private key"),
        Err(_) if cfg!(debug_assertions) => {
            let key = envelope::generate_keypair(envelope::MIN_RSA_BITS)?;
            let public_pem = envelope::public_key_to_pem(&key.to_public_key())?;
            tracing::warn!("PRIVATE_KEY not set, using an ephemeral keypair");
            tracing::info!(public_key = %public_pem, "Ephemeral submission public key");
            Ok(key)
        }
        Err(_) => anyhow::bail!("PRIVATE_KEY must be set in production"),
    }
}

/// Shared secret for submission tokens and id signatures
fn load_auth_config() -> anyhow::Result<AuthConfig> {
    match env::var("KEY") {
        Ok(secret) if !secret.is_empty() => Ok(AuthConfig::with_secret(secret.into_bytes())),
        _ if cfg!(debug_assertions) => {
            tracing::warn!("KEY not set, using a random development secret");
            Ok(AuthConfig::development())
        }
        _ => anyhow::bail!("KEY must be set in production"),
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

async fn shutdown_signal(shutdown: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            match result {
                Ok(()) => tracing::info!("Shutdown signal received"),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to listen for shutdown signal");
                    shutdown.cancelled().await;
                }
            }
        }
        _ = shutdown.cancelled() => {}
    }
}
