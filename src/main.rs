//! TCTravel booking service
//!
//! REST backend for vehicles, drivers, customers and bookings.
//! Reads configuration from a TOML file (~/.config/tctravel/config.toml).

use tracing::{error, info, warn};

use tctravel::application::identity::AccountSettings;
use tctravel::config::{AppConfig, LoggingConfig};
use tctravel::infrastructure::crypto::JwtConfig;
use tctravel::infrastructure::database::{run_migrations, seed_identity};
use tctravel::infrastructure::mail::create_mailer;
use tctravel::shared::shutdown::ShutdownCoordinator;
use tctravel::{create_api_router, default_config_path, init_database, ApiContext, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("TCTRAVEL_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_logging(&cfg.logging);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            init_logging(&LoggingConfig::default());
            error!("Failed to load config from {}: {}", config_path.display(), e);
            return Err(e.into());
        }
    };

    info!("Starting TCTravel booking service...");

    // ── Prometheus recorder (before any metrics calls) ─────────
    let metrics_handle = match metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
    {
        Ok(handle) => {
            info!("Prometheus metrics recorder installed");
            Some(handle)
        }
        Err(e) => {
            warn!("Metrics disabled, recorder could not be installed: {}", e);
            None
        }
    };

    let jwt_config = JwtConfig::from(&app_cfg.security);
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&DatabaseConfig::from(&app_cfg.database)).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = run_migrations(&db).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }

    if let Err(e) = seed_identity(&db, &app_cfg.admin).await {
        error!("Failed to seed roles and admin account: {}", e);
        return Err(e.into());
    }

    let api_router = create_api_router(ApiContext {
        db: db.clone(),
        jwt_config,
        account_settings: AccountSettings::from(&app_cfg),
        mailer: create_mailer(&app_cfg.email),
        metrics_handle,
    });

    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    let shutdown_signal = shutdown.signal();
    shutdown.start_signal_listener();

    // ── REST API server ────────────────────────────────────────
    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown_signal.clone();
    let served = axum::serve(listener, api_router)
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await;

    match served {
        Ok(()) => info!("REST API server stopped"),
        Err(e) => error!("REST API server error: {}", e),
    }

    // Cleanup waits on the signal, which is still unset if the server failed
    shutdown_signal.trigger();
    shutdown
        .shutdown_with_cleanup(|| async move {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("Database connection closed");
            }
        })
        .await;

    info!("TCTravel booking service shutdown complete");
    Ok(())
}

/// `RUST_LOG` wins over the configured level when set
fn init_logging(cfg: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.level));

    if cfg.format.eq_ignore_ascii_case("json") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
