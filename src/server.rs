//! Reusable server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: storage init, migrations,
//! default admin bootstrap, REST API, metrics and graceful shutdown.

use std::net::SocketAddr;
use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::UserService;
use crate::config::AppConfig;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, Repositories};
use crate::interfaces::http::{create_api_router, AppState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the server.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create the default admin user if none exists (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running server.
///
/// ```rust,no_run
/// use vacation_tracker::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Storage handles the server was started with.
    pub repos: Repositories,
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub local_addr: SocketAddr,

    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the server.
    ///
    /// 1. Install the Prometheus recorder
    /// 2. Open storage and run migrations
    /// 3. Create the default admin (if enabled)
    /// 4. Bind and serve the REST API
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        info!("Starting vacation tracker v{}...", env!("CARGO_PKG_VERSION"));

        let prometheus_handle = prometheus_handle();

        // ── Storage ────────────────────────────────────────────
        let db_config = app_cfg.database_config();
        let repos = if db_config.is_memory() {
            warn!("Using in-memory storage, data is lost on shutdown");
            Repositories::in_memory()
        } else {
            let db = init_database(&db_config).await?;
            if opts.auto_migrate {
                info!("Running database migrations...");
                Migrator::up(&db, None).await?;
                info!("Migrations completed");
            }
            Repositories::sea_orm(db)
        };

        // ── Services ───────────────────────────────────────────
        let jwt_config = app_cfg.jwt_config();
        info!(
            "JWT configured with {}h token expiration",
            jwt_config.expiration_hours
        );
        let users = UserService::new(
            repos.users.clone(),
            jwt_config,
            app_cfg.security.bcrypt_cost,
        );

        if opts.create_default_admin {
            if let Some(admin) = users.ensure_default_admin(&app_cfg.default_admin()).await? {
                info!("Default admin ready: {}", admin.email);
            }
        }

        let state = AppState::new(repos.clone(), users, app_cfg.server.public_url.clone());
        let api_router = create_api_router(state, prometheus_handle);

        // ── REST API server ────────────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let listener = tokio::net::TcpListener::bind(app_cfg.listen_address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            config: app_cfg,
            local_addr,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for in-flight requests, then close storage. Bounded by
    /// `server.shutdown_timeout`.
    pub async fn wait(self) {
        let Self {
            repos,
            shutdown,
            api_task,
            ..
        } = self;

        let finished = shutdown
            .run_cleanup(async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
                if let Some(db) = repos.connection().cloned() {
                    match db.close().await {
                        Ok(()) => info!("Database connection closed"),
                        Err(e) => warn!("Error closing database connection: {}", e),
                    }
                }
            })
            .await;

        if finished {
            info!("Vacation tracker shutdown complete");
        }
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// The global recorder can only be installed once per process; later
/// starts reuse the first handle.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!("Metrics disabled, failed to install recorder: {}", e);
                None
            }
        })
        .clone()
}

/// Initialize tracing from the application config.
///
/// Call once at process startup, before [`ServerHandle::start`].
/// `RUST_LOG` takes precedence over `logging.level`.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_options() -> ServerOptions {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        config.database.url = crate::infrastructure::database::MEMORY_URL.into();
        config.security.bcrypt_cost = crate::infrastructure::crypto::password::MIN_COST;
        ServerOptions {
            config,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn starts_and_stops_with_memory_storage() {
        let handle = ServerHandle::start(memory_options()).await.unwrap();
        assert!(handle.is_running());
        assert_ne!(handle.local_addr.port(), 0);

        let admin = handle.repos.users.get_default_admin().await.unwrap();
        assert!(admin.is_some());

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn starts_against_sqlite_and_migrates() {
        let mut opts = memory_options();
        opts.config.database.url = "sqlite::memory:".into();
        let handle = ServerHandle::start(opts).await.unwrap();

        assert_eq!(handle.repos.backend_name(), "sqlite");
        handle.repos.ping().await.unwrap();
        assert!(handle
            .repos
            .users
            .get_user_by_email("admin@company.com")
            .await
            .unwrap()
            .is_some());

        handle.shutdown().await;
    }
}
