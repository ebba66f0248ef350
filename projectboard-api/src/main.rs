//! # Project Board API Server
//!
//! Serves the project board over HTTP: signup and login with cookie
//! sessions, and per-user projects with kanban tasks and notes.
//!
//! ## Usage
//!
//! ```bash
//! DB_PATH=projects.db cargo run -p projectboard-api
//! ```

use projectboard_api::{
    app::{build_router, AppState},
    config::Config,
};
use projectboard_shared::{
    auth::account::ensure_default_user,
    db::{
        migrations::run_migrations,
        pool::{close_pool, create_pool},
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "projectboard_api=debug,projectboard_shared=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Project Board API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(config.pool_config()).await?;
    run_migrations(&pool).await?;

    ensure_default_user(
        &pool,
        config.bootstrap.admin_user.as_deref(),
        config.bootstrap.admin_password.as_deref(),
    )
    .await?;

    let address = config.bind_address();
    let app = build_router(AppState::new(pool.clone(), config));

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(pool).await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
