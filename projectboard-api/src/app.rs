/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use projectboard_api::{app::AppState, config::Config};
/// use projectboard_shared::db::pool::create_pool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.pool_config()).await?;
/// let state = AppState::new(pool, config);
/// let app = projectboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, patch, post},
    Router,
};
use projectboard_shared::auth::middleware::require_user_from_headers;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET    /health                               # public
/// ├── POST   /signup                               # public
/// ├── POST   /login                                # public
/// ├── POST   /logout                               # public
/// └── (session required)
///     ├── GET    /me
///     ├── GET    /getProjects
///     ├── GET    /getProject/:id
///     ├── POST   /addProject/
///     ├── PATCH  /projects/:id
///     ├── DELETE /projects/:id
///     ├── POST   /projects/:id/tasks
///     ├── PATCH  /projects/:id/tasks/:task_id
///     ├── DELETE /projects/:id/tasks/:task_id
///     ├── POST   /projects/:id/notes
///     ├── PATCH  /projects/:id/notes/:note_id
///     └── DELETE /projects/:id/notes/:note_id
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Session guard (protected routes only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/signup", post(routes::auth::signup))
        .route("/login", post(routes::auth::login))
        .route("/logout", post(routes::auth::logout));

    let protected_routes = Router::new()
        .route("/me", get(routes::auth::me))
        .route("/getProjects", get(routes::projects::get_projects))
        .route("/getProject/:id", get(routes::projects::get_project))
        .route("/addProject/", post(routes::projects::add_project))
        .route(
            "/projects/:id",
            patch(routes::projects::update_project).delete(routes::projects::delete_project),
        )
        .route("/projects/:id/tasks", post(routes::tasks::add_task))
        .route(
            "/projects/:id/tasks/:task_id",
            patch(routes::tasks::update_task).delete(routes::tasks::delete_task),
        )
        .route("/projects/:id/notes", post(routes::notes::add_note))
        .route(
            "/projects/:id/notes/:note_id",
            patch(routes::notes::update_note).delete(routes::notes::delete_note),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .with_state(state)
}

/// CORS for the browser frontend
///
/// Session cookies need credentialed requests, so listed origins are allowed
/// with credentials; `*` mirrors the caller's origin.
fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_permissive() {
        return CorsLayer::very_permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Session guard
///
/// Resolves the `pb_session` cookie and injects the `CurrentUser` into
/// request extensions; answers 401 otherwise.
async fn session_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = require_user_from_headers(&state.db, req.headers()).await?;

    tracing::debug!(user_id = user.id, "Session resolved");
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
