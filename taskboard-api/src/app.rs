/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use taskboard_api::{app::AppState, config::Config};
/// use taskboard_shared::db::pool::create_pool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.database.pool_config()).await?;
/// let state = AppState::new(pool);
/// let app = taskboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::middleware::cors::CorsLayer;
use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Holds no
/// mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// GET  /ping
/// GET  /health
/// POST /signup
/// POST /login
/// POST /gettasks
/// POST /gettask
/// POST /updatetask
/// POST /completetask
/// POST /incompletetask
/// POST /deletetask
/// POST /addtask
/// POST /addcategory
/// POST /allcategories
/// ```
///
/// # Middleware Stack
///
/// Outermost first:
/// 1. CORS (answers `OPTIONS` before anything else runs)
/// 2. Request tracing (tower-http TraceLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes::{auth, categories, health, tasks};

    Router::new()
        .route("/ping", get(health::ping))
        .route("/health", get(health::health_check))
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/gettasks", post(tasks::get_tasks))
        .route("/gettask", post(tasks::get_task))
        .route("/updatetask", post(tasks::update_task))
        .route("/completetask", post(tasks::complete_task))
        .route("/incompletetask", post(tasks::incomplete_task))
        .route("/deletetask", post(tasks::delete_task))
        .route("/addtask", post(tasks::add_task))
        .route("/addcategory", post(categories::add_category))
        .route("/allcategories", post(categories::all_categories))
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::new())
        .with_state(state)
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 page not found")
}
