use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::fetcher::PageFetcher;
use crate::query_state::QueryState;

pub mod handlers;
pub mod models;

/// Shared by every handler: the one query session and the fetcher it uses.
pub struct AppState<F> {
    pub session: Arc<Mutex<QueryState>>,
    pub fetcher: Arc<F>,
}

impl<F> AppState<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            session: Arc::new(Mutex::new(QueryState::new())),
            fetcher: Arc::new(fetcher),
        }
    }
}

impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            fetcher: self.fetcher.clone(),
        }
    }
}

pub fn create_router<F>(state: AppState<F>, static_dir: &str) -> Router
where
    F: PageFetcher + 'static,
{
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Page and form actions
        .route("/", get(handlers::index_handler::<F>))
        .route("/search", post(handlers::submit_handler::<F>))
        .route("/more", post(handlers::load_more_handler::<F>))
        .route("/clear", post(handlers::clear_handler::<F>))
        // API routes
        .route("/api/search", post(handlers::search_handler::<F>))
        .with_state(state)
        // Static assets for the page
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(cors)
}
