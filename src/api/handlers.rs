use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{Html, Redirect},
};
use std::time::Instant;

use crate::data_models::PaginationCursor;
use crate::fetcher::{FetchError, PageFetcher};
use crate::query_state::PendingFetch;
use crate::renderer::RenderedResults;
use crate::view::render_page;

use super::AppState;
use super::models::{QueryForm, SearchRequest, SearchResponse};

pub async fn index_handler<F: PageFetcher + 'static>(
    State(state): State<AppState<F>>,
) -> Html<String> {
    let session = state.session.lock().await;
    Html(render_page(&session))
}

pub async fn submit_handler<F: PageFetcher + 'static>(
    State(state): State<AppState<F>>,
    Form(form): Form<QueryForm>,
) -> Redirect {
    let pending = state.session.lock().await.submit(&form.query);
    if let Some(pending) = pending {
        run_fetch(&state, pending).await;
    }
    Redirect::to("/")
}

pub async fn load_more_handler<F: PageFetcher + 'static>(
    State(state): State<AppState<F>>,
) -> Redirect {
    let pending = state.session.lock().await.load_more();
    if let Some(pending) = pending {
        run_fetch(&state, pending).await;
    }
    Redirect::to("/")
}

pub async fn clear_handler<F: PageFetcher + 'static>(
    State(state): State<AppState<F>>,
) -> Redirect {
    state.session.lock().await.clear();
    Redirect::to("/")
}

/// The session lock is not held across the fetch, so a clear can land while
/// it is outstanding and the late result gets discarded. The fetch runs in its
/// own task so a dropped request still completes the session.
async fn run_fetch<F: PageFetcher + 'static>(state: &AppState<F>, pending: PendingFetch) {
    let state = state.clone();
    let task = tokio::spawn(async move {
        let result = state
            .fetcher
            .fetch(&pending.query, pending.cursor.as_ref())
            .await;
        let completion = state.session.lock().await.complete(&pending, result);
        tracing::debug!(?completion, generation = pending.generation(), "fetch completed");
    });
    if let Err(e) = task.await {
        tracing::error!("fetch task failed: {:#}", e);
    }
}

pub async fn search_handler<F: PageFetcher + 'static>(
    State(state): State<AppState<F>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = Instant::now();

    let query = request.query.trim();
    if query.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Query cannot be empty".to_string()));
    }

    let cursor = request
        .page_token
        .filter(|t| !t.is_empty())
        .map(PaginationCursor::new);

    let page = state
        .fetcher
        .fetch(query, cursor.as_ref())
        .await
        .map_err(|e| {
            let status = match e {
                FetchError::Network { .. } => StatusCode::BAD_GATEWAY,
                FetchError::Request { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, e.to_string())
        })?;

    let results = RenderedResults::render(&page.items);
    let total_results = results.len();
    let processing_time_ms = start.elapsed().as_millis();

    Ok(Json(SearchResponse {
        query: query.to_string(),
        results,
        total_results,
        next_page_token: page.next_cursor.map(|c| c.as_str().to_string()),
        processing_time_ms,
    }))
}
