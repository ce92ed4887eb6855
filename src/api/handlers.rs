use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;
use std::time::Instant;

use crate::controller::SearchController;
use crate::provider::SearchProvider;
use crate::views::SearchPageView;

use super::models::{SearchParams, SearchResponse};

/// Runs one search and returns the rendered page model.
///
/// Provider failures are reported inside the model, so this always answers
/// 200 once the query string parses.
pub async fn search_handler<P>(
    State(provider): State<Arc<P>>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse>
where
    P: SearchProvider + 'static,
{
    let start = Instant::now();

    let controller = SearchController::new(provider);
    controller
        .execute_search(params.keywords(), params.page())
        .await;

    let view = SearchPageView::from_state(&controller.snapshot());
    let processing_time_ms = start.elapsed().as_millis();

    tracing::info!(
        keywords = params.keywords(),
        page = params.page(),
        cards = view.cards.len(),
        elapsed_ms = processing_time_ms as u64,
        "search served"
    );

    Json(SearchResponse {
        view,
        processing_time_ms,
    })
}
