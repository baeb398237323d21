use std::sync::Arc;

use axum::{Json, extract::State as AxumState, response::Html};
use tally::Counts;

use crate::{error::AppError, pages, state::State};

pub async fn index_handler() -> Html<&'static str> {
    Html(pages::INDEX)
}

pub async fn results_handler(AxumState(state): AxumState<Arc<State>>) -> Result<Json<Counts>, AppError> {
    Ok(Json(state.tally.snapshot().await?))
}

pub async fn health_handler() -> &'static str {
    "ok"
}
