use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/entries", post(handlers::add_entry_form))
        .route("/chart.svg", get(handlers::get_chart))
        .route("/api/entries", get(handlers::list_entries).post(handlers::add_entry))
        .route("/api/summary", get(handlers::get_summary))
        .with_state(state)
}
