use axum::Router;
use tower_http::trace::TraceLayer;

use crate::{App, comment, error::AppError, identity, pages, question};

pub fn router(app: App) -> Router {
    Router::new()
        .merge(pages::route())
        .merge(question::routes::route())
        .merge(comment::routes::route())
        .merge(identity::routes::route())
        .fallback(|| async { AppError::NotFound })
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}
