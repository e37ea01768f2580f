// Dashboard page
// Static HTML that polls /api/events; no server-side rendering

use axum::{response::Html, routing::get, Router};

const INDEX_HTML: &str = include_str!("../../static/index.html");

pub fn routes() -> Router {
    Router::new().route("/", get(index))
}

/// GET / - Dashboard
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
