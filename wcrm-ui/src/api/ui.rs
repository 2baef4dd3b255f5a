//! Embedded single-page UI assets

use axum::http::header::CONTENT_TYPE;
use axum::response::{Html, IntoResponse, Response};

const INDEX_HTML: &str = include_str!("../ui/index.html");
const APP_JS: &str = include_str!("../ui/app.js");
const APP_CSS: &str = include_str!("../ui/wcrm.css");

pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn serve_app_js() -> Response {
    ([(CONTENT_TYPE, "application/javascript")], APP_JS).into_response()
}

pub async fn serve_css() -> Response {
    ([(CONTENT_TYPE, "text/css")], APP_CSS).into_response()
}
