//! Landing page

use axum::{response::Html, routing::get, Router};

const BANNER: &str = r#"
<h1>Welcome to the CRM Backend API</h1>
<p>This API allows you to manage customer records: list, create, update, batch update and delete.</p>
"#;

/// GET /
async fn home() -> Html<&'static str> {
    Html(BANNER)
}

/// Home routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(home))
}
