use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{rejection::PathRejection, OriginalUri, Path as AxumPath, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use maud::html;
use tracing::{info, warn};

use crate::api::QueryKey;
use crate::query::FileContentQuery;
use crate::route::RouteParams;
use crate::views::file_content_page::{page_content, page_shell, PageContext};

// --- State ---
pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub query: FileContentQuery,
}

// --- Handlers ---

/// Serves the file content page.
///
/// A plain request gets the page shell in its loading state. The htmx request
/// the shell issues on load runs the query and gets the error or file view.
pub async fn file_content_handler(
    State(state): State<SharedState>,
    captures: Result<AxumPath<HashMap<String, String>>, PathRejection>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Response {
    // Undecodable captures degrade to the defaults instead of a 400.
    let captures = match captures {
        Ok(AxumPath(captures)) => captures,
        Err(e) => {
            warn!("Ignoring route parameters of {}: {}", uri.path(), e);
            HashMap::new()
        }
    };
    let params = RouteParams::from_captures(&captures);
    let ctx = PageContext::new(params, uri.path());
    let vary = [(header::VARY, "HX-Request")];

    if !is_htmx(&headers) {
        info!("Page requested: {}", uri.path());
        let fragment_url = uri.path_and_query().map_or(uri.path(), |pq| pq.as_str());
        return (vary, page_shell(&ctx, fragment_url)).into_response();
    }

    // --- htmx fragment: run the query ---
    let key = QueryKey {
        project_name: ctx.params.project_name.clone(),
        repo_name: ctx.params.repo_name.clone(),
        file_path: ctx.params.file_path(),
        revision: ctx.params.revision.clone(),
    };
    info!(
        "Loading {}/{}/{} at revision {}",
        key.project_name, key.repo_name, key.file_path, key.revision
    );
    let result = state.query.run(key).await;

    // Errors are rendered inside the page, so the fragment is always a 200 for htmx to swap.
    (vary, page_content(&ctx, &result)).into_response()
}

pub async fn not_found_handler(OriginalUri(uri): OriginalUri) -> Response {
    info!("No route for {}", uri.path());
    error_response(StatusCode::NOT_FOUND, "Page not found.")
}

// --- Utility Functions ---

/// htmx marks its own requests with `HX-Request: true`.
fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .is_some_and(|v| v.as_bytes().eq_ignore_ascii_case(b"true"))
}

/// Helper to generate consistent Maud-based error responses.
pub fn error_response(status_code: StatusCode, message: &str) -> Response {
    let markup = html! {
        div class="deferred deferred-error" role="alert" {
            h2 { "Error" }
            p { (message) }
        }
    };
    (status_code, markup).into_response()
}
