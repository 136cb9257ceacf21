//! The file content page: shell document and the loaded file view.

use humansize::{format_size, BINARY};
use maud::{html, Markup, DOCTYPE};

use crate::api::FileContent;
use crate::query::QueryState;
use crate::route::{file_extension, file_name_from_url_path, RouteParams};

use super::{deferred, Breadcrumbs, FileEditor, FileIcon};

// --- Breadcrumb layout ---

/// Breadcrumb indices hidden on this page: `app`, `repos`, `files` and the revision.
const OMIT_INDEX_LIST: [usize; 4] = [0, 3, 5, 6];
/// The repository crumb points at the tree view of the latest revision.
const SUFFIXES: [(usize, &str); 1] = [(4, "/tree/head")];

// --- Page Context ---

/// Values derived from the request for one render of the page.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub params: RouteParams,
    /// Path component of the request URL.
    pub url_path: String,
    pub file_name: String,
    pub file_extension: String,
}

impl PageContext {
    pub fn new(params: RouteParams, url_path: &str) -> Self {
        let file_name = file_name_from_url_path(url_path);
        let file_extension = file_extension(&file_name).to_string();
        Self {
            params,
            url_path: url_path.to_string(),
            file_name,
            file_extension,
        }
    }
}

// --- Markup ---

/// Full HTML document; the content area loads itself from `fragment_url` via htmx.
pub fn page_shell(ctx: &PageContext, fragment_url: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (ctx.file_name) " · " (ctx.params.project_name) "/" (ctx.params.repo_name) " · Dogma" }
                link rel="stylesheet" href="/static/styles.css";
                // htmx drives the deferred load of the file view
                script src="https://unpkg.com/htmx.org@1.9.12" defer {}
            }
            body {
                div #file-content-page
                    hx-get=(fragment_url)
                    hx-trigger="load"
                    hx-swap="innerHTML" {
                    // Replaced by the fragment once the query settles
                    (deferred(&QueryState::<FileContent>::Loading, |_| html! {}))
                }
            }
        }
    }
}

/// Body of the page for a query result: placeholder, error, or the file view.
pub fn page_content(ctx: &PageContext, state: &QueryState<FileContent>) -> Markup {
    deferred(state, |file| file_view(ctx, file))
}

fn file_view(ctx: &PageContext, file: &FileContent) -> Markup {
    let params = &ctx.params;
    html! {
        div class="file-view" {
            (Breadcrumbs {
                path: &ctx.url_path,
                omit_index_list: &OMIT_INDEX_LIST,
                suffixes: &SUFFIXES,
            })
            div class="file-header" {
                h1 class="file-title" {
                    (FileIcon { file_name: &ctx.file_name })
                    span { (ctx.file_name) }
                }
                span class="tag revision-tag" title="Go to History to view all revisions" {
                    "Revision " (params.revision) " ⓘ"
                }
            }
            // Size of the fetched content, not of the stored entry
            div class="file-meta" {
                (format_size(file.content.len(), BINARY))
            }
            (FileEditor {
                project_name: &params.project_name,
                repo_name: &params.repo_name,
                extension: &ctx.file_extension,
                original_content: &file.content,
                path: &file.path,
                name: &ctx.file_name,
                revision: &params.revision,
            })
        }
    }
}
