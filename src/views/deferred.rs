use maud::{html, Markup};

use crate::query::QueryState;

/// Renders the loading or error placeholder, or `render` once data is available.
pub fn deferred<T>(state: &QueryState<T>, render: impl FnOnce(&T) -> Markup) -> Markup {
    match state {
        QueryState::Loading => html! {
            div class="deferred deferred-loading" role="status" {
                span class="spinner" {}
                span { "Loading..." }
            }
        },
        QueryState::Error(err) => html! {
            div class="deferred deferred-error" role="alert" {
                h2 { "Error" }
                @if let Some(status) = err.status {
                    p class="error-status" { "Status " (status) }
                }
                p class="error-message" { (err.message) }
            }
        },
        QueryState::Loaded(data) => render(data),
    }
}
