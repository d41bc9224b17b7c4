//! The 404 Not Found page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// Route handler for pages that do not exist.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Build the 404 Not Found response.
pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(
            error_view(
                "Not Found",
                "404",
                "Sorry, the page you were looking for does not exist.",
                "Check the URL for typos or head back to the dashboard.",
            )
            .into_string(),
        ),
    )
        .into_response()
}
