//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered as HTML fragments that HTMX swaps into the
//! `#alert-container` element defined in [crate::html::base].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};

/// An alert message shown at the bottom of the page.
pub enum Alert {
    /// An alert indicating an operation succeeded.
    Success {
        /// A short summary of what succeeded.
        message: String,
        /// Extra context, may be empty.
        details: String,
    },
    /// An alert indicating an operation failed.
    Error {
        /// A short summary of what went wrong.
        message: String,
        /// What the user can do about it, may be empty.
        details: String,
    },
}

impl Alert {
    /// Create a new success alert.
    pub fn success(message: &str, details: &str) -> Self {
        Self::Success {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create a new error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Render the alert as an HTML fragment.
    ///
    /// The fragment includes a small script that reveals the alert container
    /// and hides it again after a few seconds.
    pub fn into_html(self) -> Markup {
        let (message, details, text_style, background_style) = match self {
            Alert::Success { message, details } => (
                message,
                details,
                "text-green-800 dark:text-green-400",
                "bg-green-50 dark:bg-gray-800",
            ),
            Alert::Error { message, details } => (
                message,
                details,
                "text-red-800 dark:text-red-400",
                "bg-red-50 dark:bg-gray-800",
            ),
        };

        // Template adapted from https://flowbite.com/docs/components/alerts/
        html!(
            div
                class={ "p-4 mb-4 text-sm rounded-lg shadow " (text_style) " " (background_style) }
                role="alert"
            {
                p class="font-medium" { (message) }

                @if !details.is_empty() {
                    p { (details) }
                }
            }

            script
            {
                (PreEscaped(r#"
                (function () {
                    const container = document.getElementById('alert-container');

                    if (container === null) {
                        return;
                    }

                    container.classList.remove('hidden');
                    setTimeout(() => {
                        container.classList.add('hidden');
                        container.innerHTML = '';
                    }, 5000);
                })();
                "#))
            }
        )
    }

    /// Convert the alert into an HTTP response with the given status code.
    pub fn into_response_with_status(self, status_code: StatusCode) -> Response {
        (status_code, self.into_html()).into_response()
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_response_with_status(StatusCode::OK)
    }
}
