use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
};

use crate::{render, store::StoreError};

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("store error: {0}")]
    StoreError(StoreError),
}

#[derive(Debug)]
pub enum AppError {
    /// The id in the path does not resolve to a document.
    NotFound,

    /// No valid session; the visitor is sent to log in and come back.
    Unauthenticated { login_url: String, next: String },

    /// Malformed request the client can fix.
    InvalidRequest(String, StatusCode),

    ServerError {
        error: ServerError,

        #[cfg(debug_assertions)]
        backtrace: Option<backtrace::Backtrace>,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Html(render::error_page(
                    "Not found",
                    "The page you are looking for does not exist or was deleted.",
                    None,
                )),
            )
                .into_response(),
            AppError::Unauthenticated { login_url, next } => {
                Redirect::to(&login_redirect(&login_url, &next)).into_response()
            }
            AppError::InvalidRequest(msg, status_code) => (
                status_code,
                Html(render::error_page("Bad request", &msg, None)),
            )
                .into_response(),
            AppError::ServerError {
                error,
                #[cfg(debug_assertions)]
                backtrace,
            } => {
                tracing::error!(%error, "Request failed");

                #[cfg(debug_assertions)]
                let debug_info = {
                    let frames = backtrace
                        .as_ref()
                        .map(filter_backtrace)
                        .unwrap_or_default();
                    let mut info = error.to_string();
                    for frame in frames {
                        info.push_str(&format!("\n  at {} ({})", frame.name, frame.loc));
                    }
                    Some(info)
                };
                #[cfg(not(debug_assertions))]
                let debug_info: Option<String> = None;

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(render::error_page(
                        "Something went wrong",
                        "Internal server error",
                        debug_info.as_deref(),
                    )),
                )
                    .into_response()
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => AppError::NotFound,
            e => AppError::ServerError {
                error: ServerError::StoreError(e),

                #[cfg(debug_assertions)]
                backtrace: Some(backtrace::Backtrace::new()),
            },
        }
    }
}

impl From<(String, StatusCode)> for AppError {
    fn from((msg, status_code): (String, StatusCode)) -> Self {
        AppError::InvalidRequest(msg, status_code)
    }
}

/// `login_url` with `next` appended as an encoded query parameter, so the
/// path can never add parameters of its own.
fn login_redirect(login_url: &str, next: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("next", next)
        .finish();
    let separator = if login_url.contains('?') { '&' } else { '?' };

    format!("{login_url}{separator}{query}")
}

#[derive(Debug)]
#[cfg_attr(not(debug_assertions), allow(dead_code))]
struct FrameInfo {
    name: String,
    loc: String,
}

#[cfg_attr(not(debug_assertions), allow(dead_code))]
fn filter_backtrace(backtrace: &backtrace::Backtrace) -> Vec<FrameInfo> {
    const MODULE_PREFIX: &str = concat!(env!("CARGO_PKG_NAME"), "::");
    let mut frames_info: Vec<FrameInfo> = Vec::new();

    for frame in backtrace.frames() {
        for symbol in frame.symbols() {
            if let (Some(name), Some(filename), Some(lineno)) = (
                symbol.name().map(|n| n.to_string()),
                symbol.filename().map(|f| f.to_owned()),
                symbol.lineno(),
            ) {
                if name.contains(MODULE_PREFIX) {
                    frames_info.push(FrameInfo {
                        name,
                        loc: format!("{}:{}", filename.display(), lineno),
                    });
                }
            }
        }
    }

    frames_info
}
