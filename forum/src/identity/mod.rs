use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{App, error::AppError};

use self::models::identity::Identity;

pub mod models;
pub mod routes;

pub const COOKIE_NAME: &str = "auth_token";

#[derive(thiserror::Error, Debug)]
pub enum AuthenticationError {
    #[error("Authentication required, but no cookie `{COOKIE_NAME}` found in headers.")]
    NoCookie,

    #[error(
        "Unauthorized, please check if you're logged in by refreshing the \
         page. This could be due to an expired session or token has became invalid."
    )]
    Unauthorized,
}

/// The identity behind the request's session cookie, if any.
pub struct MaybeAuthUser(pub Result<Identity, AuthenticationError>);

impl FromRequestParts<App> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &App) -> Result<Self, Self::Rejection> {
        let jar = axum_extra::extract::cookie::CookieJar::from_headers(&parts.headers);

        let session_token = if let Some(t) = jar.get(COOKIE_NAME) {
            t.value().to_owned()
        } else {
            return Ok(MaybeAuthUser(Err(AuthenticationError::NoCookie)));
        };

        let identity = state.sessions.identity_for_token(&session_token).await?;

        Ok(MaybeAuthUser(
            identity.ok_or(AuthenticationError::Unauthorized),
        ))
    }
}

/// Requires a logged in identity. Anonymous requests are redirected to the
/// login page with the original path as `next`.
pub struct AuthUser(pub Identity);

impl FromRequestParts<App> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &App) -> Result<Self, Self::Rejection> {
        let MaybeAuthUser(auth_user) = MaybeAuthUser::from_request_parts(parts, state).await?;

        match auth_user {
            Ok(identity) => Ok(AuthUser(identity)),
            Err(e) => {
                tracing::debug!(path = %parts.uri.path(), "{e}");
                Err(AppError::Unauthenticated {
                    login_url: state.config.login_url.clone(),
                    next: parts.uri.path().to_owned(),
                })
            }
        }
    }
}
