use axum::{Router, response::IntoResponse, response::Redirect, routing::post};
use axum_extra::extract::CookieJar;
use time::Duration;

use crate::App;

use super::COOKIE_NAME;

pub fn route() -> Router<App> {
    Router::<App>::new().route("/logout", post(logout))
}

#[axum::debug_handler]
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let auth_cookie = axum_extra::extract::cookie::Cookie::build(COOKIE_NAME)
        .secure(true)
        .http_only(true)
        .max_age(Duration::ZERO)
        .path("/");

    (jar.add(auth_cookie), Redirect::to("/"))
}
