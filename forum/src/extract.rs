use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::FormRejection},
    http::{StatusCode, request::Parts},
};

use crate::error::AppError;

// We define our own `Form` extractor that customizes the error from `axum::Form`
pub struct Form<T>(pub T);

impl<S, T> FromRequest<S> for Form<T>
where
    axum::Form<T>: FromRequest<S, Rejection = FormRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Form::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            // convert the error from `axum::Form` into whatever we want
            Err(rejection) => Err((rejection.body_text(), StatusCode::UNPROCESSABLE_ENTITY).into()),
        }
    }
}

/// The numeric id in a `/{id}` path segment. Anything that is not a positive
/// integer can't name a document, so it is a 404 rather than a bad request.
pub struct EntityId(pub i32);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound)?;

        match raw.parse::<i32>() {
            Ok(id) if id > 0 => Ok(EntityId(id)),
            _ => Err(AppError::NotFound),
        }
    }
}
