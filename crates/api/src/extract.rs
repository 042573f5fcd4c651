//! `Params<T>` — binds named scalar parameters from the query string, or
//! from a JSON body when the query string does not bind.
//!
//! Callers have always sent insert parameters on the URL, even for POST, so
//! the query string is tried first.

use axum::async_trait;
use axum::extract::{FromRequest, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::ApiError;

#[derive(Debug, Clone, Copy, Default)]
pub struct Params<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Params<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let rejection = match Query::<T>::try_from_uri(req.uri()) {
            Ok(Query(value)) => return Ok(Params(value)),
            Err(rejection) => rejection,
        };

        if !is_json(req.headers()) {
            return Err(ApiError::BadRequest(rejection.body_text()));
        }

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Params(value))
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}
