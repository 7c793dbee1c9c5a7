use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that has been deserialized and validated. Any failure is
/// answered with 400 before the handler runs.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!("rejected request body: {}", rejection.body_text());
            (StatusCode::BAD_REQUEST, rejection.body_text()).into_response()
        })?;

        value.validate().map_err(|errors| {
            tracing::debug!("request body failed validation: {errors}");
            (StatusCode::BAD_REQUEST, errors.to_string()).into_response()
        })?;

        Ok(Self(value))
    }
}
