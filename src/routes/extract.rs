use axum::{
    Json,
    extract::{FromRequest, Request},
};
use axum_valid::Valid;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body checked with `validator`. Malformed and invalid payloads are both
/// answered as [`AppError::BadRequest`] with the usual `{"message"}` body.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Valid(Json(value)) = Valid::<Json<T>>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
