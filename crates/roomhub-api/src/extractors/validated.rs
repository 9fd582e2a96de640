//! JSON body extractor that runs `validator` rules.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use roomhub_core::error::AppError;

use crate::error::ApiError;

/// A JSON body that deserialized and passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

/// First human-readable message among the field errors.
fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .next()
        .unwrap_or_else(|| "request body is invalid".to_string())
}

/// Run `validator` rules, mapping failures to a validation error.
pub fn check<T: Validate>(value: &T) -> Result<(), AppError> {
    value
        .validate()
        .map_err(|e| AppError::validation(first_message(&e)))
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        check(&value)?;
        Ok(Self(value))
    }
}
