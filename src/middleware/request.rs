use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub const COURSE_NOT_FOUND: &str = "Cannot find course";

/// Raw request body, decoded only when the handler asks for it.
///
/// Mutating routes check ownership before looking at the payload, so the
/// body must not be able to reject a request on its own. The content type is
/// not enforced and an empty body reads as `{}`.
#[derive(Debug, Clone, Default)]
pub struct JsonBody(Bytes);

impl JsonBody {
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let raw: &[u8] = if self.0.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &self.0
        };
        serde_json::from_slice(raw)
            .map_err(|e| ApiError::Validation(vec![format!("Invalid request body: {e}")]))
    }
}

impl From<&str> for JsonBody {
    fn from(raw: &str) -> Self {
        Self(Bytes::copy_from_slice(raw.as_bytes()))
    }
}

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(vec![rejection.body_text()]))?;
        Ok(Self(bytes))
    }
}

/// `{id}` segment of a course route. Anything that is not an integer names no course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseId(pub i64);

impl<S> FromRequestParts<S> for CourseId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let not_found = || ApiError::NotFound(COURSE_NOT_FOUND.to_string());
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| not_found())?;
        raw.parse().map(Self).map_err(|_| not_found())
    }
}
