use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::error::ApiError;

/// Record id taken from the `:id` path segment
///
/// Ids that are not UUIDs cannot name an existing row, so they are carried
/// as `None` and the handler answers as it would for a missing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub Option<Uuid>);

impl RecordId {
    /// The id, or the handler's not-found error
    pub fn or_not_found(self, message: &'static str) -> Result<Uuid, ApiError> {
        self.0.ok_or_else(|| ApiError::not_found(message))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection, "Path rejected");
                ApiError::not_found("Not found")
            })?;

        let id = Uuid::parse_str(&raw).ok();
        if id.is_none() {
            tracing::debug!(raw_id = %raw, "Path id is not a UUID");
        }
        Ok(RecordId(id))
    }
}
