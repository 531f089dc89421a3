//! Extracting the record ID from routes such as `/email/{email_id}`.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::Error;

/// The integer ID of an email or category taken from the URL path.
///
/// Only plain digits that fit in an `i64` are accepted. Anything else is
/// rejected with [Error::NotFound], the same as an ID with no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| Error::NotFound)?;

        parse_record_id(&raw_id).map(RecordId)
    }
}

fn parse_record_id(raw_id: &str) -> Result<i64, Error> {
    if raw_id.is_empty() || !raw_id.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(Error::NotFound);
    }

    raw_id.parse().map_err(|_| Error::NotFound)
}
