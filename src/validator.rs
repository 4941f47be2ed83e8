use std::fmt;

use axum::http::HeaderMap;
use serde_json::Value;

use crate::error::Error;

pub const USER_ID_HEADER: &str = "X-User-ID";
pub const DB_TOKEN_HEADER: &str = "X-Db-Token";

/// A save request whose headers and body passed validation. The contained
/// values are taken from the request as received; nothing is normalized.
pub struct ValidatedSaveRequest {
    pub user_id: String,
    pub db_token: String,
    pub post_body: Value,
}

// The db token is an opaque credential and must never end up in a log line,
// so Debug is written by hand instead of derived.
impl fmt::Debug for ValidatedSaveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedSaveRequest")
            .field("user_id", &self.user_id)
            .field("db_token", &"<redacted>")
            .field("post_body", &self.post_body)
            .finish()
    }
}

/// Case-insensitive header accessor. A header counts as present only if its
/// value is non-empty after trimming.
pub fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
}

/// Accepts or rejects a request before any side effect occurs. Checks run in
/// a fixed order and stop at the first failure: user ID header, db token
/// header, then body parseability.
pub fn validate(headers: &HeaderMap, body: &[u8]) -> Result<ValidatedSaveRequest, Error> {
    let user_id = header_value(headers, USER_ID_HEADER).ok_or(Error::MissingUserIdHeader)?;
    let db_token = header_value(headers, DB_TOKEN_HEADER).ok_or(Error::MissingDbTokenHeader)?;

    // The post payload belongs to the DB layer; beyond being valid JSON its
    // shape is passed through untouched.
    let post_body: Value = serde_json::from_slice(body).map_err(|_| Error::MalformedBody)?;

    Ok(ValidatedSaveRequest {
        user_id: user_id.to_owned(),
        db_token: db_token.to_owned(),
        post_body,
    })
}
