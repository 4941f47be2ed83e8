use std::sync::Arc;

use axum::{Extension, body::Bytes, http::HeaderMap, response::IntoResponse};

use crate::{
    api::Result,
    error::Error,
    service::{DbLayerClient, DbLayerError, DbLayerResponse},
    validator,
};

pub async fn post(
    headers: HeaderMap,
    Extension(db_layer): Extension<Arc<dyn DbLayerClient>>,
    body: Bytes,
) -> Result<impl IntoResponse> {
    // Validation happens before any side effect; a rejected request never
    // reaches the DB layer.
    let request = validator::validate(&headers, &body).inspect_err(|rejection| {
        log::warn!("Rejected save request: {}", rejection.message());
    })?;

    log::info!("Saving post for user '{}'...", request.user_id);
    let payload = match db_layer.save_post(&request).await {
        Ok(payload) => payload,
        Err(DbLayerError::CredentialRejected) => {
            log::warn!(
                "The DB layer rejected the credentials of user '{}'",
                request.user_id
            );
            return Err(Error::CredentialRejected);
        }
        Err(DbLayerError::MalformedPayload(detail)) => {
            log::warn!("The DB layer rejected the post data: {}", detail);
            return Err(Error::PostDataRejected(detail));
        }
        Err(DbLayerError::Unavailable(detail)) => {
            log::error!("Error connecting to the DB layer: {}", detail);
            return Err(Error::DownstreamUnavailable(detail));
        }
        Err(DbLayerError::Unknown(detail)) => {
            log::error!("Unexpected DB layer failure: {}", detail);
            return Err(Error::UnexpectedError);
        }
    };

    let document: DbLayerResponse = serde_json::from_str(&payload).map_err(|err| {
        log::error!("Failed to decode the DB layer response: {}", err);
        Error::UnexpectedError
    })?;
    let post_id = document.post_id.unwrap_or_default();
    if post_id.is_empty() {
        log::error!("Post ID not found in the response from the DB layer.");
        return Err(Error::MissingPostId);
    }

    log::info!("Post '{}' saved for user '{}'", post_id, request.user_id);
    Ok(payload)
}
