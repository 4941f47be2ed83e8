use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::validator::{USER_ID_HEADER, ValidatedSaveRequest};

/// Failure reasons reported by the DB layer collaborator.
#[derive(Debug, Error)]
pub enum DbLayerError {
    #[error("the DB layer rejected the provided credentials")]
    CredentialRejected,

    #[error("the DB layer is unavailable: {0}")]
    Unavailable(String),

    #[error("the DB layer rejected the payload: {0}")]
    MalformedPayload(String),

    #[error("unexpected DB layer failure: {0}")]
    Unknown(String),
}

/// Document returned by the DB layer after a successful save.
#[derive(Debug, Deserialize)]
pub struct DbLayerResponse {
    pub post_id: Option<String>,
}

/// Capability that performs the authenticated call to the backing data store.
/// On success it returns the raw response body from the DB layer.
#[async_trait]
pub trait DbLayerClient: Send + Sync {
    async fn save_post(&self, request: &ValidatedSaveRequest) -> Result<String, DbLayerError>;
}

pub struct HttpDbLayerClient {
    client: reqwest::Client,
    base_api_url: String,
}

impl HttpDbLayerClient {
    pub fn new(base_api_url: String) -> Self {
        HttpDbLayerClient {
            client: reqwest::Client::new(),
            base_api_url,
        }
    }

    // Posts that already carry an ID are updates, the rest are creations.
    fn endpoint(&self, request: &ValidatedSaveRequest) -> String {
        let has_post_id = request
            .post_body
            .get("postId")
            .and_then(|id| id.as_str())
            .is_some_and(|id| !id.is_empty());

        if has_post_id {
            format!("{}/api/UpdatePost", self.base_api_url)
        } else {
            format!("{}/api/CreatePost", self.base_api_url)
        }
    }
}

#[async_trait]
impl DbLayerClient for HttpDbLayerClient {
    async fn save_post(&self, request: &ValidatedSaveRequest) -> Result<String, DbLayerError> {
        let endpoint = self.endpoint(request);
        log::info!(
            "Forwarding save request for user '{}' to '{}'",
            request.user_id,
            endpoint
        );

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&request.db_token)
            .header(USER_ID_HEADER, &request.user_id)
            .json(&request.post_body)
            .send()
            .await
            .map_err(|err| DbLayerError::Unavailable(err.to_string()))?;

        let status = response.status();
        // A transport failure while reading the body counts as unavailable
        // too, the same as one during the request itself.
        let body = response
            .text()
            .await
            .map_err(|err| DbLayerError::Unavailable(err.to_string()))?;

        if status.is_success() {
            return Ok(body);
        }

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(DbLayerError::CredentialRejected)
            }
            StatusCode::BAD_REQUEST => Err(DbLayerError::MalformedPayload(body)),
            StatusCode::NOT_FOUND => Err(DbLayerError::Unavailable("404: Not Found".to_owned())),
            _ if status.is_server_error() => Err(DbLayerError::Unavailable(body)),
            _ => Err(DbLayerError::Unknown(body)),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn request_with_body(post_body: serde_json::Value) -> ValidatedSaveRequest {
        ValidatedSaveRequest {
            user_id: "test_user_id".to_owned(),
            db_token: "db-token".to_owned(),
            post_body,
        }
    }

    #[test]
    fn posts_without_an_id_go_to_create() {
        let client = HttpDbLayerClient::new("http://db-layer".to_owned());
        let request = request_with_body(json!({"name": "test post 1"}));
        assert_eq!(client.endpoint(&request), "http://db-layer/api/CreatePost");
    }

    #[test]
    fn posts_with_an_empty_id_go_to_create() {
        let client = HttpDbLayerClient::new("http://db-layer".to_owned());
        let request = request_with_body(json!({"postId": ""}));
        assert_eq!(client.endpoint(&request), "http://db-layer/api/CreatePost");
    }

    #[test]
    fn posts_with_an_id_go_to_update() {
        let client = HttpDbLayerClient::new("http://db-layer".to_owned());
        let request = request_with_body(json!({"postId": "test_post_id"}));
        assert_eq!(client.endpoint(&request), "http://db-layer/api/UpdatePost");
    }

    #[tokio::test]
    async fn connection_dropped_mid_request_maps_to_unavailable() {
        // Accept the connection and drop it without answering, so the
        // failure happens after connect rather than during it.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((socket, _)) = listener.accept().await {
                drop(socket);
            }
        });

        let client = HttpDbLayerClient::new(format!("http://{}", addr));
        let request = request_with_body(json!({"name": "test post 1"}));

        let result = client.save_post(&request).await;
        assert!(matches!(result, Err(DbLayerError::Unavailable(_))));
    }
}
