use axum::{http::StatusCode, response::IntoResponse};

#[derive(Debug)]
pub enum Error {
    MissingUserIdHeader,
    MissingDbTokenHeader,
    MalformedBody,
    PostDataRejected(String),
    CredentialRejected,
    DownstreamUnavailable(String),
    MissingPostId,
    UnexpectedError,
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingUserIdHeader | Self::MissingDbTokenHeader => StatusCode::BAD_REQUEST,
            Self::MalformedBody | Self::PostDataRejected(_) => StatusCode::BAD_REQUEST,
            Self::CredentialRejected => StatusCode::UNAUTHORIZED,
            Self::DownstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::MissingPostId | Self::UnexpectedError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            // The two header messages differ in punctuation; clients assert on
            // the exact strings, so both are kept as-is.
            Self::MissingUserIdHeader => "Missing the following header: 'X-User-ID'.".to_owned(),
            Self::MissingDbTokenHeader => "Missing the following header 'X-Db-Token'.".to_owned(),
            Self::MalformedBody => "Invalid post data: request body is not valid JSON.".to_owned(),
            Self::PostDataRejected(detail) => {
                format!("The DB layer rejected the post data: {}", detail)
            }
            Self::CredentialRejected => "The DB layer rejected the provided credentials.".to_owned(),
            Self::DownstreamUnavailable(detail) => {
                format!("Error connecting to the DB layer: {}", detail)
            }
            Self::MissingPostId => "Post ID not found in the response from the DB layer.".to_owned(),
            Self::UnexpectedError => "Unexpected error happened".to_owned(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        // Plain-text body: the error messages are part of the wire contract
        // and must arrive byte-for-byte.
        (self.status_code(), self.message()).into_response()
    }
}
