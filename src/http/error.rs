use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// A common error type that can be used throughout the API.
///
/// Can be returned in a `Result` from an API handler function.
///
/// For convenience, this represents both API errors as well as internal recoverable errors,
/// and maps them to appropriate status codes along with at least a minimally useful error
/// message in a plain JSON body.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Return `401 Unauthorized`
    #[error("unauthorized")]
    Unauthorized,

    /// Return `400 Bad Request`
    #[error("{0}")]
    BadRequest(String),

    #[error("Role \"{role_name}\" not found in group {group_id}.")]
    RoleNotFound { group_id: String, role_name: String },

    #[error("User {user_id} is not a member of group {group_id}.")]
    NotAMember { user_id: String, group_id: String },

    /// The cloud API answered with a non-success status.
    ///
    /// The status is passed through to our caller together with the parsed
    /// body, so game servers can see what the platform complained about.
    #[error("cloud API returned {status}: {message}")]
    Upstream {
        status: StatusCode,
        message: String,
        payload: serde_json::Value,
    },

    #[error("malformed response from cloud API: {0}")]
    MalformedResponse(String),

    #[error("gave up scanning memberships of group {group_id} after {pages} pages")]
    PaginationLimit { group_id: String, pages: u32 },

    /// The cloud API could not be reached at all.
    #[error("cloud API request failed")]
    Transport(#[source] anyhow::Error),

    /// Automatically return `500 Internal Server Error` on an `anyhow::Error`.
    ///
    /// The details are logged but never shown to the client.
    #[error("an internal server error occurred")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(serde::Serialize)]
struct ErrorBody {
    ok: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) | Self::RoleNotFound { .. } | Self::NotAMember { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Upstream { status, .. } if status.is_client_error() || status.is_server_error() => {
                *status
            }
            Self::Upstream { .. }
            | Self::MalformedResponse(_)
            | Self::PaginationLimit { .. }
            | Self::Transport(_) => StatusCode::BAD_GATEWAY,
            Self::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Axum allows you to return `Result` from handler functions, but the error type
/// also must be some sort of response type.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Self::Anyhow(e) => log::error!("Generic error: {e:?}"),
            Self::Transport(e) => log::error!("Cloud transport error: {e:?}"),
            Self::MalformedResponse(_) | Self::PaginationLimit { .. } => log::error!("{self}"),
            Self::Upstream { .. } => log::warn!("{self}"),
            _ => log::debug!("rejecting request: {self}"),
        }

        let status = self.status_code();
        let (upstream_status, details) = match &self {
            Self::Upstream {
                status, payload, ..
            } => (Some(status.as_u16()), Some(payload.clone())),
            _ => (None, None),
        };

        let body = ErrorBody {
            ok: false,
            error: self.to_string(),
            status: upstream_status,
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// A little helper trait for more easily converting upstream decoding errors
/// into our own error type.
pub trait ResultExt<T> {
    /// Maps a failed decode of a cloud payload to `Error::MalformedResponse`,
    /// prefixing `what` was being decoded.
    fn or_malformed(self, what: &str) -> Result<T, Error>;
}

impl<T> ResultExt<T> for Result<T, serde_json::Error> {
    fn or_malformed(self, what: &str) -> Result<T, Error> {
        self.map_err(|e| Error::MalformedResponse(format!("{what}: {e}")))
    }
}
