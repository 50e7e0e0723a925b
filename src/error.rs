//! Error types for talking to the product service.
//!
//! [`RequestError`] is what every [`crate::api::ProductApi`] call fails
//! with. The client never retries or reinterprets a failure; the list
//! coordinator turns it into a user-facing message instead.

use reqwest::StatusCode;
use serde::Deserialize;

/// Failure of a single request against the product service.
///
/// # Taxonomy
///
/// | Variant      | Cause                                         |
/// |--------------|-----------------------------------------------|
/// | `Transport`  | connection refused, timeout, TLS, ...          |
/// | `Status`     | any non-success status not covered below      |
/// | `Validation` | 400 / 422 carrying backend validation errors  |
/// | `Decode`     | body is not the expected JSON shape           |
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status returned.
        status: StatusCode,
        /// Raw response body, possibly empty.
        body: String,
    },

    /// The backend rejected the request data.
    #[error("validation failed ({status}): {}", messages.join("; "))]
    Validation {
        /// HTTP status returned (400 or 422).
        status: StatusCode,
        /// Validation messages extracted from the body.
        messages: Vec<String>,
    },

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl RequestError {
    /// Builds the error for a non-success response.
    ///
    /// 400 and 422 become [`RequestError::Validation`] with the messages the
    /// backend listed; everything else is [`RequestError::Status`].
    #[must_use]
    pub fn from_status(status: StatusCode, body: String) -> Self {
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY {
            let messages = validation_messages(&body);
            if !messages.is_empty() {
                return Self::Validation { status, messages };
            }
        }
        Self::Status { status, body }
    }

    /// Returns the HTTP status, if the backend responded at all.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } | Self::Validation { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            Self::Decode(_) => None,
        }
    }

    /// Returns `true` for [`RequestError::Status`] with 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Error bodies the backend is known to send.
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    /// `{"errors": {"name": ["can't be blank"]}}`
    FieldErrors {
        errors: std::collections::BTreeMap<String, Vec<String>>,
    },
    /// `{"errors": ["Name can't be blank"]}`
    ErrorList { errors: Vec<String> },
    /// `{"error": "Price must be positive"}`
    Single { error: String },
}

/// Extracts human-readable validation messages from an error body.
///
/// Falls back to the trimmed body text when it is not one of the known
/// JSON shapes.
fn validation_messages(body: &str) -> Vec<String> {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody::FieldErrors { errors }) => errors
            .into_iter()
            .flat_map(|(field, messages)| {
                messages
                    .into_iter()
                    .map(move |message| format!("{field} {message}"))
            })
            .collect(),
        Ok(ErrorBody::ErrorList { errors }) => errors,
        Ok(ErrorBody::Single { error }) => vec![error],
        Err(_) => {
            let text = body.trim();
            if text.is_empty() {
                Vec::new()
            } else {
                vec![text.to_string()]
            }
        }
    }
}
