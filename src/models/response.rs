use actix_web::{http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};

use super::UserView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Error,
}

/// Result of an insert: the id the new document was stored under.
///
/// Serialized as `InsertedID`, the key existing clients of this API read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InsertedId {
    #[serde(rename = "InsertedID")]
    pub inserted_id: String,
}

/// Payload carried in the envelope's `data` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum ResponseData {
    Inserted(InsertedId),
    User { user: UserView },
    Users { users: Vec<UserView> },
    Error(String),
    Confirmation(String),
}

/// Uniform wrapper for every user endpoint reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Envelope {
    pub status: u16,
    pub message: Outcome,
    pub data: ResponseData,
}

impl Envelope {
    pub fn success(status: StatusCode, data: ResponseData) -> Self {
        Envelope {
            status: status.as_u16(),
            message: Outcome::Success,
            data,
        }
    }

    pub fn error(status: StatusCode, text: impl Into<String>) -> Self {
        Envelope {
            status: status.as_u16(),
            message: Outcome::Error,
            data: ResponseData::Error(text.into()),
        }
    }

    /// Renders the envelope with its own status as the HTTP status.
    pub fn into_response(self) -> HttpResponse {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self)
    }
}
