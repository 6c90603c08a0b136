use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// User document as stored in MongoDB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub location: String,
    pub title: String,
}

impl User {
    /// Builds a new record with a freshly generated id.
    pub fn create(input: UserInput) -> Self {
        User {
            id: ObjectId::new(),
            name: input.name,
            location: input.location,
            title: input.title,
        }
    }

    /// Zero-valued user returned by an update that matched nothing.
    pub fn empty() -> Self {
        User {
            id: zero_object_id(),
            name: String::new(),
            location: String::new(),
            title: String::new(),
        }
    }
}

/// Request body for create and update.
///
/// Absent fields deserialize as empty strings so that a missing field and an
/// empty one fail validation the same way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub title: String,
}

impl UserInput {
    /// Checks that every required field is non-empty, reporting all offenders at once.
    pub fn validate(&self) -> Result<(), String> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("location", &self.location),
            ("title", &self.title),
        ]
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| *field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing
                .iter()
                .map(|field| format!("field '{}' is required", field))
                .collect::<Vec<_>>()
                .join("; "))
        }
    }
}

/// Public shape of a user, with the id rendered as hex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub location: String,
    pub title: String,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        UserView {
            id: u.id.to_hex(),
            name: u.name,
            location: u.location,
            title: u.title,
        }
    }
}

pub fn zero_object_id() -> ObjectId {
    ObjectId::from_bytes([0; 12])
}

/// Parses a path id. Malformed ids fall through as the all-zero id, which
/// then matches no stored document.
pub fn parse_user_id(raw: &str) -> ObjectId {
    match ObjectId::parse_str(raw) {
        Ok(id) => id,
        Err(e) => {
            log::warn!("⚠️  Invalid user id '{}': {}", raw, e);
            zero_object_id()
        }
    }
}
