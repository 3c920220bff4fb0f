//! Response bodies.

use serde::{Deserialize, Serialize};

/// A user as returned by `GET /user/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of a JSON acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_record_field_order() {
        let record = UserRecord {
            id: "42".into(),
            name: "John Doe".into(),
            email: "john@example.com".into(),
        };
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"id":"42","name":"John Doe","email":"john@example.com"}"#
        );
    }
}
