//! Inline handlers for the public, private and API route groups.

use axum::{
    extract::Query,
    http::Uri,
    Json,
};

use crate::api::types::MessageBody;

/// Used by `/search` when the `q` parameter is absent.
pub const DEFAULT_SEARCH_QUERY: &str = "default-value";

pub async fn public_info() -> &'static str {
    "Public information"
}

pub async fn public_products() -> &'static str {
    "Public product list"
}

pub async fn private_data() -> &'static str {
    "Private data accessible after authentication"
}

pub async fn private_create() -> &'static str {
    "Create a new resource"
}

pub async fn api_data() -> Json<MessageBody> {
    Json(MessageBody::new("Authenticated and authorized!"))
}

/// `GET /users/{id}`.
///
/// The id is read from the last raw path segment and decoded lossily, so
/// ids that are not valid UTF-8 once decoded are still echoed.
pub async fn user_id(uri: Uri) -> String {
    let raw = uri.path().rsplit('/').next().unwrap_or_default();
    format!("User ID: {}", decode_lossy(raw))
}

fn decode_lossy(raw: &str) -> String {
    let bytes = urlencoding::decode_binary(raw.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// `GET /search`. The first `q` wins when it is repeated.
pub async fn search(Query(pairs): Query<Vec<(String, String)>>) -> String {
    let query = first_value(&pairs, "q").unwrap_or(DEFAULT_SEARCH_QUERY);
    format!("Search query: {}", query)
}

fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Query<Vec<(String, String)>> {
        Query(
            items
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_search_falls_back_only_when_absent() {
        assert_eq!(search(pairs(&[])).await, "Search query: default-value");
        assert_eq!(
            search(pairs(&[("other", "x")])).await,
            "Search query: default-value"
        );
        assert_eq!(search(pairs(&[("q", "cats")])).await, "Search query: cats");
        assert_eq!(search(pairs(&[("q", "")])).await, "Search query: ");
    }

    #[tokio::test]
    async fn test_search_repeated_key_takes_first() {
        assert_eq!(
            search(pairs(&[("q", "a"), ("q", "b")])).await,
            "Search query: a"
        );
    }

    #[tokio::test]
    async fn test_user_id_interpolates() {
        let uri: Uri = "/users/7".parse().unwrap();
        assert_eq!(user_id(uri).await, "User ID: 7");

        let uri: Uri = "/users/john%20doe?x=1".parse().unwrap();
        assert_eq!(user_id(uri).await, "User ID: john doe");
    }

    #[tokio::test]
    async fn test_user_id_invalid_utf8_is_replaced() {
        let uri: Uri = "/users/%FF".parse().unwrap();
        assert_eq!(user_id(uri).await, "User ID: \u{FFFD}");
    }
}
