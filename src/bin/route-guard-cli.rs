use clap::{Parser, Subcommand};
use reqwest::{Method, RequestBuilder, Url};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "route-guard-cli")]
#[command(about = "Command-line client for the route-guard service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// API key sent on every request.
    #[arg(short, long)]
    key: Option<String>,

    /// Header carrying the API key.
    #[arg(long, default_value = "X-API-Key")]
    key_header: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Public information
    Info,
    /// Public product list
    Products,
    /// Private data (needs --key)
    PrivateData,
    /// Create a resource (needs --key)
    Create,
    /// Authenticated API data (needs --key)
    ApiData,
    /// Fetch a user record
    User { id: String },
    /// Delete a user
    DeleteUser { id: String },
    /// Echo a user id
    UserId { id: String },
    /// Search, optionally with a query
    Search { q: Option<String> },
}

impl Commands {
    /// Method and path segments; ids are single segments, never split.
    fn target(&self) -> (Method, Vec<&str>) {
        match self {
            Commands::Info => (Method::GET, vec!["public", "info"]),
            Commands::Products => (Method::GET, vec!["public", "products"]),
            Commands::PrivateData => (Method::GET, vec!["private", "data"]),
            Commands::Create => (Method::POST, vec!["private", "create"]),
            Commands::ApiData => (Method::GET, vec!["api", "data"]),
            Commands::User { id } => (Method::GET, vec!["user", id.as_str()]),
            Commands::DeleteUser { id } => (Method::DELETE, vec!["user", id.as_str()]),
            Commands::UserId { id } => (Method::GET, vec!["users", id.as_str()]),
            Commands::Search { .. } => (Method::GET, vec!["search"]),
        }
    }
}

/// Build the request URL under `base`, percent-encoding every segment.
fn request_url(
    base: &str,
    command: &Commands,
) -> Result<(Method, Url), Box<dyn std::error::Error>> {
    let (method, segments) = command.target();
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| format!("cannot use {} as a base URL", base))?
        .pop_if_empty()
        .extend(segments);

    if let Commands::Search { q: Some(q) } = command {
        url.query_pairs_mut().append_pair("q", q);
    }
    Ok((method, url))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let (method, url) = request_url(&cli.url, &cli.command)?;
    let mut request = client.request(method, url);

    if let Some(key) = &cli.key {
        request = request.header(cli.key_header.as_str(), key);
    }

    send(request).await
}

async fn send(request: RequestBuilder) -> Result<(), Box<dyn std::error::Error>> {
    let res = request.send().await?;
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_is_one_encoded_segment() {
        let command = Commands::User { id: "a/b?c#d".into() };
        let (method, url) = request_url("http://localhost:8080", &command).unwrap();
        assert_eq!(method, Method::GET);
        assert_eq!(url.as_str(), "http://localhost:8080/user/a%2Fb%3Fc%23d");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_empty_user_id_keeps_trailing_slash() {
        let command = Commands::DeleteUser { id: String::new() };
        let (method, url) = request_url("http://localhost:8080/", &command).unwrap();
        assert_eq!(method, Method::DELETE);
        assert_eq!(url.path(), "/user/");
    }

    #[test]
    fn test_base_path_is_kept() {
        let command = Commands::UserId { id: "42".into() };
        let (_, url) = request_url("http://localhost:8080/svc/", &command).unwrap();
        assert_eq!(url.path(), "/svc/users/42");
    }

    #[test]
    fn test_search_query_is_encoded() {
        let command = Commands::Search { q: Some("a&b".into()) };
        let (_, url) = request_url("http://localhost:8080", &command).unwrap();
        assert_eq!(url.path(), "/search");
        assert_eq!(url.query(), Some("q=a%26b"));

        let command = Commands::Search { q: None };
        let (_, url) = request_url("http://localhost:8080", &command).unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_non_base_url_is_rejected() {
        assert!(request_url("mailto:someone@example.com", &Commands::Info).is_err());
    }
}
