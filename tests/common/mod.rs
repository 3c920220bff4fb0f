//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use route_guard::store::UserStore;
use route_guard::{HttpServer, ServiceConfig, Shutdown};
use tokio::net::TcpListener;

/// A server running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the service with the default configuration and store.
pub async fn start_server() -> TestServer {
    start_with(HttpServer::new(ServiceConfig::default()).unwrap()).await
}

/// Start the service with a custom user store.
#[allow(dead_code)]
pub async fn start_server_with_store(store: Arc<dyn UserStore>) -> TestServer {
    start_with(HttpServer::with_store(ServiceConfig::default(), store).unwrap()).await
}

async fn start_with(server: HttpServer) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let stopped = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, stopped).await;
    });

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    TestServer {
        addr,
        client,
        shutdown,
    }
}
