//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use greeter_service::{HttpServer, ServiceConfig, ServiceMetrics, Shutdown};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A running service bound to an ephemeral local port.
pub struct TestService {
    pub addr: SocketAddr,
    pub metrics: Arc<ServiceMetrics>,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestService {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the server task to finish.
    #[allow(dead_code)]
    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = self.handle.await;
    }
}

/// Start the service with default config and version `test`.
pub async fn start_service() -> TestService {
    let mut config = ServiceConfig::default();
    config.version = "test".into();
    start_service_with(config).await
}

/// Start the service with the given config, ignoring its listener address.
pub async fn start_service_with(config: ServiceConfig) -> TestService {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let metrics = Arc::new(ServiceMetrics::new());
    let server = HttpServer::with_metrics(config, metrics.clone());
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    TestService {
        addr,
        metrics,
        shutdown,
        handle,
    }
}

/// An HTTP client that never pools or proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
