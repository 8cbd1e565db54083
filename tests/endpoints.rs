//! End-to-end tests against a running server.

use std::time::Duration;

use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn root_returns_api_information() {
    let service = common::start_service().await;
    let res = common::client().get(service.url("/")).send().await.unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "message": "Hello World CI/CD API",
            "version": "test",
            "endpoints": {
                "health": "/health",
                "ready": "/ready",
                "metrics": "/metrics",
                "greet": "POST /greet"
            }
        })
    );

    service.stop().await;
}

#[tokio::test]
async fn root_body_keeps_field_order() {
    let service = common::start_service().await;
    let text = common::client()
        .get(service.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(
        text,
        r#"{"message":"Hello World CI/CD API","version":"test","endpoints":{"health":"/health","ready":"/ready","metrics":"/metrics","greet":"POST /greet"}}"#
    );

    service.stop().await;
}

#[tokio::test]
async fn health_reports_uptime_and_timestamp() {
    let service = common::start_service().await;
    let client = common::client();

    let first: Value = client
        .get(service.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first["status"], "healthy");
    assert!(first["uptime"].is_u64());
    assert!(first["timestamp"].as_str().unwrap().ends_with('Z'));

    tokio::time::sleep(Duration::from_millis(20)).await;
    let second: Value = client
        .get(service.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(second["uptime"].as_u64() >= first["uptime"].as_u64());
    assert!(second["timestamp"].as_str() >= first["timestamp"].as_str());

    service.stop().await;
}

#[tokio::test]
async fn ready_reports_version() {
    let service = common::start_service().await;
    let res = common::client()
        .get(service.url("/ready"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"status": "ready", "version": "test"}));

    service.stop().await;
}

#[tokio::test]
async fn metrics_reflect_counters() {
    let service = common::start_service().await;
    let client = common::client();

    client.get(service.url("/")).send().await.unwrap();
    client.get(service.url("/nowhere")).send().await.unwrap();
    client
        .post(service.url("/greet"))
        .json(&json!({"name": "Alice"}))
        .send()
        .await
        .unwrap();

    let res = client.get(service.url("/metrics")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()["content-type"],
        "text/plain; charset=utf-8"
    );
    let text = res.text().await.unwrap();
    assert!(text.contains("http_requests_total"));
    assert!(text.contains("http_errors_total"));
    assert!(text.contains("app_uptime_seconds"));
    assert!(text.starts_with(
        "# HELP http_requests_total Total number of HTTP requests\n\
         # TYPE http_requests_total counter\n\
         http_requests_total 3\n\
         \n\
         # HELP http_errors_total Total number of HTTP errors\n\
         # TYPE http_errors_total counter\n\
         http_errors_total 1\n\
         \n\
         # HELP app_uptime_seconds Application uptime in seconds\n\
         # TYPE app_uptime_seconds gauge\n\
         app_uptime_seconds "
    ));
    assert!(text.ends_with('\n'));

    service.stop().await;
}

#[tokio::test]
async fn greet_standard() {
    let service = common::start_service().await;
    let res = common::client()
        .post(service.url("/greet"))
        .json(&json!({"name": "Alice"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["greeting"], "Hello, Alice!");
    assert!(body["timestamp"].is_string());

    service.stop().await;
}

#[tokio::test]
async fn greet_formal() {
    let service = common::start_service().await;
    let res = common::client()
        .post(service.url("/greet"))
        .json(&json!({"name": "Bob", "style": "formal"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["greeting"], "Good day, Bob. Welcome!");

    service.stop().await;
}

#[tokio::test]
async fn greet_enthusiastic() {
    let service = common::start_service().await;
    let res = common::client()
        .post(service.url("/greet"))
        .json(&json!({"name": "Charlie", "style": "enthusiastic"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert!(body["greeting"].as_str().unwrap().contains("!!!"));

    service.stop().await;
}

#[tokio::test]
async fn greet_missing_name_is_bad_request() {
    let service = common::start_service().await;
    let res = common::client()
        .post(service.url("/greet"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "error": "Name is required",
            "message": "Please provide a name in the request body"
        })
    );
    assert_eq!(service.metrics.request_count(), 1);
    assert_eq!(service.metrics.error_count(), 1);

    service.stop().await;
}

#[tokio::test]
async fn greet_whitespace_name_is_server_error() {
    let service = common::start_service().await;
    let res = common::client()
        .post(service.url("/greet"))
        .json(&json!({"name": "   "}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(body["message"], "Name cannot be empty");

    service.stop().await;
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let service = common::start_service().await;
    let res = common::client()
        .get(service.url("/unknown"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"error": "Not found", "path": "/unknown"}));
    assert_eq!(service.metrics.request_count(), 1);
    assert_eq!(service.metrics.error_count(), 1);

    service.stop().await;
}

#[tokio::test]
async fn health_endpoints_are_stable_between_calls() {
    let service = common::start_service().await;
    let client = common::client();

    let first: Value = client.get(service.url("/ready")).send().await.unwrap().json().await.unwrap();
    let second: Value = client.get(service.url("/ready")).send().await.unwrap().json().await.unwrap();
    assert_eq!(first, second);

    let first: Value = client.get(service.url("/")).send().await.unwrap().json().await.unwrap();
    let second: Value = client.get(service.url("/")).send().await.unwrap().json().await.unwrap();
    assert_eq!(first, second);

    service.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_greetings_are_all_counted() {
    let service = common::start_service().await;
    let client = common::client();

    let concurrency = 16;
    let requests_per_task = 25;

    let mut tasks = Vec::new();
    for task in 0..concurrency {
        let client = client.clone();
        let url = service.url("/greet");
        tasks.push(tokio::spawn(async move {
            for i in 0..requests_per_task {
                // Every third request is missing its name.
                let body = if i % 3 == 0 {
                    json!({})
                } else {
                    json!({"name": format!("user-{}-{}", task, i)})
                };
                let res = client.post(&url).json(&body).send().await.unwrap();
                assert!(res.status() == 200 || res.status() == 400);
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let expected_errors = concurrency * (0..requests_per_task).filter(|i| i % 3 == 0).count();
    assert_eq!(
        service.metrics.request_count(),
        (concurrency * requests_per_task) as u64
    );
    assert_eq!(service.metrics.error_count(), expected_errors as u64);

    service.stop().await;
}

#[tokio::test]
async fn shutdown_stops_the_server() {
    let service = common::start_service().await;
    let addr = service.addr;
    service.stop().await;

    let res = common::client()
        .get(format!("http://{}/health", addr))
        .timeout(Duration::from_secs(1))
        .send()
        .await;
    assert!(res.is_err());
}
