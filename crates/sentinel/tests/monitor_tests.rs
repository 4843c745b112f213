//! End-to-end monitoring runs against mock HTTP servers

use std::net::TcpListener;
use std::time::{Duration, Instant};

use sentinel::monitoring::types::TLS_WARNING;
use sentinel::{AuthConfig, BatchRunner, MonitorRequest, MonitorResponse};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn run(request: MonitorRequest) -> MonitorResponse {
    let _ = tracing_subscriber::fmt::try_init();
    BatchRunner::for_request(&request).run(&request).await
}

/// Address nothing listens on
fn refused_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/unreachable")
}

/// HTTPS listener presenting a self-signed certificate; answers every
/// request with `200 {"id": 1}`.
async fn self_signed_endpoint() -> String {
    let identity = native_tls::Identity::from_pkcs8(
        include_bytes!("fixtures/self_signed.crt"),
        include_bytes!("fixtures/self_signed.key"),
    )
    .unwrap();
    let acceptor = tokio_native_tls::TlsAcceptor::from(native_tls::TlsAcceptor::new(identity).unwrap());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                let Ok(mut stream) = acceptor.accept(stream).await else {
                    return;
                };

                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let body = r#"{"id": 1}"#;
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("https://127.0.0.1:{port}/secure")
}

#[tokio::test]
async fn test_healthy_endpoint_scores_full() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})).set_delay(Duration::from_millis(100)))
        .mount(&server)
        .await;

    let request = MonitorRequest::new([format!("{}/ok200", server.uri())]).with_expected_format(["id"]);
    let response = run(request).await;

    let result = &response.endpoints()[0];
    assert_eq!(result.status, 200);
    assert!(result.valid_format);
    assert_eq!(result.score, 100);
    assert!(result.response_time >= 0.1);
    assert!(result.error.is_none());
    assert_eq!(response.overall_score, 100.0);
    assert!(response.success);
    assert_eq!(response.stats.successful, 1);
    assert_eq!(response.stats.failed, 0);
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    let response = run(MonitorRequest::new([refused_endpoint()])).await;

    let result = &response.endpoints()[0];
    assert_eq!(result.status, 0);
    assert_eq!(result.score, 0);
    assert_eq!(result.response_time, 0.0);
    assert!(!result.valid_format);
    assert!(result.headers.is_empty());
    assert!(result.error.as_deref().is_some_and(|e| !e.is_empty()));
    assert!(result.warnings.is_empty());
    assert_eq!(response.stats.failed, 1);
    assert_eq!(response.stats.avg_response_time, 0.0);
    assert!(!response.success);
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let started = Instant::now();
    let response = run(MonitorRequest::new([format!("{}/slow", server.uri())]).with_timeout(1)).await;

    let result = &response.endpoints()[0];
    assert_eq!(result.status, 0);
    assert_eq!(result.score, 0);
    assert_eq!(result.error.as_deref(), Some("Request timed out after 1 seconds"));
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_mixed_batch_averages_scores() {
    let server = MockServer::start().await;
    Mock::given(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .mount(&server)
        .await;

    let request =
        MonitorRequest::new([format!("{}/ok", server.uri()), refused_endpoint()]).with_expected_format(["id"]);
    let response = run(request).await;

    assert_eq!(response.endpoints()[0].score, 100);
    assert_eq!(response.endpoints()[1].score, 0);
    assert_eq!(response.overall_score, 50.0);
    assert!(!response.success);
    assert_eq!(response.stats.total_endpoints, 2);
    assert_eq!(response.stats.successful, 1);
    assert_eq!(response.stats.failed, 1);
}

#[tokio::test]
async fn test_probes_run_concurrently() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(1)))
        .mount(&server)
        .await;

    let endpoints: Vec<String> = (0..5).map(|i| format!("{}/slow/{i}", server.uri())).collect();
    let response = run(MonitorRequest::new(endpoints.clone()).with_timeout(5)).await;

    assert_eq!(response.stats.successful, 5);
    assert!(response.execution_time < 3.0, "took {}s", response.execution_time);
    let order: Vec<_> = response.endpoints().iter().map(|r| r.endpoint.clone()).collect();
    assert_eq!(order, endpoints);
}

#[tokio::test]
async fn test_empty_run() {
    let response = run(MonitorRequest::new(Vec::<String>::new())).await;

    assert!(response.endpoints().is_empty());
    assert_eq!(response.overall_score, 0.0);
    assert!(!response.success);
    assert_eq!(response.stats.avg_response_time, 0.0);
}

#[tokio::test]
async fn test_bearer_token_sent() {
    let server = MockServer::start().await;
    Mock::given(path("/private"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(path("/private")).respond_with(ResponseTemplate::new(401)).mount(&server).await;

    let endpoint = format!("{}/private", server.uri());

    let authed = run(MonitorRequest::new([endpoint.clone()])
        .with_auth(AuthConfig::Bearer { bearer_token: "s3cret".into() }))
    .await;
    assert_eq!(authed.endpoints()[0].status, 200);

    let anonymous = run(MonitorRequest::new([endpoint])).await;
    let result = &anonymous.endpoints()[0];
    assert_eq!(result.status, 401);
    assert_eq!(result.score, 10 + 30 + 20);
}

#[tokio::test]
async fn test_api_key_and_basic_headers() {
    let server = MockServer::start().await;
    Mock::given(path("/key"))
        .and(header("x-service-key", "k1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(path("/basic"))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let key = run(MonitorRequest::new([format!("{}/key", server.uri())]).with_auth(AuthConfig::ApiKey {
        api_key: "k1".into(),
        api_key_header: Some("X-Service-Key".into()),
    }))
    .await;
    assert_eq!(key.endpoints()[0].status, 200);

    let basic = run(MonitorRequest::new([format!("{}/basic", server.uri())])
        .with_auth(AuthConfig::Basic { username: "user".into(), password: "pass".into() }))
    .await;
    assert_eq!(basic.endpoints()[0].status, 200);
}

#[tokio::test]
async fn test_missing_keys_reported() {
    let server = MockServer::start().await;
    Mock::given(path("/partial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
        .mount(&server)
        .await;

    let request =
        MonitorRequest::new([format!("{}/partial", server.uri())]).with_expected_format(["id", "name", "email"]);
    let response = run(request).await;

    let result = &response.endpoints()[0];
    assert!(!result.valid_format);
    assert_eq!(result.score, 80);
    assert_eq!(result.warnings, vec!["Missing expected keys: name, email".to_string()]);
    assert!(response.success);
}

#[tokio::test]
async fn test_rate_limit_warning() {
    let server = MockServer::start().await;
    Mock::given(path("/limited"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-RateLimit-Limit", "100")
                .insert_header("X-RateLimit-Remaining", "42"),
        )
        .mount(&server)
        .await;

    let response = run(MonitorRequest::new([format!("{}/limited", server.uri())])).await;

    let result = &response.endpoints()[0];
    assert_eq!(result.warnings, vec!["Rate limit: 42/100 requests remaining".to_string()]);
    assert_eq!(result.headers.get("x-ratelimit-remaining").map(String::as_str), Some("42"));
}

#[tokio::test]
async fn test_redirect_policy() {
    let server = MockServer::start().await;
    Mock::given(path("/old"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", format!("{}/new", server.uri()).as_str()))
        .mount(&server)
        .await;
    Mock::given(path("/new")).respond_with(ResponseTemplate::new(200)).mount(&server).await;

    let endpoint = format!("{}/old", server.uri());

    let followed = run(MonitorRequest::new([endpoint.clone()])).await;
    assert_eq!(followed.endpoints()[0].status, 200);

    let not_followed = run(MonitorRequest::new([endpoint]).with_follow_redirects(false)).await;
    let result = &not_followed.endpoints()[0];
    assert_eq!(result.status, 302);
    assert_eq!(result.score, 30 + 20);
    assert_eq!(not_followed.stats.successful, 0);
}

#[tokio::test]
async fn test_malformed_url_is_isolated() {
    let server = MockServer::start().await;
    Mock::given(path("/ok")).respond_with(ResponseTemplate::new(200)).mount(&server).await;

    let response = run(MonitorRequest::new(["not a url".to_string(), format!("{}/ok", server.uri())])).await;

    assert_eq!(response.endpoints()[0].status, 0);
    assert!(response.endpoints()[0].error.is_some());
    assert!(!response.endpoints()[0].warnings.contains(&TLS_WARNING.to_string()));
    assert_eq!(response.endpoints()[1].status, 200);
}

#[tokio::test]
async fn test_untrusted_certificate_rejected() {
    let endpoint = self_signed_endpoint().await;

    let response = run(MonitorRequest::new([endpoint])).await;

    let result = &response.endpoints()[0];
    assert_eq!(result.status, 0);
    assert_eq!(result.score, 0);
    assert!(result.error.as_deref().is_some_and(|e| e.starts_with("SSL/TLS error")), "{:?}", result.error);
    assert_eq!(result.warnings, vec![TLS_WARNING.to_string()]);
    assert_eq!(response.stats.failed, 1);
}

#[tokio::test]
async fn test_untrusted_certificate_accepted_without_validation() {
    let endpoint = self_signed_endpoint().await;

    let request = MonitorRequest::new([endpoint]).with_validate_ssl(false).with_expected_format(["id"]);
    let response = run(request).await;

    let result = &response.endpoints()[0];
    assert_eq!(result.status, 200);
    assert!(result.valid_format);
    assert!(result.error.is_none());
    assert!(result.warnings.is_empty());
    assert_eq!(response.stats.successful, 1);
}

#[tokio::test]
async fn test_https_refused_is_connection_error() {
    let endpoint = refused_endpoint().replacen("http://", "https://", 1);

    let response = run(MonitorRequest::new([endpoint])).await;

    let result = &response.endpoints()[0];
    assert!(result.error.as_deref().is_some_and(|e| e.starts_with("Connection error")), "{:?}", result.error);
    assert!(result.warnings.is_empty());
}

#[tokio::test]
async fn test_redirect_loop() {
    let server = MockServer::start().await;
    let endpoint = format!("{}/loop", server.uri());
    Mock::given(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", endpoint.as_str()))
        .mount(&server)
        .await;

    let response = run(MonitorRequest::new([endpoint])).await;

    let result = &response.endpoints()[0];
    assert_eq!(result.status, 0);
    assert_eq!(result.score, 0);
    assert!(result.error.as_deref().is_some_and(|e| e.starts_with("Redirect error")), "{:?}", result.error);
    assert!(result.warnings.is_empty());
}
