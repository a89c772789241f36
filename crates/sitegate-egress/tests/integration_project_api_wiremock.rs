//! Integration tests for the backend project lookup using wiremock
//!
//! These tests mock the website-builder API to verify the egress client's
//! HTTP behavior and its mapping of backend answers to core errors.

use sitegate_core::{Error, ProjectSource, TenantSlug};
use sitegate_egress::{ApiProjectConfig, ApiProjectSource, HttpClientConfig, ProjectLoader};
use sitegate_observability::Metrics;
use std::sync::Arc;
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn source_for(server: &MockServer) -> ApiProjectSource {
    ApiProjectSource::new(ApiProjectConfig {
        base_url: server.uri(),
        ..Default::default()
    })
    .unwrap()
}

fn slug(s: &str) -> TenantSlug {
    TenantSlug::from_string(s).unwrap()
}

#[tokio::test]
async fn test_fetch_project_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/slug/acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": true,
            "result": {
                "company_name": "Acme Homes",
                "Theme": {"slug": "Housing", "name": "Housing"},
                "meta_description": "Homes for everyone",
                "instagram": "https://instagram.com/acme"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let project = source_for(&mock_server)
        .fetch_project(&slug("acme"))
        .await
        .unwrap();

    assert_eq!(project.company_name, "Acme Homes");
    assert_eq!(project.theme_reference(), Some("Housing"));
    assert_eq!(project.meta_description.as_deref(), Some("Homes for everyone"));
    assert_eq!(project.social.instagram.as_deref(), Some("https://instagram.com/acme"));
}

#[tokio::test]
async fn test_fetch_project_with_loosely_typed_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/slug/acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": true,
            "result": {
                "company_name": null,
                "phone": 5550100,
                "status": 1,
                "Theme": {"slug": "Housing"}
            }
        })))
        .mount(&mock_server)
        .await;

    let project = source_for(&mock_server)
        .fetch_project(&slug("acme"))
        .await
        .unwrap();

    assert_eq!(project.company_name, "");
    assert_eq!(project.phone.as_deref(), Some("5550100"));
    assert!(project.is_enabled());
    assert_eq!(project.theme_reference(), Some("Housing"));
}

#[tokio::test]
async fn test_fetch_project_status_false() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/slug/ghost"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": false,
            "message": "Project not found"
        })))
        .mount(&mock_server)
        .await;

    let result = source_for(&mock_server).fetch_project(&slug("ghost")).await;
    assert!(matches!(result, Err(Error::TenantNotFound(ref s)) if s == "ghost"));
}

#[tokio::test]
async fn test_fetch_project_http_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/slug/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let result = source_for(&mock_server).fetch_project(&slug("ghost")).await;
    assert!(matches!(result, Err(Error::TenantNotFound(_))));
}

#[tokio::test]
async fn test_fetch_project_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/slug/acme"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&mock_server)
        .await;

    let result = source_for(&mock_server).fetch_project(&slug("acme")).await;
    match result {
        Err(Error::Backend(message)) => {
            assert!(message.contains("500"));
            assert!(message.contains("database unavailable"));
        }
        other => panic!("expected backend error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_project_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/slug/acme"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let result = source_for(&mock_server).fetch_project(&slug("acme")).await;
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Backend(_)));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_fetch_project_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/slug/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_json(serde_json::json!({"status": true, "result": {}})),
        )
        .mount(&mock_server)
        .await;

    let source = ApiProjectSource::new(ApiProjectConfig {
        base_url: mock_server.uri(),
        client_config: HttpClientConfig {
            timeout_secs: 1,
            ..Default::default()
        },
        ..Default::default()
    })
    .unwrap();

    let result = source.fetch_project(&slug("slow")).await;
    assert!(matches!(result, Err(Error::Timeout(1))));
}

#[tokio::test]
async fn test_custom_project_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/project/acme/public"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": true,
            "result": {"company_name": "Acme"}
        })))
        .mount(&mock_server)
        .await;

    let source = ApiProjectSource::new(ApiProjectConfig {
        base_url: format!("{}/api/v2/", mock_server.uri()),
        project_path: "/project/{slug}/public".to_string(),
        ..Default::default()
    })
    .unwrap();

    let project = source.fetch_project(&slug("acme")).await.unwrap();
    assert_eq!(project.company_name, "Acme");
    assert_eq!(project.theme_reference(), None);
}

#[tokio::test]
async fn test_loader_issues_one_request_per_slug() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/slug/acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": true,
            "result": {"company_name": "Acme Homes"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let metrics = Arc::new(Metrics::new().unwrap());
    let source = Arc::new(source_for(&mock_server).with_metrics(metrics.clone()));
    let loader = ProjectLoader::new(source);

    let acme = slug("acme");
    let (first, second) = tokio::join!(loader.load(&acme), loader.load(&acme));
    assert!(first.is_ok());
    assert!(second.is_ok());
    assert!(loader.load(&acme).await.is_ok());

    assert_eq!(
        metrics.project_fetch_total.with_label_values(&["found"]).get(),
        1.0
    );

    // MockServer verifies `.expect(1)` on drop
}
