//! Common test utilities for integration tests

use axum::{
    Router,
    body::Body,
    http::{Request, header},
    response::Response,
};
use serde_json::{Value, json};
use sitegate_egress::{ApiProjectConfig, ApiProjectSource, HttpClientConfig};
use sitegate_ingress::AppState;
use sitegate_observability::{HealthState, Metrics};
use sitegate_routing::TenancyConfig;
use sitegate_themes::ThemeRegistry;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// Tenancy used by every scenario: tenants live under `basedomain.com`,
/// the admin application under `webbuilder.local`.
#[allow(dead_code)]
pub fn tenancy() -> TenancyConfig {
    TenancyConfig {
        base_domains: vec!["basedomain.com".to_string(), "localhost".to_string()],
        admin_hosts: vec![
            "basedomain.com".to_string(),
            "www.basedomain.com".to_string(),
            "webbuilder.local".to_string(),
            "localhost".to_string(),
        ],
        bypass_hosts: vec!["staging.basedomain.com".to_string()],
        ..Default::default()
    }
}

/// Full application wired to a wiremock backend
#[allow(dead_code)]
pub struct TestStack {
    pub app: Router,
    pub backend: MockServer,
    pub metrics: Arc<Metrics>,
}

#[allow(dead_code)]
impl TestStack {
    pub async fn start() -> Self {
        Self::start_with_timeout(10).await
    }

    pub async fn start_with_timeout(timeout_secs: u64) -> Self {
        init_tracing();

        let backend = MockServer::start().await;
        let metrics = Arc::new(Metrics::new().unwrap());

        let source = ApiProjectSource::new(ApiProjectConfig {
            base_url: format!("{}/api", backend.uri()),
            client_config: HttpClientConfig {
                timeout_secs,
                ..Default::default()
            },
            ..Default::default()
        })
        .unwrap()
        .with_metrics(metrics.clone());

        let state = AppState::new(
            &tenancy(),
            Arc::new(ThemeRegistry::builtin()),
            Arc::new(source),
            metrics.clone(),
        );
        let app = sitegate_ingress::app(state, HealthState::new(metrics.clone()));

        Self {
            app,
            backend,
            metrics,
        }
    }

    /// Serve `slug` as a live project
    pub async fn live_project(&self, slug: &str, result: Value) {
        self.mount_envelope(slug, json!({"status": true, "result": result}))
            .await;
    }

    /// Answer the lookup of `slug` with a raw envelope
    pub async fn mount_envelope(&self, slug: &str, envelope: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/projects/slug/{}", slug)))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope))
            .mount(&self.backend)
            .await;
    }

    /// Number of lookups the backend received for `slug`
    pub async fn lookups_for(&self, slug: &str) -> usize {
        let expected = format!("/api/projects/slug/{}", slug);
        self.backend
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == expected)
            .count()
    }

    pub async fn get(&self, host: &str, uri: &str) -> Response {
        self.get_with_cookie(host, uri, None).await
    }

    pub async fn get_with_cookie(&self, host: &str, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(uri).header(header::HOST, host);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        self.app
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }
}

#[allow(dead_code)]
pub async fn body_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Route test logs through the test harness writer
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("sitegate=debug,warn")
        .with_test_writer()
        .try_init();
}
