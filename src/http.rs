use crate::collector::AirCollector;
use crate::exposition::Exposition;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

const INDEX_HTML: &str = r#"<html>
<head><title>Awair Exporter</title></head>
<body>
<h1>Awair Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
</body>
</html>
"#;

#[derive(Clone)]
pub struct HttpState {
    pub collector: AirCollector,
    pub exposition: Arc<Exposition>,
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn get_metrics(State(state): State<HttpState>) -> Response {
    let samples = state.collector.collect().await;
    match state.exposition.render(&samples) {
        Ok(body) => (
            [(header::CONTENT_TYPE, state.exposition.content_type())],
            body,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error=%format!("{err:#}"), "failed to render metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{err:#}")).into_response()
        }
    }
}

pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/metrics", get(get_metrics))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::DEFAULT_REQUEST_TIMEOUT;
    use crate::devices::{Device, DeviceRegistry};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn spawn_sensor(body: &'static str) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake sensor");
        let addr = listener.local_addr().expect("local addr");
        let app = Router::new().route("/air-data/latest", get(move || async move { body }));
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });
        addr
    }

    fn test_router(registry: DeviceRegistry) -> Router {
        let collector = AirCollector::new(registry, DEFAULT_REQUEST_TIMEOUT).expect("collector");
        let exposition = Exposition::new(collector.describe()).expect("exposition");
        router(HttpState {
            collector,
            exposition: Arc::new(exposition),
        })
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn healthz_is_ok() {
        let (status, body) = get_body(test_router(DeviceRegistry::default()), "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn index_links_metrics() {
        let (status, body) = get_body(test_router(DeviceRegistry::default()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("href=\"/metrics\""));
    }

    #[tokio::test]
    async fn metrics_scrapes_registered_sensors() {
        let healthy = spawn_sensor(r#"{"temp": 0, "dew_point": 10, "score": 77}"#).await;
        let broken = spawn_sensor("{").await;
        let registry: DeviceRegistry = [
            Device::new("office", healthy.to_string()),
            Device::new("bedroom", broken.to_string()),
        ]
        .into_iter()
        .collect();

        let response = test_router(registry)
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/plain"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("awair_score{sensor=\"office\"} 77"));
        assert!(body.contains("awair_temp_f{sensor=\"office\"} 32"));
        assert!(body.contains("awair_dew_point_f{sensor=\"office\"} 50"));
        assert!(body.contains("awair_collection_errors_total{sensor=\"bedroom\"} 1"));
        assert!(!body.contains("sensor=\"bedroom\"} 0"));
    }
}
