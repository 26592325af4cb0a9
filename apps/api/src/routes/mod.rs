pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::resume::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resume",
            get(handlers::handle_get_resume).put(handlers::handle_save_resume),
        )
        .route("/api/v1/resume/extract", post(handlers::handle_extract))
        .route("/api/v1/resume/import", post(handlers::handle_import))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::{Config, StoreBackend};
    use crate::resume::pdf::fixtures::single_page_pdf;
    use crate::resume::store::MemoryResumeStore;

    const BOUNDARY: &str = "folio-test-boundary";

    fn test_app(max_upload_bytes: usize) -> Router {
        let config = Config {
            port: 0,
            rust_log: "debug".to_string(),
            data_dir: PathBuf::from("unused"),
            store_backend: StoreBackend::Memory,
            max_upload_bytes,
        };
        build_router(AppState {
            config,
            store: Arc::new(MemoryResumeStore::new()),
        })
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    }

    fn multipart_request(field: &str, content: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"resume.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/resume/import")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn read_json(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = test_app(1024)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "folio-api");
    }

    #[tokio::test]
    async fn test_extract_endpoint_returns_structured_draft() {
        let raw_text = concat!(
            "Jane Doe\n",
            "Contact: jane.doe@example.com\n",
            "EXPERIENCE\n",
            "Senior Engineer | Acme Corp\n",
            "2020 - Present\n",
            "• Built the thing\n",
            "EDUCATION\n",
        );
        let response = test_app(1 << 20)
            .oneshot(json_request(
                "POST",
                "/api/v1/resume/extract",
                json!({ "rawText": raw_text }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["name"], "Jane Doe");
        assert_eq!(json["email"], "jane.doe@example.com");
        assert_eq!(json["rawText"], raw_text);
        assert_eq!(json["experience"][0]["company"], "Acme Corp");
        assert_eq!(json["experience"][0]["endDate"], "Present");
        assert_eq!(json["education"], json!([]));
    }

    #[tokio::test]
    async fn test_extract_endpoint_accepts_empty_text() {
        let response = test_app(1024)
            .oneshot(json_request(
                "POST",
                "/api/v1/resume/extract",
                json!({ "rawText": "" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["name"], "");
        assert_eq!(json["experience"], json!([]));
    }

    #[tokio::test]
    async fn test_get_resume_seeds_empty_document() {
        let response = test_app(1024)
            .oneshot(Request::builder().uri("/api/v1/resume").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["resume"]["profile"]["name"], "");
        assert!(json["savedAt"].is_string());
    }

    #[tokio::test]
    async fn test_put_then_get_resume() {
        let app = test_app(1 << 20);
        let resume = json!({
            "profile": {
                "name": "Jane Doe",
                "title": "Engineer",
                "email": "jane@example.com",
                "location": "Remote",
                "summary": ""
            },
            "experience": [],
            "education": [],
            "skills": [{"category": "Languages", "items": ["Rust"]}]
        });

        let response = app
            .clone()
            .oneshot(json_request("PUT", "/api/v1/resume", resume))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::builder().uri("/api/v1/resume").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json = read_json(response).await;
        assert_eq!(json["resume"]["profile"]["name"], "Jane Doe");
        assert_eq!(json["resume"]["skills"][0]["items"][0], "Rust");
    }

    #[tokio::test]
    async fn test_import_pdf_returns_extraction_and_draft() {
        let pdf = single_page_pdf(&[
            "Jane Doe",
            "jane@example.com",
            "Experience",
            "Engineer | Initech",
            "2019 - 2021",
        ]);
        let app = test_app(1 << 20);

        let response = app
            .clone()
            .oneshot(multipart_request("file", &pdf))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["extraction"]["name"], "Jane Doe");
        assert_eq!(json["extraction"]["experience"][0]["company"], "Initech");
        assert_eq!(json["draft"]["profile"]["email"], "jane@example.com");
        assert_eq!(json["draft"]["experience"][0]["endDate"], "2021");
        assert_eq!(json["needsReview"], false);

        // The draft is only a preview; the stored resume is untouched.
        let response = app
            .oneshot(Request::builder().uri("/api/v1/resume").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json = read_json(response).await;
        assert_eq!(json["resume"]["profile"]["name"], "");
    }

    #[tokio::test]
    async fn test_import_unreadable_pdf_is_unprocessable() {
        let response = test_app(1 << 20)
            .oneshot(multipart_request("file", b"%PDF-1.4\n<garbage>"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = read_json(response).await;
        assert_eq!(json["error"]["code"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn test_import_rejects_non_pdf() {
        let response = test_app(1 << 20)
            .oneshot(multipart_request("file", b"PK\x03\x04 not a pdf"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = read_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_import_requires_file_field() {
        let response = test_app(1 << 20)
            .oneshot(multipart_request("attachment", b"%PDF-1.4"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = read_json(response).await;
        assert!(json["error"]["message"].as_str().unwrap().contains("'file'"));
    }

    #[tokio::test]
    async fn test_import_rejects_oversized_upload() {
        let response = test_app(64)
            .oneshot(multipart_request("file", &[b'x'; 512]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
