//! HTTP front end for on-demand deck generation. A single multipart
//! endpoint runs the full pipeline and streams the finished file back.

use std::net::SocketAddr;

use axum::extract::Multipart;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use clubdeck_common::Theme;
use clubdeck_core::{DeckRequest, Generator};
use clubdeck_openrouter::ChatClient;
use clubdeck_serpapi::ImageSearchClient;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

pub fn router() -> Router {
    Router::new()
        .route("/generate-slide", post(generate_slide))
        .layer(cors_layer())
}

pub async fn serve(addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, router()).await?;
    Ok(())
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = std::env::var("CLUBDECK_ALLOWED_ORIGINS")
        .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_string())
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn bad_request(detail: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, detail: detail.into() }
    }

    fn internal(detail: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, detail: detail.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "detail": self.detail }))).into_response()
    }
}

#[derive(Debug, Default)]
struct GenerateForm {
    club: Option<String>,
    topic: Option<String>,
    week: Option<String>,
    theme: Option<String>,
    deepseek_key: Option<String>,
    serpapi_key: Option<String>,
}

impl GenerateForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else { continue };
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::bad_request(format!("invalid field {name}: {e}")))?;
            match name.as_str() {
                "club" => form.club = Some(value),
                "topic" => form.topic = Some(value),
                "week" => form.week = Some(value),
                "theme" => form.theme = Some(value),
                "deepseek_key" => form.deepseek_key = Some(value),
                "serpapi_key" => form.serpapi_key = Some(value),
                other => tracing::debug!(field = other, "ignoring unknown form field"),
            }
        }
        Ok(form)
    }

    fn require(value: Option<String>, name: &str) -> Result<String, ApiError> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ApiError::bad_request(format!("missing required field: {name}"))),
        }
    }
}

pub fn download_filename(club: &str, week: u32) -> String {
    format!("{}_Week{week}.pptx", club.replace(' ', "_"))
}

async fn generate_slide(multipart: Multipart) -> Result<Response, ApiError> {
    let form = GenerateForm::from_multipart(multipart).await?;

    let club = GenerateForm::require(form.club, "club")?;
    let topic = GenerateForm::require(form.topic, "topic")?;
    let week: u32 = GenerateForm::require(form.week, "week")?
        .trim()
        .parse()
        .map_err(|_| ApiError::bad_request("week must be a non-negative integer"))?;
    let theme_name = GenerateForm::require(form.theme, "theme")?;
    let deepseek_key = GenerateForm::require(form.deepseek_key, "deepseek_key")?;
    let serpapi_key = GenerateForm::require(form.serpapi_key, "serpapi_key")?;

    // Reject unknown themes before spending anything on generation.
    let Some(theme) = Theme::get(&theme_name) else {
        return Err(ApiError::bad_request(format!(
            "unknown theme '{theme_name}'; valid themes: {}",
            Theme::names().join(", ")
        )));
    };

    let workdir = tempfile::TempDir::new()
        .map_err(|e| ApiError::internal(format!("failed to create work dir: {e}")))?;
    let out_path = workdir.path().join(download_filename(&club, week));

    let generator = Generator::new(ChatClient::new(deepseek_key));
    let images = ImageSearchClient::new(serpapi_key);
    let req = DeckRequest { club_type: club.clone(), topic, week };

    generator
        .generate_presentation(&req, theme, Some(&images), &out_path)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let bytes = tokio::fs::read(&out_path)
        .await
        .map_err(|e| ApiError::internal(format!("failed to read generated deck: {e}")))?;

    // Response bytes are in memory; temp dir removal can happen off the
    // request path.
    tokio::task::spawn_blocking(move || drop(workdir));

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(PPTX_CONTENT_TYPE));
    let disposition = format!("attachment; filename={}", download_filename(&club, week));
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    Ok((headers, bytes).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn multipart_body(boundary: &str, fields: &[(&str, &str)]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            );
            body.extend_from_slice(value.as_bytes());
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        body
    }

    fn request(fields: &[(&str, &str)]) -> axum::http::Request<axum::body::Body> {
        let boundary = "clubdeck-test-boundary";
        axum::http::Request::builder()
            .method("POST")
            .uri("/generate-slide")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(axum::body::Body::from(multipart_body(boundary, fields)))
            .unwrap()
    }

    async fn detail_of(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        value["detail"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn unknown_theme_is_rejected_before_generation() {
        let response = router()
            .oneshot(request(&[
                ("club", "Coding Club"),
                ("topic", "Rust"),
                ("week", "3"),
                ("theme", "vaporwave"),
                ("deepseek_key", "k"),
                ("serpapi_key", "k"),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let detail = detail_of(response).await;
        assert!(detail.contains("vaporwave"));
        assert!(detail.contains("modern"));
        assert!(detail.contains("creative"));
    }

    #[tokio::test]
    async fn missing_field_is_a_bad_request() {
        let response = router()
            .oneshot(request(&[
                ("club", "Coding Club"),
                ("week", "3"),
                ("theme", "modern"),
                ("deepseek_key", "k"),
                ("serpapi_key", "k"),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(detail_of(response).await.contains("topic"));
    }

    #[tokio::test]
    async fn non_numeric_week_is_a_bad_request() {
        let response = router()
            .oneshot(request(&[
                ("club", "Coding Club"),
                ("topic", "Rust"),
                ("week", "three"),
                ("theme", "modern"),
                ("deepseek_key", "k"),
                ("serpapi_key", "k"),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(detail_of(response).await.contains("week"));
    }

    #[test]
    fn download_filename_replaces_spaces() {
        assert_eq!(download_filename("Coding Club", 3), "Coding_Club_Week3.pptx");
        assert_eq!(download_filename("Robotics", 12), "Robotics_Week12.pptx");
    }
}
