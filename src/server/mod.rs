// pixzip/src/server/mod.rs
use crate::core::pipeline::UploadPipeline;
use crate::core::{PixzipError, ServiceConfig};
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;

const SIZE_LIMIT_MESSAGE: &str = "File is too large. The maximum allowed file size is 1GB.";
const INTERNAL_ERROR_MESSAGE: &str = "Internal error while processing the upload.";

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<UploadPipeline>,
}

pub fn router(config: ServiceConfig) -> Router {
    let body_limit = config.max_request_size as usize;
    let state = AppState {
        pipeline: Arc::new(UploadPipeline::new(config)),
    };

    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

pub async fn serve(config: ServiceConfig, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}

async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    // Reject oversized bodies up front, before consuming the stream.
    // DefaultBodyLimit backstops requests that lie about their length.
    if let Some(length) = content_length(&headers) {
        if length > state.pipeline.config().max_request_size {
            return (StatusCode::PAYLOAD_TOO_LARGE, SIZE_LIMIT_MESSAGE).into_response();
        }
    }

    let mut file: Option<(String, Vec<u8>)> = None;
    let mut ratio_text: Option<String> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let name = field.name().unwrap_or("").to_string();
                match name.as_str() {
                    "file" => {
                        let filename = field.file_name().unwrap_or("").to_string();
                        match field.bytes().await {
                            Ok(bytes) => file = Some((filename, bytes.to_vec())),
                            Err(e) => {
                                return (
                                    StatusCode::BAD_REQUEST,
                                    format!("Failed to read uploaded file: {}", e),
                                )
                                    .into_response()
                            }
                        }
                    }
                    "resize_ratio" => match field.text().await {
                        Ok(text) => ratio_text = Some(text),
                        Err(e) => {
                            return (
                                StatusCode::BAD_REQUEST,
                                format!("Failed to read resize_ratio: {}", e),
                            )
                                .into_response()
                        }
                    },
                    _ => {}
                }
            }
            Ok(None) => break,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    format!("Malformed multipart request: {}", e),
                )
                    .into_response()
            }
        }
    }

    let Some((filename, data)) = file else {
        return (StatusCode::BAD_REQUEST, "No file part").into_response();
    };
    let Some(ratio_text) = ratio_text else {
        return (StatusCode::BAD_REQUEST, "Missing resize_ratio field").into_response();
    };
    let Ok(ratio) = ratio_text.trim().parse::<f64>() else {
        return (
            StatusCode::BAD_REQUEST,
            "Invalid resize ratio. Please provide a positive number.",
        )
            .into_response();
    };

    // Image work is CPU-bound; keep it off the async runtime
    let pipeline = state.pipeline.clone();
    let result =
        tokio::task::spawn_blocking(move || pipeline.process(&filename, &data, ratio)).await;

    match result {
        Ok(Ok(output)) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/zip"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"resized_images.zip\"",
                ),
            ],
            output.archive_bytes,
        )
            .into_response(),
        Ok(Err(err)) => error_response(err),
        Err(e) => {
            log::error!("Upload task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE).into_response()
        }
    }
}

fn error_response(err: PixzipError) -> Response {
    match err {
        PixzipError::Validation(message) => (StatusCode::BAD_REQUEST, message).into_response(),
        other => {
            log::error!("Upload failed: {}", other);
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE).into_response()
        }
    }
}

fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}
