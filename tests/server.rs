#[cfg(test)]
mod tests {
    use assert_fs::TempDir;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use pixzip::server::router;
    use pixzip::ServiceConfig;
    use std::io::{Cursor, Write};
    use tower::ServiceExt;

    const BOUNDARY: &str = "pixzip-test-boundary";

    fn test_router(temp_root: &TempDir) -> axum::Router {
        router(ServiceConfig {
            temp_root: temp_root.path().to_path_buf(),
            ..ServiceConfig::default()
        })
    }

    /// Build a multipart/form-data body. Each part is (field name, optional
    /// filename, bytes).
    fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, filename, data) in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match filename {
                Some(filename) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\r\n",
                        name, filename
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                ),
            }
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn upload_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(width, height));
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, image::ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8_lossy(&bytes).to_string()
    }

    #[tokio::test]
    async fn test_index_serves_upload_form() {
        let temp_root = TempDir::new().unwrap();
        let app = test_router(&temp_root);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let text = body_text(response).await;
        assert!(text.contains("resize_ratio"));
    }

    #[tokio::test]
    async fn test_upload_resizes_single_image() {
        let temp_root = TempDir::new().unwrap();
        let app = test_router(&temp_root);

        let body = multipart_body(&[
            ("file", Some("photo.png"), &png_bytes(10, 8)),
            ("resize_ratio", None, b"0.5"),
        ]);
        let response = app.oneshot(upload_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_DISPOSITION)
                .unwrap(),
            "attachment; filename=\"resized_images.zip\""
        );

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.by_index(0).unwrap().name(), "resized_photo.png");
    }

    #[tokio::test]
    async fn test_upload_zip_returns_batch_results() {
        let temp_root = TempDir::new().unwrap();
        let app = test_router(&temp_root);

        let mut zip_buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut zip_buffer);
            let options = zip::write::FileOptions::default();
            writer.start_file("a.png", options).unwrap();
            writer.write_all(&png_bytes(6, 6)).unwrap();
            writer.start_file("broken.png", options).unwrap();
            writer.write_all(b"garbage").unwrap();
            writer.finish().unwrap();
        }

        let body = multipart_body(&[
            ("file", Some("images.zip"), &zip_buffer.into_inner()),
            ("resize_ratio", None, b"0.5"),
        ]);
        let response = app.oneshot(upload_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.by_index(0).unwrap().name(), "resized_a.png");
    }

    #[tokio::test]
    async fn test_upload_without_file_part() {
        let temp_root = TempDir::new().unwrap();
        let app = test_router(&temp_root);

        let body = multipart_body(&[("resize_ratio", None, b"0.5")]);
        let response = app.oneshot(upload_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "No file part");
    }

    #[tokio::test]
    async fn test_upload_with_disallowed_extension() {
        let temp_root = TempDir::new().unwrap();
        let app = test_router(&temp_root);

        let body = multipart_body(&[
            ("file", Some("notes.txt"), b"hello".as_slice()),
            ("resize_ratio", None, b"0.5"),
        ]);
        let response = app.oneshot(upload_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let text = body_text(response).await;
        assert!(text.contains("Invalid file format"));
    }

    #[tokio::test]
    async fn test_upload_with_unparseable_ratio() {
        let temp_root = TempDir::new().unwrap();
        let app = test_router(&temp_root);

        let body = multipart_body(&[
            ("file", Some("a.png"), &png_bytes(4, 4)),
            ("resize_ratio", None, b"huge please"),
        ]);
        let response = app.oneshot(upload_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let text = body_text(response).await;
        assert!(text.contains("resize ratio"));
    }

    #[tokio::test]
    async fn test_upload_rejects_oversized_declared_length() {
        let temp_root = TempDir::new().unwrap();
        let app = test_router(&temp_root);

        let request = Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .header(header::CONTENT_LENGTH, "2000000000")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let text = body_text(response).await;
        assert!(text.contains("maximum allowed file size is 1GB"));
        // rejected before anything touched the temp root
        assert!(std::fs::read_dir(temp_root.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn test_upload_single_corrupt_image_is_an_error() {
        let temp_root = TempDir::new().unwrap();
        let app = test_router(&temp_root);

        let body = multipart_body(&[
            ("file", Some("broken.jpg"), b"not a jpeg".as_slice()),
            ("resize_ratio", None, b"0.5"),
        ]);
        let response = app.oneshot(upload_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
