//! HTTP OCR gateway speaking Textract-shaped JSON.
//!
//! The gateway accepts raw image bytes and answers with `{"Blocks": [...]}`:
//! `POST {base}/detect-lines` for plain OCR, `POST {base}/analyze` for
//! tables and forms.

use async_trait::async_trait;
use quotefill_acquire::ocr::{self, OcrClient, Table};
use quotefill_acquire::{Block, OcrError};
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info};

pub struct HttpOcrClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOcrClient {
    /// `base_url` like `http://localhost:8080`; a trailing slash is dropped.
    pub fn new(base_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Use a preconfigured client, e.g. with timeouts or proxy settings.
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn post_image(&self, path: &str, image: &[u8]) -> Result<Vec<Block>, OcrError> {
        let url = format!("{}/{path}", self.base_url);

        debug!(url = %url, bytes = image.len(), "posting image to OCR gateway");
        let resp = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image.to_vec())
            .send()
            .await
            .map_err(|e| OcrError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(OcrError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| OcrError::Request(e.to_string()))?;
        ocr::parse_blocks(&body)
    }
}

#[async_trait]
impl OcrClient for HttpOcrClient {
    async fn detect_lines(&self, image: &[u8]) -> Result<Vec<String>, OcrError> {
        let blocks = self.post_image("detect-lines", image).await?;
        let lines = ocr::lines_from_blocks(&blocks);
        info!(lines = lines.len(), "OCR gateway detected lines");
        Ok(lines)
    }

    async fn analyze_tables(&self, image: &[u8]) -> Result<Vec<Table>, OcrError> {
        let blocks = self.post_image("analyze", image).await?;
        Ok(ocr::tables_from_blocks(&blocks))
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    /// Serve one canned response on a local port; returns the base URL and
    /// a handle yielding the raw request head.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];

            // Read headers, then as much body as Content-Length announces.
            let head_end = loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
                if n == 0 {
                    break request.len();
                }
            };
            let head = String::from_utf8_lossy(&request[..head_end]).to_string();
            let content_length = head
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            while request.len() < head_end + content_length {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            head
        });

        (format!("http://{addr}/"), handle)
    }

    fn local_client(base: String) -> HttpOcrClient {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpOcrClient::with_client(client, base)
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = HttpOcrClient::new("http://localhost:8080/".into());
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn detect_lines_reduces_blocks() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"Blocks":[
                {"Id":"1","BlockType":"LINE","Text":"Progressive"},
                {"Id":"2","BlockType":"WORD","Text":"Progressive"},
                {"Id":"3","BlockType":"LINE","Text":"$900.00"}
            ]}"#,
        )
        .await;

        let client = local_client(base);
        let lines = client.detect_lines(b"\x89PNG").await.unwrap();
        assert_eq!(lines, vec!["Progressive", "$900.00"]);

        let head = server.await.unwrap();
        assert!(head.starts_with("POST /detect-lines "));
        assert!(head.to_ascii_lowercase().contains("application/octet-stream"));
    }

    #[tokio::test]
    async fn service_error_carries_status_and_body() {
        let (base, server) = serve_once("503 Service Unavailable", "quota exceeded").await;

        let client = local_client(base);
        let err = client.analyze_tables(b"img").await.unwrap_err();
        match err {
            OcrError::Service { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "quota exceeded");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(server.await.unwrap().starts_with("POST /analyze "));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let (base, _server) = serve_once("200 OK", "<html>").await;

        let err = local_client(base)
            .detect_lines(b"img")
            .await
            .unwrap_err();
        assert!(matches!(err, OcrError::Decode(_)));
    }
}
