//! API client unit tests
//!
//! Request shapes are checked without sending anything; response handling is
//! checked against a one-shot HTTP listener on localhost.

#[cfg(test)]
mod tests {
    use super::super::api::{
        error_message_from_body, HttpVideoApi, VideoApi, DOWNLOAD_FALLBACK_ERROR,
        SEARCH_FALLBACK_ERROR,
    };
    use super::super::config::ApiConfig;
    use super::super::models::{AppError, DownloadRequest};
    use super::super::test_support::lofi_item;
    use reqwest::Method;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Answer exactly one request with a canned response and hand back the raw request
    async fn serve_once(
        status: &'static str,
        content_type: &'static str,
        body: &'static [u8],
    ) -> (HttpVideoApi, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;

            let head = format!(
                "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                content_type,
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(body).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        });

        let api = HttpVideoApi::new(&ApiConfig {
            base_url: format!("http://{}", addr),
            ..ApiConfig::default()
        })
        .unwrap();
        (api, handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buffer).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buffer.len() >= end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buffer).to_string()
    }

    fn api() -> HttpVideoApi {
        HttpVideoApi::new(&ApiConfig {
            base_url: "http://localhost:8080".to_string(),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_search_request_encodes_query() {
        let request = api().build_search_request("lofi beats & chill").unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.url().path(), "/api/youtube/search");
        let pairs: Vec<(String, String)> = request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![("query".to_string(), "lofi beats & chill".to_string())]
        );
        assert!(!request.url().query().unwrap().contains(' '));
    }

    #[test]
    fn test_download_request_is_form_encoded() {
        let download = DownloadRequest::for_item(&lofi_item(), "mp3");
        let request = api().build_download_request(&download).unwrap();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.url().path(), "/api/youtube/download");
        assert_eq!(
            request
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .unwrap(),
            "application/x-www-form-urlencoded"
        );

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, b"videoId=abc123&title=Lofi+Beats+Mix&format=mp3");
    }

    #[test]
    fn test_error_field_is_used_when_present() {
        let message = error_message_from_body(
            br#"{"error":"Video unavailable"}"#,
            DOWNLOAD_FALLBACK_ERROR,
        );
        assert_eq!(message, "Video unavailable");
    }

    #[test]
    fn test_fallback_when_error_is_missing_or_unparsable() {
        assert_eq!(
            error_message_from_body(b"", SEARCH_FALLBACK_ERROR),
            "Search failed."
        );
        assert_eq!(
            error_message_from_body(b"<html>502</html>", SEARCH_FALLBACK_ERROR),
            "Search failed."
        );
        assert_eq!(
            error_message_from_body(br#"{"message":"nope"}"#, DOWNLOAD_FALLBACK_ERROR),
            "Failed to download file."
        );
        assert_eq!(
            error_message_from_body(br#"{"error":""}"#, DOWNLOAD_FALLBACK_ERROR),
            "Failed to download file."
        );
        assert_eq!(
            error_message_from_body(br#"{"error":null}"#, SEARCH_FALLBACK_ERROR),
            "Search failed."
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = HttpVideoApi::new(&ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        });
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_search_decodes_result_array() {
        let (api, server) = serve_once(
            "200 OK",
            "application/json",
            br#"[{"videoId":"abc123","title":"Lofi Beats Mix"}]"#,
        )
        .await;

        let items = api.search("lofi beats").await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(items, vec![lofi_item()]);
        assert!(request.starts_with("GET /api/youtube/search?query=lofi+beats "));
    }

    #[tokio::test]
    async fn test_search_failure_without_error_body_uses_fallback() {
        let (api, server) = serve_once("500 Internal Server Error", "text/plain", b"boom").await;

        let err = api.search("lofi").await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, AppError::Server { status: 500, .. }));
        assert_eq!(err.to_string(), "Search failed.");
    }

    #[tokio::test]
    async fn test_download_failure_reports_server_error_field() {
        let (api, server) = serve_once(
            "404 Not Found",
            "application/json",
            br#"{"error":"Video unavailable"}"#,
        )
        .await;

        let download = DownloadRequest::for_item(&lofi_item(), "mp3");
        let err = api.download(&download).await.unwrap_err();
        let request = server.await.unwrap();

        assert!(matches!(err, AppError::Server { status: 404, .. }));
        assert_eq!(err.to_string(), "Video unavailable");
        assert!(request.starts_with("POST /api/youtube/download "));
        assert!(request.ends_with("videoId=abc123&title=Lofi+Beats+Mix&format=mp3"));
    }

    #[tokio::test]
    async fn test_download_collects_streamed_body() {
        let (api, server) = serve_once("200 OK", "audio/mpeg", b"ID3-bytes").await;

        let download = DownloadRequest::for_item(&lofi_item(), "mp3");
        let file = api.download(&download).await.unwrap();
        server.await.unwrap();

        assert_eq!(file.bytes.as_ref(), b"ID3-bytes");
        assert_eq!(file.content_type.as_deref(), Some("audio/mpeg"));
    }
}
