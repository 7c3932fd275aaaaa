use reqwest::{
    Client as HttpClient,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};

use crate::{
    api_v1::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse},
    error::GeminiError,
};

pub(crate) const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Minimal HTTP client for Gemini's *generateContent* endpoint.
///
/// * Non-streaming only (one request ▶ one response).
/// * No timeout of its own; the `reqwest` defaults apply.
/// * Shares a single `reqwest::Client`, so cloning `GeminiClient` is cheap.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    http: HttpClient,
    base: String,
}

impl GeminiClient {
    /// Build on top of `http`, which carries proxy and TLS settings.
    /// `base_url` defaults to the public v1beta root.
    pub fn with_http(
        api_key: impl Into<String>,
        http: HttpClient,
        base_url: Option<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            http,
            base: base_url
                .map(|base| base.trim_end_matches('/').to_owned())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
        }
    }

    /// Full URL for `model`. Plain names live under `models/`; names that
    /// already carry a collection (`tunedModels/…`) are used as given.
    pub fn endpoint(&self, model: &str) -> String {
        if model.contains('/') {
            format!("{}/{}:generateContent", self.base, model)
        } else {
            format!("{}/models/{}:generateContent", self.base, model)
        }
    }

    /// Perform a **non-streaming** `generateContent` call.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(API_KEY_HEADER, HeaderValue::from_str(&self.api_key)?);

        let resp = self
            .http
            .post(self.endpoint(model))
            .headers(headers)
            .json(request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status,
                message: api_error_message(&body),
            });
        }

        let bytes = resp.bytes().await?;
        let parsed: GenerateContentResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed)
    }
}

/// The `error.message` of a Gemini error body, or the body itself when it
/// doesn't have that shape.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Read, Write},
        net::TcpListener,
        thread,
    };

    use reqwest::StatusCode;

    use super::*;
    use crate::api_v1::Content;

    /// Serves exactly one canned HTTP response and hands back the raw request.
    fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}/v1beta", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];

            loop {
                let n = stream.read(&mut buf).unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let length = text[..head_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= head_end + 4 + length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).to_string()
        });

        (base, handle)
    }

    #[test]
    fn endpoint_layout() {
        let client = GeminiClient::with_http("k", HttpClient::new(), Some("http://host/v1beta/".into()));

        assert_eq!(
            client.endpoint("gemini-1.5-flash"),
            "http://host/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert_eq!(
            client.endpoint("tunedModels/invoices"),
            "http://host/v1beta/tunedModels/invoices:generateContent"
        );
        assert_eq!(
            GeminiClient::with_http("k", HttpClient::new(), None).endpoint("gemini-2.0-flash"),
            format!("{DEFAULT_BASE_URL}/models/gemini-2.0-flash:generateContent")
        );
    }

    #[test]
    fn error_message_extraction() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(api_error_message(body), "API key not valid.");
        assert_eq!(api_error_message(" upstream timeout \n"), "upstream timeout");
    }

    #[tokio::test]
    async fn posts_request_with_api_key() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"{\"message\":\"hello\"}"}]},"finishReason":"STOP"}]}"#,
        );
        let client = GeminiClient::with_http("secret-key", HttpClient::new(), Some(base));

        let response = client
            .generate_content(
                "gemini-1.5-flash",
                &GenerateContentRequest::new(vec![Content::user_text("hi")]),
            )
            .await
            .unwrap();

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /v1beta/models/gemini-1.5-flash:generateContent"));
        assert!(request.to_ascii_lowercase().contains("x-goog-api-key: secret-key"));
        assert!(request.contains(r#""text":"hi""#));

        assert_eq!(response.candidates.len(), 1);
        assert_eq!(
            response.candidates[0].content.as_ref().unwrap().parts[0].text.as_deref(),
            Some("{\"message\":\"hello\"}")
        );
    }

    #[tokio::test]
    async fn non_success_status_is_an_api_error() {
        let (base, server) = serve_once(
            "403 Forbidden",
            r#"{"error":{"code":403,"message":"Permission denied.","status":"PERMISSION_DENIED"}}"#,
        );
        let client = GeminiClient::with_http("k", HttpClient::new(), Some(base));

        let err = client
            .generate_content("gemini-1.5-flash", &GenerateContentRequest::new(vec![]))
            .await
            .unwrap_err();
        server.join().unwrap();

        match err {
            GeminiError::Api { status, message } => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(message, "Permission denied.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
