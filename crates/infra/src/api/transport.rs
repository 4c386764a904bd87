//! Provider transport
//!
//! [`Transport`] is the narrow contract resource clients are written
//! against: four verbs that return the raw response, plus extraction of the
//! response payload as text. [`RestTransport`] is the reqwest-backed
//! implementation; it owns the base URL, request signing, retries and
//! turning non-2xx responses into `ClientError::Api`.

use std::sync::Arc;

use async_trait::async_trait;
use payouts_domain::constants::{API_VERSION, HEADER_ACCEPT_VERSION, HEADER_IDENTITY, HEADER_SIGNATURE};
use payouts_domain::{ClientConfig, ClientError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use tracing::{debug, instrument, warn};
use url::Url;

use super::envelope;
use crate::http::{HttpClient, Replay};

/// Raw response handed back by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }
}

/// HTTP transport contract consumed by resource clients
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        path: &str,
        params: &[(String, String)],
        signed: bool,
    ) -> Result<ApiResponse, ClientError>;

    async fn post(&self, path: &str, json: String, signed: bool) -> Result<ApiResponse, ClientError>;

    /// PUT, always signed.
    async fn update(&self, path: &str, json: String) -> Result<ApiResponse, ClientError>;

    /// DELETE, always signed.
    async fn delete(&self, path: &str, params: &[(String, String)]) -> Result<ApiResponse, ClientError>;

    /// Response payload as JSON text, with the provider envelope removed.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` when the body itself reports an error.
    fn response_to_json_string(&self, response: ApiResponse) -> Result<String, ClientError> {
        envelope::unwrap_envelope(&response.body)
    }
}

/// Identity and signature headers for a signed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeaders {
    pub identity: String,
    pub signature: String,
}

/// Signs requests made with `signed = true`
///
/// The message is the full request URL (query included) followed by the
/// body, or the URL alone for bodyless requests.
pub trait RequestSigner: Send + Sync {
    fn sign(&self, message: &str) -> Result<SignatureHeaders, ClientError>;
}

/// reqwest-backed [`Transport`]
#[derive(Clone)]
pub struct RestTransport {
    http: HttpClient,
    base_url: Url,
    signer: Option<Arc<dyn RequestSigner>>,
}

impl RestTransport {
    /// Create a transport over an existing HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if `base_url` is not an absolute URL.
    pub fn new(base_url: &str, http: HttpClient) -> Result<Self, ClientError> {
        let normalized =
            if base_url.ends_with('/') { base_url.to_string() } else { format!("{base_url}/") };
        let base_url = Url::parse(&normalized)
            .map_err(|e| ClientError::Config(format!("Invalid API base URL '{base_url}': {e}")))?;

        Ok(Self { http, base_url, signer: None })
    }

    /// Build the HTTP client and transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the HTTP client cannot be built or the
    /// base URL is invalid.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = HttpClient::from_config(config, default_headers())?;

        Self::new(&config.base_url(), http)
    }

    /// Attach a signer for requests made with `signed = true`.
    #[must_use]
    pub fn with_signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str, params: &[(String, String)]) -> Result<Url, ClientError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::Config(format!("Invalid resource path '{path}': {e}")))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }

    #[instrument(skip(self, params, body), fields(method = %method, path = %path))]
    async fn execute(
        &self,
        method: Method,
        path: &str,
        params: &[(String, String)],
        body: Option<String>,
        signed: bool,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.url(path, params)?;
        let replay = Replay::classify(&method, body.as_deref());
        let mut request = self.http.request(method, url.clone());

        if signed {
            if let Some(signer) = &self.signer {
                let message = match &body {
                    Some(json) => format!("{url}{json}"),
                    None => url.to_string(),
                };
                let headers = signer.sign(&message)?;
                request = request
                    .header(HEADER_IDENTITY, headers.identity)
                    .header(HEADER_SIGNATURE, headers.signature);
            }
        }

        if let Some(json) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(json);
        }

        let response = self.http.send(request, replay).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            let reason = reason_phrase(status, &body);
            warn!(status = status.as_u16(), reason = %reason, "Provider returned non-success status");
            return Err(ClientError::api(Some(status.as_u16()), reason));
        }

        debug!(status = status.as_u16(), bytes = body.len(), "Provider request successful");
        Ok(ApiResponse::new(status.as_u16(), body))
    }
}

#[async_trait]
impl Transport for RestTransport {
    async fn get(
        &self,
        path: &str,
        params: &[(String, String)],
        signed: bool,
    ) -> Result<ApiResponse, ClientError> {
        self.execute(Method::GET, path, params, None, signed).await
    }

    async fn post(&self, path: &str, json: String, signed: bool) -> Result<ApiResponse, ClientError> {
        self.execute(Method::POST, path, &[], Some(json), signed).await
    }

    async fn update(&self, path: &str, json: String) -> Result<ApiResponse, ClientError> {
        self.execute(Method::PUT, path, &[], Some(json), true).await
    }

    async fn delete(&self, path: &str, params: &[(String, String)]) -> Result<ApiResponse, ClientError> {
        self.execute(Method::DELETE, path, params, None, true).await
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(HEADER_ACCEPT_VERSION, HeaderValue::from_static(API_VERSION));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

fn reason_phrase(status: StatusCode, body: &str) -> String {
    envelope::error_message(body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown status").to_string())
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    struct StaticSigner;

    impl RequestSigner for StaticSigner {
        fn sign(&self, message: &str) -> Result<SignatureHeaders, ClientError> {
            Ok(SignatureHeaders {
                identity: "pubkey".to_string(),
                signature: format!("sig:{}", message.len()),
            })
        }
    }

    fn transport(server: &MockServer) -> RestTransport {
        let config = ClientConfig {
            api_url: Some(server.uri()),
            max_attempts: 1,
            ..ClientConfig::default()
        };
        RestTransport::from_config(&config).unwrap()
    }

    #[test]
    fn rejects_relative_base_url() {
        let http = HttpClient::from_config(&ClientConfig::default(), HeaderMap::new()).unwrap();
        assert!(matches!(RestTransport::new("not a url", http), Err(ClientError::Config(_))));
    }

    #[test]
    fn resolves_paths_against_base() {
        let http = HttpClient::from_config(&ClientConfig::default(), HeaderMap::new()).unwrap();
        let transport = RestTransport::new("https://test.example.com/api", http).unwrap();

        let url = transport
            .url("recipients/abc", &[("token".to_string(), "t k".to_string())])
            .unwrap();
        assert_eq!(url.as_str(), "https://test.example.com/api/recipients/abc?token=t+k");
    }

    #[tokio::test]
    async fn get_sends_query_and_version_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipients"))
            .and(query_param("token", "abc"))
            .and(header("X-Accept-Version", "2.0.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":[]}"#))
            .expect(1)
            .mount(&server)
            .await;

        let transport = transport(&server);
        let response = transport
            .get("recipients", &[("token".to_string(), "abc".to_string())], false)
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(transport.response_to_json_string(response).unwrap(), "[]");
    }

    #[tokio::test]
    async fn signed_post_carries_signature_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/recipients"))
            .and(header("X-Identity", "pubkey"))
            .and(header("Content-Type", "application/json"))
            .and(body_string(r#"{"token":"t"}"#))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":{}}"#))
            .expect(1)
            .mount(&server)
            .await;

        let transport = transport(&server).with_signer(Arc::new(StaticSigner));
        transport.post("recipients", r#"{"token":"t"}"#.to_string(), true).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("X-Signature").is_some());
    }

    #[tokio::test]
    async fn unsigned_request_skips_signer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let transport = transport(&server).with_signer(Arc::new(StaticSigner));
        transport.get("recipients", &[], false).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("X-Signature").is_none());
    }

    #[tokio::test]
    async fn update_uses_put_and_delete_uses_delete() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/recipients/r1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/recipients/r1"))
            .and(query_param("token", "t"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = transport(&server);
        transport.update("recipients/r1", "{}".to_string()).await.unwrap();
        transport.delete("recipients/r1", &[("token".to_string(), "t".to_string())]).await.unwrap();
    }

    #[tokio::test]
    async fn non_success_status_becomes_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":"Object not found"}"#))
            .mount(&server)
            .await;

        let err = transport(&server).get("recipients/missing", &[], true).await.unwrap_err();
        assert_eq!(err, ClientError::api(Some(404), "Object not found"));
    }

    #[tokio::test]
    async fn non_success_without_body_uses_canonical_reason() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = transport(&server).delete("recipients/r1", &[]).await.unwrap_err();
        assert_eq!(err, ClientError::api(Some(403), "Forbidden"));
    }

    fn retrying_transport(server: &MockServer) -> RestTransport {
        let config = ClientConfig {
            api_url: Some(server.uri()),
            max_attempts: 3,
            base_backoff_ms: 1,
            ..ClientConfig::default()
        };
        RestTransport::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn guid_stamped_post_is_retried_after_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/recipients"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/recipients"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":[]}"#))
            .mount(&server)
            .await;

        let transport = retrying_transport(&server);
        let body = r#"{"recipients":[],"token":"t","guid":"g-1"}"#.to_string();
        let response = transport.post("recipients", body, true).await.unwrap();

        assert_eq!(response.status, 200);
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].body, requests[1].body);
    }

    #[tokio::test]
    async fn post_without_guid_is_not_replayed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/recipients/r1/notifications"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let transport = retrying_transport(&server);
        let err = transport
            .post("recipients/r1/notifications", r#"{"token":"t"}"#.to_string(), true)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(503));
    }
}
