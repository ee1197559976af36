use log::{debug, warn};
use reqwest::{header, Client as ReqwestClient, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

mod error;
mod marketplace;
mod pagination;
mod rate_limit;
mod repos;

pub use error::{Error, GithubClientError, GithubClientErrorType, Result};
pub use marketplace::MarketplaceClient;
pub use pagination::{Pagination, PaginationOptions};
pub use rate_limit::Rate;
pub use repos::RepositoryClient;

// Constants
const DEFAULT_BASE_URL: &str = "https://api.github.com/";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const HEADER_LINK: &str = "Link";
const HEADER_RATE_LIMIT: &str = "X-RateLimit-Limit";
const HEADER_RATE_REMAINING: &str = "X-RateLimit-Remaining";
const HEADER_RATE_RESET: &str = "X-RateLimit-Reset";
const HEADER_RETRY_AFTER: &str = "Retry-After";

const MEDIA_TYPE_V3: &str = "application/vnd.github.v3+json";

#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    user_agent: Option<String>,
    github_api_token: Option<String>,
    timeout: Option<Duration>,
    marketplace_stubbed: bool,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            github_api_token: None,
            timeout: None,
            marketplace_stubbed: false,
        }
    }

    /// Base URL for API requests, e.g. a GitHub Enterprise API root.
    /// Must be terminated with a trailing slash.
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn github_api_token<S: Into<String>>(mut self, github_api_token: S) -> Self {
        self.github_api_token = Some(github_api_token.into());
        self
    }

    /// Upper bound for a whole request, from connecting until the body has been read
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Route Marketplace calls to the `stubbed` endpoints, which serve fixed sample data.
    /// Fixed for the lifetime of the client; see `MarketplaceClient::stubbed` to pick
    /// per call instead.
    pub fn marketplace_stubbed(mut self, stubbed: bool) -> Self {
        self.marketplace_stubbed = stubbed;
        self
    }

    pub fn build(self) -> Result<Client> {
        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        if !base_url.path().ends_with('/') {
            return Err(format!(
                "base URL must have a trailing slash, but {:?} does not",
                base_url.as_str()
            )
            .into());
        }

        let user_agent = self.user_agent.unwrap_or_else(|| USER_AGENT.to_owned());

        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(MEDIA_TYPE_V3));

        if let Some(token) = &self.github_api_token {
            let mut value = header::HeaderValue::from_str(&format!("token {}", token))
                .map_err(|e| e.to_string())?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let mut client_builder = ReqwestClient::builder()
            .user_agent(&user_agent)
            .default_headers(headers);

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build()?;

        Ok(Client {
            base_url,
            user_agent,
            github_api_token: self.github_api_token,
            marketplace_stubbed: self.marketplace_stubbed,
            client,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to the GitHub REST API.
///
/// A `Client` holds no per-request state and can be shared between tasks. Every call is
/// a single request: nothing is retried or cached. Dropping the future returned by an
/// endpoint method cancels the request.
#[derive(Debug)]
pub struct Client {
    /// Base URL to use for API requests. Defaults to the public GitHub API,
    /// but can be overridden for use with GitHub Enterprise. Always
    /// terminated with a trailing slash.
    base_url: Url,

    /// User agent string sent when communicating with GitHub APIs
    user_agent: String,

    /// API token to use when issuing requests to GitHub
    github_api_token: Option<String>,

    /// Default for `MarketplaceClient::stubbed`
    marketplace_stubbed: bool,

    /// Client used to make http requests
    client: ReqwestClient,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn is_authenticated(&self) -> bool {
        self.github_api_token.is_some()
    }

    pub fn marketplace_stubbed(&self) -> bool {
        self.marketplace_stubbed
    }

    /// Resolve a path relative to the base URL. Paths must be relative and may not
    /// contain control characters; a bad owner or repo name is rejected here, before
    /// anything goes over the wire.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        if path.is_empty() || path.starts_with('/') || path.chars().any(char::is_control) {
            return Err(Error::InvalidPath(path.to_owned()));
        }

        Ok(self.base_url.join(path)?)
    }

    fn get(&self, url: &str) -> Result<RequestBuilder> {
        self.request(Method::GET, url)
    }

    fn put(&self, url: &str) -> Result<RequestBuilder> {
        self.request(Method::PUT, url)
    }

    fn delete(&self, url: &str) -> Result<RequestBuilder> {
        self.request(Method::DELETE, url)
    }

    fn request(&self, method: Method, url: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(url)?;
        debug!("Github Request: {} {}", method, url);
        Ok(self.client.request(method, url))
    }

    // Turns non-2xx responses into errors. GitHub reports rate limiting as a 403 (or 429),
    // so those are split out from other client errors.
    async fn check_response(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        debug!("Github Response: {} {}", status, response.url());

        if status.is_success() {
            return Ok(response);
        }

        let headers = response.headers().clone();
        let rate = Rate::from_headers(&headers);
        let body = response.bytes().await?;
        let error: GithubClientError = serde_json::from_slice(&body).unwrap_or_default();
        warn!("Github request failed: {} {}", status, error);

        if (status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS)
            && Rate::is_exhausted(&headers)
        {
            return Err(Error::RateLimit { status, rate });
        }

        if status == StatusCode::FORBIDDEN && is_abuse_limit(&error) {
            let retry_after = headers
                .get(HEADER_RETRY_AFTER)
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs);
            return Err(Error::AbuseLimit {
                status,
                retry_after,
            });
        }

        Err(Error::GithubClientError {
            status,
            rate,
            error,
        })
    }

    // Process a response received from Github. This checks for failures like hitting rate
    // limits, etc., and then deserializes the json response.
    async fn json<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<Response<T>> {
        let response = self.check_response(response).await?;
        let status = response.status();
        let headers = response.headers().clone();

        let payload = response.bytes().await?;
        let inner = serde_json::from_slice(&payload).map_err(|source| Error::Decode {
            status,
            rate: Rate::from_headers(&headers),
            source,
        })?;

        Ok(Response::new(status, headers, inner))
    }

    // Like `json` for endpoints that answer with no content
    async fn empty(&self, response: reqwest::Response) -> Result<Response<()>> {
        let response = self.check_response(response).await?;
        let status = response.status();
        let headers = response.headers().clone();

        response.bytes().await?;

        Ok(Response::new(status, headers, ()))
    }

    pub fn marketplace(&self) -> MarketplaceClient<'_> {
        MarketplaceClient::new(self)
    }

    pub fn repos(&self) -> RepositoryClient<'_> {
        RepositoryClient::new(self)
    }
}

fn is_abuse_limit(error: &GithubClientError) -> bool {
    error
        .documentation_url
        .as_deref()
        .map(|url| url.contains("secondary-rate-limits") || url.contains("abuse"))
        .unwrap_or(false)
}

/// A successful API response: the decoded body plus the metadata GitHub sent with it
#[derive(Debug)]
pub struct Response<T> {
    status: StatusCode,
    headers: header::HeaderMap,
    pagination: Pagination,
    rate: Rate,
    inner: T,
}

impl<T> Response<T> {
    fn new(status: StatusCode, headers: header::HeaderMap, inner: T) -> Self {
        Self {
            status,
            pagination: Pagination::from_headers(&headers),
            rate: Rate::from_headers(&headers),
            headers,
            inner,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &header::HeaderMap {
        &self.headers
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn rate(&self) -> &Rate {
        &self.rate
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    pub fn into_parts(self) -> (Pagination, Rate, T) {
        (self.pagination, self.rate, self.inner)
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Response<U> {
        Response {
            status: self.status,
            headers: self.headers,
            pagination: self.pagination,
            rate: self.rate,
            inner: f(self.inner),
        }
    }
}


#[cfg(test)]
mod test {
    use super::test_support::{client_for, request_count};
    use super::{Client, Error, Rate};
    use reqwest::StatusCode;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn base_url_requires_trailing_slash() {
        let err = Client::builder()
            .base_url("https://github.example.com/api/v3")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Message(_)));

        let client = Client::builder()
            .base_url("https://github.example.com/api/v3/")
            .build()
            .unwrap();
        assert_eq!(
            client.endpoint("repos/o/r").unwrap().as_str(),
            "https://github.example.com/api/v3/repos/o/r"
        );
    }

    #[test]
    fn defaults() {
        let client = Client::builder().build().unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.github.com/");
        assert!(client.user_agent().starts_with("github/"));
        assert!(!client.is_authenticated());
        assert!(!client.marketplace_stubbed());
    }

    #[test]
    fn endpoint_rejects_bad_paths() {
        let client = Client::builder().build().unwrap();
        for bad in &["repos/\n/\n/immutable-releases", "/repos/o/r", "", "repos/o\t/r"] {
            assert!(
                matches!(client.endpoint(bad), Err(Error::InvalidPath(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[tokio::test]
    async fn sends_auth_accept_and_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/marketplace_purchases"))
            .and(header("Authorization", "token secret"))
            .and(header("Accept", "application/vnd.github.v3+json"))
            .and(header("User-Agent", "ghapi-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::builder()
            .base_url(format!("{}/", server.uri()))
            .github_api_token("secret")
            .user_agent("ghapi-test")
            .build()
            .unwrap();
        assert!(client.is_authenticated());

        let purchases = client
            .marketplace()
            .list_marketplace_purchases_for_user(None)
            .await
            .unwrap();
        assert!(purchases.inner().is_empty());
    }

    #[tokio::test]
    async fn response_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/marketplace_listing/plans"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"id": 1}]))
                    .insert_header("X-RateLimit-Limit", "5000")
                    .insert_header("X-RateLimit-Remaining", "4999")
                    .insert_header("X-RateLimit-Reset", "1372700873")
                    .insert_header(
                        "Link",
                        r#"<https://api.github.com/marketplace_listing/plans?page=2>; rel="next", <https://api.github.com/marketplace_listing/plans?page=4>; rel="last""#,
                    ),
            )
            .mount(&server)
            .await;

        let response = client_for(&server)
            .marketplace()
            .list_plans(None)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.pagination().next_page, Some(2));
        assert_eq!(response.pagination().last_page, Some(4));
        assert_eq!(
            *response.rate(),
            Rate {
                limit: 5000,
                remaining: 4999,
                reset: 1372700873
            }
        );
        assert!(response.headers().contains_key("link"));

        let (pagination, _rate, plans) = response.into_parts();
        assert_eq!(pagination.prev_page, None);
        assert_eq!(plans.len(), 1);
    }

    #[tokio::test]
    async fn api_error_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/immutable-releases"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({
                        "message": "Not Found",
                        "documentation_url": "https://docs.github.com/rest"
                    }))
                    .insert_header("X-RateLimit-Remaining", "10"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .repos()
            .are_immutable_releases_enabled("o", "r")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        match err {
            Error::GithubClientError { rate, error, .. } => {
                assert_eq!(error.message.as_deref(), Some("Not Found"));
                assert_eq!(rate.remaining, 10);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn api_error_with_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/repos/o/r/immutable-releases"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .repos()
            .enable_immutable_releases("o", "r")
            .await
            .unwrap_err();

        match err {
            Error::GithubClientError { status, error, .. } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert!(error.message.is_none());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn rate_limit_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/marketplace_listing/plans"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(json!({"message": "API rate limit exceeded"}))
                    .insert_header("X-RateLimit-Limit", "60")
                    .insert_header("X-RateLimit-Remaining", "0")
                    .insert_header("X-RateLimit-Reset", "1372700873"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .marketplace()
            .list_plans(None)
            .await
            .unwrap_err();

        match err {
            Error::RateLimit { status, rate } => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(rate.limit, 60);
                assert_eq!(rate.reset, 1372700873);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn abuse_limit_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/marketplace_listing/plans"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(json!({
                        "message": "You have exceeded a secondary rate limit.",
                        "documentation_url": "https://docs.github.com/rest/overview/rate-limits-for-the-rest-api#about-secondary-rate-limits"
                    }))
                    .insert_header("Retry-After", "30"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .marketplace()
            .list_plans(None)
            .await
            .unwrap_err();

        match err {
            Error::AbuseLimit { retry_after, .. } => {
                assert_eq!(retry_after, Some(Duration::from_secs(30)))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/marketplace_listing/accounts/1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("X-RateLimit-Limit", "5000")
                    .insert_header("X-RateLimit-Remaining", "4999")
                    .insert_header("X-RateLimit-Reset", "1372700873")
                    .set_body_string("{\"id\": "),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .marketplace()
            .get_plan_account_for_account(1)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::OK));
        match err {
            Error::Decode { rate, .. } => {
                assert_eq!(rate.limit, 5000);
                assert_eq!(rate.remaining, 4999);
                assert_eq!(rate.reset, 1372700873);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn transport_failure() {
        // Nothing listens on port 1
        let client = Client::builder()
            .base_url("http://127.0.0.1:1/")
            .build()
            .unwrap();

        let err = client.marketplace().list_plans(None).await.unwrap_err();
        assert!(matches!(err, Error::Reqwest(_)));
    }

    #[tokio::test]
    async fn client_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/marketplace_listing/plans"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let client = Client::builder()
            .base_url(format!("{}/", server.uri()))
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();

        let err = client.marketplace().list_plans(None).await.unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn dropping_the_future_cancels_the_call() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/repos/o/r/immutable-releases"))
            .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let started = std::time::Instant::now();
        let result = tokio::time::timeout(
            Duration::from_millis(100),
            client.repos().disable_immutable_releases("o", "r"),
        )
        .await;

        assert!(result.is_err());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn invalid_path_is_rejected_before_sending() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let err = client
            .repos()
            .are_immutable_releases_enabled("\n", "\n")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
        assert_eq!(request_count(&server).await, 0);
    }

    #[test]
    fn client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Client>();
    }

    #[tokio::test]
    async fn concurrent_calls_share_one_client() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/marketplace_listing/plans"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "id": 1 }]))
                    .set_delay(Duration::from_millis(50)),
            )
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/immutable-releases"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "enabled": true }))
                    .set_delay(Duration::from_millis(50)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = std::sync::Arc::new(client_for(&server));
        let spawned = {
            let client = client.clone();
            tokio::spawn(async move { client.marketplace().list_plans(None).await })
        };
        let marketplace = client.marketplace();
        let repos = client.repos();
        let (plans, status) = tokio::join!(
            marketplace.list_plans(None),
            repos.are_immutable_releases_enabled("o", "r"),
        );

        assert_eq!(plans.unwrap().inner()[0].id, Some(1));
        assert_eq!(status.unwrap().inner().enabled, Some(true));
        assert_eq!(spawned.await.unwrap().unwrap().inner().len(), 1);
    }
}
