/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::TradableBitsError;
use crate::v1::signing::sign_request;
use crate::v1::{ClientConfig, Clock, HttpMethod, RequestParams};
use log::{debug, trace, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;
use url::Url;

// Root Tradable Bits API
pub const API_URL: &str = "https://tradablebits.com/api/v1/";

// Where users are sent to authorize an application
pub const API_OAUTH_URL: &str = "https://tradablebits.com/crm/oauth";

// Authorization code exchange
pub const API_OAUTH_TOKEN_URL: &str = "https://tradablebits.com/crm/access_token";

/// Default amount of media to pull per fetch. The API caps a page at 100 records.
pub const MEDIA_LIMIT_DEFAULT: u32 = 100;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(20);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);
const OAUTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Base URLs the client talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api: Url,
    pub oauth_authorize: Url,
    pub oauth_token: Url,
}

impl Endpoints {
    /// The public Tradable Bits service
    pub fn production() -> Result<Self, TradableBitsError> {
        Ok(Self {
            api: Url::parse(API_URL)?,
            oauth_authorize: Url::parse(API_OAUTH_URL)?,
            oauth_token: Url::parse(API_OAUTH_TOKEN_URL)?,
        })
    }

    /// Same paths as production but rooted at another origin (staging, mock servers)
    pub fn with_origin(origin: &str) -> Result<Self, TradableBitsError> {
        let origin = Url::parse(origin)?;
        Ok(Self {
            api: origin.join("/api/v1/")?,
            oauth_authorize: origin.join("/crm/oauth")?,
            oauth_token: origin.join("/crm/access_token")?,
        })
    }
}

/// A fully built main API request that has not been sent yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub body: Option<String>,
}

/// Directly communicates with the API.
#[derive(Clone)]
pub struct ApiClient {
    creds: ClientConfig,
    endpoints: Endpoints,
    clock: Clock,
    https_client: reqwest::Client,
}

impl ApiClient {
    /// Creates a new client for the given config and endpoints.
    ///
    /// Certificates are verified; connects time out after 20s and whole requests after 90s.
    pub fn new(creds: ClientConfig, endpoints: Endpoints) -> Result<Self, TradableBitsError> {
        let https_client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            creds: creds.validated()?,
            endpoints,
            clock: Clock::default(),
            https_client,
        })
    }

    pub fn creds(&self) -> &ClientConfig {
        &self.creds
    }

    pub(crate) fn creds_mut(&mut self) -> &mut ClientConfig {
        &mut self.creds
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    // Credential pair placed in the query string of every main API call
    fn credential(&self, function: &str, auth: bool) -> Result<(&'static str, String), TradableBitsError> {
        if !auth {
            return Ok(("api_key", self.creds.api_key.clone()));
        }
        self.creds
            .access_token
            .clone()
            .map(|token| ("access_token", token))
            .ok_or_else(|| {
                TradableBitsError::Auth(format!(
                    "{function} - This method requires an authenticated user's access token"
                ))
            })
    }

    // Joins `function` onto the API root, returning the URL and the path below the root
    // that actually gets sent. Anything that would leave the root is rejected.
    fn resolve(&self, function: &str) -> Result<(Url, String), TradableBitsError> {
        let invalid = |why: &str| {
            TradableBitsError::Usage(format!("'{function}' is not a valid API path, {why}"))
        };
        if Url::parse(function).is_ok() {
            return Err(invalid("absolute URLs are not allowed"));
        }
        if function.contains(['?', '#']) {
            return Err(invalid("it may not contain a query or fragment"));
        }
        let is_dot_segment = |s: &str| {
            matches!(s.to_ascii_lowercase().replace("%2e", ".").as_str(), "." | "..")
        };
        if function.split(['/', '\\']).any(is_dot_segment) {
            return Err(invalid("it may not contain '.' or '..' segments"));
        }

        let api = &self.endpoints.api;
        let url = api.join(function)?;
        match url.path().strip_prefix(api.path()) {
            Some(endpoint) if url.origin() == api.origin() => {
                let endpoint = endpoint.to_string();
                Ok((url, endpoint))
            }
            _ => Err(invalid("it resolves outside the API root")),
        }
    }

    /// Builds the request for `function` (a path relative to the API root).
    ///
    /// `auth` selects the access token instead of the API key as credential. A `timestamp`
    /// is added whenever there are parameters. GET sends the parameters in the query, POST
    /// in a urlencoded body and DELETE drops them. When signed headers are on, `sig` is
    /// appended last.
    pub fn prepare(
        &self,
        function: &str,
        auth: bool,
        params: Option<RequestParams>,
        method: HttpMethod,
    ) -> Result<PreparedRequest, TradableBitsError> {
        let function = function.trim_start_matches('/');
        let (cred_name, cred_value) = self.credential(function, auth)?;

        let mut params = params.unwrap_or_default();
        if !params.is_empty() {
            params.insert("timestamp", self.clock.timestamp());
        }

        let (mut url, endpoint) = self.resolve(function)?;

        let sig = if self.creds.signed_header {
            let secret = self.creds.api_secret.as_deref().ok_or_else(|| {
                TradableBitsError::Auth(format!(
                    "{function} - Signed requests require the API secret"
                ))
            })?;
            let signed = params.clone().with(cred_name, cred_value.as_str());
            Some(sign_request(secret, &endpoint, &signed)?)
        } else {
            None
        };

        let mut body = None;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair(cred_name, &cred_value);
            match method {
                HttpMethod::Get => {
                    query.extend_pairs(params.to_pairs());
                }
                HttpMethod::Post => body = Some(params.to_form()),
                HttpMethod::Delete => {}
            }
            if let Some(sig) = &sig {
                query.append_pair("sig", sig);
            }
        }

        Ok(PreparedRequest { method, url, body })
    }

    /// Performs a request against the main API and decodes the JSON body
    pub async fn call(
        &self,
        function: &str,
        auth: bool,
        params: Option<RequestParams>,
        method: HttpMethod,
    ) -> Result<Value, TradableBitsError> {
        let prepared = self.prepare(function, auth, params, method)?;
        let method_name: &'static str = prepared.method.into();
        debug!("{} {}", method_name, prepared.url.path());

        let mut req = self
            .https_client
            .request(prepared.method.into(), prepared.url)
            .header(ACCEPT, "application/json");
        if let Some(body) = prepared.body {
            req = req
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body);
        }
        Self::parse_response(req.send().await?).await
    }

    /// Posts the authorization code exchange form to the token endpoint.
    ///
    /// Nothing is added to the URL, the credentials travel in `form`.
    pub async fn oauth_call(&self, form: &RequestParams) -> Result<Value, TradableBitsError> {
        debug!("POST {}", self.endpoints.oauth_token.path());
        let resp = self
            .https_client
            .post(self.endpoints.oauth_token.clone())
            .timeout(OAUTH_TIMEOUT)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(form.to_form())
            .send()
            .await?;
        Self::parse_response(resp).await
    }

    async fn parse_response(resp: reqwest::Response) -> Result<Value, TradableBitsError> {
        let status = resp.status();
        let text = resp.text().await?;
        if text.trim().is_empty() {
            warn!("Empty response body (status {})", status);
            return Err(TradableBitsError::EmptyResponse());
        }
        trace!("Response status {} with {} bytes", status, text.len());
        Ok(serde_json::from_str(&text)?)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("creds", &self.creds)
            .field("endpoints", &self.endpoints)
            .field("clock", &self.clock)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(config: ClientConfig) -> ApiClient {
        let mut client =
            ApiClient::new(config, Endpoints::with_origin("http://localhost:9").unwrap()).unwrap();
        client.set_clock(Clock::Fixed(1700000000));
        client
    }

    #[test]
    fn endpoints_from_origin() {
        let endpoints = Endpoints::with_origin("http://127.0.0.1:8080").unwrap();
        assert_eq!(endpoints.api.as_str(), "http://127.0.0.1:8080/api/v1/");
        assert_eq!(endpoints.oauth_token.as_str(), "http://127.0.0.1:8080/crm/access_token");

        let production = Endpoints::production().unwrap();
        assert_eq!(production.api.join("status").unwrap().as_str(), "https://tradablebits.com/api/v1/status");
    }

    #[test]
    fn get_without_params_has_no_timestamp() {
        let req = client(ClientConfig::from_api_key("key123"))
            .prepare("status", false, None, HttpMethod::Get)
            .unwrap();
        assert_eq!(req.url.as_str(), "http://localhost:9/api/v1/status?api_key=key123");
        assert_eq!(req.body, None);
    }

    #[test]
    fn post_sends_params_in_body() {
        let params = RequestParams::new().with("name", "a b");
        let req = client(ClientConfig::from_api_key("key123"))
            .prepare("streams/abc/records", false, Some(params), HttpMethod::Post)
            .unwrap();
        assert_eq!(req.url.query(), Some("api_key=key123"));
        assert_eq!(req.body.as_deref(), Some("name=a+b&timestamp=1700000000"));
    }

    #[test]
    fn delete_drops_params() {
        let params = RequestParams::new().with("id", 7i64);
        let req = client(ClientConfig::from_api_key("key123"))
            .prepare("streams/abc/records", false, Some(params), HttpMethod::Delete)
            .unwrap();
        assert_eq!(req.url.query(), Some("api_key=key123"));
        assert_eq!(req.body, None);
    }

    #[test]
    fn auth_call_needs_token() {
        let err = client(ClientConfig::from_api_key("key123"))
            .prepare("status", true, None, HttpMethod::Get)
            .unwrap_err();
        assert!(matches!(err, TradableBitsError::Auth(_)));
    }

    #[test]
    fn signed_auth_call() {
        let config = ClientConfig {
            api_key: "key123".into(),
            api_secret: Some("s3cr3t".into()),
            access_token: Some("tok123".into()),
            signed_header: true,
            ..Default::default()
        };
        let req = client(config)
            .prepare("status", true, None, HttpMethod::Get)
            .unwrap();
        assert_eq!(
            req.url.query(),
            Some("access_token=tok123&sig=f469e2525e2b73c346d8de2097d2ad6d9019970c42b331c3a200d739476ba14d")
        );
    }

    #[test]
    fn rejects_paths_leaving_the_api_root() {
        let client = client(ClientConfig::from_api_key("key123"));
        for function in [
            "https://other.host/x",
            "http:other",
            "streams/../records",
            "streams/%2E%2E/records",
            "streams/..\\..\\x",
            "streams/a?x=1/records",
            "streams/a#frag/records",
        ] {
            let err = client
                .prepare(function, false, None, HttpMethod::Get)
                .unwrap_err();
            assert!(matches!(err, TradableBitsError::Usage(_)), "{function}");
        }

        // Leading slashes are relative to the API root, not the host
        let req = client
            .prepare("//other.host/x", false, None, HttpMethod::Get)
            .unwrap();
        assert_eq!(req.url.host_str(), Some("localhost"));
        assert_eq!(req.url.path(), "/api/v1/other.host/x");
    }

    #[test]
    fn signs_the_path_that_is_sent() {
        let config = ClientConfig {
            api_key: "key123".into(),
            api_secret: Some("s3cr3t".into()),
            signed_header: true,
            ..Default::default()
        };
        let req = client(config)
            .prepare("streams/a b/records", false, None, HttpMethod::Get)
            .unwrap();
        assert_eq!(req.url.path(), "/api/v1/streams/a%20b/records");

        let expected = sign_request(
            "s3cr3t",
            "streams/a%20b/records",
            &RequestParams::new().with("api_key", "key123"),
        )
        .unwrap();
        let sig = req.url.query_pairs().find(|(k, _)| k == "sig").map(|(_, v)| v.into_owned());
        assert_eq!(sig, Some(expected));
    }

    #[test]
    fn signing_needs_secret() {
        let config = ClientConfig {
            signed_header: true,
            ..ClientConfig::from_api_key("key123")
        };
        let err = client(config)
            .prepare("status", false, None, HttpMethod::Get)
            .unwrap_err();
        assert!(matches!(err, TradableBitsError::Auth(_)));
    }
}
