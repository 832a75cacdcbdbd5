/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::TradableBitsError;
use crate::v1::{ApiClient, ClientConfig, Clock, Endpoints, HttpMethod, RequestParams};
use serde_json::Value;

/// Handle for making calls to the Tradable Bits API.
///
/// ```rust,no_run
/// use tradablebits::v1::{Client, StreamMediaQuery};
///
/// # async fn run() -> Result<(), tradablebits::v1::TradableBitsError> {
/// let client = Client::from_api_key("my-api-key")?;
/// let records = client
///     .get_stream_media(StreamMediaQuery::default().stream_key("abc").limit(10))
///     .await?;
/// println!("{records}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    api_client: ApiClient,
}

impl Client {
    /// Creates a client against the production service
    pub fn new(config: ClientConfig) -> Result<Self, TradableBitsError> {
        Self::with_endpoints(config, Endpoints::production()?)
    }

    /// Creates a client that can only access public data
    pub fn from_api_key(api_key: &str) -> Result<Self, TradableBitsError> {
        Self::new(ClientConfig::from_api_key(api_key))
    }

    /// Creates a client from either a JSON string (API key) or a JSON config record
    pub fn from_value(config: Value) -> Result<Self, TradableBitsError> {
        Self::new(ClientConfig::try_from(config)?)
    }

    /// Creates a client against non-production base URLs
    pub fn with_endpoints(
        config: ClientConfig,
        endpoints: Endpoints,
    ) -> Result<Self, TradableBitsError> {
        Ok(Self {
            api_client: ApiClient::new(config, endpoints)?,
        })
    }

    /// Replaces the source of the cache busting `timestamp` parameter
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.api_client.set_clock(clock);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        self.api_client.creds()
    }

    /// Lower level access to the API
    pub fn api_client(&self) -> &ApiClient {
        &self.api_client
    }

    pub fn access_token(&self) -> Option<&str> {
        self.config().access_token.as_deref()
    }

    pub fn set_access_token(&mut self, token: &str) {
        self.api_client.creds_mut().access_token = Some(token.into());
    }

    /// Sets the access token from either a bare JSON string or the OAuth token response
    /// object (its `access_token` field).
    pub fn set_access_token_from_response(
        &mut self,
        data: &Value,
    ) -> Result<(), TradableBitsError> {
        let token = match data {
            Value::String(token) => token.as_str(),
            other => other
                .get("access_token")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    TradableBitsError::Auth("Response does not contain an 'access_token'".into())
                })?,
        };
        self.set_access_token(token);
        Ok(())
    }

    /// Enables or disables the `sig` parameter on main API calls
    pub fn set_signed_header(&mut self, signed_header: bool) {
        self.api_client.creds_mut().signed_header = signed_header;
    }

    /// Sets the stream used when a call doesn't name one
    pub fn set_stream_key(&mut self, stream_key: &str) {
        self.api_client.creds_mut().stream_key = Some(stream_key.into());
    }

    /// Returns the service/account status
    pub async fn get_status(&self) -> Result<Value, TradableBitsError> {
        self.api_client
            .call("status", false, None, HttpMethod::Get)
            .await
    }

    /// Calls an arbitrary API path, for endpoints without a dedicated method.
    ///
    /// `auth` makes the call with the access token instead of the API key and fails
    /// before sending anything when no token is set.
    pub async fn call(
        &self,
        function: &str,
        auth: bool,
        params: Option<RequestParams>,
        method: HttpMethod,
    ) -> Result<Value, TradableBitsError> {
        self.api_client.call(function, auth, params, method).await
    }
}
