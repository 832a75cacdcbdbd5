/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::TradableBitsError;
use serde::Deserialize;
use serde_json::Value;

/// Configuration for a [`crate::v1::Client`].
///
/// Only the API key is needed for public data (stream media, status). The secret,
/// callback and account id are needed for the OAuth exchange, and an access token for
/// authenticated calls.
///
/// Can be deserialized from a record such as
/// `{"apiKey": "...", "apiSecret": "...", "apiCallback": "...", "accountId": "...", "streamKey": "..."}`.
#[derive(Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub api_secret: Option<String>,

    #[serde(default, rename = "apiCallback")]
    pub callback_url: Option<String>,

    #[serde(default)]
    pub account_id: Option<String>,

    #[serde(default)]
    pub stream_key: Option<String>,

    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default)]
    pub signed_header: bool,
}

impl ClientConfig {
    /// Config for accessing public data only
    pub fn from_api_key(api_key: &str) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Loads the config from `TRADABLEBITS_*` environment variables.
    ///
    /// `TRADABLEBITS_API_KEY` is required. The optional ones are `TRADABLEBITS_API_SECRET`,
    /// `TRADABLEBITS_API_CALLBACK`, `TRADABLEBITS_ACCOUNT_ID`, `TRADABLEBITS_STREAM_KEY`,
    /// `TRADABLEBITS_ACCESS_TOKEN` and `TRADABLEBITS_SIGNED_HEADER`.
    pub fn from_env() -> Result<Self, TradableBitsError> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        let api_key = var("TRADABLEBITS_API_KEY").ok_or_else(|| {
            TradableBitsError::Configuration("TRADABLEBITS_API_KEY is not set".into())
        })?;
        let signed_header = var("TRADABLEBITS_SIGNED_HEADER")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            api_key,
            api_secret: var("TRADABLEBITS_API_SECRET"),
            callback_url: var("TRADABLEBITS_API_CALLBACK"),
            account_id: var("TRADABLEBITS_ACCOUNT_ID"),
            stream_key: var("TRADABLEBITS_STREAM_KEY"),
            access_token: var("TRADABLEBITS_ACCESS_TOKEN"),
            signed_header,
        }
        .validated()
    }

    /// Checks the config can be used to build a client
    pub fn validated(self) -> Result<Self, TradableBitsError> {
        if self.api_key.trim().is_empty() {
            return Err(TradableBitsError::Configuration(
                "Configuration data is missing the 'apiKey'".into(),
            ));
        }
        Ok(self)
    }

    /// True when this config was built from a bare API key
    pub fn is_public_only(&self) -> bool {
        self.api_secret.is_none() && self.account_id.is_none() && self.callback_url.is_none()
    }
}

impl TryFrom<Value> for ClientConfig {
    type Error = TradableBitsError;

    /// A JSON string is taken as a bare API key, an object as a full config record.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(api_key) => Self::from_api_key(&api_key).validated(),
            Value::Object(_) => serde_json::from_value::<ClientConfig>(value)
                .map_err(|e| TradableBitsError::Configuration(e.to_string()))?
                .validated(),
            other => Err(TradableBitsError::Configuration(format!(
                "Configuration data is missing. Expected an API key or a config record, got: {}",
                other
            ))),
        }
    }
}

impl From<&str> for ClientConfig {
    fn from(api_key: &str) -> Self {
        Self::from_api_key(api_key)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |v: &Option<String>| v.as_ref().map(|_| "xxx");
        f.debug_struct("ClientConfig")
            .field("api_key", &"xxx")
            .field("api_secret", &mask(&self.api_secret))
            .field("callback_url", &self.callback_url)
            .field("account_id", &self.account_id)
            .field("stream_key", &self.stream_key)
            .field("access_token", &mask(&self.access_token))
            .field("signed_header", &self.signed_header)
            .finish()
    }
}
