/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::TradableBitsError;
use crate::v1::{Client, HttpMethod, MEDIA_LIMIT_DEFAULT, RequestParams};
use serde_json::Value;

/// Options for fetching a stream's records.
///
/// Only one of `max_time_key` or `min_time_key` may be set. A time key of 0 means no bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamMediaQuery {
    pub max_time_key: Option<u64>,
    pub min_time_key: Option<u64>,
    /// Number of records to return, 0 leaves it up to the service
    pub limit: u32,
    /// Overrides the stream key from the client config
    pub stream_key: Option<String>,
}

impl Default for StreamMediaQuery {
    fn default() -> Self {
        Self {
            max_time_key: None,
            min_time_key: None,
            limit: MEDIA_LIMIT_DEFAULT,
            stream_key: None,
        }
    }
}

impl StreamMediaQuery {
    pub fn max_time_key(mut self, key: u64) -> Self {
        self.max_time_key = Some(key);
        self
    }

    pub fn min_time_key(mut self, key: u64) -> Self {
        self.min_time_key = Some(key);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn stream_key(mut self, stream_key: &str) -> Self {
        self.stream_key = Some(stream_key.into());
        self
    }

    // Resolves the request path and parameters, failing on conflicting bounds
    fn to_request(
        &self,
        default_stream_key: Option<&str>,
    ) -> Result<(String, RequestParams), TradableBitsError> {
        let mut params = RequestParams::new();
        if self.limit > 0 {
            params.insert("limit", self.limit);
        }

        let max_time_key = self.max_time_key.filter(|k| *k != 0);
        let min_time_key = self.min_time_key.filter(|k| *k != 0);
        match (max_time_key, min_time_key) {
            (Some(_), Some(_)) => {
                return Err(TradableBitsError::Usage(
                    "get_stream_media() requires only one of 'max_time_key', 'min_time_key' be specified".into(),
                ));
            }
            (Some(key), None) => params.insert("max_time_key", key),
            (None, Some(key)) => params.insert("min_time_key", key),
            (None, None) => {}
        }

        let stream_key = self
            .stream_key
            .as_deref()
            .or(default_stream_key)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                TradableBitsError::Usage(
                    "get_stream_media() requires a stream key, none given or configured".into(),
                )
            })?;

        // The key must stay a single path segment
        if matches!(stream_key, "." | "..")
            || stream_key.contains(['/', '\\', '?', '#', '%'])
        {
            return Err(TradableBitsError::Usage(format!(
                "get_stream_media() stream key '{stream_key}' is not a valid path segment"
            )));
        }

        Ok((format!("streams/{}/records", stream_key), params))
    }
}

impl Client {
    /// Returns a page of a stream's records.
    ///
    /// See [Tradable Bits API Docs](http://tradablebits.com/developers#api-stream) for the
    /// shape of the records.
    pub async fn get_stream_media(
        &self,
        query: StreamMediaQuery,
    ) -> Result<Value, TradableBitsError> {
        let (function, params) = query.to_request(self.config().stream_key.as_deref())?;
        self.api_client()
            .call(&function, false, Some(params), HttpMethod::Get)
            .await
    }
}
