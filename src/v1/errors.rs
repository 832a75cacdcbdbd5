/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum TradableBitsError {
    #[error("Configuration error. {0}")]
    Configuration(String),

    #[error("Usage error. {0}")]
    Usage(String),

    #[error("Authorization error. {0}")]
    Auth(String),

    #[error("Request network error")]
    Request(#[from] reqwest::Error),

    #[error("Response body was empty")]
    EmptyResponse(),

    #[error("Deserialization error")]
    Deserialization(#[from] serde_json::Error),

    #[error("Request signing error")]
    Signing(#[from] hmac::digest::InvalidLength),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),
}

impl TradableBitsError {
    /// True when the failure happened in the transport, either the request itself failed or
    /// the service answered with no body at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_) | Self::EmptyResponse())
    }
}
