/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # Tradable Bits
//!
//! This library was created for working with the Tradable Bits API v1 interface.
//!
//! For further details on the Rest API refer to the [Tradable Bits API Docs](http://tradablebits.com/developers)
//!
//! ## Features
//!
//! - Stream records (Read only)
//! - Account status
//! - OAuth2 authorization code exchange
//! - Optional HMAC-SHA256 request signing (`sig` parameter)
//! - Lower level interface for calling any API path
//!
//! *Only the API key is needed for public data. Authenticated calls need an access token,
//! which is obtained by exchanging the code sent to your callback URL. Persisting that token
//! is left up to the consumer of this library*
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! tradablebits = "0.1.0"
//! ```
//!
//! ## Usage
//!
//! **You will need to acquire an API key/secret from Tradable Bits prior to using the API**
//!
//! ```rust,no_run
//! use tradablebits::v1::{Client, ClientConfig, StreamMediaQuery};
//!
//! async fn latest_records(code: &str) -> anyhow::Result<()> {
//!     let mut client = Client::new(ClientConfig {
//!         api_key: "api-key".into(),
//!         api_secret: Some("api-secret".into()),
//!         callback_url: Some("https://example.com/callback".into()),
//!         account_id: Some("1234".into()),
//!         stream_key: Some("my-stream".into()),
//!         ..Default::default()
//!     })?;
//!
//!     // Exchange the code that was sent to the callback url
//!     let token = client.get_oauth_access_token(code).await?;
//!     client.set_access_token(&token);
//!
//!     // Public data only needs the api key
//!     let records = client
//!         .get_stream_media(StreamMediaQuery::default().limit(20))
//!         .await?;
//!     println!("{records:#}");
//!     Ok(())
//! }
//! ```
//!
pub mod v1;
