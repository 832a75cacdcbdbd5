/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use tradablebits::v1::{Client, ClientConfig, Clock, Endpoints};
use wiremock::MockServer;

#[allow(dead_code)]
pub(crate) const FIXED_TIMESTAMP: i64 = 1700000000;

#[allow(dead_code)]
pub(crate) fn full_config() -> ClientConfig {
    ClientConfig {
        api_key: "key123".into(),
        api_secret: Some("s3cr3t".into()),
        callback_url: Some("https://example.com/callback".into()),
        account_id: Some("42".into()),
        stream_key: Some("abc".into()),
        ..Default::default()
    }
}

// Client pointed at the mock server with a deterministic timestamp
#[allow(dead_code)]
pub(crate) fn mock_client(server: &MockServer, config: ClientConfig) -> anyhow::Result<Client> {
    let endpoints = Endpoints::with_origin(&server.uri())?;
    Ok(Client::with_endpoints(config, endpoints)?.with_clock(Clock::Fixed(FIXED_TIMESTAMP)))
}

#[allow(dead_code)]
pub(crate) fn get_read_only_config() -> anyhow::Result<ClientConfig> {
    let api_key = std::env::var("TRADABLEBITS_API_KEY")?;
    let stream_key = std::env::var("TRADABLEBITS_STREAM_KEY")?;

    Ok(ClientConfig {
        stream_key: Some(stream_key),
        ..ClientConfig::from_api_key(&api_key)
    })
}

#[allow(dead_code)]
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
