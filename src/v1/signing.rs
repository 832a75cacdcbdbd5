/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::RequestParams;
use crate::v1::errors::TradableBitsError;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Builds the string that gets signed: `/<endpoint>` followed by `|name=value` for every
/// parameter in ascending name order.
pub fn signature_base_string(endpoint: &str, params: &RequestParams) -> String {
    let mut sorted: Vec<_> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let mut base = format!("/{}", endpoint.trim_start_matches('/'));
    for (name, value) in sorted {
        base.push('|');
        base.push_str(name);
        base.push('=');
        base.push_str(&value.to_string());
    }
    base
}

/// Hex encoded HMAC-SHA256 of the request, keyed by the API secret.
///
/// `params` must already contain the credential (`api_key` or `access_token`) and the
/// injected `timestamp`.
pub fn sign_request(
    secret: &str,
    endpoint: &str,
    params: &RequestParams,
) -> Result<String, TradableBitsError> {
    let base = signature_base_string(endpoint, params);
    log::trace!("Signing base string: {}", base);
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())?;
    mac.update(base.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> RequestParams {
        RequestParams::new()
            .with("limit", 10u32)
            .with("timestamp", 1700000000i64)
    }

    #[test]
    fn base_string_is_sorted() {
        let params = RequestParams::new()
            .with("timestamp", 1700000000i64)
            .with("limit", 10u32)
            .with("api_key", "key123");
        assert_eq!(
            signature_base_string("streams/abc/records", &params),
            "/streams/abc/records|api_key=key123|limit=10|timestamp=1700000000"
        );
    }

    #[test]
    fn signs_fixture() {
        assert_eq!(
            sign_request("s3cr3t", "streams/abc/records", &fixture()).unwrap(),
            "1b63c22d536d4c5b4eb35431ff05215c45ddf82fc4993fb29cf9438c54f60973"
        );
    }

    #[test]
    fn signs_with_credential() {
        let params = fixture().with("api_key", "key123");
        assert_eq!(
            sign_request("s3cr3t", "streams/abc/records", &params).unwrap(),
            "c256b6d43c03b3ee591cea3bbde536d8248dd9e5337f01eb973e2dcf895ba063"
        );
    }

    #[test]
    fn credential_only() {
        let params = RequestParams::new().with("access_token", "tok123");
        assert_eq!(
            sign_request("s3cr3t", "status", &params).unwrap(),
            "f469e2525e2b73c346d8de2097d2ad6d9019970c42b331c3a200d739476ba14d"
        );
    }
}
