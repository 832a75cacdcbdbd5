/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::TradableBitsError;
use crate::v1::{Client, RequestParams};
use serde_json::Value;

impl Client {
    /// Exchanges the OAuth2 code handed to the callback URL for the token response.
    ///
    /// Needs the API secret and account id in the config.
    pub async fn get_oauth_token(&self, code: &str) -> Result<Value, TradableBitsError> {
        let form = self.oauth_form(code)?;
        self.api_client().oauth_call(&form).await
    }

    /// Same as [`Client::get_oauth_token`] but returns only the access token
    pub async fn get_oauth_access_token(&self, code: &str) -> Result<String, TradableBitsError> {
        self.get_oauth_token(code)
            .await?
            .get("access_token")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| {
                TradableBitsError::Auth("OAuth response does not contain an 'access_token'".into())
            })
    }

    fn oauth_form(&self, code: &str) -> Result<RequestParams, TradableBitsError> {
        let config = self.config();
        let missing = |what: &str| {
            TradableBitsError::Auth(format!("get_oauth_token() requires the {what} to be configured"))
        };
        let api_secret = config.api_secret.as_deref().ok_or_else(|| missing("API secret"))?;
        let account_id = config.account_id.as_deref().ok_or_else(|| missing("account id"))?;

        let mut form = RequestParams::new()
            .with("code", code)
            .with("api_key", api_secret)
            .with("account_id", account_id);
        if let Some(callback) = config.callback_url.as_deref() {
            form.insert("redirect_url", callback);
        }
        form.insert("grant_type", "authorization_code");
        Ok(form)
    }
}
