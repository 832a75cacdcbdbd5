/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use chrono::Utc;
use strum_macros::{EnumString, IntoStaticStr};

/// Request types accepted by the main API
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Source of the `timestamp` parameter added to outgoing requests.
///
/// The timestamp only defeats intermediary caches. A fixed clock makes request URLs (and
/// their signatures) reproducible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(i64),
}

impl Clock {
    /// Seconds since the Unix epoch
    pub fn timestamp(&self) -> i64 {
        match self {
            Clock::System => Utc::now().timestamp(),
            Clock::Fixed(ts) => *ts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn method_names() {
        let name: &'static str = HttpMethod::Delete.into();
        assert_eq!(name, "DELETE");
        assert_eq!(HttpMethod::from_str("POST").unwrap(), HttpMethod::Post);
        assert_eq!(reqwest::Method::from(HttpMethod::Get), reqwest::Method::GET);
    }

    #[test]
    fn fixed_clock() {
        assert_eq!(Clock::Fixed(1700000000).timestamp(), 1700000000);
        assert!(Clock::System.timestamp() > 1700000000);
    }
}
