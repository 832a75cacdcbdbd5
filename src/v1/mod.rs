/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

pub mod api;
pub mod client;
pub mod config;
pub mod errors;
mod oauth;
pub mod params;
pub mod properties;
pub mod signing;
pub mod stream;

pub use api::*;
pub use client::*;
pub use config::*;
pub use errors::*;
pub use params::*;
pub use properties::*;
pub use stream::*;
