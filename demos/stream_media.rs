/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

extern crate tradablebits;

use anyhow::Result;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use tradablebits::v1::{Client, ClientConfig, StreamMediaQuery};

// Access token stored in cache json file
#[derive(Serialize, Deserialize, Debug)]
struct TradableBitsOauthToken {
    access_token: String,
}

fn load_cached_token(path: &PathBuf) -> Result<TradableBitsOauthToken> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

fn store_cached_token(path: &PathBuf, access_token: &str) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer(
        writer,
        &TradableBitsOauthToken {
            access_token: access_token.into(),
        },
    )?;
    Ok(())
}

// main
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    // The API key is the only required field for reading public streams.
    // The secret, callback and account id are needed to exchange an OAuth code.
    let mut client = Client::new(ClientConfig::from_env()?)?;

    // The access token is not kept by the library, so cache it between runs.
    if let Ok(cache) = std::env::var("TRADABLEBITS_AUTH_CACHE").map(PathBuf::from) {
        if let Some(code) = std::env::args().nth(1) {
            let token = client.get_oauth_access_token(&code).await?;
            store_cached_token(&cache, &token)?;
            client.set_access_token(&token);
        } else if let Ok(cached) = load_cached_token(&cache) {
            client.set_access_token(&cached.access_token);
        }
    }

    let status = client.get_status().await?;
    println!("Status: {status:#}");

    let records = client
        .get_stream_media(StreamMediaQuery::default().limit(10))
        .await?;
    println!("Records: {records:#}");
    Ok(())
}
