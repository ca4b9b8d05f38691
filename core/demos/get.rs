//! Fetches a post from the public JSON placeholder API twice: once with a
//! base success response that matches and once with one that does not.
//!
//! Run with `cargo run -p httpcaller --example get`.

use std::time::Duration;

use httpcaller::{CallContext, CallOptions, CallerOptions, GetCaller, UreqTransport};
use serde::Deserialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

const BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
struct GetResponse {
    id: u64,
    title: String,
    body: String,
    user_id: u64,
}

fn caller(expected: (&str, serde_json::Value)) -> GetCaller<UreqTransport, GetResponse> {
    let options = CallerOptions::default()
        .default_header("Authorization", "Bearer default_token_here")
        .default_header("Custom-Header", "default_value")
        .expect(expected.0, expected.1);
    GetCaller::with_options(
        UreqTransport::with_timeout(Duration::from_secs(10)),
        BASE_URL,
        "posts/:id",
        options,
    )
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let ctx = CallContext::background();
    let options = CallOptions::new().path_param("id", "1");

    println!("Running success with base response...");
    match caller(("userId", json!(1))).get(&ctx, options.clone()).await {
        Ok(res) => println!("Success with base response: {res:?}"),
        Err(err) => println!("Error: {err}"),
    }

    println!("\nRunning failed with base response not match...");
    match caller(("title", json!("not match"))).get(&ctx, options).await {
        Ok(res) => println!("Unexpected success: {res:?}"),
        Err(err) => println!("Error (base response not match): {err}"),
    }
}
