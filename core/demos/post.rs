//! Creates a post on the public JSON placeholder API, first expecting the
//! echoed title and then expecting one the server will never return.
//!
//! Run with `cargo run -p httpcaller --example post`.

use std::time::Duration;

use httpcaller::{CallContext, CallOptions, CallerOptions, PostCaller, UreqTransport};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

const BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Post {
    title: String,
    body: String,
    user_id: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
struct PostResponse {
    id: u64,
    title: String,
    body: String,
    user_id: u64,
}

fn caller(expected_title: &str) -> PostCaller<UreqTransport, Post, PostResponse> {
    let options = CallerOptions::default()
        .default_header("Authorization", "Bearer default_token_here")
        .default_header("Custom-Header", "default_value")
        .expect("title", expected_title);
    PostCaller::with_options(
        UreqTransport::with_timeout(Duration::from_secs(10)),
        BASE_URL,
        "posts",
        options,
    )
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let ctx = CallContext::background();
    let payload = Post {
        title: "foo".to_string(),
        body: "bar".to_string(),
        user_id: 1,
    };
    let options = CallOptions::new().header("Another-Header", "header_value");

    println!("Running success with base response...");
    match caller("foo").post(&ctx, &payload, options.clone()).await {
        Ok(res) => println!("Success with base response: {res:?}"),
        Err(err) => println!("Error: {err}"),
    }

    println!("\nRunning failed with base response not match...");
    match caller("not match").post(&ctx, &payload, options).await {
        Ok(res) => println!("Unexpected success: {res:?}"),
        Err(err) => println!("Error (base response not match): {err}"),
    }
}
