//! End-to-end calls against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port in its own runtime thread, then
//! drives both callers over real HTTP through `UreqTransport`. Checks what
//! actually reaches the wire (merged headers, forced content type, resolved
//! path) and how transport-level failures surface.

use std::net::SocketAddr;
use std::time::Duration;

use httpcaller::{
    CallContext, CallError, CallOptions, CallerOptions, ErrorKind, GetCaller, PostCaller, TransportError,
    UreqTransport,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Post {
    id: u64,
    title: String,
    body: String,
    user_id: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewPost<'a> {
    title: &'a str,
    body: &'a str,
    user_id: u64,
}

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn options() -> CallerOptions {
    CallerOptions::default()
        .default_header("Authorization", "Bearer default_token_here")
        .default_header("Custom-Header", "default_value")
}

#[tokio::test(flavor = "multi_thread")]
async fn get_post_with_matching_base_success_response() {
    let base = format!("http://{}", start_server());
    let caller: GetCaller<_, Post> =
        GetCaller::with_options(UreqTransport::new(), base, "posts/:id", options().expect("userId", 1));

    let post = caller
        .get(&CallContext::background(), CallOptions::new().path_param("id", "1"))
        .await
        .unwrap();
    assert_eq!(
        post,
        Post {
            id: 1,
            title: "foo".to_string(),
            body: "bar".to_string(),
            user_id: 1,
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn get_post_with_mismatched_title() {
    let base = format!("http://{}", start_server());
    let caller: GetCaller<_, Post> =
        GetCaller::with_options(UreqTransport::new(), base, "posts/1", options().expect("title", "not match"));

    let err = caller
        .get(&CallContext::background(), CallOptions::default())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "unsuccessful response for key title: expected not match, got foo"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn merged_headers_reach_the_server() {
    let base = format!("http://{}", start_server());
    let caller: GetCaller<_, Value> = GetCaller::with_options(UreqTransport::new(), base, "headers", options());

    let call = CallOptions::new()
        .header("Custom-Header", "per_call")
        .header("Another-Header", "header_value");
    let echoed = caller.get(&CallContext::background(), call).await.unwrap();

    let headers = &echoed["headers"];
    assert_eq!(headers["authorization"], "Bearer default_token_here");
    assert_eq!(headers["custom-header"], "per_call");
    assert_eq!(headers["another-header"], "header_value");
}

#[tokio::test(flavor = "multi_thread")]
async fn post_forces_json_content_type_on_the_wire() {
    let base = format!("http://{}", start_server());
    let caller: PostCaller<_, NewPost<'_>, Value> = PostCaller::with_options(
        UreqTransport::new(),
        base,
        "echo",
        options().default_header("Content-Type", "text/plain"),
    );

    let payload = NewPost {
        title: "foo",
        body: "bar",
        user_id: 1,
    };
    let echoed = caller
        .post(&CallContext::background(), &payload, CallOptions::default())
        .await
        .unwrap();

    assert_eq!(echoed["headers"]["content-type"], "application/json");
    assert_eq!(echoed["body"]["userId"], 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn post_creates_post() {
    let base = format!("http://{}", start_server());
    let caller: PostCaller<_, NewPost<'_>, Post> =
        PostCaller::with_options(UreqTransport::new(), base, "posts", options().expect("title", "foo"));

    let payload = NewPost {
        title: "foo",
        body: "bar",
        user_id: 1,
    };
    let created = caller
        .post(
            &CallContext::background(),
            &payload,
            CallOptions::new().header("Another-Header", "header_value"),
        )
        .await
        .unwrap();
    assert_eq!(created.id, 2);
    assert_eq!(created.title, "foo");
}

#[tokio::test(flavor = "multi_thread")]
async fn not_found_status_still_decodes_body() {
    let base = format!("http://{}", start_server());
    let caller: GetCaller<_, Value> = GetCaller::new(UreqTransport::new(), base, "posts/999");

    let err = caller
        .get(&CallContext::background(), CallOptions::default())
        .await
        .unwrap_err();
    // 404 with an empty body: the status is ignored and decoding fails.
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_body_is_decode_error() {
    let base = format!("http://{}", start_server());
    let caller: GetCaller<_, Value> =
        GetCaller::with_options(UreqTransport::new(), base, "malformed", options().expect("status", "ok"));

    let err = caller
        .get(&CallContext::background(), CallOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_server_hits_deadline() {
    let base = format!("http://{}", start_server());
    let caller: GetCaller<_, Value> = GetCaller::new(UreqTransport::new(), base, "slow/:ms");

    let ctx = CallContext::background().with_timeout(Duration::from_millis(50));
    let err = caller
        .get(&ctx, CallOptions::new().path_param("ms", "1000"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CallError::Transport {
            source: TransportError::DeadlineExceeded,
            ..
        }
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn connection_refused_is_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let caller: GetCaller<_, Value> = GetCaller::new(UreqTransport::new(), format!("http://{addr}"), "posts/1");

    let err = caller
        .get(&CallContext::background(), CallOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CallError::Transport {
            source: TransportError::Failed(_),
            ..
        }
    ));
}
