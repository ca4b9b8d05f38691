//! Sends a built request through the transport and reads the body back.

use crate::context::CallContext;
use crate::error::{CallError, TransportError};
use crate::http::{HttpRequest, RawResponse, Transport, TransportResponse};

/// Executes `request` and drains the response body.
///
/// Both the exchange and the body read are bounded by `ctx`; cancellation
/// or an expired deadline during either surfaces as `CallError::Transport`.
pub async fn dispatch<T: Transport>(
    transport: &T,
    ctx: &CallContext,
    request: HttpRequest,
) -> Result<RawResponse, CallError> {
    let method = request.method();
    tracing::debug!(%method, url = request.url(), "dispatching request");

    let response = ctx
        .run(transport.execute(request))
        .await
        .and_then(|r| r.map_err(|e| TransportError::Failed(Box::new(e))))
        .map_err(|source| CallError::Transport { method, source })?;

    let status = response.status();
    let body = ctx
        .run(response.into_body())
        .await
        .map_err(|source| CallError::Transport { method, source })?
        .map_err(|e| CallError::BodyRead(Box::new(e)))?;

    tracing::debug!(%method, status, bytes = body.len(), "response received");
    Ok(RawResponse { status, body })
}
