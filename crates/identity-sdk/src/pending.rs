//! The asynchronous-operation handle shared by every SDK call.
//!
//! A [`PendingRequest`] is either already failed (bad local input) or holds
//! a prepared request, the transport that will run it and a decoder for the
//! success payload.  It is consumed by [`start`](PendingRequest::start) or
//! [`send`](PendingRequest::send), so it resolves exactly once.

use std::fmt;
use std::sync::Arc;

use identity_models::{AuthError, FailureCause};
use serde_json::Value;
use tokio::runtime::Handle;

use crate::normalize::normalize_error;
use crate::transport::{HttpRequest, HttpResponse, Transport};

/// Decoder for a success payload; `None` means the payload had the wrong
/// shape.
pub type Decode<T> = fn(&Value) -> Option<T>;

/// A request that has been built but not started.
#[must_use = "a pending request does nothing until started"]
pub struct PendingRequest<T> {
    state: State<T>,
}

enum State<T> {
    Failed(AuthError),
    Live {
        transport: Arc<dyn Transport>,
        request: HttpRequest,
        decode: Decode<T>,
    },
}

impl<T> PendingRequest<T> {
    /// A request that resolves to `error` without touching the network.
    pub fn failed(error: AuthError) -> Self {
        Self {
            state: State::Failed(error),
        }
    }

    /// A request that will run `request` on `transport`.
    pub fn live(transport: Arc<dyn Transport>, request: HttpRequest, decode: Decode<T>) -> Self {
        Self {
            state: State::Live {
                transport,
                request,
                decode,
            },
        }
    }

    /// The request that will be sent, or `None` if this request already
    /// failed locally.
    pub fn request(&self) -> Option<&HttpRequest> {
        match &self.state {
            State::Live { request, .. } => Some(request),
            State::Failed(_) => None,
        }
    }

    /// The local failure, if the request could not be built.
    pub fn error(&self) -> Option<&AuthError> {
        match &self.state {
            State::Failed(error) => Some(error),
            State::Live { .. } => None,
        }
    }

    /// Run the request and return its outcome.
    pub async fn send(self) -> Result<T, AuthError> {
        let (transport, request, decode) = match self.state {
            State::Failed(error) => {
                tracing::warn!(error = %error, "request failed before dispatch");
                return Err(error);
            }
            State::Live {
                transport,
                request,
                decode,
            } => (transport, request, decode),
        };

        let method = request.method.clone();
        let path = request.url.path().to_string();
        tracing::debug!(%method, %path, "dispatching request");

        let outcome = match transport.execute(request).await {
            Ok(response) => complete(response, decode),
            Err(e) => Err(normalize_error(None, FailureCause::Transport(e.0))),
        };

        match &outcome {
            Ok(_) => tracing::debug!(%method, %path, "request succeeded"),
            Err(error) => tracing::warn!(%method, %path, error = %error, "request failed"),
        }
        outcome
    }
}

impl<T: Send + 'static> PendingRequest<T> {
    /// Start the request; `callback` fires once with the outcome.
    ///
    /// The call runs on a task spawned onto the current Tokio runtime.
    /// Outside a runtime nothing is sent and the callback fires immediately
    /// with [`FailureCause::NoRuntime`], or with the local failure if the
    /// request never got built.
    pub fn start<F>(self, callback: F)
    where
        F: FnOnce(Result<T, AuthError>) + Send + 'static,
    {
        let Ok(handle) = Handle::try_current() else {
            let error = match self.state {
                State::Failed(error) => error,
                State::Live { .. } => AuthError::from(FailureCause::NoRuntime),
            };
            tracing::warn!(error = %error, "request started outside a runtime");
            callback(Err(error));
            return;
        };

        handle.spawn(async move {
            callback(self.send().await);
        });
    }
}

impl<T> fmt::Debug for PendingRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Failed(error) => f.debug_tuple("PendingRequest::Failed").field(error).finish(),
            State::Live { request, .. } => f
                .debug_struct("PendingRequest::Live")
                .field("method", &request.method)
                .field("url", &request.url.as_str())
                .finish_non_exhaustive(),
        }
    }
}

/// Turn a received response into the typed outcome.
fn complete<T>(response: HttpResponse, decode: Decode<T>) -> Result<T, AuthError> {
    if !response.is_success() {
        return Err(normalize_error(
            Some(&response.body),
            FailureCause::Status {
                status: response.status,
            },
        ));
    }

    let payload: Value = match serde_json::from_slice(&response.body) {
        Ok(payload) => payload,
        Err(e) => {
            return Err(normalize_error(
                Some(&response.body),
                FailureCause::MalformedBody(e.to_string()),
            ))
        }
    };

    match decode(&payload) {
        Some(value) => Ok(value),
        None => Err(AuthError::InvalidResponse {
            raw_payload: payload,
        }),
    }
}
