use crate::constants::*;
use crate::response;
use crate::retry::RetryPolicy;
use crate::Credential;
use adlg2_core::{Context, Error, Result, Signer};
use bytes::Bytes;
use http::{HeaderValue, StatusCode};
use log::debug;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::future::Future;

/// Shared plumbing behind both facades: endpoint, signer, retry policy.
pub(crate) struct DfsCore {
    pub account: String,
    pub endpoint: String,

    pub ctx: Context,
    pub signer: Signer<Credential>,
    pub retry: RetryPolicy,
    /// Whether this client authenticates with bearer tokens; a 401 is only
    /// retryable in that mode.
    pub bearer_auth: bool,
}

impl Debug for DfsCore {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DfsCore")
            .field("account", &self.account)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl DfsCore {
    /// Pin the API version, sign, and send.
    ///
    /// Signing happens after every header is in place; the signed header set
    /// and the sent header set must be identical.
    pub async fn sign_and_send(&self, mut req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        req.headers_mut()
            .insert(X_MS_VERSION, HeaderValue::from_static(DFS_API_VERSION));

        let (mut parts, body) = req.into_parts();
        self.signer.sign(&mut parts).await?;
        let req = http::Request::from_parts(parts, body);

        debug!("sending {} {}", req.method(), req.uri());
        self.ctx.http_send(req).await
    }

    pub fn classify_error(&self, status: StatusCode, body: &[u8]) -> Error {
        response::classify_error(status, body, self.bearer_auth)
    }

    /// Run a single-attempt body under the retry policy.
    pub async fn with_retry<T, F, Fut>(&self, attempt_fn: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.retry.execute(&self.signer, attempt_fn).await
    }
}

/// Percent encode a path segment sequence, keeping `/` separators.
pub(crate) fn percent_encode_path(path: &str) -> String {
    percent_encoding::percent_encode(path.as_bytes(), &AZURE_QUERY_ENCODE_SET).to_string()
}

/// Percent encode a query parameter value.
pub(crate) fn percent_encode_query(value: &str) -> String {
    percent_encoding::percent_encode(value.as_bytes(), &AZURE_QUERY_ENCODE_SET).to_string()
}
