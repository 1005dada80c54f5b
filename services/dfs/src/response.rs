//! Response classification shared by both facades.

use crate::constants::{OPERATION_TIMED_OUT_MARKER, X_MS_CONTINUATION};
use adlg2_core::Error;
use http::{HeaderMap, StatusCode};

/// Classify a non-success response into the library's error taxonomy.
///
/// The service reports an exhausted internal time budget as a 500 whose body
/// carries a marker text; a 401 only signals an invalidated token when the
/// client actually authenticates with a bearer token. Everything else is an
/// unexpected service error carrying the raw body for diagnostics.
pub(crate) fn classify_error(status: StatusCode, body: &[u8], bearer_auth: bool) -> Error {
    let body = String::from_utf8_lossy(body);

    if status == StatusCode::INTERNAL_SERVER_ERROR && body.contains(OPERATION_TIMED_OUT_MARKER) {
        return Error::operation_timed_out("service could not complete within its time budget");
    }
    if status == StatusCode::UNAUTHORIZED && bearer_auth {
        return Error::auth_token_invalid("service rejected the bearer token");
    }

    Error::unexpected_service(status, body)
}

/// Extract the pagination cursor, treating an empty header as absent.
pub(crate) fn continuation(headers: &HeaderMap) -> Option<String> {
    header_string(headers, X_MS_CONTINUATION).filter(|v| !v.is_empty())
}

/// Read a header as an owned string, if present and valid utf-8.
pub(crate) fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}
