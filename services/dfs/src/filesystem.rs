use crate::core::{percent_encode_query, DfsCore};
use crate::models::{Filesystem, FilesystemList, FilesystemProperties};
use crate::response;
use crate::constants::{X_MS_NAMESPACE_ENABLED, X_MS_PROPERTIES};
use adlg2_core::hash::base64_encode;
use adlg2_core::{Error, Result};
use bytes::Bytes;
use http::{header, Request, StatusCode};
use log::warn;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Options for [`FilesystemClient::list`].
#[derive(Debug, Clone)]
pub struct FilesystemListOptions {
    /// Recurse into the account's namespace.
    pub recursive: bool,
    /// Only return filesystems whose name starts with this prefix.
    pub prefix: Option<String>,
    /// Resume listing from a previously returned cursor.
    pub continuation: Option<String>,
    /// Page size; the service caps pages at 5000 entries.
    pub max_results: u32,
    /// Server-side timeout in seconds.
    pub timeout: Option<u32>,
}

impl Default for FilesystemListOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            prefix: None,
            continuation: None,
            max_results: 5000,
            timeout: None,
        }
    }
}

/// Facade for filesystem (container) management.
///
/// Built via [`Client::filesystem`](crate::Client::filesystem); all calls
/// run under the client's retry policy.
#[derive(Clone, Debug)]
pub struct FilesystemClient {
    pub(crate) core: Arc<DfsCore>,
}

impl FilesystemClient {
    /// Create a filesystem.
    ///
    /// Returns `true` when the filesystem was created, `false` when it
    /// already exists.
    pub async fn create(&self, filesystem: &str) -> Result<bool> {
        validate_filesystem_name(filesystem)?;

        self.core
            .with_retry(|| async move {
                let url = format!("{}/{}?resource=filesystem", self.core.endpoint, filesystem);
                let req = Request::put(&url)
                    .header(header::CONTENT_LENGTH, 0)
                    .body(Bytes::new())?;

                let resp = self.core.sign_and_send(req).await?;
                match resp.status() {
                    StatusCode::CREATED => Ok(true),
                    StatusCode::CONFLICT => Ok(false),
                    status => Err(self.core.classify_error(status, resp.body())),
                }
            })
            .await
    }

    /// Delete a filesystem.
    ///
    /// Returns `true` when the service accepted the deletion, `false` when
    /// the filesystem does not exist or is already being deleted.
    pub async fn delete(&self, filesystem: &str) -> Result<bool> {
        validate_filesystem_name(filesystem)?;

        self.core
            .with_retry(|| async move {
                let url = format!("{}/{}?resource=filesystem", self.core.endpoint, filesystem);
                let req = Request::delete(&url).body(Bytes::new())?;

                let resp = self.core.sign_and_send(req).await?;
                match resp.status() {
                    StatusCode::ACCEPTED => Ok(true),
                    StatusCode::NOT_FOUND | StatusCode::CONFLICT => Ok(false),
                    status => Err(self.core.classify_error(status, resp.body())),
                }
            })
            .await
    }

    /// List filesystems, following continuation cursors until the sequence
    /// ends.
    ///
    /// An empty result is returned when nothing matches. Use
    /// [`list_page`](FilesystemClient::list_page) to drive pagination
    /// manually.
    pub async fn list(&self, options: &FilesystemListOptions) -> Result<Vec<Filesystem>> {
        let mut filesystems = Vec::new();
        let mut continuation = options.continuation.clone();

        loop {
            let (page, next) = self.fetch_page(options, continuation.as_deref()).await?;
            filesystems.extend(page);
            match next {
                Some(cursor) => continuation = Some(cursor),
                None => return Ok(filesystems),
            }
        }
    }

    /// Fetch a single page of filesystems plus the cursor to resume from,
    /// if any. Starts from `options.continuation`.
    pub async fn list_page(
        &self,
        options: &FilesystemListOptions,
    ) -> Result<(Vec<Filesystem>, Option<String>)> {
        self.fetch_page(options, options.continuation.as_deref())
            .await
    }

    async fn fetch_page(
        &self,
        options: &FilesystemListOptions,
        continuation: Option<&str>,
    ) -> Result<(Vec<Filesystem>, Option<String>)> {
        self.core
            .with_retry(|| async move {
                let mut parameters = vec![
                    format!("recursive={}", options.recursive),
                    "resource=account".to_string(),
                    format!("maxresults={}", options.max_results),
                ];
                if let Some(prefix) = options.prefix.as_deref().filter(|v| !v.is_empty()) {
                    parameters.push(format!("prefix={}", percent_encode_query(prefix)));
                }
                if let Some(cursor) = continuation {
                    parameters.push(format!("continuation={}", percent_encode_query(cursor)));
                }
                if let Some(timeout) = options.timeout {
                    parameters.push(format!("timeout={timeout}"));
                }

                let url = format!("{}/?{}", self.core.endpoint, parameters.join("&"));
                let req = Request::get(&url).body(Bytes::new())?;

                let resp = self.core.sign_and_send(req).await?;
                match resp.status() {
                    StatusCode::NOT_FOUND => Ok((Vec::new(), None)),
                    status if status.is_success() => {
                        let list: FilesystemList =
                            serde_json::from_slice(resp.body()).map_err(|e| {
                                Error::unexpected("failed to parse filesystem list response")
                                    .with_source(e)
                            })?;
                        Ok((list.filesystems, response::continuation(resp.headers())))
                    }
                    status => Err(self.core.classify_error(status, resp.body())),
                }
            })
            .await
    }

    /// Fetch a filesystem's properties, or `None` when it does not exist.
    pub async fn get_properties(&self, filesystem: &str) -> Result<Option<FilesystemProperties>> {
        validate_filesystem_name(filesystem)?;

        self.core
            .with_retry(|| async move {
                let url = format!("{}/{}?resource=filesystem", self.core.endpoint, filesystem);
                let req = Request::head(&url).body(Bytes::new())?;

                let resp = self.core.sign_and_send(req).await?;
                match resp.status() {
                    StatusCode::NOT_FOUND => Ok(None),
                    status if status.is_success() => Ok(Some(FilesystemProperties {
                        namespace_enabled: response::header_string(
                            resp.headers(),
                            X_MS_NAMESPACE_ENABLED,
                        ),
                        properties: response::header_string(resp.headers(), X_MS_PROPERTIES),
                    })),
                    status => Err(self.core.classify_error(status, resp.body())),
                }
            })
            .await
    }

    /// Replace a filesystem's user-defined properties.
    ///
    /// Values are transmitted base64 encoded, joined as
    /// `key=base64(value),...`. Returns `true` on success. Unlike every
    /// other operation, ordinary failures surface as `false` here instead
    /// of raising; the failure detail goes to the log. Timeouts still raise
    /// so the retry policy engages.
    pub async fn set_properties(
        &self,
        filesystem: &str,
        properties: Option<&BTreeMap<String, String>>,
    ) -> Result<bool> {
        validate_filesystem_name(filesystem)?;

        self.core
            .with_retry(|| async move {
                let url = format!("{}/{}?resource=filesystem", self.core.endpoint, filesystem);
                let mut req = Request::patch(&url).header(header::CONTENT_LENGTH, 0);
                if let Some(properties) = properties.filter(|p| !p.is_empty()) {
                    req = req.header(X_MS_PROPERTIES, encode_properties(properties));
                }

                let resp = self.core.sign_and_send(req.body(Bytes::new())?).await?;
                let status = resp.status();
                if status.is_success() {
                    return Ok(true);
                }

                let err = self.core.classify_error(status, resp.body());
                if err.is_retryable() {
                    Err(err)
                } else {
                    warn!("set_properties on {filesystem} failed, reporting false: {err}");
                    Ok(false)
                }
            })
            .await
    }
}

fn encode_properties(properties: &BTreeMap<String, String>) -> String {
    properties
        .iter()
        .map(|(k, v)| format!("{}={}", k, base64_encode(v.as_bytes())))
        .collect::<Vec<_>>()
        .join(",")
}

/// The service only accepts container names of 3-63 lowercase alphanumeric
/// characters and single dashes, with an alphanumeric first and last
/// character. Checked before any network call.
fn validate_filesystem_name(name: &str) -> Result<()> {
    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if name.len() < 3
        || name.len() > 63
        || !valid_chars
        || name.starts_with('-')
        || name.ends_with('-')
        || name.contains("--")
    {
        return Err(Error::validation(
            "filesystem name invalid; the value must start and end with a letter or number \
             and must contain only lowercase letters, numbers, and the dash (-) character; \
             consecutive dashes are not permitted; the value must have between 3 and 63 characters",
        ));
    }

    Ok(())
}
