use crate::core::{percent_encode_path, percent_encode_query, DfsCore};
use crate::models::{LeaseOutcome, PathEntry, PathList, PathProperties};
use crate::response;
use crate::constants::*;
use adlg2_core::{Error, Result};
use bytes::{Buf, Bytes};
use http::{header, Request, StatusCode};
use std::sync::Arc;

/// Path resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    /// A regular file.
    File,
    /// A directory marker entry.
    Directory,
}

impl ResourceType {
    /// The `resource=` query value for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::File => "file",
            ResourceType::Directory => "directory",
        }
    }
}

/// Lease actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseAction {
    /// Take a new lease.
    Acquire,
    /// Extend a held lease.
    Renew,
    /// Swap a held lease's id for a proposed one.
    Change,
    /// Give a held lease up.
    Release,
    /// Force an existing lease to end.
    Break,
}

impl LeaseAction {
    /// The `x-ms-lease-action` header value for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaseAction::Acquire => "acquire",
            LeaseAction::Renew => "renew",
            LeaseAction::Change => "change",
            LeaseAction::Release => "release",
            LeaseAction::Break => "break",
        }
    }
}

/// Update actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    /// Stage bytes at a position in the file.
    Append,
    /// Commit previously appended bytes up to a position.
    Flush,
    /// Replace user-defined properties.
    SetProperties,
    /// Replace the access control list.
    SetAccessControl,
}

impl UpdateAction {
    /// The `action=` query value for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateAction::Append => "append",
            UpdateAction::Flush => "flush",
            UpdateAction::SetProperties => "setProperties",
            UpdateAction::SetAccessControl => "setAccessControl",
        }
    }
}

/// Options for [`PathClient::list`].
#[derive(Debug, Clone)]
pub struct PathListOptions {
    /// Recurse below `directory`.
    pub recursive: bool,
    /// Only list entries below this directory.
    pub directory: Option<String>,
    /// Resume listing from a previously returned cursor.
    pub continuation: Option<String>,
    /// Page size; the service caps pages at 5000 entries.
    pub max_results: u32,
    /// Server-side timeout in seconds.
    pub timeout: Option<u32>,
}

impl Default for PathListOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            directory: None,
            continuation: None,
            max_results: 5000,
            timeout: None,
        }
    }
}

/// Options for [`PathClient::lease`].
#[derive(Debug, Clone, Default)]
pub struct LeaseOptions {
    /// Lease id the caller wants the service to assign on acquire/change.
    pub proposed_lease_id: Option<String>,
    /// Id of the lease being renewed, changed or released.
    pub lease_id: Option<String>,
    /// Lease duration in seconds: `-1` (infinite) or `15..=60`.
    pub lease_duration: Option<i32>,
    /// Seconds a broken lease keeps blocking new acquisitions.
    pub lease_break_period: Option<i32>,
}

/// Options for [`PathClient::update`].
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Bytes to append; absent for flush.
    pub content: Option<Bytes>,
    /// Write offset for append, commit length for flush. Append defaults
    /// to 0 when absent; flush requires it.
    pub position: Option<i64>,
    /// On flush, `true` finalizes the file; the service accepts no further
    /// appends afterwards.
    pub close: Option<bool>,
}

/// Facade for file and directory management within a filesystem.
///
/// Built via [`Client::path`](crate::Client::path); all calls run under the
/// client's retry policy.
#[derive(Clone, Debug)]
pub struct PathClient {
    pub(crate) core: Arc<DfsCore>,
}

impl PathClient {
    /// Create a file or directory.
    ///
    /// With `overwrite` false the request carries `If-None-Match: *`, so an
    /// existing path is left untouched. Returns `true` when the path was
    /// created, `false` on conflict.
    pub async fn create(
        &self,
        filesystem: &str,
        path: &str,
        resource: ResourceType,
        overwrite: bool,
    ) -> Result<bool> {
        self.core
            .with_retry(|| async move {
                let url = format!(
                    "{}/{}/{}?resource={}",
                    self.core.endpoint,
                    filesystem,
                    percent_encode_path(path),
                    resource.as_str()
                );
                let mut req = Request::put(&url).header(header::CONTENT_LENGTH, 0);
                if !overwrite {
                    req = req.header(header::IF_NONE_MATCH, "*");
                }

                let resp = self.core.sign_and_send(req.body(Bytes::new())?).await?;
                match resp.status() {
                    StatusCode::CREATED => Ok(true),
                    StatusCode::CONFLICT => Ok(false),
                    status => Err(self.core.classify_error(status, resp.body())),
                }
            })
            .await
    }

    /// Delete a file or directory.
    ///
    /// Large directory trees are deleted in server-driven batches: as long
    /// as responses carry a continuation cursor, the deletion is resumed
    /// with it. Returns `false` when the path does not exist or the
    /// deletion conflicts (e.g. a non-empty directory without `recursive`).
    pub async fn delete(
        &self,
        filesystem: &str,
        path: &str,
        recursive: bool,
        continuation: Option<&str>,
    ) -> Result<bool> {
        let mut continuation = continuation.map(str::to_string);

        loop {
            let cursor = continuation.clone();
            let (deleted, next) = self
                .core
                .with_retry(|| {
                    let cursor = cursor.clone();
                    async move {
                        let mut parameters = vec![format!("recursive={recursive}")];
                        if let Some(cursor) = cursor.as_deref().filter(|v| !v.is_empty()) {
                            parameters
                                .push(format!("continuation={}", percent_encode_query(cursor)));
                        }

                        let url = format!(
                            "{}/{}/{}?{}",
                            self.core.endpoint,
                            filesystem,
                            percent_encode_path(path),
                            parameters.join("&")
                        );
                        let req = Request::delete(&url).body(Bytes::new())?;

                        let resp = self.core.sign_and_send(req).await?;
                        match resp.status() {
                            StatusCode::NOT_FOUND | StatusCode::CONFLICT => Ok((false, None)),
                            status if status.is_success() => {
                                Ok((true, response::continuation(resp.headers())))
                            }
                            status => Err(self.core.classify_error(status, resp.body())),
                        }
                    }
                })
                .await?;

            match (deleted, next) {
                (false, _) => return Ok(false),
                (true, Some(cursor)) => continuation = Some(cursor),
                (true, None) => return Ok(true),
            }
        }
    }

    /// Perform a lease action on a path.
    ///
    /// `lease_duration` must be `-1` or within `15..=60` seconds; anything
    /// else is rejected before the network call. A 404/409 reports as a
    /// not-granted outcome rather than an error.
    pub async fn lease(
        &self,
        filesystem: &str,
        path: &str,
        action: LeaseAction,
        options: &LeaseOptions,
    ) -> Result<LeaseOutcome> {
        if let Some(duration) = options.lease_duration {
            if (duration < 15 && duration != -1) || duration > 60 {
                return Err(Error::validation(format!(
                    "lease duration is invalid; valid lease durations are -1 and 15-60, provided {duration}"
                )));
            }
        }

        self.core
            .with_retry(|| async move {
                let url = format!(
                    "{}/{}/{}",
                    self.core.endpoint,
                    filesystem,
                    percent_encode_path(path)
                );
                let mut req = Request::post(&url)
                    .header(X_MS_LEASE_ACTION, action.as_str())
                    .header(header::CONTENT_LENGTH, 0);
                if let Some(duration) = options.lease_duration {
                    req = req.header(X_MS_LEASE_DURATION, duration);
                }
                if let Some(period) = options.lease_break_period {
                    req = req.header(X_MS_LEASE_BREAK_PERIOD, period);
                }
                if let Some(id) = options.proposed_lease_id.as_deref().filter(|v| !v.is_empty()) {
                    req = req.header(X_MS_PROPOSED_LEASE_ID, id);
                }
                if let Some(id) = options.lease_id.as_deref().filter(|v| !v.is_empty()) {
                    req = req.header(X_MS_LEASE_ID, id);
                }

                let resp = self.core.sign_and_send(req.body(Bytes::new())?).await?;
                match resp.status() {
                    StatusCode::NOT_FOUND | StatusCode::CONFLICT => Ok(LeaseOutcome {
                        granted: false,
                        lease_id: None,
                    }),
                    status if status.is_success() => Ok(LeaseOutcome {
                        granted: true,
                        lease_id: response::header_string(resp.headers(), X_MS_LEASE_ID),
                    }),
                    status => Err(self.core.classify_error(status, resp.body())),
                }
            })
            .await
    }

    /// List paths within a filesystem, following continuation cursors until
    /// the sequence ends.
    ///
    /// An empty result is returned when nothing matches. Use
    /// [`list_page`](PathClient::list_page) to drive pagination manually.
    pub async fn list(
        &self,
        filesystem: &str,
        options: &PathListOptions,
    ) -> Result<Vec<PathEntry>> {
        let mut paths = Vec::new();
        let mut continuation = options.continuation.clone();

        loop {
            let (page, next) = self
                .fetch_page(filesystem, options, continuation.as_deref())
                .await?;
            paths.extend(page);
            match next {
                Some(cursor) => continuation = Some(cursor),
                None => return Ok(paths),
            }
        }
    }

    /// Fetch a single page of paths plus the cursor to resume from, if any.
    /// Starts from `options.continuation`.
    pub async fn list_page(
        &self,
        filesystem: &str,
        options: &PathListOptions,
    ) -> Result<(Vec<PathEntry>, Option<String>)> {
        self.fetch_page(filesystem, options, options.continuation.as_deref())
            .await
    }

    async fn fetch_page(
        &self,
        filesystem: &str,
        options: &PathListOptions,
        continuation: Option<&str>,
    ) -> Result<(Vec<PathEntry>, Option<String>)> {
        self.core
            .with_retry(|| async move {
                let mut parameters = vec![
                    format!("recursive={}", options.recursive),
                    "resource=filesystem".to_string(),
                    format!("maxresults={}", options.max_results),
                ];
                if let Some(directory) = options.directory.as_deref().filter(|v| !v.is_empty()) {
                    parameters.push(format!("directory={}", percent_encode_query(directory)));
                }
                if let Some(cursor) = continuation {
                    parameters.push(format!("continuation={}", percent_encode_query(cursor)));
                }
                if let Some(timeout) = options.timeout {
                    parameters.push(format!("timeout={timeout}"));
                }

                let url = format!(
                    "{}/{}?{}",
                    self.core.endpoint,
                    filesystem,
                    parameters.join("&")
                );
                let req = Request::get(&url).body(Bytes::new())?;

                let resp = self.core.sign_and_send(req).await?;
                match resp.status() {
                    StatusCode::NOT_FOUND => Ok((Vec::new(), None)),
                    status if status.is_success() => {
                        let list: PathList = serde_json::from_slice(resp.body()).map_err(|e| {
                            Error::unexpected("failed to parse path list response").with_source(e)
                        })?;
                        Ok((list.paths, response::continuation(resp.headers())))
                    }
                    status => Err(self.core.classify_error(status, resp.body())),
                }
            })
            .await
    }

    /// Read a byte range from a file. Range bounds are inclusive offsets.
    pub async fn read_bytes(
        &self,
        filesystem: &str,
        path: &str,
        range_start: u64,
        range_stop: u64,
        timeout: Option<u32>,
    ) -> Result<Vec<u8>> {
        Ok(self
            .read_range(filesystem, path, range_start, range_stop, timeout)
            .await?
            .to_vec())
    }

    /// Read a byte range from a file as an [`std::io::Read`] stream.
    pub async fn read_stream(
        &self,
        filesystem: &str,
        path: &str,
        range_start: u64,
        range_stop: u64,
        timeout: Option<u32>,
    ) -> Result<impl std::io::Read> {
        Ok(self
            .read_range(filesystem, path, range_start, range_stop, timeout)
            .await?
            .reader())
    }

    async fn read_range(
        &self,
        filesystem: &str,
        path: &str,
        range_start: u64,
        range_stop: u64,
        timeout: Option<u32>,
    ) -> Result<Bytes> {
        self.core
            .with_retry(|| async move {
                let mut url = format!(
                    "{}/{}/{}",
                    self.core.endpoint,
                    filesystem,
                    percent_encode_path(path)
                );
                if let Some(timeout) = timeout {
                    url.push_str(&format!("?timeout={timeout}"));
                }

                // The Range header participates in the signed canonical
                // string; it must be in place before signing.
                let req = Request::get(&url)
                    .header(header::RANGE, format!("bytes={range_start}-{range_stop}"))
                    .body(Bytes::new())?;

                let resp = self.core.sign_and_send(req).await?;
                let status = resp.status();
                if status.is_success() {
                    Ok(resp.into_body())
                } else {
                    Err(self.core.classify_error(status, resp.body()))
                }
            })
            .await
    }

    /// Append to, flush, or otherwise update a file.
    ///
    /// Flush commits previously appended bytes up to `position` and
    /// requires it; append defaults to position 0 when none is given.
    pub async fn update(
        &self,
        filesystem: &str,
        path: &str,
        action: UpdateAction,
        options: &UpdateOptions,
    ) -> Result<bool> {
        if action == UpdateAction::Flush && options.position.is_none() {
            return Err(Error::validation(
                "action `flush` must be performed with a position",
            ));
        }
        let position = match options.position {
            Some(position) => Some(position),
            None if action == UpdateAction::Append => Some(0),
            None => None,
        };

        self.core
            .with_retry(|| async move {
                let mut parameters = vec![format!("action={}", action.as_str())];
                if let Some(position) = position {
                    parameters.push(format!("position={position}"));
                }
                if let Some(close) = options.close {
                    parameters.push(format!("close={close}"));
                }

                let url = format!(
                    "{}/{}/{}?{}",
                    self.core.endpoint,
                    filesystem,
                    percent_encode_path(path),
                    parameters.join("&")
                );

                let content = options.content.clone().unwrap_or_default();
                let req = Request::patch(&url)
                    .header(header::CONTENT_LENGTH, content.len())
                    .body(content)?;

                let resp = self.core.sign_and_send(req).await?;
                let status = resp.status();
                if status.is_success() {
                    Ok(true)
                } else {
                    Err(self.core.classify_error(status, resp.body()))
                }
            })
            .await
    }

    /// Fetch a path's properties from the service's response headers.
    ///
    /// `action` selects a server-side variant (e.g. `getAccessControl`);
    /// `upn` asks for principal names instead of object ids.
    pub async fn get_properties(
        &self,
        filesystem: &str,
        path: &str,
        action: Option<&str>,
        upn: Option<bool>,
    ) -> Result<PathProperties> {
        self.core
            .with_retry(|| async move {
                let mut parameters = Vec::new();
                if let Some(action) = action.filter(|v| !v.is_empty()) {
                    parameters.push(format!("action={action}"));
                }
                if let Some(upn) = upn {
                    parameters.push(format!("upn={upn}"));
                }

                let mut url = format!(
                    "{}/{}/{}",
                    self.core.endpoint,
                    filesystem,
                    percent_encode_path(path)
                );
                if !parameters.is_empty() {
                    url.push('?');
                    url.push_str(&parameters.join("&"));
                }
                let req = Request::head(&url).body(Bytes::new())?;

                let resp = self.core.sign_and_send(req).await?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(self.core.classify_error(status, resp.body()));
                }

                let headers = resp.headers();
                Ok(PathProperties {
                    resource_type: response::header_string(headers, X_MS_RESOURCE_TYPE),
                    properties: response::header_string(headers, X_MS_PROPERTIES),
                    owner: response::header_string(headers, X_MS_OWNER),
                    group: response::header_string(headers, X_MS_GROUP),
                    permissions: response::header_string(headers, X_MS_PERMISSIONS),
                    acl: response::header_string(headers, X_MS_ACL),
                    lease_duration: response::header_string(headers, X_MS_LEASE_DURATION),
                    lease_state: response::header_string(headers, X_MS_LEASE_STATE),
                    lease_status: response::header_string(headers, X_MS_LEASE_STATUS),
                })
            })
            .await
    }
}
