//! Typed models for the dfs REST responses.
//!
//! List bodies arrive with every scalar encoded as a JSON string
//! (`"contentLength":"1977097"`, `"isDirectory":"true"`); the fields keep
//! that form and leave interpretation to the caller, the way the service
//! actually sends them.

use serde::Deserialize;

/// A top-level storage container.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Filesystem {
    /// Filesystem name.
    #[serde(default)]
    pub name: String,
    /// Last modification time, RFC1123.
    #[serde(default, rename = "lastModified")]
    pub last_modified: String,
    /// Entity tag.
    #[serde(default, rename = "etag")]
    pub etag: String,
}

/// Wire shape of a filesystem list page.
///
/// ```json
/// {"filesystems":[{"etag":"0x8D8...","lastModified":"Mon, 09 Nov 2020 09:30:05 GMT","name":"testfs"}]}
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilesystemList {
    /// Filesystems in this page.
    #[serde(default)]
    pub filesystems: Vec<Filesystem>,
}

/// A file or directory entry within a filesystem.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PathEntry {
    /// Path name, relative to the filesystem root.
    #[serde(default)]
    pub name: String,
    /// Content length in bytes, as the decimal string the service sends.
    #[serde(default, rename = "contentLength")]
    pub content_length: String,
    /// `"true"` when the entry is a directory, `"false"` or absent otherwise.
    #[serde(default, rename = "isDirectory")]
    pub is_directory: String,
    /// Last modification time, RFC1123.
    #[serde(default, rename = "lastModified")]
    pub last_modified: String,
    /// Entity tag.
    #[serde(default, rename = "etag")]
    pub etag: String,
    /// Owning user.
    #[serde(default)]
    pub owner: String,
    /// Owning group.
    #[serde(default)]
    pub group: String,
    /// POSIX-style permission string.
    #[serde(default)]
    pub permissions: String,
}

/// Wire shape of a path list page.
///
/// ```json
/// {"paths":[{"contentLength":"4","etag":"0x8DACF9B0061305F","isDirectory":"false","name":"d1/f1"}]}
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathList {
    /// Paths in this page.
    #[serde(default)]
    pub paths: Vec<PathEntry>,
}

/// Properties of a filesystem, extracted from response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilesystemProperties {
    /// Whether the hierarchical namespace is enabled for the account.
    pub namespace_enabled: Option<String>,
    /// User-defined properties, a comma-joined `key=base64(value)` blob.
    pub properties: Option<String>,
}

/// Properties of a path, extracted from response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathProperties {
    /// `file` or `directory`.
    pub resource_type: Option<String>,
    /// User-defined properties, a comma-joined `key=base64(value)` blob.
    pub properties: Option<String>,
    /// Owning user.
    pub owner: Option<String>,
    /// Owning group.
    pub group: Option<String>,
    /// POSIX-style permission string.
    pub permissions: Option<String>,
    /// POSIX access control list.
    pub acl: Option<String>,
    /// Lease duration kind (`infinite` or `fixed`).
    pub lease_duration: Option<String>,
    /// Lease state (`available`, `leased`, `breaking`, ...).
    pub lease_state: Option<String>,
    /// Lease status (`locked` or `unlocked`).
    pub lease_status: Option<String>,
}

/// Result of a lease operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaseOutcome {
    /// Whether the service granted the requested lease action. `false`
    /// covers the documented 404/409 outcomes (no such path, conflicting
    /// lease state); anything else raises instead.
    pub granted: bool,
    /// The lease id returned by the service, when it returned one.
    pub lease_id: Option<String>,
}
