use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

// Headers used by the dfs endpoint.
pub const X_MS_DATE: &str = "x-ms-date";
pub const X_MS_VERSION: &str = "x-ms-version";
pub const X_MS_CONTINUATION: &str = "x-ms-continuation";
pub const X_MS_PROPERTIES: &str = "x-ms-properties";
pub const X_MS_NAMESPACE_ENABLED: &str = "x-ms-namespace-enabled";
pub const X_MS_RESOURCE_TYPE: &str = "x-ms-resource-type";
pub const X_MS_ACL: &str = "x-ms-acl";
pub const X_MS_OWNER: &str = "x-ms-owner";
pub const X_MS_GROUP: &str = "x-ms-group";
pub const X_MS_PERMISSIONS: &str = "x-ms-permissions";
pub const X_MS_LEASE_ACTION: &str = "x-ms-lease-action";
pub const X_MS_LEASE_ID: &str = "x-ms-lease-id";
pub const X_MS_LEASE_DURATION: &str = "x-ms-lease-duration";
pub const X_MS_LEASE_BREAK_PERIOD: &str = "x-ms-lease-break-period";
pub const X_MS_LEASE_STATE: &str = "x-ms-lease-state";
pub const X_MS_LEASE_STATUS: &str = "x-ms-lease-status";
pub const X_MS_PROPOSED_LEASE_ID: &str = "x-ms-proposed-lease-id";

// The dfs REST API version every request is pinned to.
pub const DFS_API_VERSION: &str = "2018-11-09";

// Default endpoint suffix; the full endpoint is https://{account}.{suffix}.
pub const DFS_ENDPOINT_SUFFIX: &str = "dfs.core.windows.net";

// The service reports exhaustion of its internal time budget as a 500 with
// this text in the body, not as a dedicated status code.
pub const OPERATION_TIMED_OUT_MARKER: &str =
    "Operation could not be completed within the specified time.";

// Env values used in Config::from_env.
pub const AZURE_STORAGE_ACCOUNT_NAME: &str = "AZURE_STORAGE_ACCOUNT_NAME";
pub const AZURE_STORAGE_ACCOUNT_KEY: &str = "AZURE_STORAGE_ACCOUNT_KEY";
pub const AZURE_STORAGE_SAS_TOKEN: &str = "AZURE_STORAGE_SAS_TOKEN";
pub const AZURE_TENANT_ID: &str = "AZURE_TENANT_ID";
pub const AZURE_CLIENT_ID: &str = "AZURE_CLIENT_ID";
pub const AZURE_CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";
pub const AZURE_AUTHORITY_HOST: &str = "AZURE_AUTHORITY_HOST";
pub const AZDLS_ENDPOINT: &str = "AZDLS_ENDPOINT";

pub const AZURE_PUBLIC_CLOUD: &str = "https://login.microsoftonline.com";
pub const STORAGE_TOKEN_SCOPE: &str = "https://storage.azure.com/.default";

pub static AZURE_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'/')
    .remove(b'~');
