use crate::constants::*;
use adlg2_core::Context;

/// Config carries the settings a [`Client`](crate::Client) is built from.
///
/// Exactly one credential mode must be populated:
///
/// - shared key: `account_key`
/// - client secret (OAuth): `tenant_id` + `client_id` + `client_secret`
/// - SAS: `sas_token`
///
/// `account_name` is always required. Mode selection happens once, at client
/// construction; mixing modes is rejected there.
#[derive(Clone, Default)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Config {
    /// `account_name` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `AZURE_STORAGE_ACCOUNT_NAME`
    pub account_name: Option<String>,
    /// `account_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `AZURE_STORAGE_ACCOUNT_KEY`
    pub account_key: Option<String>,
    /// `sas_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `AZURE_STORAGE_SAS_TOKEN`
    pub sas_token: Option<String>,
    /// `tenant_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `AZURE_TENANT_ID`
    pub tenant_id: Option<String>,
    /// `client_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `AZURE_CLIENT_ID`
    pub client_id: Option<String>,
    /// `client_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `AZURE_CLIENT_SECRET`
    pub client_secret: Option<String>,
    /// `authority_host` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `AZURE_AUTHORITY_HOST`
    /// - fallback: `https://login.microsoftonline.com`
    pub authority_host: Option<String>,
    /// Full endpoint override, e.g. for a local emulator.
    ///
    /// - this field if it's `is_some`
    /// - env value: `AZDLS_ENDPOINT`
    /// - fallback: `https://{account_name}.dfs.core.windows.net`
    pub endpoint: Option<String>,
    /// Attempt budget for the retry policy; defaults to 5.
    pub max_retry_attempts: Option<u32>,
}

impl Config {
    /// Load unset fields from the environment.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if self.account_name.is_none() {
            self.account_name = ctx.env_var(AZURE_STORAGE_ACCOUNT_NAME);
        }
        if self.account_key.is_none() {
            self.account_key = ctx.env_var(AZURE_STORAGE_ACCOUNT_KEY);
        }
        if self.sas_token.is_none() {
            self.sas_token = ctx.env_var(AZURE_STORAGE_SAS_TOKEN);
        }
        if self.tenant_id.is_none() {
            self.tenant_id = ctx.env_var(AZURE_TENANT_ID);
        }
        if self.client_id.is_none() {
            self.client_id = ctx.env_var(AZURE_CLIENT_ID);
        }
        if self.client_secret.is_none() {
            self.client_secret = ctx.env_var(AZURE_CLIENT_SECRET);
        }
        if self.authority_host.is_none() {
            self.authority_host = ctx.env_var(AZURE_AUTHORITY_HOST);
        }
        if self.endpoint.is_none() {
            self.endpoint = ctx.env_var(AZDLS_ENDPOINT);
        }

        self
    }
}
