use crate::config::Config;
use crate::constants::DFS_ENDPOINT_SUFFIX;
use crate::core::DfsCore;
use crate::provide_credential::{ClientSecretCredentialProvider, StaticCredentialProvider};
use crate::retry::RetryPolicy;
use crate::sign_request::RequestSigner;
use crate::{FilesystemClient, PathClient};
use adlg2_core::{Context, Error, Result, Signer};
use std::sync::Arc;

/// Entry point to the library.
///
/// `Client::new` validates the configuration and fixes the authorization
/// strategy once; the [`FilesystemClient`] and [`PathClient`] facades it
/// hands out share one signer, and with it one cached bearer token.
#[derive(Clone, Debug)]
pub struct Client {
    core: Arc<DfsCore>,
}

impl Client {
    /// Build a client from a configuration.
    ///
    /// Exactly one credential mode must be configured: an account key, a
    /// complete client-secret triple, or a SAS token. A missing, partial or
    /// ambiguous configuration is rejected here, never at request time.
    pub fn new(config: Config, ctx: Context) -> Result<Self> {
        let account_name = config
            .account_name
            .clone()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("storage account name may not be empty"))?;

        let has_shared_key = non_empty(&config.account_key);
        let has_sas = non_empty(&config.sas_token);
        let oauth_fields = [&config.tenant_id, &config.client_id, &config.client_secret];
        let oauth_set = oauth_fields.iter().filter(|f| non_empty(f)).count();
        if oauth_set > 0 && oauth_set < 3 {
            return Err(Error::config_invalid(
                "client-secret authorization requires tenant id, client id and client secret",
            ));
        }
        let has_oauth = oauth_set == 3;

        let signer = match (has_shared_key, has_oauth, has_sas) {
            (true, false, false) => Signer::new(
                ctx.clone(),
                StaticCredentialProvider::new_shared_key(
                    &account_name,
                    config.account_key.as_deref().unwrap_or_default(),
                ),
                RequestSigner::new(),
            ),
            (false, true, false) => {
                let mut provider = ClientSecretCredentialProvider::new(
                    config.tenant_id.as_deref().unwrap_or_default(),
                    config.client_id.as_deref().unwrap_or_default(),
                    config.client_secret.as_deref().unwrap_or_default(),
                );
                if let Some(host) = config.authority_host.as_deref().filter(|v| !v.is_empty()) {
                    provider = provider.with_authority_host(host);
                }
                Signer::new(ctx.clone(), provider, RequestSigner::new())
            }
            (false, false, true) => Signer::new(
                ctx.clone(),
                StaticCredentialProvider::new_sas_token(
                    config.sas_token.as_deref().unwrap_or_default(),
                ),
                RequestSigner::new(),
            ),
            (false, false, false) => {
                return Err(Error::config_invalid(
                    "no credential configured; provide an account key, a client secret, or a SAS token",
                ))
            }
            _ => {
                return Err(Error::config_invalid(
                    "credential modes are mutually exclusive; provide exactly one of account key, client secret, or SAS token",
                ))
            }
        };

        let endpoint = match config.endpoint.as_deref().filter(|v| !v.is_empty()) {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{account_name}.{DFS_ENDPOINT_SUFFIX}"),
        };

        let retry = match config.max_retry_attempts {
            Some(max_attempts) => RetryPolicy::new().with_max_attempts(max_attempts),
            None => RetryPolicy::new(),
        };

        Ok(Self {
            core: Arc::new(DfsCore {
                account: account_name,
                endpoint,
                ctx,
                signer,
                retry,
                bearer_auth: has_oauth,
            }),
        })
    }

    /// The filesystem (container) management facade.
    pub fn filesystem(&self) -> FilesystemClient {
        FilesystemClient {
            core: self.core.clone(),
        }
    }

    /// The path (file/directory) management facade.
    pub fn path(&self) -> PathClient {
        PathClient {
            core: self.core.clone(),
        }
    }
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_ref().is_some_and(|v| !v.is_empty())
}
