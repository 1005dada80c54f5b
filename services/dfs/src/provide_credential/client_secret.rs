use crate::constants::{AZURE_PUBLIC_CLOUD, STORAGE_TOKEN_SCOPE};
use crate::Credential;
use adlg2_core::time::now;
use adlg2_core::{Context, Error, ProvideCredential, Result};
use async_trait::async_trait;

/// Provider implementing the client-credentials OAuth flow.
///
/// Exchanges a tenant id, client id and client secret for a bearer token at
/// the Azure AD token endpoint. The exchange happens lazily, whenever the
/// signer has no valid cached token; the resulting credential carries its
/// expiry so the cache knows when to come back here.
///
/// Reference: <https://learn.microsoft.com/en-us/azure/active-directory/develop/v2-oauth2-client-creds-grant-flow>
#[derive(Debug, Clone)]
pub struct ClientSecretCredentialProvider {
    tenant_id: String,
    client_id: String,
    client_secret: String,
    authority_host: String,
}

impl ClientSecretCredentialProvider {
    /// Create a new client secret provider.
    pub fn new(tenant_id: &str, client_id: &str, client_secret: &str) -> Self {
        Self {
            tenant_id: tenant_id.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            authority_host: AZURE_PUBLIC_CLOUD.to_string(),
        }
    }

    /// Use a non-default authority host (sovereign clouds, test stubs).
    pub fn with_authority_host(mut self, authority_host: impl Into<String>) -> Self {
        self.authority_host = authority_host.into();
        self
    }
}

#[async_trait]
impl ProvideCredential for ClientSecretCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        if self.tenant_id.is_empty() || self.client_id.is_empty() || self.client_secret.is_empty() {
            return Ok(None);
        }

        let token = fetch_token(
            &self.tenant_id,
            &self.client_id,
            &self.client_secret,
            &self.authority_host,
            ctx,
        )
        .await?;

        let expires_on = now()
            + chrono::TimeDelta::try_seconds(token.expires_in as i64)
                .unwrap_or_else(|| chrono::TimeDelta::try_minutes(10).expect("in bounds"));

        Ok(Some(Credential::with_bearer_token(
            &token.access_token,
            Some(expires_on),
        )))
    }
}

#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

async fn fetch_token(
    tenant_id: &str,
    client_id: &str,
    client_secret: &str,
    authority_host: &str,
    ctx: &Context,
) -> Result<TokenResponse> {
    let url = format!(
        "{}/{}/oauth2/v2.0/token",
        authority_host.trim_end_matches('/'),
        tenant_id
    );

    let body = form_urlencoded::Serializer::new(String::new())
        .append_pair("scope", STORAGE_TOKEN_SCOPE)
        .append_pair("client_id", client_id)
        .append_pair("client_secret", client_secret)
        .append_pair("grant_type", "client_credentials")
        .finish();

    let req = http::Request::builder()
        .method(http::Method::POST)
        .uri(&url)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(bytes::Bytes::from(body))
        .map_err(|e| Error::unexpected("failed to build token request").with_source(e))?;

    let resp = ctx.http_send(req).await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = String::from_utf8_lossy(resp.body());
        return Err(Error::credential_invalid(format!(
            "token request failed with status {status}: {body}"
        )));
    }

    serde_json::from_slice(resp.body())
        .map_err(|e| Error::credential_invalid("failed to parse token response").with_source(e))
}
