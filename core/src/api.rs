use crate::{Context, Result};
use std::fmt::Debug;

/// SigningCredential is the material a signer holds between requests.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is still usable.
    ///
    /// Expired or empty credentials return `false`, prompting the signer to
    /// resolve a fresh one before the next request.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(cred) = self else {
            return false;
        };

        cred.is_valid()
    }
}

/// ProvideCredential resolves a credential from wherever it lives.
///
/// A provider may simply hand back statically configured material, or it may
/// perform network calls of its own (for example a client-credentials token
/// exchange against an OAuth token endpoint).
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Resolve a credential.
    ///
    /// Returns `Ok(None)` when this provider has nothing to offer; errors are
    /// fatal to the calling request (bounded retry is the caller's concern).
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}

/// SignRequest decorates an outgoing request with authentication material.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this signer.
    type Credential: Send + Sync + Unpin + 'static;

    /// Decorate the request parts.
    ///
    /// The decoration and the bytes actually sent must be identical; any
    /// header this method inspects while signing has to end up on the wire
    /// unchanged.
    async fn sign_request(
        &self,
        ctx: &Context,
        req: &mut http::request::Parts,
        cred: Option<&Self::Credential>,
    ) -> Result<()>;
}
