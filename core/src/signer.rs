use crate::{Context, ProvideCredential, Result, SignRequest, SigningCredential};
use std::sync::{Arc, Mutex};

/// Signer is the main struct used to sign requests.
///
/// It keeps the most recently resolved credential and reuses it until it
/// stops being valid or is explicitly dropped via
/// [`invalidate_credential`](Signer::invalidate_credential). Clones share
/// the same cache, so clients built from one signer also share tokens.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    provider: Arc<dyn ProvideCredential<Credential = K>>,
    signer: Arc<dyn SignRequest<Credential = K>>,
    credential: Arc<Mutex<Option<K>>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        provider: impl ProvideCredential<Credential = K>,
        signer: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,
            provider: Arc::new(provider),
            signer: Arc::new(signer),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Sign a request.
    ///
    /// Uses the cached credential when it is still valid; otherwise resolves
    /// a fresh one through the provider first. The provider call happens
    /// outside the cache lock, so two racing callers may both fetch; the
    /// cache only ever holds a complete credential.
    pub async fn sign(&self, req: &mut http::request::Parts) -> Result<()> {
        let cred = self.credential.lock().expect("lock poisoned").clone();
        let cred = if cred.is_valid() {
            cred
        } else {
            let fresh = self.provider.provide_credential(&self.ctx).await?;
            *self.credential.lock().expect("lock poisoned") = fresh.clone();
            fresh
        };

        self.signer.sign_request(&self.ctx, req, cred.as_ref()).await
    }

    /// Drop the cached credential.
    ///
    /// The next [`sign`](Signer::sign) call resolves a fresh credential
    /// through the provider. Used by the retry policy when the service
    /// rejects a bearer token.
    pub fn invalidate_credential(&self) {
        *self.credential.lock().expect("lock poisoned") = None;
    }

    /// The context this signer resolves credentials with.
    pub fn context(&self) -> &Context {
        &self.ctx
    }
}
