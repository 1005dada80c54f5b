use crate::Credential;
use adlg2_core::{Error, ErrorKind, Result, Signer};
use log::debug;
use std::future::Future;
use std::time::Duration;

/// Policy deciding which failed attempts are re-run.
///
/// Two failure kinds are retryable: a service-side timeout, retried after an
/// exponential backoff of `base_delay * 2^attempt`, and a rejected bearer
/// token, retried immediately after the cached token is dropped. Everything
/// else propagates on the first occurrence. The attempt budget is fixed;
/// once spent, the last classified failure is surfaced wrapped in
/// [`ErrorKind::ExhaustedRetries`].
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the default budget of 5 attempts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the attempt budget.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Override the backoff base delay.
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }

    /// Run `attempt_fn` until it succeeds, fails fatally, or the attempt
    /// budget is spent.
    ///
    /// `attempt_fn` must rebuild its request from scratch on every call: a
    /// retried request needs a fresh `x-ms-date` and a fresh signature.
    pub async fn execute<T, F, Fut>(&self, signer: &Signer<Credential>, attempt_fn: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let err = match attempt_fn().await {
                Ok(v) => return Ok(v),
                Err(err) => err,
            };

            if !err.is_retryable() {
                return Err(err);
            }
            if attempt >= self.max_attempts {
                return Err(Error::exhausted_retries(attempt, err));
            }

            match err.kind() {
                ErrorKind::AuthTokenInvalid => {
                    debug!("attempt {attempt}: bearer token rejected, dropping cached token");
                    signer.invalidate_credential();
                }
                _ => {
                    let delay = self.backoff(attempt);
                    debug!("attempt {attempt}: operation timed out, backing off {delay:?}");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
