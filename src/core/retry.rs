use std::future::Future;
use std::time::Duration;

use crate::core::error::FxError;

/// Run `op` until it succeeds, re-attempting up to `max_retries` times with a
/// constant `delay` between attempts.
///
/// The first attempt is immediate. A failure propagates right away when no
/// retries remain or when `should_retry` rejects the error; otherwise the task
/// sleeps for `delay` and tries again with the same delay. Total attempts
/// never exceed `max_retries + 1`, and the error surfaced after exhaustion is
/// the operation's own final error, not a wrapper.
pub async fn retry<T, F, Fut>(
    mut op: F,
    max_retries: u32,
    delay: Duration,
    should_retry: Option<&(dyn Fn(&FxError) -> bool + Send + Sync)>,
) -> Result<T, FxError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FxError>>,
{
    let mut remaining = max_retries;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if remaining == 0 || should_retry.is_some_and(|pred| !pred(&err)) {
                    return Err(err);
                }
                #[cfg(feature = "tracing")]
                tracing::debug!(remaining, ?delay, error = %err, "attempt failed, retrying after delay");
                tokio::time::sleep(delay).await;
                remaining -= 1;
            }
        }
    }
}
