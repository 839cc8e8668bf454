//! Transport: every attempt goes through the shared queue, is bounded by a health-scaled
//! timeout, and updates connection health.

use reqwest::{RequestBuilder, Response};

use super::{RetryConfig, SvClient};
use crate::core::SvError;

impl SvClient {
    /// Sends `req`, retrying per `retry`.
    ///
    /// A response with a retryable status is returned as-is once the retry budget is spent, so
    /// the caller decides how to map it.
    pub(crate) async fn send_with_retry(
        &self,
        req: RequestBuilder,
        retry: &RetryConfig,
        queued: bool,
    ) -> Result<Response, SvError> {
        let budget = retry.budget();
        let mut attempt: u32 = 0;

        loop {
            let timeout = self.next_timeout().await;
            let attempt_req = req
                .try_clone()
                .ok_or_else(|| SvError::Data("request body is not replayable".into()))?
                .timeout(timeout);

            let outcome = if queued {
                self.queue().enqueue(move || attempt_req.send()).await?
            } else {
                attempt_req.send().await
            };

            match outcome {
                Ok(resp) => {
                    let code = resp.status().as_u16();
                    if resp.status().is_server_error() || code == 408 || code == 429 {
                        self.record_failure(false).await;
                    } else {
                        self.record_success().await;
                    }

                    if attempt < budget && retry.retry_on_status.contains(&code) {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(status = code, attempt, url = %resp.url(), "retrying after status");
                        tokio::time::sleep(retry.backoff.delay_for_attempt(attempt)).await;
                        attempt += 1;
                        continue;
                    }
                    return Ok(resp);
                }
                Err(e) => {
                    let transport = e.is_timeout() || e.is_connect() || e.is_request();
                    self.record_failure(transport).await;

                    let retryable = (e.is_timeout() && retry.retry_on_timeout)
                        || (e.is_connect() && retry.retry_on_connect);
                    if attempt < budget && retryable {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(error = %e, attempt, "retrying after transport error");
                        tokio::time::sleep(retry.backoff.delay_for_attempt(attempt)).await;
                        attempt += 1;
                        continue;
                    }

                    if std::env::var("SV_DEBUG").ok().as_deref() == Some("1") {
                        eprintln!("SV_DEBUG: request failed after {} attempt(s): {e}", attempt + 1);
                    }
                    return Err(SvError::Http(e));
                }
            }
        }
    }
}
