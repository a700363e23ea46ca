//! Fixed-delay retry for outbound calls.
//!
//! Every attempt is bounded by the policy's timeout. Any failure is retried
//! (transport, timeout, error status, bad body) until `max_attempts` is
//! reached; the last failure is then surfaced as a single [`CallError`].

use std::future::Future;

use recordflow_types::config::RetryConfig;
use recordflow_types::error::{AttemptError, CallError, UpstreamService};

// ---------------------------------------------------------------------------
// ResilientCaller
// ---------------------------------------------------------------------------

/// Stateless retry wrapper; the policy is passed in on every call.
pub struct ResilientCaller;

impl ResilientCaller {
    /// Whether another attempt is allowed after `attempt` failed.
    ///
    /// `attempt` is 1-based (first execution is attempt 1). A policy with
    /// `max_attempts = 0` still makes one attempt.
    pub fn should_retry(policy: &RetryConfig, attempt: u32) -> bool {
        attempt < policy.max_attempts.max(1)
    }

    /// Run `operation` under `policy`, retrying on any failure.
    ///
    /// `operation` is invoked once per attempt and must build a fresh
    /// request each time. Log lines carry no correlation fields of their
    /// own; callers run inside the request's span.
    pub async fn call<T, F, Fut>(
        policy: &RetryConfig,
        service: UpstreamService,
        mut operation: F,
    ) -> Result<T, CallError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AttemptError>>,
    {
        let timeout = policy.timeout();
        let mut attempt = 0;

        loop {
            attempt += 1;

            let outcome = match tokio::time::timeout(timeout, operation()).await {
                Ok(result) => result,
                Err(_) => Err(AttemptError::Timeout(timeout)),
            };

            let err = match outcome {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!(
                            service = %service,
                            attempt,
                            "outbound call succeeded after retry"
                        );
                    }
                    return Ok(value);
                }
                Err(err) => err,
            };

            tracing::warn!(
                service = %service,
                attempt,
                max_attempts = policy.max_attempts,
                error = %err,
                "outbound call attempt failed"
            );

            if !Self::should_retry(policy, attempt) {
                tracing::error!(
                        service = %service,
                    attempts = attempt,
                    error = %err,
                    "outbound call failed, giving up"
                );
                return Err(CallError {
                    service,
                    attempts: attempt,
                    detail: err.diagnostic(),
                });
            }

            tokio::time::sleep(policy.delay()).await;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use tokio::time::Instant;
    use tracing::Instrument;
    use tracing_subscriber::fmt::MakeWriter;

    use crate::context::RequestContext;

    // -------------------------------------------------------------------
    // should_retry
    // -------------------------------------------------------------------

    #[test]
    fn test_should_retry_within_limit() {
        let policy = RetryConfig::default();
        assert!(ResilientCaller::should_retry(&policy, 1));
        assert!(ResilientCaller::should_retry(&policy, 2));
        assert!(!ResilientCaller::should_retry(&policy, 3));
        assert!(!ResilientCaller::should_retry(&policy, 4));
    }

    #[test]
    fn test_zero_attempts_still_runs_once() {
        let policy = RetryConfig {
            max_attempts: 0,
            ..RetryConfig::default()
        };
        assert!(!ResilientCaller::should_retry(&policy, 1));
    }

    // -------------------------------------------------------------------
    // call
    // -------------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn test_first_success_makes_one_attempt() {
        let calls = AtomicU32::new(0);
        let result = ResilientCaller::call(
            &RetryConfig::default(),
            UpstreamService::WorkflowEngine,
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, AttemptError>("ok")
            },
        )
        .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_failing_makes_three_spaced_attempts() {
        let started = Instant::now();
        let stamps = Mutex::new(Vec::new());

        let result: Result<(), CallError> = ResilientCaller::call(
            &RetryConfig::default(),
            UpstreamService::WorkflowEngine,
            || {
                stamps.lock().unwrap().push(started.elapsed());
                async {
                    Err(AttemptError::Status {
                        status: 500,
                        body: "boom".to_string(),
                    })
                }
            },
        )
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.attempts, 3);
        assert_eq!(err.service, UpstreamService::WorkflowEngine);
        assert_eq!(err.detail, "boom");

        let stamps = stamps.into_inner().unwrap();
        assert_eq!(stamps.len(), 3);
        assert_eq!(stamps[1] - stamps[0], Duration::from_secs(2));
        assert_eq!(stamps[2] - stamps[1], Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_on_second_attempt() {
        let calls = AtomicU32::new(0);
        let result = ResilientCaller::call(
            &RetryConfig::default(),
            UpstreamService::RecordsUpdate,
            || async {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(AttemptError::Transport("connection refused".to_string()))
                } else {
                    Ok(42)
                }
            },
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_attempts_time_out() {
        let started = Instant::now();
        let calls = AtomicU32::new(0);

        let result: Result<(), CallError> = ResilientCaller::call(
            &RetryConfig::default(),
            UpstreamService::RecordsUpdate,
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(())
            },
        )
        .await;

        let err = result.unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(err.detail.contains("timed out"), "detail: {}", err.detail);
        // 3 timeouts of 10s plus 2 waits of 2s
        assert_eq!(started.elapsed(), Duration::from_secs(34));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_error_detail_is_error_text() {
        let result: Result<(), CallError> = ResilientCaller::call(
            &RetryConfig {
                max_attempts: 1,
                ..RetryConfig::default()
            },
            UpstreamService::RecordsUpdate,
            || async { Err(AttemptError::Transport("dns failure".to_string())) },
        )
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.attempts, 1);
        assert_eq!(err.detail, "connection error: dns failure");
    }

    // -------------------------------------------------------------------
    // logging
    // -------------------------------------------------------------------

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempt_logs_carry_event_id_once() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(logs.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let ctx = RequestContext::new("evt-9");
        let result: Result<(), CallError> = ResilientCaller::call(
            &RetryConfig {
                max_attempts: 2,
                ..RetryConfig::default()
            },
            UpstreamService::WorkflowEngine,
            || async { Err(AttemptError::Transport("refused".to_string())) },
        )
        .instrument(ctx.span())
        .await;
        assert!(result.is_err());

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        // two failed attempts plus the give-up line
        assert_eq!(lines.len(), 3, "{output}");
        for line in lines {
            assert_eq!(line.matches("evt-9").count(), 1, "{line}");
        }
    }
}
