use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::Value;

use fetchax::{ErrorCode, FxError, retry};

const DELAY: Duration = Duration::from_millis(5);

fn unavailable() -> FxError {
    FxError::Status {
        status: 503,
        data: Value::Null,
        code: ErrorCode::ApiError,
    }
}

fn flaky(failures: usize) -> (AtomicUsize, impl Fn(&AtomicUsize) -> Result<u32, FxError>) {
    let calls = AtomicUsize::new(0);
    let op = move |calls: &AtomicUsize| {
        let attempt = calls.fetch_add(1, Ordering::SeqCst);
        if attempt < failures {
            Err(unavailable())
        } else {
            Ok(7)
        }
    };
    (calls, op)
}

#[tokio::test]
async fn first_success_returns_immediately() {
    let (calls, op) = flaky(0);
    let out = retry(|| async { op(&calls) }, 3, DELAY, None).await.unwrap();

    assert_eq!(out, 7);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn succeeds_within_the_retry_budget() {
    let (calls, op) = flaky(2);
    let out = retry(|| async { op(&calls) }, 2, DELAY, None).await.unwrap();

    assert_eq!(out, 7);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn exhaustion_surfaces_the_final_error_after_max_plus_one_attempts() {
    let calls = AtomicUsize::new(0);
    let err = retry(
        || async {
            let attempt = calls.fetch_add(1, Ordering::SeqCst);
            Err::<u32, _>(FxError::Parse(format!("attempt {attempt} failed")))
        },
        2,
        DELAY,
        None,
    )
    .await
    .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    // The surfaced error is the last attempt's own, not a wrapper.
    assert!(matches!(&err, FxError::Parse(msg) if msg == "attempt 2 failed"));
}

#[tokio::test]
async fn zero_retries_propagates_the_first_failure() {
    let (calls, op) = flaky(1);
    let err = retry(|| async { op(&calls) }, 0, DELAY, None).await.unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn rejecting_predicate_short_circuits_without_delay() {
    let (calls, op) = flaky(5);
    let never = |_err: &FxError| false;

    let started = std::time::Instant::now();
    let err = retry(|| async { op(&calls) }, 5, Duration::from_secs(30), Some(&never))
        .await
        .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(err.status(), Some(503));
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn predicate_can_select_which_errors_retry() {
    let calls = AtomicUsize::new(0);
    let only_status = |err: &FxError| matches!(err, FxError::Status { .. });

    // Fails with a status error once, then with a parse error; the parse
    // error does not pass the gate and becomes the final outcome.
    let err = retry(
        || async {
            match calls.fetch_add(1, Ordering::SeqCst) {
                0 => Err::<u32, _>(unavailable()),
                _ => Err(FxError::Parse("bad payload".into())),
            }
        },
        5,
        DELAY,
        Some(&only_status),
    )
    .await
    .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(matches!(err, FxError::Parse(_)));
}
