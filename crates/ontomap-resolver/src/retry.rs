//! Bounded retry around a single remote call
//!
//! Failures are logged and swallowed: an exhausted budget yields `None` so the
//! caller can route the trait to curation instead of aborting the run.

use std::fmt::Display;
use std::future::Future;
use tracing::{error, info};

/// Invoke `call` until it succeeds or `attempts` calls have failed
///
/// No delay is inserted between attempts.
///
/// # Examples
///
/// ```
/// use ontomap_resolver::retry::with_retries;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let mut calls = 0;
/// let value = with_retries(4, "example", || {
///     calls += 1;
///     let outcome: Result<u32, String> = if calls < 3 { Err("down".into()) } else { Ok(7) };
///     async move { outcome }
/// })
/// .await;
/// assert_eq!(value, Some(7));
/// # });
/// ```
pub async fn with_retries<T, E, F, Fut>(attempts: u32, target: &str, mut call: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    for attempt in 1..=attempts {
        match call().await {
            Ok(value) => return Some(value),
            Err(e) => info!("Attempt {} of {} failed for {}: {}", attempt, attempts, target, e),
        }
    }

    error!("Giving up on {} after {} attempts", target, attempts);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn test_first_success_returns_immediately() {
        let calls = Cell::new(0);
        let value = with_retries(4, "t", || {
            calls.set(calls.get() + 1);
            async { Ok::<_, String>("ok") }
        })
        .await;
        assert_eq!(value, Some("ok"));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_recovers_within_budget() {
        let calls = Cell::new(0);
        let value = with_retries(4, "t", || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move {
                if n < 4 {
                    Err(format!("attempt {}", n))
                } else {
                    Ok(n)
                }
            }
        })
        .await;
        assert_eq!(value, Some(4));
        assert_eq!(calls.get(), 4);
    }

    #[tokio::test]
    async fn test_exhausted_budget_is_absent() {
        let calls = Cell::new(0);
        let value: Option<()> = with_retries(3, "t", || {
            calls.set(calls.get() + 1);
            async { Err("down") }
        })
        .await;
        assert_eq!(value, None);
        assert_eq!(calls.get(), 3);
    }
}
