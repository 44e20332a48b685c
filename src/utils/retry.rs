//! 指数退避重试
//!
//! 第 n 次重试前等待 `base_delay * 2^(n-1)`。

use std::future::Future;
use std::time::Duration;
use tracing::warn;

pub async fn retry_with_backoff<T, E, F, Fut>(
    operation: &str,
    max_retries: u32,
    base_delay: Duration,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut delay = base_delay;
    let mut attempt = 0;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_retries => {
                attempt += 1;
                warn!(
                    "{} failed (attempt {}/{}): {}, retrying in {} ms",
                    operation,
                    attempt,
                    max_retries + 1,
                    e,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> =
            retry_with_backoff("connect", 3, Duration::from_millis(1), || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 { Err(format!("boom {n}")) } else { Ok(n) }
            })
            .await;

        assert_eq!(result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let result: Result<(), String> =
            retry_with_backoff("connect", 2, Duration::from_millis(1), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("still down".to_string())
            })
            .await;

        assert_eq!(result, Err("still down".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
