/// Retry an async operation a fixed number of times with a fixed delay.
///
/// `$op` is re-evaluated on every attempt, so it must build a fresh future
/// (e.g. `client.get(&url).send()`). Only the last error is returned.
#[macro_export]
macro_rules! retry_async {
    ($attempts:expr, $delay_secs:expr, $op:expr) => {{
        let mut attempt: u32 = 1;
        loop {
            match $op.await {
                Ok(value) => break Ok(value),
                Err(e) if attempt < $attempts => {
                    tracing::warn!(
                        "attempt {}/{} failed: {}, retrying in {}s",
                        attempt,
                        $attempts,
                        e,
                        $delay_secs
                    );
                    attempt += 1;
                    tokio::time::sleep(std::time::Duration::from_secs($delay_secs)).await;
                }
                Err(e) => break Err(e),
            }
        }
    }};
}
