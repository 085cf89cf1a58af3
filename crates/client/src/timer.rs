//! Platform timers.

/// Suspend the current task for `ms` milliseconds. Zero returns immediately.
#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u32) {
    if ms == 0 {
        return;
    }
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(ms: u32) {
    if ms == 0 {
        return;
    }
    tokio::time::sleep(std::time::Duration::from_millis(u64::from(ms))).await;
}

/// Wall clock in milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
