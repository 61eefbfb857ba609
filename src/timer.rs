//! Delay primitive shared by simulated async work.
//!
//! In the browser this is a `setTimeout`-backed future from `gloo-timers`.
//! Headless builds have no event loop clock, so the delay resolves at once.

use std::time::Duration;

/// Wait for `duration`.
#[cfg(feature = "hydrate")]
pub async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

/// Wait for `duration` (resolves immediately without `hydrate`).
#[cfg(not(feature = "hydrate"))]
pub async fn sleep(duration: Duration) {
    log::trace!("timer: skipping {}ms delay outside the browser", duration.as_millis());
}
