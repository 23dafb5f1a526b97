//! Periodic background eviction of expired sessions.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior};

use super::ResultCache;

/// Background task sweeping a [`ResultCache`] on a fixed interval.
///
/// The task stops on [`Reaper::shutdown`] and is aborted when the handle is dropped.
#[derive(Debug)]
pub struct Reaper {
    stop: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl Reaper {
    /// Spawn the sweep loop on the current tokio runtime. The first sweep runs immediately.
    pub fn spawn(cache: ResultCache, interval: Duration) -> Self {
        let (stop, mut stopped) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        cache.sweep().await;
                    }
                    _ = stopped.changed() => break,
                }
            }

            tracing::debug!("session reaper stopped");
        });

        tracing::debug!(interval_ms = interval.as_millis() as u64, "session reaper started");

        Self { stop, handle: Some(handle) }
    }

    /// Stop the loop and wait for it to exit.
    pub async fn shutdown(mut self) {
        let _ = self.stop.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for Reaper {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_evicts_without_foreground_calls() {
        let cache = ResultCache::with_ttl(Duration::from_secs(10));
        cache.set("U1", "cats", vec!["https://img.test/a".into()]).await.unwrap();
        settle().await;

        let reaper = Reaper::spawn(cache.clone(), Duration::from_secs(3));
        settle().await;
        assert_eq!(cache.len().await, 1);

        tokio::time::advance(Duration::from_secs(12)).await;
        settle().await;
        assert_eq!(cache.len().await, 0);

        reaper.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_keeps_young_sessions() {
        let cache = ResultCache::with_ttl(Duration::from_secs(60));
        let reaper = Reaper::spawn(cache.clone(), Duration::from_secs(1));

        cache.set("U1", "cats", vec!["https://img.test/a".into()]).await.unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;
        settle().await;

        assert_eq!(cache.len().await, 1);
        reaper.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_joins_task() {
        let reaper = Reaper::spawn(ResultCache::new(), Duration::from_millis(10));
        tokio::time::timeout(Duration::from_secs(1), reaper.shutdown())
            .await
            .expect("reaper did not stop");
    }
}
