//! Description request budget
//!
//! A fixed window counter persisted in the key-value store: at most
//! `max_requests` description fetches per window. The window starts with
//! the first reservation and is discarded once its reset time passes.
//!
//! A fetch reserves its slot before calling out and hands it back if every
//! provider fails, so concurrent resolutions cannot overdraw the budget and
//! only successful fetches stay counted.

use chrono::{DateTime, Duration, Utc};
use lakbay_common::config::RateLimitConfig;
use lakbay_common::kv::{get_parsed, KeyValueStore, KEY_RATE_LIMIT_COUNT, KEY_RATE_LIMIT_RESET_AT};
use lakbay_common::Result;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Longest accepted window (one year)
pub const MAX_WINDOW_SECS: u64 = 365 * 24 * 60 * 60;

/// Snapshot of the budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateStatus {
    pub limit: u32,
    pub used: u32,
    pub remaining: u32,
    pub limit_reached: bool,
    /// `None` while no window is open
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resets_in_secs: Option<i64>,
}

pub struct RateGate {
    store: Arc<dyn KeyValueStore>,
    max_requests: u32,
    window: Duration,
    /// Serializes read-modify-write of the counter
    update_lock: Mutex<()>,
}

impl RateGate {
    pub fn new(store: Arc<dyn KeyValueStore>, config: &RateLimitConfig) -> Self {
        if config.window_secs > MAX_WINDOW_SECS {
            tracing::warn!(
                window_secs = config.window_secs,
                max_window_secs = MAX_WINDOW_SECS,
                "Rate limit window too long, capping"
            );
        }
        let window_secs = config.window_secs.min(MAX_WINDOW_SECS) as i64;
        Self {
            store,
            max_requests: config.max_requests,
            window: Duration::seconds(window_secs),
            update_lock: Mutex::new(()),
        }
    }

    /// Counter and reset time of the open window, if any
    async fn open_window(&self, now: DateTime<Utc>) -> Result<Option<(u32, DateTime<Utc>)>> {
        let reset_at = match self.store.get(KEY_RATE_LIMIT_RESET_AT).await? {
            Some(raw) => match DateTime::parse_from_rfc3339(raw.trim()) {
                Ok(t) => t.with_timezone(&Utc),
                Err(e) => {
                    tracing::warn!("Ignoring unreadable rate limit reset time {:?}: {}", raw, e);
                    return Ok(None);
                }
            },
            None => return Ok(None),
        };

        if now >= reset_at {
            return Ok(None);
        }

        let count = get_parsed::<u32>(self.store.as_ref(), KEY_RATE_LIMIT_COUNT)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable rate limit count: {}", e);
                None
            })
            .unwrap_or(0);

        Ok(Some((count, reset_at)))
    }

    pub async fn status(&self) -> Result<RateStatus> {
        self.status_at(Utc::now()).await
    }

    pub async fn status_at(&self, now: DateTime<Utc>) -> Result<RateStatus> {
        let (used, resets_in_secs) = match self.open_window(now).await? {
            Some((count, reset_at)) => (count, Some((reset_at - now).num_seconds().max(0))),
            None => (0, None),
        };

        Ok(RateStatus {
            limit: self.max_requests,
            used,
            remaining: self.max_requests.saturating_sub(used),
            limit_reached: used >= self.max_requests,
            resets_in_secs,
        })
    }

    /// Claim one request from the budget
    ///
    /// Returns `None` without counting when the budget is spent.
    pub async fn try_reserve(&self) -> Result<Option<RateStatus>> {
        self.try_reserve_at(Utc::now()).await
    }

    pub async fn try_reserve_at(&self, now: DateTime<Utc>) -> Result<Option<RateStatus>> {
        let _guard = self.update_lock.lock().await;

        match self.open_window(now).await? {
            Some((count, _)) if count >= self.max_requests => return Ok(None),
            Some((count, _)) => {
                self.store
                    .set(KEY_RATE_LIMIT_COUNT, &count.saturating_add(1).to_string())
                    .await?;
            }
            None if self.max_requests == 0 => return Ok(None),
            None => {
                let reset_at = now
                    .checked_add_signed(self.window)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC);
                self.store.set(KEY_RATE_LIMIT_COUNT, "1").await?;
                self.store
                    .set(KEY_RATE_LIMIT_RESET_AT, &reset_at.to_rfc3339())
                    .await?;
            }
        }

        let status = self.status_at(now).await?;
        if status.limit_reached {
            tracing::info!(
                limit = status.limit,
                resets_in_secs = ?status.resets_in_secs,
                "Description request budget exhausted"
            );
        }
        Ok(Some(status))
    }

    /// Hand back a reservation whose fetch failed
    pub async fn release(&self) -> Result<RateStatus> {
        self.release_at(Utc::now()).await
    }

    pub async fn release_at(&self, now: DateTime<Utc>) -> Result<RateStatus> {
        let _guard = self.update_lock.lock().await;

        if let Some((count, _)) = self.open_window(now).await? {
            if count > 0 {
                self.store
                    .set(KEY_RATE_LIMIT_COUNT, &(count - 1).to_string())
                    .await?;
            }
        }

        self.status_at(now).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lakbay_common::MemoryStore;

    fn gate(max_requests: u32) -> RateGate {
        RateGate::new(
            Arc::new(MemoryStore::new()),
            &RateLimitConfig {
                max_requests,
                window_secs: 3600,
            },
        )
    }

    #[tokio::test]
    async fn test_fresh_gate_is_open() {
        let status = gate(3).status_at(Utc::now()).await.unwrap();

        assert_eq!(status.remaining, 3);
        assert!(!status.limit_reached);
        assert_eq!(status.resets_in_secs, None);
    }

    #[tokio::test]
    async fn test_limit_reached_after_max_requests() {
        let gate = gate(2);
        let now = Utc::now();

        gate.try_reserve_at(now).await.unwrap();
        assert!(!gate.status_at(now).await.unwrap().limit_reached);

        let status = gate
            .try_reserve_at(now + Duration::seconds(10))
            .await
            .unwrap()
            .unwrap();
        assert!(status.limit_reached);
        assert_eq!(status.remaining, 0);
        assert_eq!(status.resets_in_secs, Some(3590));
    }

    #[tokio::test]
    async fn test_window_resets_after_expiry() {
        let gate = gate(1);
        let now = Utc::now();
        gate.try_reserve_at(now).await.unwrap();
        assert!(gate.status_at(now).await.unwrap().limit_reached);

        let later = now + Duration::seconds(3600);
        let status = gate.status_at(later).await.unwrap();
        assert!(!status.limit_reached);
        assert_eq!(status.used, 0);

        let status = gate.try_reserve_at(later).await.unwrap().unwrap();
        assert_eq!(status.used, 1);
        assert_eq!(status.resets_in_secs, Some(3600));
    }

    #[tokio::test]
    async fn test_corrupt_reset_time_starts_fresh_window() {
        let store = Arc::new(MemoryStore::new());
        store.set(KEY_RATE_LIMIT_RESET_AT, "yesterday").await.unwrap();
        store.set(KEY_RATE_LIMIT_COUNT, "99").await.unwrap();
        let gate = RateGate::new(store, &RateLimitConfig::default());

        let status = gate.try_reserve_at(Utc::now()).await.unwrap().unwrap();
        assert_eq!(status.used, 1);
    }

    #[tokio::test]
    async fn test_spent_budget_refuses_reservation() {
        let gate = gate(1);
        let now = Utc::now();

        assert!(gate.try_reserve_at(now).await.unwrap().is_some());
        assert!(gate.try_reserve_at(now).await.unwrap().is_none());
        assert_eq!(gate.status_at(now).await.unwrap().used, 1);
    }

    #[tokio::test]
    async fn test_concurrent_reservations_never_overdraw() {
        let gate = Arc::new(gate(1));
        let now = Utc::now();

        let (a, b) = tokio::join!(gate.try_reserve_at(now), gate.try_reserve_at(now));

        let granted = [a.unwrap(), b.unwrap()].iter().filter(|r| r.is_some()).count();
        assert_eq!(granted, 1);
        assert_eq!(gate.status_at(now).await.unwrap().used, 1);
    }

    #[tokio::test]
    async fn test_release_returns_reservation() {
        let gate = gate(1);
        let now = Utc::now();
        gate.try_reserve_at(now).await.unwrap();

        let status = gate.release_at(now).await.unwrap();

        assert_eq!(status.used, 0);
        assert!(gate.try_reserve_at(now).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_huge_window_is_capped() {
        let gate = RateGate::new(
            Arc::new(MemoryStore::new()),
            &RateLimitConfig {
                max_requests: 5,
                window_secs: u64::MAX,
            },
        );
        let now = Utc::now();

        let status = gate.try_reserve_at(now).await.unwrap().unwrap();

        assert_eq!(status.used, 1);
        assert_eq!(status.resets_in_secs, Some(MAX_WINDOW_SECS as i64));
    }

    #[tokio::test]
    async fn test_window_end_saturates_near_max_time() {
        let gate = gate(1);
        let near_end = DateTime::<Utc>::MAX_UTC - Duration::seconds(10);

        let status = gate.try_reserve_at(near_end).await.unwrap();

        assert!(status.is_some());
    }
}
