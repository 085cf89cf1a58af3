//! Keyed request cache shared by the data hooks.
//!
//! Entries are stored type-erased and served while younger than the caller's
//! `stale_ms`. Failures are retried with exponential backoff and never cached.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use wagerdesk_shared::ApiError;

use crate::timer::{now_ms, sleep_ms};

mod hooks;

pub use hooks::{use_polling, use_query, QueryHandle};

/// Identifies one cached response: an endpoint, its parameters and the
/// account it was fetched for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: &'static str,
    pub params: String,
    /// User id of the token the request was authorized with; empty when anonymous.
    pub owner: String,
}

impl QueryKey {
    pub fn new(resource: &'static str, params: impl Into<String>) -> Self {
        Self {
            resource,
            params: params.into(),
            owner: String::new(),
        }
    }

    pub fn resource(resource: &'static str) -> Self {
        Self::new(resource, "")
    }

    pub fn for_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }
}

/// Backoff between retries of a failed fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Delay before the first retry, in milliseconds
    pub initial_delay_ms: u32,
    /// Upper bound on any single delay
    pub max_delay_ms: u32,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay_ms: 500,
            max_delay_ms: 8_000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// No waiting between attempts.
    pub fn immediate() -> Self {
        Self {
            initial_delay_ms: 0,
            max_delay_ms: 0,
            backoff_multiplier: 1.0,
        }
    }

    /// Delay before retry number `attempt` (zero-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> u32 {
        let delay = self.initial_delay_ms as f32 * self.backoff_multiplier.powi(attempt as i32);
        (delay as u32).min(self.max_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    /// How long a response is served without refetching. Zero disables caching.
    pub stale_ms: u32,
    /// Extra attempts after the first failure.
    pub retries: u32,
    pub retry: RetryPolicy,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_ms: 30_000,
            retries: 2,
            retry: RetryPolicy::default(),
        }
    }
}

impl QueryOptions {
    pub fn no_cache() -> Self {
        Self {
            stale_ms: 0,
            ..Self::default()
        }
    }

    pub fn fresh_for(stale_ms: u32) -> Self {
        Self {
            stale_ms,
            ..Self::default()
        }
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Failures worth another attempt: transport errors, timeouts, throttling and 5xx.
pub fn is_retryable(error: &ApiError) -> bool {
    match error {
        ApiError::Network(_) => true,
        ApiError::Http { status, .. } => matches!(*status, 408 | 429 | 500..=599),
        ApiError::Deserialize(_) | ApiError::Rejected { .. } => false,
    }
}

pub trait Clock {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        now_ms()
    }
}

struct CacheEntry {
    value: Rc<dyn Any>,
    fetched_at: i64,
}

/// Response cache. Clones share the same entries.
#[derive(Clone)]
pub struct QueryCache {
    entries: Rc<RefCell<HashMap<QueryKey, CacheEntry>>>,
    clock: Rc<dyn Clock>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::with_clock(Rc::new(SystemClock))
    }

    pub fn with_clock(clock: Rc<dyn Clock>) -> Self {
        Self {
            entries: Rc::new(RefCell::new(HashMap::new())),
            clock,
        }
    }

    /// Cached value for `key` regardless of age.
    pub fn peek<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.entries
            .borrow()
            .get(key)
            .and_then(|entry| entry.value.downcast_ref::<T>().cloned())
    }

    /// Cached value for `key` if younger than `stale_ms`.
    pub fn fresh<T: Clone + 'static>(&self, key: &QueryKey, stale_ms: u32) -> Option<T> {
        if stale_ms == 0 {
            return None;
        }
        let now = self.clock.now_ms();
        let entries = self.entries.borrow();
        let entry = entries.get(key)?;
        if now - entry.fetched_at >= i64::from(stale_ms) {
            return None;
        }
        entry.value.downcast_ref::<T>().cloned()
    }

    pub fn insert<T: 'static>(&self, key: QueryKey, value: T) {
        let fetched_at = self.clock.now_ms();
        self.entries.borrow_mut().insert(
            key,
            CacheEntry {
                value: Rc::new(value),
                fetched_at,
            },
        );
    }

    pub fn invalidate(&self, key: &QueryKey) {
        self.entries.borrow_mut().remove(key);
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serve `key` from cache or run `fetch`, retrying transient failures.
    pub async fn get<T, F, Fut>(
        &self,
        key: QueryKey,
        options: &QueryOptions,
        mut fetch: F,
    ) -> Result<T, ApiError>
    where
        T: Clone + 'static,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if let Some(hit) = self.fresh::<T>(&key, options.stale_ms) {
            crate::log_debug!("query: cache hit {}?{}", key.resource, key.params);
            return Ok(hit);
        }
        crate::log_debug!("query: fetching {}?{}", key.resource, key.params);

        let mut attempt = 0;
        loop {
            match fetch().await {
                Ok(value) => {
                    if options.stale_ms > 0 {
                        self.insert(key, value.clone());
                    }
                    return Ok(value);
                }
                Err(e) if attempt < options.retries && is_retryable(&e) => {
                    let delay = options.retry.delay_for_attempt(attempt);
                    crate::log_warn!(
                        "query: {} failed ({}), retrying in {}ms (attempt {})",
                        key.resource,
                        e,
                        delay,
                        attempt + 1
                    );
                    sleep_ms(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    crate::log_error!("query: {} failed: {}", key.resource, e);
                    return Err(e);
                }
            }
        }
    }
}
