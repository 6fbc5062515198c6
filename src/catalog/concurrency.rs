//! Async tasks, threads and scoped overrides
//!
//! The harness runs every case synchronously, so async demonstrations bring
//! their own single-threaded runtime and block on it.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;
use std::time::Duration;

use futures_util::future::join_all;
use serde::Serialize;
use serde_json::json;

use crate::harness::FeatureCase;

#[derive(Debug, Clone, Serialize)]
pub struct Fetched {
    pub url: String,
    pub data: String,
}

/// Pretend to fetch `url`
pub async fn fetch_data(url: &str) -> Fetched {
    tokio::time::sleep(Duration::from_millis(10)).await;
    Fetched {
        url: url.to_string(),
        data: "sample data".to_string(),
    }
}

/// Fetch all `urls` concurrently, preserving order
pub async fn gather_data(urls: &[&str]) -> Vec<Fetched> {
    join_all(urls.iter().map(|url| fetch_data(url))).await
}

/// Restores the original value of a slot when dropped
pub struct Override<'a, T> {
    slot: &'a mut T,
    original: Option<T>,
}

impl<'a, T> Override<'a, T> {
    pub fn new(slot: &'a mut T, temporary: T) -> Self {
        let original = std::mem::replace(slot, temporary);
        Self {
            slot,
            original: Some(original),
        }
    }
}

impl<T> Deref for Override<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &*self.slot
    }
}

impl<T> DerefMut for Override<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut *self.slot
    }
}

impl<T> Drop for Override<'_, T> {
    fn drop(&mut self) {
        if let Some(original) = self.original.take() {
            *self.slot = original;
        }
    }
}

pub(super) fn cases() -> Vec<FeatureCase> {
    vec![
        FeatureCase::new("async_gather", || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            Ok(runtime.block_on(gather_data(&["url1", "url2", "url3"])))
        }),
        FeatureCase::new("thread_counter", || {
            let counter = AtomicU32::new(0);
            thread::scope(|scope| {
                for _ in 0..4 {
                    scope.spawn(|| {
                        for _ in 0..250 {
                            counter.fetch_add(1, Ordering::Relaxed);
                        }
                    });
                }
            });
            Ok(json!({ "threads": 4, "count": counter.load(Ordering::Relaxed) }))
        }),
        FeatureCase::new("scoped_override", || {
            let mut level = String::from("info");
            let during = {
                let guard = Override::new(&mut level, String::from("trace"));
                let seen = guard.as_str().to_string();
                seen
            };
            anyhow::ensure!(level == "info", "override leaked past its scope");
            Ok(json!({ "during": during, "after": level }))
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gather_preserves_order() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let fetched = runtime.block_on(gather_data(&["a", "b"]));
        let urls: Vec<_> = fetched.iter().map(|f| f.url.as_str()).collect();
        assert_eq!(urls, ["a", "b"]);
    }

    #[test]
    fn test_override_restores_on_drop() {
        let mut value = 1;
        {
            let mut guard = Override::new(&mut value, 2);
            assert_eq!(*guard, 2);
            *guard = 3;
        }
        assert_eq!(value, 1);
    }

    #[test]
    fn test_thread_counter_case() {
        let case = cases()
            .into_iter()
            .find(|c| c.name() == "thread_counter")
            .unwrap();
        assert_eq!(case.invoke().unwrap()["count"], 1000);
    }
}
