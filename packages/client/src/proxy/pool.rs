//! Proxy pool and per-call selection
//!
//! The pool is split once when the dial function is built and never changes
//! afterwards. Each call picks independently, with replacement.

use std::sync::Arc;

/// Ordered list of proxy URL strings, always holding at least one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyPool {
    entries: Arc<[String]>,
}

impl ProxyPool {
    /// Split a comma-separated list, trimming each entry.
    ///
    /// Empty entries are kept; they fail at URL parse time when picked.
    #[must_use]
    pub fn parse(urls: &str) -> Self {
        Self {
            entries: urls.split(',').map(|entry| entry.trim().to_owned()).collect(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: splitting any string yields at least one entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Source of selection indices. Fairness matters, unpredictability does not.
pub trait RandomSource: Send + Sync {
    /// An index in `0..len`; `len` is never zero.
    fn index(&self, len: usize) -> usize;
}

/// Uniform selection from fastrand's thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastRand;

impl RandomSource for FastRand {
    fn index(&self, len: usize) -> usize {
        fastrand::usize(..len)
    }
}

/// Pick one entry from the pool.
#[must_use]
pub fn pick<'a>(pool: &'a ProxyPool, random: &dyn RandomSource) -> &'a str {
    let len = pool.len();
    &pool.entries[random.index(len) % len]
}
