//! In-memory memoization of contribution reports.
//!
//! Reports are keyed by the dataset fingerprint and the active field filter,
//! so toggling back to a previously seen selection reuses the earlier result.
//! Entries are evicted oldest-first once the cache is full.

use crate::aggregate::FieldFilter;
use crate::models::ContributionReport;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Default number of reports kept
pub const DEFAULT_CAPACITY: usize = 32;

/// Result of a cache lookup
#[derive(Debug, Clone)]
pub enum CacheResult<T> {
    /// Item was found
    Hit(T),

    /// Item was not found
    Miss,
}

impl<T> CacheResult<T> {
    pub fn is_hit(&self) -> bool {
        matches!(self, CacheResult::Hit(_))
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Memo table for reports
#[derive(Debug)]
pub struct ReportCache {
    entries: HashMap<String, Arc<ContributionReport>>,
    order: VecDeque<String>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache holding at most `capacity` reports (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Generate a cache key for a dataset and filter
    fn cache_key(fingerprint: &str, filter: &FieldFilter) -> String {
        let filter_part = match filter {
            FieldFilter::All => "*".to_string(),
            FieldFilter::Only(fields) => fields
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join("\u{1f}"),
        };
        let input = format!("{}|{}|{}", fingerprint, filter.is_restricted(), filter_part);
        format!("{:x}", md5::compute(input.as_bytes()))
    }

    /// Look up a report
    pub fn get(&mut self, fingerprint: &str, filter: &FieldFilter) -> CacheResult<Arc<ContributionReport>> {
        let key = Self::cache_key(fingerprint, filter);
        match self.entries.get(&key) {
            Some(report) => {
                self.hits += 1;
                tracing::debug!("Cache HIT for report: {}", key);
                CacheResult::Hit(Arc::clone(report))
            }
            None => {
                self.misses += 1;
                tracing::debug!("Cache MISS for report: {}", key);
                CacheResult::Miss
            }
        }
    }

    /// Store a report, evicting the oldest entry if full
    pub fn insert(
        &mut self,
        fingerprint: &str,
        filter: &FieldFilter,
        report: ContributionReport,
    ) -> Arc<ContributionReport> {
        let key = Self::cache_key(fingerprint, filter);
        let report = Arc::new(report);

        if self.entries.insert(key.clone(), Arc::clone(&report)).is_none() {
            self.order.push_back(key);
            while self.order.len() > self.capacity {
                if let Some(oldest) = self.order.pop_front() {
                    self.entries.remove(&oldest);
                    tracing::trace!("Evicted cached report: {}", oldest);
                }
            }
        }

        report
    }

    /// Return the cached report or compute and store it
    pub fn get_or_insert_with<F>(
        &mut self,
        fingerprint: &str,
        filter: &FieldFilter,
        compute: F,
    ) -> Arc<ContributionReport>
    where
        F: FnOnce() -> ContributionReport,
    {
        match self.get(fingerprint, filter) {
            CacheResult::Hit(report) => report,
            CacheResult::Miss => self.insert(fingerprint, filter, compute()),
        }
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}
