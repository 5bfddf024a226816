use anyhow::Result;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default bucket count, sized for manifests around 100k URLs so
/// collision chains stay short.
pub const DEFAULT_BUCKET_COUNT: usize = 20_000;

/// One manifest URL and its running hit counter. The URL is fixed at
/// insertion; only the counter mutates, and only atomically.
#[derive(Debug)]
pub struct CounterEntry {
    url: String,
    hits: AtomicU64,
}

impl CounterEntry {
    fn new(url: String) -> Self {
        CounterEntry {
            url,
            hits: AtomicU64::new(0),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Atomic fetch-and-add, safe to call from any number of threads
    /// concurrently. No lock is held around the lookup that produced
    /// this entry; the table's structure is frozen so the entry's
    /// identity cannot change underneath us.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }
}

/// Mutable construction phase of the counting table. Single-threaded;
/// consumed by `freeze()` before any concurrent access begins.
#[derive(Debug)]
pub struct TableBuilder {
    buckets: Vec<Vec<CounterEntry>>,
}

impl TableBuilder {
    pub fn with_buckets(bucket_count: usize) -> Result<Self> {
        if bucket_count < 1 {
            anyhow::bail!("Bucket count must be at least 1, got {}", bucket_count);
        }

        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, Vec::new);
        Ok(TableBuilder { buckets })
    }

    /// Inserts a URL with its counter at zero. Returns false if the URL
    /// was already present (first occurrence wins, counter untouched).
    pub fn insert(&mut self, url: &str) -> bool {
        let index = bucket_index(url, self.buckets.len());
        if self.buckets[index].iter().any(|entry| entry.url == url) {
            return false;
        }

        self.buckets[index].push(CounterEntry::new(url.to_string()));
        true
    }

    /// Ends the construction phase. The returned table exposes lookups
    /// and atomic increments only; no further structural mutation is
    /// possible.
    pub fn freeze(self) -> CountingTable {
        let len = self.buckets.iter().map(Vec::len).sum();
        CountingTable {
            buckets: self.buckets,
            len,
        }
    }
}

/// Fixed-size chained hash table mapping URL to an atomic hit counter.
/// The bucket array, chains, and key strings are immutable, which is
/// what makes lock-free concurrent traversal sound.
#[derive(Debug)]
pub struct CountingTable {
    buckets: Vec<Vec<CounterEntry>>,
    len: usize,
}

impl CountingTable {
    pub fn get(&self, url: &str) -> Option<&CounterEntry> {
        let index = bucket_index(url, self.buckets.len());
        self.buckets[index].iter().find(|entry| entry.url == url)
    }

    /// Number of distinct URLs in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Visits every entry exactly once, in bucket order.
    pub fn entries(&self) -> impl Iterator<Item = &CounterEntry> {
        self.buckets.iter().flat_map(|bucket| bucket.iter())
    }
}

// djb2: hash * 33 + byte, seeded with 5381.
fn hash_djb2(url: &str) -> u64 {
    let mut hash: u64 = 5381;
    for &byte in url.as_bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(u64::from(byte));
    }
    hash
}

fn bucket_index(url: &str, bucket_count: usize) -> usize {
    (hash_djb2(url) % bucket_count as u64) as usize
}
