//! Two-forest matching engine.
//!
//! Owns the authorization (allow) and ban (deny) forests, resolves records
//! by username once a host has matched, and caches resolved lookups.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::glob::glob_match;
use crate::host::split_labels;
use crate::tree::MatchTree;
use crate::types::{CacheKey, MaskRule, Record, RecordKind};

/// Default LRU cache size
pub const DEFAULT_CACHE_SIZE: usize = 1024;

/// Cache value type: the resolved record, if any
type CacheValue<R> = Option<Arc<R>>;

/// The matching engine: one pattern forest per record kind plus a result
/// cache. Records are inserted during configuration and looked up for every
/// connecting client; there is no removal — reconfiguration builds a fresh
/// engine (see [`SharedEngine`]).
pub struct Engine<R> {
    allow: MatchTree<Arc<R>>,
    deny: MatchTree<Arc<R>>,
    cache: Mutex<LruCache<CacheKey, CacheValue<R>>>,
}

impl<R: Record> Engine<R> {
    pub fn new(cache_size: usize) -> Self {
        let cache_size = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            allow: MatchTree::new(),
            deny: MatchTree::new(),
            cache: Mutex::new(LruCache::new(cache_size)),
        }
    }

    /// Insert an authorization (I-line) record.
    pub fn add_allow(&mut self, record: R) {
        Self::insert(&mut self.allow, Arc::new(record));
        self.cache.lock().clear();
    }

    /// Insert a ban (K-line) record.
    pub fn add_deny(&mut self, record: R) {
        Self::insert(&mut self.deny, Arc::new(record));
        self.cache.lock().clear();
    }

    fn insert(tree: &mut MatchTree<Arc<R>>, record: Arc<R>) {
        let labels = split_labels(record.hostname_pattern());
        if labels.is_empty() {
            debug!("dropping record with empty hostname pattern");
            return;
        }
        tree.insert(&labels, Arc::clone(&record));
    }

    /// Find the authorization record for a connecting client, if any.
    pub fn find_authorization(&self, username: &str, hostname: &str) -> Option<Arc<R>> {
        self.find(RecordKind::Allow, &self.allow, username, hostname)
    }

    /// Find the ban record covering a connecting client, if any.
    pub fn find_ban(&self, username: &str, hostname: &str) -> Option<Arc<R>> {
        self.find(RecordKind::Deny, &self.deny, username, hostname)
    }

    fn find(
        &self,
        kind: RecordKind,
        tree: &MatchTree<Arc<R>>,
        username: &str,
        hostname: &str,
    ) -> Option<Arc<R>> {
        let key = CacheKey::new(kind, username, hostname);

        let mut cache = self.cache.lock();

        if let Some(cached) = cache.get(&key) {
            return cached.clone();
        }

        // Cache miss — compute while holding the lock so concurrent lookups
        // for the same client do not race to recompute the entry. Matching
        // is CPU-only, no I/O.
        let result = Self::resolve(tree, username, hostname);
        cache.put(key, result.clone());

        result
    }

    /// Host match through the forest, then the first attached record whose
    /// username pattern matches. Host and username conditions are
    /// independent and both required.
    fn resolve(tree: &MatchTree<Arc<R>>, username: &str, hostname: &str) -> Option<Arc<R>> {
        let labels = split_labels(hostname);
        let records = tree.find(&labels)?;
        records
            .iter()
            .find(|record| glob_match(record.username_pattern(), username))
            .cloned()
    }

    /// Number of authorization records inserted.
    pub fn allow_count(&self) -> usize {
        self.allow.len()
    }

    /// Number of ban records inserted.
    pub fn deny_count(&self) -> usize {
        self.deny.len()
    }

    /// Clear the result cache.
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }
}

/// Build an engine from parsed mask rules.
pub fn compile(rules: Vec<MaskRule>, cache_size: usize) -> Engine<MaskRule> {
    let mut engine = Engine::new(cache_size);
    for rule in rules {
        match rule.kind {
            RecordKind::Allow => engine.add_allow(rule),
            RecordKind::Deny => engine.add_deny(rule),
        }
    }
    engine
}

/// Atomically published engine handle.
///
/// A reconfiguration builds a fresh [`Engine`] and [`publish`]es it; there
/// is no incremental removal. Readers take a cheap `Arc` clone and keep
/// searching the version they started with.
///
/// [`publish`]: SharedEngine::publish
pub struct SharedEngine<R> {
    current: RwLock<Arc<Engine<R>>>,
}

impl<R: Record> SharedEngine<R> {
    pub fn new(engine: Engine<R>) -> Self {
        Self {
            current: RwLock::new(Arc::new(engine)),
        }
    }

    /// The currently published engine.
    pub fn current(&self) -> Arc<Engine<R>> {
        self.current.read().clone()
    }

    /// Swap in a freshly built engine.
    pub fn publish(&self, engine: Engine<R>) {
        debug!(
            allow = engine.allow_count(),
            deny = engine.deny_count(),
            "publishing rebuilt engine"
        );
        *self.current.write() = Arc::new(engine);
    }

    pub fn find_authorization(&self, username: &str, hostname: &str) -> Option<Arc<R>> {
        self.current().find_authorization(username, hostname)
    }

    pub fn find_ban(&self, username: &str, hostname: &str) -> Option<Arc<R>> {
        self.current().find_ban(username, hostname)
    }
}
