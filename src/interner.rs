//! String pool.
//!
//! The core only needs somewhere to intern filenames and whole-file source
//! text and get back a cheap, pointer-comparable handle. [`StringPool`] is
//! the interface the core programs against; [`Interner`] is the bundled
//! hash-bucketed arena implementation, used by `Reader::push` and by tests.
//! A caller embedding this crate in a larger driver may supply its own pool
//! as long as it implements the trait.

use std::collections::HashMap;
use std::hash::{BuildHasher, Hash, Hasher, RandomState};

/// A handle into a [`StringPool`]. Two symbols compare equal iff they were
/// interned from equal byte content (value equality stands in for the
/// original's pointer equality, since the pool deduplicates on intern).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub u32);

/// External string-pool interface. The core calls `intern` for filenames
/// and source text, and `intern_cstring` when a caller-assembled builder
/// (e.g. a decoded string-literal buffer) needs to be pooled too.
pub trait StringPool {
    fn intern(&mut self, bytes: &str) -> Symbol;
    fn intern_cstring(&mut self, builder: &str) -> Symbol {
        self.intern(builder)
    }
    fn resolve(&self, symbol: Symbol) -> &str;
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    start: usize,
    end: usize,
}

/// Default in-crate string pool: a hash-bucketed dedup table over one
/// growable arena. Entries are never removed; symbols are stable for the
/// life of the pool.
#[derive(Debug, Clone)]
pub struct Interner {
    hasher: RandomState,
    buckets: HashMap<u64, Vec<Symbol>>,
    entries: Vec<Entry>,
    storage: String,
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl Interner {
    pub fn new() -> Self {
        Self {
            hasher: RandomState::new(),
            buckets: HashMap::new(),
            entries: Vec::new(),
            storage: String::new(),
        }
    }

    fn hash_str(&self, s: &str) -> u64 {
        let mut h = self.hasher.build_hasher();
        s.hash(&mut h);
        h.finish()
    }
}

impl StringPool for Interner {
    fn intern(&mut self, s: &str) -> Symbol {
        let hash = self.hash_str(s);
        if let Some(candidates) = self.buckets.get(&hash) {
            for &candidate in candidates {
                if self.resolve(candidate) == s {
                    return candidate;
                }
            }
        }

        let sym = Symbol(self.entries.len() as u32);
        let start = self.storage.len();
        self.storage.push_str(s);
        let end = self.storage.len();

        self.entries.push(Entry { start, end });
        self.buckets.entry(hash).or_default().push(sym);
        sym
    }

    fn resolve(&self, sym: Symbol) -> &str {
        let Some(entry) = self.entries.get(sym.0 as usize) else {
            return "";
        };
        self.storage.get(entry.start..entry.end).unwrap_or("")
    }
}
