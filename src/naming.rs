//! URL-safe identifiers for entries and topics.
//!
//! An identifier is derived from a title in two steps:
//!
//! - [`slug_base`] lowercases the title and replaces every character outside
//!   `[a-z0-9]` with `_`:
//!   - `"Spring Trip"` → `spring_trip`
//!   - `"C++ & Rust!"` → `c_____rust_`
//!   - `"Café"` → `caf_`
//! - [`IdAllocator::allocate`] keeps identifiers unique across one generation
//!   run. The first title with a given base gets the bare base; later ones get
//!   a numeric suffix (`spring_trip1`, `spring_trip2`, ...).
//!
//! The allocator is owned by a single run. A new run starts with a fresh
//! allocator (or calls [`IdAllocator::reset`]), so identifiers never depend
//! on what an earlier run in the same process produced.

use std::collections::{HashMap, HashSet};

/// Lowercase `title` and map everything outside `[a-z0-9]` to `_`.
pub fn slug_base(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Hands out run-unique identifiers.
#[derive(Debug, Default)]
pub struct IdAllocator {
    used: HashSet<String>,
    /// Next suffix to try for each base.
    counters: HashMap<String, usize>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new identifier for `title`, distinct from every identifier this
    /// allocator returned before.
    pub fn allocate(&mut self, title: &str) -> String {
        let base = slug_base(title);
        if self.used.insert(base.clone()) {
            return base;
        }
        // A suffixed id can collide with a bare title ending in digits
        // ("a" + "1" vs. "a1"), so keep counting until the id is free.
        let counter = self.counters.entry(base.clone()).or_insert(1);
        loop {
            let candidate = format!("{base}{counter}");
            *counter += 1;
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// Mark `id` as taken without handing it out.
    pub fn reserve(&mut self, id: impl Into<String>) {
        self.used.insert(id.into());
    }

    /// Forget every identifier handed out so far.
    pub fn reset(&mut self) {
        self.used.clear();
        self.counters.clear();
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
