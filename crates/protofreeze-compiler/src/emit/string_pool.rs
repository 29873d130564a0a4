//! Content-addressed string pool.
//!
//! Strings are interned during traversal in whatever order the walker meets
//! them. [`StringPoolBuilder::finish`] sorts the distinct contents bytewise
//! and lays them out back to back, so the final pool depends only on the set
//! of strings, never on visit order.

use std::collections::HashMap;

/// Reference to an interned string. Equal contents share one reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoolRef(u32);

/// Collects distinct string contents.
#[derive(Debug, Default)]
pub struct StringPoolBuilder {
    lookup: HashMap<Box<[u8]>, PoolRef>,
    /// Contents in first-seen order; `PoolRef` indexes this.
    contents: Vec<Box<[u8]>>,
}

impl StringPoolBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `bytes`. Equal contents always yield the same reference.
    pub fn intern(&mut self, bytes: &[u8]) -> PoolRef {
        if let Some(&r) = self.lookup.get(bytes) {
            return r;
        }

        let r = PoolRef(self.contents.len() as u32);
        self.contents.push(bytes.into());
        self.lookup.insert(bytes.into(), r);
        r
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Sort by content and assign offsets and indices.
    pub fn finish(self) -> StringPool {
        let mut order: Vec<usize> = (0..self.contents.len()).collect();
        order.sort_by(|&a, &b| self.contents[a].cmp(&self.contents[b]));

        let mut entries = Vec::with_capacity(order.len());
        let mut by_content = HashMap::with_capacity(order.len());
        let mut blob = Vec::new();

        for (index, &seen) in order.iter().enumerate() {
            let content = self.contents[seen].clone();
            let index = index as u32;
            by_content.insert(content.clone(), index);
            entries.push(PoolEntry {
                offset: blob.len() as u32,
                index,
                content,
            });
            blob.extend_from_slice(&self.contents[seen]);
        }

        StringPool {
            entries,
            by_content,
            blob,
        }
    }
}

/// One distinct string in the final pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolEntry {
    pub content: Box<[u8]>,
    /// Byte offset into [`StringPool::blob`].
    pub offset: u32,
    /// Position in pool order.
    pub index: u32,
}

impl PoolEntry {
    pub fn len(&self) -> u32 {
        self.content.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// The sorted, immutable pool.
#[derive(Clone, Debug, Default)]
pub struct StringPool {
    entries: Vec<PoolEntry>,
    by_content: HashMap<Box<[u8]>, u32>,
    blob: Vec<u8>,
}

impl StringPool {
    pub fn index_of(&self, bytes: &[u8]) -> Option<u32> {
        self.by_content.get(bytes).copied()
    }

    pub fn entries(&self) -> &[PoolEntry] {
        &self.entries
    }

    /// All contents concatenated in pool order.
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.blob.len()
    }
}
