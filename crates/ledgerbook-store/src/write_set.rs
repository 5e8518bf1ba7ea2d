//! Read observations and pending mutations of one invocation.

use std::collections::BTreeMap;

/// A pending change to one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Set the key to this value.
    Put(Vec<u8>),
    /// Remove the key.
    Delete,
}

impl Mutation {
    /// The value a read of the key sees once this mutation applies.
    #[must_use]
    pub fn into_value(self) -> Option<Vec<u8>> {
        match self {
            Self::Put(value) => Some(value),
            Self::Delete => None,
        }
    }
}

/// What an invocation read and what it wants to write.
///
/// Reads keep the first value observed per key; writes keep the last mutation.
#[derive(Debug, Clone, Default)]
pub struct WriteSet {
    reads: BTreeMap<String, Option<Vec<u8>>>,
    writes: BTreeMap<String, Mutation>,
}

impl WriteSet {
    /// Create an empty write set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Note the committed value observed for `key`.
    pub fn record_read(&mut self, key: &str, observed: Option<Vec<u8>>) {
        self.reads.entry(key.to_string()).or_insert(observed);
    }

    /// Stage a put.
    pub fn put(&mut self, key: &str, value: Vec<u8>) {
        self.writes.insert(key.to_string(), Mutation::Put(value));
    }

    /// Stage a delete.
    pub fn delete(&mut self, key: &str) {
        self.writes.insert(key.to_string(), Mutation::Delete);
    }

    /// The staged mutation for `key`, if any.
    #[must_use]
    pub fn pending(&self, key: &str) -> Option<&Mutation> {
        self.writes.get(key)
    }

    /// Observed reads, in key order.
    pub fn reads(&self) -> impl Iterator<Item = (&str, Option<&[u8]>)> {
        self.reads
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    /// Staged mutations, in key order.
    pub fn writes(&self) -> impl Iterator<Item = (&str, &Mutation)> {
        self.writes.iter().map(|(key, m)| (key.as_str(), m))
    }

    /// Number of staged mutations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// True when nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}
