//! Version tag -> label list mapping (reader side).
//!
//! The registry resolves which labels apply to an incoming values record.
//! Entries are added when a names record is decoded and never removed; a
//! version tag, once inserted, maps to an immutable label list for the
//! lifetime of the read session.

use crate::error::{Error, Result};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Map from version tag to the label list announced for that tag.
#[derive(Debug, Default)]
pub struct VersionRegistry {
    entries: HashMap<u32, Vec<String>>,
}

impl VersionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the label list announced for `version`.
    ///
    /// Re-announcing a version with identical content is accepted (a
    /// producer may replay its names record); re-announcing it with
    /// different content is a stream-format error.
    pub fn insert(&mut self, version: u32, labels: Vec<String>) -> Result<()> {
        match self.entries.entry(version) {
            Entry::Vacant(slot) => {
                slot.insert(labels);
                Ok(())
            }
            Entry::Occupied(slot) => {
                if *slot.get() == labels {
                    Ok(())
                } else {
                    Err(Error::VersionConflict { version })
                }
            }
        }
    }

    /// Labels announced for `version`, if any.
    pub fn get(&self, version: u32) -> Option<&[String]> {
        self.entries.get(&version).map(Vec::as_slice)
    }

    /// True when `version` has been announced.
    pub fn contains(&self, version: u32) -> bool {
        self.entries.contains_key(&version)
    }

    /// Number of distinct versions announced so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no names record has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
