//! Logical record: labels + values + version + stamp.
//!
//! A [`Record`] is the caller-facing merged view of one sample. On the write
//! side it is created once per producer and reused across many writes; the
//! version tag tracks the label list, and a dirty flag tells the writer when
//! a names record must be (re-)emitted. On the read side records are
//! reconstituted from the two physical sub-streams.

use rand::Rng;

/// One logical statistics sample.
///
/// `values()[i]` corresponds to `labels()[i]` under the record's current
/// version; the two vectors must have equal length by the time the record is
/// written. The version tag identifies the exact label content in force and
/// changes only through [`set_version`](Record::set_version) and
/// [`bump_version`](Record::bump_version).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    labels: Vec<String>,
    values: Vec<f64>,
    version: u32,
    stamp_ns: u64,
    version_dirty: bool,
}

impl Record {
    /// Create an empty record with a random initial version.
    ///
    /// The randomness only needs to make collisions with other
    /// concurrently-recorded streams very unlikely; it is not cryptographic.
    /// Use [`with_version`](Record::with_version) when deterministic
    /// behavior is needed.
    pub fn new() -> Self {
        Self::with_version(rand::thread_rng().gen())
    }

    /// Create an empty record with an explicit initial version.
    pub fn with_version(version: u32) -> Self {
        Record {
            labels: Vec::new(),
            values: Vec::new(),
            version,
            stamp_ns: 0,
            version_dirty: true,
        }
    }

    /// Reconstitute a record on the read side; the version is already
    /// on file, so it starts clean.
    pub(crate) fn from_parts(
        labels: Vec<String>,
        values: Vec<f64>,
        version: u32,
        stamp_ns: u64,
    ) -> Self {
        Record {
            labels,
            values,
            version,
            stamp_ns,
            version_dirty: false,
        }
    }

    /// Ordered label list.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Mutable label list. Changing labels without changing the version
    /// violates the stream contract; call
    /// [`bump_version`](Record::bump_version) after editing.
    pub fn labels_mut(&mut self) -> &mut Vec<String> {
        &mut self.labels
    }

    /// Ordered sample values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mutable sample values.
    pub fn values_mut(&mut self) -> &mut Vec<f64> {
        &mut self.values
    }

    /// Current version tag.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Set the version tag. A no-op if the tag is unchanged; otherwise the
    /// record is marked dirty and the writer will re-emit a names record on
    /// the next write.
    pub fn set_version(&mut self, version: u32) {
        if self.version != version {
            self.version = version;
            self.version_dirty = true;
        }
    }

    /// Increment the version tag by one (wrapping).
    ///
    /// A no-op while the current version is still unpersisted, so repeated
    /// bumps between writes collapse into a single version change.
    pub fn bump_version(&mut self) {
        if !self.version_dirty {
            self.version = self.version.wrapping_add(1);
            self.version_dirty = true;
        }
    }

    /// Sample timestamp, nanoseconds since the epoch.
    pub fn stamp(&self) -> u64 {
        self.stamp_ns
    }

    /// Set the sample timestamp, nanoseconds since the epoch.
    pub fn set_stamp(&mut self, stamp_ns: u64) {
        self.stamp_ns = stamp_ns;
    }

    /// Reserve capacity for `additional` more labels and values.
    pub fn reserve(&mut self, additional: usize) {
        self.labels.reserve(additional);
        self.values.reserve(additional);
    }

    /// Resize both vectors to `len` entries, filling new labels with empty
    /// strings and new values with `0.0`.
    pub fn resize(&mut self, len: usize) {
        self.labels.resize(len, String::new());
        self.values.resize(len, 0.0);
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when the record holds no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// True when the current version has not yet been persisted via a
    /// names record.
    pub(crate) fn is_version_dirty(&self) -> bool {
        self.version_dirty
    }

    /// Called by the writer after the names record for the current version
    /// has been durably appended.
    pub(crate) fn mark_version_clean(&mut self) {
        self.version_dirty = false;
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}
